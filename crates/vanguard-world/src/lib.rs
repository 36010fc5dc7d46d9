//! # Vanguard World
//!
//! 几何类型与外部世界能力抽象
//!
//! ## 模块
//!
//! - `pose`: 位姿类型（位置 + 单位四元数姿态）与距离/夹角工具
//! - `transform`: 坐标系变换服务的 trait 抽象（外部协作方实现）
//! - `costmap`: 只读代价地图的 trait 抽象（黑板仅透传，不做融合）
//!
//! ## 架构位置
//!
//! ```text
//! Decision Engine
//!     ↓ 读取融合结果
//! Blackboard (vanguard-blackboard)
//!     ↓ FrameTransformer / CostmapProvider trait
//! World Layer (此 crate)
//!     ↓ 由定位/建图子系统实现
//! External Services
//! ```

pub mod costmap;
pub mod pose;
pub mod transform;

// 重新导出常用类型
pub use costmap::{CostmapProvider, OccupancyGrid};
pub use pose::{Pose, StampedPose};
pub use transform::{FrameTransformer, TransformError};
