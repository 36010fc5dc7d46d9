//! # Vanguard Blackboard
//!
//! 决策引擎的共享状态聚合器（blackboard）
//!
//! 把异步、乱序、突发到达的裁判系统遥测和感知反馈融合成一个一致的
//! 视图：遥测按类别做"最新值"快照，伤害事件折叠成按方向的受击计数，
//! 敌方检测经坐标变换与滞回门融合成世界系位姿，方向类派生量附带
//! 时间窗口过期语义。
//!
//! ## 模块
//!
//! - `blackboard`: 对外 API（`Blackboard` + Builder）
//! - `config`: 可从 TOML 加载的运行参数
//! - `state`: 决策引擎读到的聚合状态类型
//! - `stale`: 通用过期门 `StaleGuard<T>`
//! - `session`: 感知会话抽象（`PerceptionSource`）
//! - `metrics`: 运行指标
//! - `error`: 错误类型
//!
//! ## 并发模型
//!
//! 生产者（遥测摄入、感知反馈、伤害事件）运行在不受本层控制的调度
//! 上下文中，可能多线程并发；决策引擎在自己的循环里同步拉取。每个
//! 实体独立做原子替换（`ArcSwap`）或细粒度锁，读取方看到的永远是
//! 完整的新值或完整的旧值。坐标变换等可能阻塞的外部调用一律发生在
//! 临界区之外，锁只用于发布结果。
//!
//! ## 错误策略
//!
//! 变换失败、畸形输入、数据缺失三类情况全部就地降级：记日志、返回
//! 旧值或文档化默认值。查询接口永远不向决策引擎返回错误。

mod blackboard;
mod config;
mod context;
mod error;
mod fusion;
mod ingest;
mod metrics;
mod self_pose;
mod session;
mod stale;
mod state;

// 重新导出常用类型
pub use blackboard::{Blackboard, BlackboardBuilder};
pub use config::BlackboardConfig;
pub use error::BlackboardError;
pub use metrics::{BlackboardMetrics, MetricsSnapshot};
pub use session::{PerceptionSession, PerceptionSource};
pub use stale::StaleGuard;
pub use state::{ArmorAttacked, DamageCounters, RobotDetected};
