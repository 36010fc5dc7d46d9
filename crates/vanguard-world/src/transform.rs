//! 坐标系变换服务抽象
//!
//! 定位子系统维护坐标系树并实现此 trait。黑板只依赖"把一个位姿从
//! 其所在坐标系变换到目标坐标系"这一个能力，失败是显式结果而不是
//! 超时：变换不可用时立即返回错误，由调用方降级到旧值。

use crate::pose::StampedPose;
use thiserror::Error;

/// 变换服务错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// 两坐标系之间当前没有可用变换
    #[error("transform from '{from}' to '{to}' is unavailable")]
    Unavailable { from: String, to: String },

    /// 坐标系名未注册
    #[error("unknown frame: '{0}'")]
    UnknownFrame(String),
}

/// 坐标系变换服务
///
/// 实现方可能阻塞在外部服务上，因此调用方不得在持有共享状态锁时调用。
pub trait FrameTransformer: Send + Sync {
    /// 将 `pose` 从其 `frame_id` 坐标系变换到 `target_frame`，
    /// 使用最近可用时刻的变换关系。
    fn transform_pose(
        &self,
        pose: &StampedPose,
        target_frame: &str,
    ) -> Result<StampedPose, TransformError>;
}
