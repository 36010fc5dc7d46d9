//! 自身位姿解析
//!
//! 按需查询外部变换服务：机器人本体坐标系原点在世界系下的位姿。
//! 查询失败时记日志并返回最近一次成功的缓存值（从未成功过则返回
//! 原点位姿），调用方必须容忍过期或默认位姿。
//!
//! 变换查询在持锁之外进行，写锁只用于发布结果。

use crate::context::BlackboardContext;
use crate::metrics::BlackboardMetrics;
use std::sync::Arc;
use tracing::error;
use vanguard_world::{FrameTransformer, Pose, StampedPose};

/// 自身位姿提供器
#[derive(Clone)]
pub(crate) struct SelfPoseProvider {
    ctx: Arc<BlackboardContext>,
    transformer: Arc<dyn FrameTransformer>,
    metrics: Arc<BlackboardMetrics>,
    world_frame: String,
    body_frame: String,
}

impl SelfPoseProvider {
    pub fn new(
        ctx: Arc<BlackboardContext>,
        transformer: Arc<dyn FrameTransformer>,
        metrics: Arc<BlackboardMetrics>,
        world_frame: String,
        body_frame: String,
    ) -> Self {
        Self {
            ctx,
            transformer,
            metrics,
            world_frame,
            body_frame,
        }
    }

    /// 解析机器人在世界系下的位姿
    pub fn robot_map_pose(&self) -> Pose {
        let body_origin = StampedPose::identity(&self.body_frame);
        match self.transformer.transform_pose(&body_origin, &self.world_frame) {
            Ok(stamped) => {
                *self.ctx.robot_map_pose.write() = Some(stamped.pose);
                stamped.pose
            },
            Err(e) => {
                self.metrics.inc_transform_failures();
                error!(error = %e, "failed to look up robot pose in world frame, returning cached value");
                (*self.ctx.robot_map_pose.read()).unwrap_or_default()
            },
        }
    }
}
