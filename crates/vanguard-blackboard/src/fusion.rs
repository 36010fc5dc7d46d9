//! 敌方位姿融合
//!
//! 把感知反馈中的相对检测换算成世界坐标系下的融合位姿：
//! 先在传感器坐标系内由相对位置构造候选位姿，经外部变换服务换到
//! 世界系，再过滞回门。变换失败是非致命的：记日志、保留旧值，
//! 下游按过期数据容忍。
//!
//! 变换调用可能阻塞在外部服务上，整个路径不持有任何共享状态锁；
//! 结果发布只是一次 `ArcSwap::store`。

use crate::config::BlackboardConfig;
use crate::context::BlackboardContext;
use crate::metrics::BlackboardMetrics;
use crate::state::RobotDetected;
use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{error, trace};
use vanguard_msgs::PerceptionFeedback;
use vanguard_world::{FrameTransformer, Pose, StampedPose};

/// 敌方位姿融合器
#[derive(Clone)]
pub(crate) struct EnemyFusion {
    ctx: Arc<BlackboardContext>,
    transformer: Arc<dyn FrameTransformer>,
    metrics: Arc<BlackboardMetrics>,
    /// 滞回：平移超过此值才接受候选（米）
    position_hysteresis_m: f64,
    /// 滞回：角差超过此值才接受候选（弧度）
    angle_hysteresis_rad: f64,
    world_frame: String,
    sensor_frame: String,
}

impl EnemyFusion {
    pub fn new(
        ctx: Arc<BlackboardContext>,
        transformer: Arc<dyn FrameTransformer>,
        metrics: Arc<BlackboardMetrics>,
        config: &BlackboardConfig,
    ) -> Self {
        Self {
            ctx,
            transformer,
            metrics,
            position_hysteresis_m: config.position_hysteresis_m,
            angle_hysteresis_rad: config.angle_hysteresis_rad,
            world_frame: config.world_frame.clone(),
            sensor_frame: config.sensor_frame.clone(),
        }
    }

    /// 处理一帧感知反馈
    ///
    /// - `detected == false`：只清检测标志，融合位姿保持最后已知值
    /// - `detected == true`：构造候选位姿 → 世界系变换 → 滞回门
    pub fn on_feedback(&self, feedback: &PerceptionFeedback) {
        self.metrics.inc_feedback_frames();

        if !feedback.detected {
            self.ctx.enemy_detected.store(false, Ordering::Release);
            return;
        }
        self.ctx.enemy_detected.store(true, Ordering::Release);

        let Some(rel) = feedback.position else {
            return;
        };

        // 与伤害分类器平行的方向分类流，驱动 robot_detected 过期门
        self.ctx.robot_detected.set(classify_bearing(rel.x, rel.y));

        // 航向取 atan(y/x) 而非 atan2(y, x)：x = 0 时 IEEE 除法给出
        // ±inf，atan 收敛到 ±π/2；x < 0 的目标会落到相邻象限。
        // 恰好 (0, 0) 的帧会得到 0/0 = NaN 航向，且仅靠平移判据仍可
        // 通过滞回门，之后的 angle_to 比较全为假。传感器不会上报
        // 零距离检测，此处不做特判。下游对这些语义有依赖，改动前先
        // 核对决策树的朝向逻辑。
        let yaw = (rel.y / rel.x).atan();
        let candidate = StampedPose::new(&self.sensor_frame, Pose::from_xy_yaw(rel.x, rel.y, yaw));

        let world = match self.transformer.transform_pose(&candidate, &self.world_frame) {
            Ok(stamped) => stamped.pose,
            Err(e) => {
                self.metrics.inc_transform_failures();
                error!(error = %e, "failed to transform enemy pose from sensor frame to world frame");
                return;
            },
        };

        let current = **self.ctx.enemy_pose.load();
        let moved = world.planar_distance(&current);
        let turned = world.angle_to(&current);
        if moved > self.position_hysteresis_m || turned > self.angle_hysteresis_rad {
            self.ctx.enemy_pose.store(Arc::new(world));
            self.metrics.inc_fusion_accepted();
            trace!(moved, turned, "enemy pose updated");
        } else {
            self.metrics.inc_fusion_suppressed();
            trace!(moved, turned, "enemy pose candidate within hysteresis, kept previous value");
        }
    }
}

/// 把传感器系下的相对方位切成前/左/后/右四个象限
///
/// x 向前、y 向左；边界（±π/4 等）归入前后方。
pub(crate) fn classify_bearing(x: f64, y: f64) -> RobotDetected {
    let bearing = y.atan2(x);
    if bearing.abs() <= FRAC_PI_4 {
        RobotDetected::Front
    } else if bearing.abs() >= 3.0 * FRAC_PI_4 {
        RobotDetected::Back
    } else if bearing > 0.0 {
        RobotDetected::Left
    } else {
        RobotDetected::Right
    }
}
