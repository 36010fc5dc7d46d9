//! 位姿类型与几何工具
//!
//! 位姿 = 位置（米）+ 姿态（单位四元数）。黑板内部的滞回判据只关心
//! 平面欧氏距离和最短路径角差，这两个工具都定义在 `Pose` 上。

use nalgebra::{Point3, UnitQuaternion};

/// 某一坐标系下的位姿
///
/// `Copy` 类型：位姿会被高频复制进 `ArcSwap` 槽位，保持零堆分配。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 位置（米）
    pub position: Point3<f64>,
    /// 姿态（单位四元数）
    pub orientation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// 原点位姿（零位置 + 单位姿态）
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// 由平面坐标和偏航角构建（roll = pitch = 0）
    pub fn from_xy_yaw(x: f64, y: f64, yaw: f64) -> Self {
        Self {
            position: Point3::new(x, y, 0.0),
            orientation: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
        }
    }

    /// 平面欧氏距离（只计 x/y，忽略 z）
    pub fn planar_distance(&self, other: &Pose) -> f64 {
        let dx = self.position.x - other.position.x;
        let dy = self.position.y - other.position.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 与另一位姿姿态间的最短路径角差（弧度，非负）
    pub fn angle_to(&self, other: &Pose) -> f64 {
        self.orientation.angle_to(&other.orientation)
    }

    /// 偏航角（弧度）
    pub fn yaw(&self) -> f64 {
        self.orientation.euler_angles().2
    }
}

/// 带坐标系标签的位姿
///
/// 变换服务按"最近可用时刻"解析，因此这里只携带坐标系名，不携带时间戳。
#[derive(Debug, Clone, PartialEq)]
pub struct StampedPose {
    /// 位姿所在坐标系名
    pub frame_id: String,
    pub pose: Pose,
}

impl StampedPose {
    pub fn new(frame_id: impl Into<String>, pose: Pose) -> Self {
        Self {
            frame_id: frame_id.into(),
            pose,
        }
    }

    /// 某坐标系自身的原点位姿（用于查询"该坐标系在目标系下的位姿"）
    pub fn identity(frame_id: impl Into<String>) -> Self {
        Self::new(frame_id, Pose::identity())
    }
}
