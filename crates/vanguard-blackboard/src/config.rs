//! 黑板配置
//!
//! 滞回阈值、过期窗口和坐标系名都可以通过 TOML 覆盖，未出现的字段
//! 取默认值。

use crate::error::BlackboardError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 黑板配置
///
/// # Example
///
/// ```
/// use vanguard_blackboard::BlackboardConfig;
///
/// // 使用默认配置（0.2 m / 0.2 rad 滞回，100 ms / 200 ms 窗口）
/// let config = BlackboardConfig::default();
/// assert_eq!(config.world_frame, "map");
///
/// // 从 TOML 覆盖部分字段
/// let config = BlackboardConfig::from_toml_str(
///     "position_hysteresis_m = 0.3\nsensor_frame = \"front_camera\"",
/// )
/// .unwrap();
/// assert_eq!(config.position_hysteresis_m, 0.3);
/// assert_eq!(config.angle_hysteresis_rad, 0.2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackboardConfig {
    /// 敌方位姿更新的最小平移量（米），低于此值且角差也低于阈值时丢弃候选
    pub position_hysteresis_m: f64,
    /// 敌方位姿更新的最小角差（弧度）
    pub angle_hysteresis_rad: f64,
    /// 装甲受击方向的有效窗口（毫秒），超过后读到 `ArmorAttacked::None`
    pub armor_attacked_window_ms: u64,
    /// 敌方机器人方向的有效窗口（毫秒），超过后读到 `RobotDetected::None`
    pub robot_detected_window_ms: u64,
    /// 遥测摄入队列容量（有界，满则丢弃新记录）
    pub telemetry_channel_capacity: usize,
    /// 世界坐标系名
    pub world_frame: String,
    /// 机器人本体坐标系名
    pub body_frame: String,
    /// 感知传感器坐标系名
    pub sensor_frame: String,
}

impl Default for BlackboardConfig {
    fn default() -> Self {
        Self {
            position_hysteresis_m: 0.2,
            angle_hysteresis_rad: 0.2,
            armor_attacked_window_ms: 100,
            robot_detected_window_ms: 200,
            telemetry_channel_capacity: 64,
            world_frame: "map".to_string(),
            body_frame: "base_link".to_string(),
            sensor_frame: "camera".to_string(),
        }
    }
}

impl BlackboardConfig {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(s: &str) -> Result<Self, BlackboardError> {
        Ok(toml::from_str(s)?)
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, BlackboardError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 装甲受击窗口
    pub fn armor_attacked_window(&self) -> Duration {
        Duration::from_millis(self.armor_attacked_window_ms)
    }

    /// 敌方机器人方向窗口
    pub fn robot_detected_window(&self) -> Duration {
        Duration::from_millis(self.robot_detected_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_values() {
        let config = BlackboardConfig::default();
        assert_eq!(config.position_hysteresis_m, 0.2);
        assert_eq!(config.angle_hysteresis_rad, 0.2);
        assert_eq!(config.armor_attacked_window(), Duration::from_millis(100));
        assert_eq!(config.robot_detected_window(), Duration::from_millis(200));
        assert_eq!(config.telemetry_channel_capacity, 64);
        assert_eq!(config.body_frame, "base_link");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            BlackboardConfig::from_toml_str("armor_attacked_window_ms = 50\nworld_frame = \"odom\"")
                .unwrap();
        assert_eq!(config.armor_attacked_window_ms, 50);
        assert_eq!(config.world_frame, "odom");
        // 未覆盖的字段保持默认
        assert_eq!(config.robot_detected_window_ms, 200);
        assert_eq!(config.sensor_frame, "camera");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(BlackboardConfig::from_toml_str("position_hysteresis_m = \"wide\"").is_err());
    }
}
