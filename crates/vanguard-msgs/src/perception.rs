//! 感知反馈消息
//!
//! 装甲检测会话在建立后异步推送反馈帧。反馈只承诺两件事：
//! 一个布尔检测标志，以及检测成立时传感器坐标系下的相对位置。

use serde::{Deserialize, Serialize};

/// 传感器坐标系下的相对位置（x 向前，y 向左）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
}

/// 一帧感知反馈
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerceptionFeedback {
    /// 本帧是否检测到目标
    pub detected: bool,
    /// 检测到目标时的相对位置；`detected == false` 时通常为 `None`
    pub position: Option<RelativePosition>,
}

impl PerceptionFeedback {
    /// 检测成立的反馈帧
    pub fn detected_at(x: f64, y: f64) -> Self {
        Self {
            detected: true,
            position: Some(RelativePosition { x, y }),
        }
    }

    /// 目标丢失的反馈帧
    pub fn lost() -> Self {
        Self {
            detected: false,
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_constructors() {
        let hit = PerceptionFeedback::detected_at(1.5, -0.4);
        assert!(hit.detected);
        assert_eq!(hit.position, Some(RelativePosition { x: 1.5, y: -0.4 }));

        let lost = PerceptionFeedback::lost();
        assert!(!lost.detected);
        assert!(lost.position.is_none());
    }
}
