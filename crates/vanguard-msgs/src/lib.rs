//! # Vanguard Msgs
//!
//! 裁判系统遥测与感知消息类型定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `referee`: 裁判系统遥测记录（比赛状态、存活、buff、补给、机器人状态等）
//! - `damage`: 伤害事件与装甲方向定义
//! - `perception`: 感知反馈（敌方检测）
//! - `record`: 遥测记录的统一封装（按类别分发）
//!
//! ## 校验
//!
//! 裁判系统以原始整数字段上报枚举值。所有枚举都通过 `num_enum` 的
//! `TryFromPrimitive` 从原始值转换，越界值在边界处被拒绝（`MsgError`），
//! 不会进入黑板状态。

use thiserror::Error;

pub mod damage;
pub mod perception;
pub mod record;
pub mod referee;

// 重新导出常用类型
pub use damage::*;
pub use perception::*;
pub use record::*;
pub use referee::*;

/// 消息层统一错误类型
///
/// 每个变体对应一个原始字段越界的类别，携带原始值便于诊断日志输出。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgError {
    #[error("unknown game state value: {0}")]
    UnknownGameState(u8),
    #[error("unknown game outcome value: {0}")]
    UnknownGameOutcome(u8),
    #[error("unknown bonus zone state value: {0}")]
    UnknownBonusState(u8),
    #[error("unknown supplier state value: {0}")]
    UnknownSupplierState(u8),
    #[error("unknown damage direction value: {0}")]
    UnknownDamageDirection(u8),
}
