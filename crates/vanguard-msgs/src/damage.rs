//! 伤害事件定义
//!
//! 裁判系统按事件上报伤害：伤害类型 + 伤害来源方向。
//! 事件本身是瞬态的，黑板侧将其折叠进按方向的受击计数。

use crate::MsgError;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// 装甲受击方向（伤害来源的原始编码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum DamageDirection {
    Front = 0,
    Back = 1,
    Left = 2,
    Right = 3,
}

impl DamageDirection {
    /// 从原始编码构建，越界值返回 `MsgError::UnknownDamageDirection`
    pub fn from_raw(source: u8) -> Result<Self, MsgError> {
        Self::try_from(source).map_err(|e| MsgError::UnknownDamageDirection(e.number))
    }
}

/// 一次伤害事件
///
/// 字段保持原始编码：`damage_source` 可能携带未定义的方向值，
/// 分类器对未知来源不做任何计数（只告警），因此这里不在构造时拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageEvent {
    /// 伤害类型，非零表示装甲模块伤害
    pub damage_type: u8,
    /// 伤害来源（0=前 1=后 2=左 3=右，其余值未定义）
    pub damage_source: u8,
}

impl DamageEvent {
    /// 是否为装甲模块伤害（`damage_type != 0`）
    pub fn is_armor_hit(&self) -> bool {
        self.damage_type != 0
    }

    /// 解析伤害来源方向，未定义的编码返回 `None`
    pub fn direction(&self) -> Option<DamageDirection> {
        DamageDirection::from_raw(self.damage_source).ok()
    }
}
