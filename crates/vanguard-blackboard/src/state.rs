//! 黑板对外暴露的聚合状态类型
//!
//! 这些都是决策引擎读到的纯数据快照。方向枚举采用封闭变体而不是
//! 位标志：观测到的行为里不存在多方向同时上报的场景。

use vanguard_msgs::DamageDirection;

/// 装甲受击方向（带"无/已过期"状态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmorAttacked {
    #[default]
    None,
    Front,
    Left,
    Back,
    Right,
}

impl From<DamageDirection> for ArmorAttacked {
    fn from(direction: DamageDirection) -> Self {
        match direction {
            DamageDirection::Front => ArmorAttacked::Front,
            DamageDirection::Back => ArmorAttacked::Back,
            DamageDirection::Left => ArmorAttacked::Left,
            DamageDirection::Right => ArmorAttacked::Right,
        }
    }
}

/// 敌方机器人出现方向（带"无/已过期"状态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotDetected {
    #[default]
    None,
    Front,
    Left,
    Back,
    Right,
}

/// 按方向的近期受击计数
///
/// 维护语义是"先清零再计数"：任何 `damage_type != 0` 的事件先把
/// 四个计数器全部清零，再对来源方向加一。装甲伤害下每个计数器的
/// 有效上限因此是 1，读取方把它当作最近受击方向的 one-hot 快照用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageCounters {
    pub front: u32,
    pub back: u32,
    pub left: u32,
    pub right: u32,
}

impl DamageCounters {
    /// 以 `[front, back, left, right]` 顺序导出
    pub fn as_array(&self) -> [u32; 4] {
        [self.front, self.back, self.left, self.right]
    }

    /// 四个方向的计数总和
    pub fn total(&self) -> u32 {
        self.front + self.back + self.left + self.right
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn increment(&mut self, direction: DamageDirection) {
        match direction {
            DamageDirection::Front => self.front += 1,
            DamageDirection::Back => self.back += 1,
            DamageDirection::Left => self.left += 1,
            DamageDirection::Right => self.right += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_attacked_from_direction() {
        assert_eq!(
            ArmorAttacked::from(DamageDirection::Front),
            ArmorAttacked::Front
        );
        assert_eq!(
            ArmorAttacked::from(DamageDirection::Right),
            ArmorAttacked::Right
        );
    }

    #[test]
    fn test_counters_reset_and_increment() {
        let mut counters = DamageCounters::default();
        counters.increment(DamageDirection::Left);
        counters.increment(DamageDirection::Left);
        counters.increment(DamageDirection::Back);
        assert_eq!(counters.as_array(), [0, 1, 2, 0]);
        assert_eq!(counters.total(), 3);

        counters.reset();
        assert_eq!(counters.as_array(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_defaults_are_none() {
        assert_eq!(ArmorAttacked::default(), ArmorAttacked::None);
        assert_eq!(RobotDetected::default(), RobotDetected::None);
    }
}
