//! 遥测记录统一封装
//!
//! 传输层把各类裁判系统消息打包成 `TelemetryRecord` 投入黑板的摄入队列。
//! 每个变体对应一个独立的"最新值"槽位，类别之间互不保证顺序。

use crate::damage::DamageEvent;
use crate::referee::*;
use serde::{Deserialize, Serialize};

/// 遥测类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TelemetryCategory {
    GameStatus,
    GameResult,
    Survivor,
    BonusStatus,
    SupplierStatus,
    RobotStatus,
    RobotHeat,
    RobotBonus,
    RobotDamage,
    RobotShoot,
}

/// 一条遥测记录（已通过消息层校验的类型化数据）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TelemetryRecord {
    GameStatus(GameStatus),
    GameResult(GameResult),
    Survivor(GameSurvivor),
    BonusStatus(BonusStatus),
    SupplierStatus(SupplierStatus),
    RobotStatus(RobotStatus),
    RobotHeat(RobotHeat),
    RobotBonus(RobotBonus),
    RobotDamage(DamageEvent),
    RobotShoot(RobotShoot),
}

impl TelemetryRecord {
    /// 记录所属的类别
    pub fn category(&self) -> TelemetryCategory {
        match self {
            TelemetryRecord::GameStatus(_) => TelemetryCategory::GameStatus,
            TelemetryRecord::GameResult(_) => TelemetryCategory::GameResult,
            TelemetryRecord::Survivor(_) => TelemetryCategory::Survivor,
            TelemetryRecord::BonusStatus(_) => TelemetryCategory::BonusStatus,
            TelemetryRecord::SupplierStatus(_) => TelemetryCategory::SupplierStatus,
            TelemetryRecord::RobotStatus(_) => TelemetryCategory::RobotStatus,
            TelemetryRecord::RobotHeat(_) => TelemetryCategory::RobotHeat,
            TelemetryRecord::RobotBonus(_) => TelemetryCategory::RobotBonus,
            TelemetryRecord::RobotDamage(_) => TelemetryCategory::RobotDamage,
            TelemetryRecord::RobotShoot(_) => TelemetryCategory::RobotShoot,
        }
    }
}
