//! 裁判系统遥测记录定义
//!
//! 每个结构体对应裁判系统的一类上报消息，字段与裁判系统串口协议一一对应。
//! 黑板对每一类只保留最新值（latest wins），因此这里的类型都是纯数据，
//! `Default` 即"从未收到该类消息"时的文档化默认值。

use crate::MsgError;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// 比赛阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameState {
    /// 未开始比赛
    PreMatch = 0,
    /// 准备阶段
    Setup = 1,
    /// 自检阶段
    Init = 2,
    /// 5 秒倒计时
    FiveSecCountdown = 3,
    /// 对战中
    Round = 4,
    /// 比赛结算中
    Calculation = 5,
}

/// 比赛状态（阶段 + 剩余时间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// 当前比赛阶段
    pub state: GameState,
    /// 当前阶段剩余时间（秒）
    pub remaining_time: u16,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self {
            state: GameState::PreMatch,
            remaining_time: 0,
        }
    }
}

impl GameStatus {
    /// 从原始字段构建，越界的阶段值返回 `MsgError::UnknownGameState`
    pub fn from_raw(state: u8, remaining_time: u16) -> Result<Self, MsgError> {
        let state = GameState::try_from(state).map_err(|e| MsgError::UnknownGameState(e.number))?;
        Ok(Self {
            state,
            remaining_time,
        })
    }
}

/// 比赛结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameOutcome {
    Draw = 0,
    RedWin = 1,
    BlueWin = 2,
}

/// 比赛结果记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: GameOutcome,
}

impl Default for GameResult {
    fn default() -> Self {
        Self {
            outcome: GameOutcome::Draw,
        }
    }
}

impl GameResult {
    /// 从原始字段构建，越界值返回 `MsgError::UnknownGameOutcome`
    pub fn from_raw(outcome: u8) -> Result<Self, MsgError> {
        let outcome =
            GameOutcome::try_from(outcome).map_err(|e| MsgError::UnknownGameOutcome(e.number))?;
        Ok(Self { outcome })
    }
}

/// 场上双方机器人存活状态
///
/// 默认值（从未收到）为全 `false`，与裁判系统消息的零值初始化一致；
/// 消费者应结合比赛阶段判断该记录是否有意义。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSurvivor {
    pub red3: bool,
    pub red4: bool,
    pub blue3: bool,
    pub blue4: bool,
}

/// buff 区状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum BonusState {
    /// 未被占领
    Unoccupied = 0,
    /// 正在被占领
    BeingOccupied = 1,
    /// 已被占领
    Occupied = 2,
}

/// 双方 buff 区占领状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusStatus {
    pub red_bonus: BonusState,
    pub blue_bonus: BonusState,
}

impl Default for BonusStatus {
    fn default() -> Self {
        Self {
            red_bonus: BonusState::Unoccupied,
            blue_bonus: BonusState::Unoccupied,
        }
    }
}

impl BonusStatus {
    /// 从原始字段构建，越界值返回 `MsgError::UnknownBonusState`
    pub fn from_raw(red_bonus: u8, blue_bonus: u8) -> Result<Self, MsgError> {
        let red_bonus =
            BonusState::try_from(red_bonus).map_err(|e| MsgError::UnknownBonusState(e.number))?;
        let blue_bonus =
            BonusState::try_from(blue_bonus).map_err(|e| MsgError::UnknownBonusState(e.number))?;
        Ok(Self {
            red_bonus,
            blue_bonus,
        })
    }
}

/// 补给站状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum SupplierState {
    Close = 0,
    Preparing = 1,
    Supplying = 2,
}

/// 补给站状态记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierStatus {
    pub state: SupplierState,
}

impl Default for SupplierStatus {
    fn default() -> Self {
        Self {
            state: SupplierState::Close,
        }
    }
}

impl SupplierStatus {
    /// 从原始字段构建，越界值返回 `MsgError::UnknownSupplierState`
    pub fn from_raw(state: u8) -> Result<Self, MsgError> {
        let state =
            SupplierState::try_from(state).map_err(|e| MsgError::UnknownSupplierState(e.number))?;
        Ok(Self { state })
    }
}

/// 机器人状态（血量、热量限制、功率输出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RobotStatus {
    /// 机器人 ID
    pub id: u8,
    /// 机器人等级
    pub level: u8,
    /// 剩余血量
    pub remain_hp: u16,
    /// 血量上限
    pub max_hp: u16,
    /// 枪口热量冷却上限
    pub heat_cooling_limit: u16,
    /// 枪口热量每秒冷却值
    pub heat_cooling_rate: u16,
    /// 云台口是否有功率输出
    pub gimbal_output: bool,
    /// 底盘口是否有功率输出
    pub chassis_output: bool,
    /// 发射机构口是否有功率输出
    pub shooter_output: bool,
}

/// 实时热量与功率数据
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RobotHeat {
    /// 底盘输出电压（mV）
    pub chassis_volt: u16,
    /// 底盘输出电流（mA）
    pub chassis_current: u16,
    /// 底盘输出功率（W）
    pub chassis_power: f32,
    /// 底盘功率缓冲（J）
    pub chassis_power_buffer: u16,
    /// 枪口热量
    pub shooter_heat: u16,
}

/// buff 获得标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RobotBonus {
    pub bonus: bool,
}

/// 射击数据（射频 + 射速）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RobotShoot {
    /// 射频（发/秒）
    pub frequency: u8,
    /// 射速（m/s）
    pub speed: f32,
}
