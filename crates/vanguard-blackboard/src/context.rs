//! 黑板共享状态上下文
//!
//! 每个实体独立保护：遥测类别和融合结果用 `ArcSwap` 整体替换
//! （读取方只会看到更新前或更新后的完整值），受击计数用 `rcu`
//! 做读-改-写，自身位姿缓存用 `RwLock`。实体之间不做跨实体事务，
//! 各类别相互独立、各自"最新者胜"。
//!
//! 此模块对 crate 外不可见：生产者只能通过摄入通道或黑板方法写入，
//! 不暴露任何裸可变句柄。

use crate::stale::StaleGuard;
use crate::state::{ArmorAttacked, DamageCounters, RobotDetected};
use arc_swap::ArcSwap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use vanguard_msgs::{
    BonusStatus, DamageEvent, GameResult, GameStatus, GameSurvivor, RobotBonus, RobotHeat,
    RobotShoot, RobotStatus, SupplierStatus,
};
use vanguard_world::Pose;

/// 黑板上下文（所有共享实体的聚合）
pub(crate) struct BlackboardContext {
    // === 遥测快照槽位（每类一个，latest wins）===
    pub game_status: ArcSwap<GameStatus>,
    pub game_result: ArcSwap<GameResult>,
    pub survivor: ArcSwap<GameSurvivor>,
    pub bonus_status: ArcSwap<BonusStatus>,
    pub supplier_status: ArcSwap<SupplierStatus>,
    pub robot_status: ArcSwap<RobotStatus>,
    pub robot_heat: ArcSwap<RobotHeat>,
    pub robot_bonus: ArcSwap<RobotBonus>,
    pub robot_shoot: ArcSwap<RobotShoot>,
    /// 最近一次伤害事件（事件本身也按 latest wins 保留一份）
    pub last_damage: ArcSwap<DamageEvent>,

    // === 分类器状态 ===
    /// 按方向的受击计数（rcu 读-改-写）
    pub damage_counters: ArcSwap<DamageCounters>,

    // === 融合结果 ===
    /// 最近一次通过滞回门的敌方世界系位姿
    pub enemy_pose: ArcSwap<Pose>,
    /// 最近一帧感知反馈的检测标志（无时间窗口，镜像生产者上报值）
    pub enemy_detected: AtomicBool,

    // === 过期门 ===
    pub armor_attacked: StaleGuard<ArmorAttacked>,
    pub robot_detected: StaleGuard<RobotDetected>,

    // === 自身位姿缓存（变换查询失败时的降级值）===
    pub robot_map_pose: RwLock<Option<Pose>>,
}

impl BlackboardContext {
    pub fn new() -> Self {
        Self {
            game_status: ArcSwap::from_pointee(GameStatus::default()),
            game_result: ArcSwap::from_pointee(GameResult::default()),
            survivor: ArcSwap::from_pointee(GameSurvivor::default()),
            bonus_status: ArcSwap::from_pointee(BonusStatus::default()),
            supplier_status: ArcSwap::from_pointee(SupplierStatus::default()),
            robot_status: ArcSwap::from_pointee(RobotStatus::default()),
            robot_heat: ArcSwap::from_pointee(RobotHeat::default()),
            robot_bonus: ArcSwap::from_pointee(RobotBonus::default()),
            robot_shoot: ArcSwap::from_pointee(RobotShoot::default()),
            last_damage: ArcSwap::from_pointee(DamageEvent::default()),
            damage_counters: ArcSwap::from_pointee(DamageCounters::default()),
            enemy_pose: ArcSwap::from_pointee(Pose::identity()),
            enemy_detected: AtomicBool::new(false),
            armor_attacked: StaleGuard::new(),
            robot_detected: StaleGuard::new(),
            robot_map_pose: RwLock::new(None),
        }
    }

    /// 共享句柄
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for BlackboardContext {
    fn default() -> Self {
        Self::new()
    }
}
