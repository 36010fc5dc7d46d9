//! 遥测摄入循环
//!
//! 后台摄入线程从有界通道取出遥测记录并落入共享上下文。生产者只做
//! `try_send`，慢消费永远不会反压到调度方；线程在通道断开或运行标志
//! 清零后退出，由黑板在 Drop 时 join。

use crate::context::BlackboardContext;
use crate::metrics::BlackboardMetrics;
use crate::state::ArmorAttacked;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, trace, warn};
use vanguard_msgs::{DamageEvent, TelemetryRecord};

/// 摄入线程空转时的接收超时（用于周期性检查运行标志）
const RECV_TIMEOUT: Duration = Duration::from_millis(100);

/// 把一条遥测记录应用到上下文
///
/// 每个类别整体替换对应槽位；伤害事件走分类器路径。
/// 记录在消息层已通过校验，这里不会失败。
pub(crate) fn apply_record(
    ctx: &BlackboardContext,
    metrics: &BlackboardMetrics,
    record: TelemetryRecord,
) {
    match record {
        TelemetryRecord::GameStatus(v) => ctx.game_status.store(Arc::new(v)),
        TelemetryRecord::GameResult(v) => ctx.game_result.store(Arc::new(v)),
        TelemetryRecord::Survivor(v) => ctx.survivor.store(Arc::new(v)),
        TelemetryRecord::BonusStatus(v) => ctx.bonus_status.store(Arc::new(v)),
        TelemetryRecord::SupplierStatus(v) => ctx.supplier_status.store(Arc::new(v)),
        TelemetryRecord::RobotStatus(v) => ctx.robot_status.store(Arc::new(v)),
        TelemetryRecord::RobotHeat(v) => ctx.robot_heat.store(Arc::new(v)),
        TelemetryRecord::RobotBonus(v) => ctx.robot_bonus.store(Arc::new(v)),
        TelemetryRecord::RobotShoot(v) => ctx.robot_shoot.store(Arc::new(v)),
        TelemetryRecord::RobotDamage(event) => apply_damage_event(ctx, metrics, event),
    }
    metrics.inc_records_applied();
}

/// 伤害事件分类
///
/// 先清零再计数：`damage_type != 0` 的事件先清空四个计数器，再对
/// 来源方向加一；未定义的来源不改变任何计数。装甲伤害同时刷新
/// 装甲受击过期门，供 `armor_attacked()` 按窗口读取。
fn apply_damage_event(ctx: &BlackboardContext, metrics: &BlackboardMetrics, event: DamageEvent) {
    metrics.inc_damage_events();
    ctx.last_damage.store(Arc::new(event));

    let direction = event.direction();
    if direction.is_none() {
        metrics.inc_unknown_damage_sources();
        warn!(source = event.damage_source, "damage event with unknown source, counters unchanged");
    }

    ctx.damage_counters.rcu(|old| {
        let mut counters = **old;
        if event.is_armor_hit() {
            counters.reset();
        }
        if let Some(direction) = direction {
            counters.increment(direction);
        }
        Arc::new(counters)
    });

    if event.is_armor_hit() {
        if let Some(direction) = direction {
            ctx.armor_attacked.set(ArmorAttacked::from(direction));
            trace!(?direction, "armor hit classified");
        }
    }
}

/// 摄入线程主循环
pub(crate) fn ingest_loop(
    rx: Receiver<TelemetryRecord>,
    ctx: Arc<BlackboardContext>,
    metrics: Arc<BlackboardMetrics>,
    is_running: Arc<AtomicBool>,
) {
    info!("telemetry ingest thread started");
    loop {
        if !is_running.load(Ordering::Acquire) {
            break;
        }
        match rx.recv_timeout(RECV_TIMEOUT) {
            Ok(record) => {
                trace!(category = ?record.category(), "telemetry record received");
                apply_record(&ctx, &metrics, record);
            },
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                info!("telemetry channel disconnected, ingest thread exiting");
                break;
            },
        }
    }
    info!("telemetry ingest thread stopped");
}
