//! 黑板运行指标
//!
//! 原子计数器，生产者线程递增、监控侧拍快照，不参与任何控制逻辑。

use std::sync::atomic::{AtomicU64, Ordering};

/// 黑板运行指标（原子计数器）
#[derive(Debug, Default)]
pub struct BlackboardMetrics {
    /// 已应用的遥测记录数
    records_applied: AtomicU64,
    /// 因队列满被丢弃的遥测记录数
    records_dropped: AtomicU64,
    /// 收到的伤害事件数
    damage_events: AtomicU64,
    /// 来源方向未定义的伤害事件数
    unknown_damage_sources: AtomicU64,
    /// 收到的感知反馈帧数
    feedback_frames: AtomicU64,
    /// 坐标系变换失败次数
    transform_failures: AtomicU64,
    /// 滞回门通过的敌方位姿更新数
    fusion_accepted: AtomicU64,
    /// 被滞回门丢弃的候选位姿数
    fusion_suppressed: AtomicU64,
}

impl BlackboardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn inc_records_applied(&self) {
        self.records_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_records_dropped(&self) {
        self.records_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_damage_events(&self) {
        self.damage_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_unknown_damage_sources(&self) {
        self.unknown_damage_sources.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_feedback_frames(&self) {
        self.feedback_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_transform_failures(&self) {
        self.transform_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_fusion_accepted(&self) {
        self.fusion_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_fusion_suppressed(&self) {
        self.fusion_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// 当前所有计数器的快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_applied: self.records_applied.load(Ordering::Relaxed),
            records_dropped: self.records_dropped.load(Ordering::Relaxed),
            damage_events: self.damage_events.load(Ordering::Relaxed),
            unknown_damage_sources: self.unknown_damage_sources.load(Ordering::Relaxed),
            feedback_frames: self.feedback_frames.load(Ordering::Relaxed),
            transform_failures: self.transform_failures.load(Ordering::Relaxed),
            fusion_accepted: self.fusion_accepted.load(Ordering::Relaxed),
            fusion_suppressed: self.fusion_suppressed.load(Ordering::Relaxed),
        }
    }
}

/// 指标快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_applied: u64,
    pub records_dropped: u64,
    pub damage_events: u64,
    pub unknown_damage_sources: u64,
    pub feedback_frames: u64,
    pub transform_failures: u64,
    pub fusion_accepted: u64,
    pub fusion_suppressed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = BlackboardMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_snapshot_reflects_increments() {
        let metrics = BlackboardMetrics::new();
        metrics.inc_records_applied();
        metrics.inc_records_applied();
        metrics.inc_transform_failures();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.records_applied, 2);
        assert_eq!(snapshot.transform_failures, 1);
        assert_eq!(snapshot.fusion_accepted, 0);
    }
}
