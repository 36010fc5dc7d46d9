//! 黑板集成测试
//!
//! 用 mock 的变换服务 / 感知源 / 代价地图驱动完整的公开 API，
//! 覆盖关键行为：先清零再计数、时间窗口过期、滞回抑制、
//! 变换失败降级、按类别 latest wins。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use vanguard_blackboard::{
    ArmorAttacked, Blackboard, BlackboardConfig, PerceptionSession, PerceptionSource,
    RobotDetected,
};
use vanguard_msgs::{
    DamageEvent, GameStatus, PerceptionFeedback, RobotHeat, TelemetryRecord,
};
use vanguard_world::{
    CostmapProvider, FrameTransformer, OccupancyGrid, Pose, StampedPose, TransformError,
};

/// Mock 变换服务：恒等变换，可切换为失败模式
struct MockTransformer {
    should_fail: AtomicBool,
    robot_pose: Pose,
}

impl MockTransformer {
    fn new() -> Self {
        Self {
            should_fail: AtomicBool::new(false),
            robot_pose: Pose::from_xy_yaw(4.0, 2.0, 0.3),
        }
    }

    fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

impl FrameTransformer for MockTransformer {
    fn transform_pose(
        &self,
        pose: &StampedPose,
        target_frame: &str,
    ) -> Result<StampedPose, TransformError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(TransformError::Unavailable {
                from: pose.frame_id.clone(),
                to: target_frame.to_string(),
            });
        }
        // 本体原点的查询返回固定机器人位姿，其余恒等透传
        if pose.frame_id == "base_link" && pose.pose == Pose::identity() {
            return Ok(StampedPose::new(target_frame, self.robot_pose));
        }
        Ok(StampedPose::new(target_frame, pose.pose))
    }
}

struct MockCostmap {
    grid: Arc<OccupancyGrid>,
}

impl MockCostmap {
    fn new() -> Self {
        Self {
            grid: Arc::new(OccupancyGrid {
                width: 2,
                height: 2,
                resolution: 0.05,
                origin: Pose::identity(),
                data: Arc::from(&[0u8, 50, 100, 254][..]),
            }),
        }
    }
}

impl CostmapProvider for MockCostmap {
    fn grid(&self) -> Arc<OccupancyGrid> {
        self.grid.clone()
    }

    fn char_map(&self) -> Arc<[u8]> {
        self.grid.data.clone()
    }
}

fn build_blackboard(transformer: Arc<MockTransformer>) -> Blackboard {
    Blackboard::builder()
        .transformer(transformer)
        .costmap(Arc::new(MockCostmap::new()))
        .build()
        .unwrap()
}

fn armor_hit(source: u8) -> TelemetryRecord {
    TelemetryRecord::RobotDamage(DamageEvent {
        damage_type: 1,
        damage_source: source,
    })
}

#[test]
fn test_damage_reset_then_increment_scenario() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));

    // (type=1, source=2) → {0, 0, 1, 0}
    blackboard.apply_telemetry(armor_hit(2));
    assert_eq!(blackboard.damage_counters().as_array(), [0, 0, 1, 0]);

    // 立刻再来一次：先清零再加一，仍是 {0, 0, 1, 0}
    blackboard.apply_telemetry(armor_hit(2));
    assert_eq!(blackboard.damage_counters().as_array(), [0, 0, 1, 0]);
}

#[test]
fn test_armor_attacked_staleness_window() {
    let config = BlackboardConfig::from_toml_str("armor_attacked_window_ms = 40").unwrap();
    let blackboard = Blackboard::builder()
        .config(config)
        .transformer(Arc::new(MockTransformer::new()))
        .build()
        .unwrap();

    blackboard.apply_telemetry(armor_hit(1));
    // 窗口内：返回分类方向
    assert_eq!(blackboard.armor_attacked(), ArmorAttacked::Back);

    thread::sleep(Duration::from_millis(60));
    // 超窗：降级为 None
    assert_eq!(blackboard.armor_attacked(), ArmorAttacked::None);

    // 新的受击重新进入新鲜状态
    blackboard.apply_telemetry(armor_hit(0));
    assert_eq!(blackboard.armor_attacked(), ArmorAttacked::Front);
}

#[test]
fn test_robot_detected_staleness_window() {
    let config = BlackboardConfig::from_toml_str("robot_detected_window_ms = 40").unwrap();
    let blackboard = Blackboard::builder()
        .config(config)
        .transformer(Arc::new(MockTransformer::new()))
        .build()
        .unwrap();

    assert_eq!(blackboard.robot_detected(), RobotDetected::None);

    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(2.0, 0.1));
    assert_eq!(blackboard.robot_detected(), RobotDetected::Front);

    thread::sleep(Duration::from_millis(60));
    assert_eq!(blackboard.robot_detected(), RobotDetected::None);
}

#[test]
fn test_hysteresis_gate() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));

    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(1.0, 0.0));
    let first = blackboard.enemy_pose();
    assert!((first.position.x - 1.0).abs() < 1e-12);

    // 0.1 m / 0.05 rad 的候选：滞回门丢弃
    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(1.1, 0.055));
    assert_eq!(blackboard.enemy_pose(), first);
    assert_eq!(blackboard.metrics().fusion_suppressed, 1);

    // 0.3 m 的候选：更新
    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(1.3, 0.0));
    assert!((blackboard.enemy_pose().position.x - 1.3).abs() < 1e-12);
}

#[test]
fn test_transform_failure_degrades_to_previous_pose() {
    let transformer = Arc::new(MockTransformer::new());
    let blackboard = build_blackboard(transformer.clone());

    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(1.0, 0.5));
    let before = blackboard.enemy_pose();

    transformer.set_should_fail(true);
    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(8.0, -3.0));

    assert_eq!(blackboard.enemy_pose(), before);
    assert!(blackboard.metrics().transform_failures >= 1);
}

#[test]
fn test_detection_flag_mirrors_last_feedback() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));
    assert!(!blackboard.is_enemy_detected());

    blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(1.0, 0.0));
    assert!(blackboard.is_enemy_detected());
    let pose = blackboard.enemy_pose();

    // 目标丢失：标志清零，位姿保留最后已知值
    blackboard.on_perception_feedback(&PerceptionFeedback::lost());
    assert!(!blackboard.is_enemy_detected());
    assert_eq!(blackboard.enemy_pose(), pose);
}

#[test]
fn test_telemetry_latest_wins() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));

    blackboard.apply_telemetry(TelemetryRecord::GameStatus(GameStatus::from_raw(4, 120).unwrap()));
    blackboard.apply_telemetry(TelemetryRecord::GameStatus(GameStatus::from_raw(4, 119).unwrap()));
    assert_eq!(blackboard.game_status().remaining_time, 119);

    // 未收到过的类别返回文档化默认值
    assert_eq!(blackboard.robot_heat(), RobotHeat::default());
}

#[test]
fn test_async_ingest_via_channel() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));
    let tx = blackboard.telemetry_sender();

    tx.send(TelemetryRecord::GameStatus(GameStatus::from_raw(4, 42).unwrap()))
        .unwrap();

    // 摄入线程异步应用，轮询等待
    let deadline = Instant::now() + Duration::from_secs(2);
    while blackboard.metrics().records_applied < 1 {
        assert!(Instant::now() < deadline, "ingest thread did not apply record in time");
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(blackboard.game_status().remaining_time, 42);
}

#[test]
fn test_robot_map_pose_caches_on_failure() {
    let transformer = Arc::new(MockTransformer::new());
    let blackboard = build_blackboard(transformer.clone());

    let pose = blackboard.robot_map_pose();
    assert!((pose.position.x - 4.0).abs() < 1e-12);

    // 变换失败：返回缓存值而不是默认位姿
    transformer.set_should_fail(true);
    assert_eq!(blackboard.robot_map_pose(), pose);
}

#[test]
fn test_robot_map_pose_without_cache_is_identity() {
    let transformer = Arc::new(MockTransformer::new());
    transformer.set_should_fail(true);
    let blackboard = build_blackboard(transformer);

    assert_eq!(blackboard.robot_map_pose(), Pose::identity());
}

#[test]
fn test_costmap_pass_through() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));

    let grid = blackboard.cost_map_2d().unwrap();
    assert_eq!(grid.cost_at(1, 1), Some(254));
    assert_eq!(blackboard.char_map().unwrap().len(), 4);
    assert!(blackboard.cost_map().is_some());
}

#[test]
fn test_costmap_absent_returns_none() {
    let blackboard = Blackboard::builder()
        .transformer(Arc::new(MockTransformer::new()))
        .build()
        .unwrap();
    assert!(blackboard.cost_map().is_none());
    assert!(blackboard.cost_map_2d().is_none());
    assert!(blackboard.char_map().is_none());
}

/// Mock 感知源：握手即成功，反馈走内部通道
///
/// 会话建立时把发送端存回共享槽位，测试侧用它注入反馈帧。
#[derive(Default)]
struct MockPerceptionSource {
    tx_slot: Arc<parking_lot::Mutex<Option<crossbeam_channel::Sender<PerceptionFeedback>>>>,
}

impl PerceptionSource for MockPerceptionSource {
    fn start_session(&mut self) -> Result<PerceptionSession, vanguard_blackboard::BlackboardError> {
        let (tx, rx) = crossbeam_channel::unbounded();
        *self.tx_slot.lock() = Some(tx);
        Ok(PerceptionSession::new(rx))
    }
}

#[test]
fn test_perception_session_feeds_fusion() {
    let source = MockPerceptionSource::default();
    let slot = source.tx_slot.clone();
    let blackboard = Blackboard::builder()
        .transformer(Arc::new(MockTransformer::new()))
        .perception(Box::new(source))
        .build()
        .unwrap();

    let tx = slot.lock().clone().unwrap();
    tx.send(PerceptionFeedback::detected_at(3.0, 0.0)).unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    while !blackboard.is_enemy_detected() {
        assert!(Instant::now() < deadline, "feedback thread did not process frame in time");
        thread::sleep(Duration::from_millis(5));
    }
    assert!((blackboard.enemy_pose().position.x - 3.0).abs() < 1e-12);
}

#[test]
fn test_unknown_damage_source_ignored_via_public_api() {
    let blackboard = build_blackboard(Arc::new(MockTransformer::new()));

    blackboard.apply_telemetry(armor_hit(2));
    blackboard.apply_telemetry(armor_hit(7));

    // 未知来源：清零发生但不计数
    assert_eq!(blackboard.damage_counters().as_array(), [0, 0, 0, 0]);
    assert_eq!(blackboard.metrics().unknown_damage_sources, 1);
    // 最近一次事件仍被保留
    assert_eq!(blackboard.last_damage().damage_source, 7);
}

#[test]
fn test_missing_transformer_is_rejected() {
    let result = Blackboard::builder().build();
    assert!(matches!(
        result,
        Err(vanguard_blackboard::BlackboardError::MissingTransformer)
    ));
}
