//! 黑板对外 API
//!
//! `Blackboard` 封装共享上下文、后台摄入线程和感知反馈泵，向决策
//! 引擎暴露同步查询接口。所有查询都返回类型完好的值：数据缺失、
//! 过期或变换失败一律降级为默认/旧值，永远不向决策引擎抛错。

use crate::config::BlackboardConfig;
use crate::context::BlackboardContext;
use crate::error::BlackboardError;
use crate::fusion::EnemyFusion;
use crate::ingest;
use crate::metrics::{BlackboardMetrics, MetricsSnapshot};
use crate::self_pose::SelfPoseProvider;
use crate::session::{self, PerceptionSource};
use crate::state::{ArmorAttacked, DamageCounters, RobotDetected};
use crossbeam_channel::{Sender, TrySendError};
use std::mem::ManuallyDrop;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{JoinHandle, spawn};
use tracing::warn;
use vanguard_msgs::{
    BonusStatus, DamageEvent, GameResult, GameStatus, GameSurvivor, PerceptionFeedback, RobotBonus,
    RobotHeat, RobotShoot, RobotStatus, SupplierStatus, TelemetryRecord,
};
use vanguard_world::{CostmapProvider, FrameTransformer, OccupancyGrid, Pose};

/// 黑板（共享状态聚合器，对外 API）
///
/// 生产者侧：遥测走 `telemetry_sender()` 的有界通道（或同步的
/// `apply_telemetry`），感知反馈走已附加的会话或 `on_perception_feedback`。
/// 消费者侧：决策引擎按自己的节奏调用查询方法，读到的永远是某个
/// 完整的历史值，不会撕裂。
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vanguard_blackboard::Blackboard;
/// use vanguard_world::{FrameTransformer, StampedPose, TransformError};
///
/// struct Localization; // 定位子系统的变换服务
/// impl FrameTransformer for Localization {
///     fn transform_pose(
///         &self,
///         pose: &StampedPose,
///         target_frame: &str,
///     ) -> Result<StampedPose, TransformError> {
///         Ok(StampedPose::new(target_frame, pose.pose))
///     }
/// }
///
/// let blackboard = Blackboard::builder()
///     .transformer(Arc::new(Localization))
///     .build()
///     .unwrap();
///
/// let tx = blackboard.telemetry_sender();
/// // 生产者线程持有 tx 投递记录……
/// if blackboard.is_enemy_detected() {
///     let pose = blackboard.enemy_pose();
///     let _ = pose;
/// }
/// ```
pub struct Blackboard {
    ctx: Arc<BlackboardContext>,
    config: BlackboardConfig,
    metrics: Arc<BlackboardMetrics>,
    fusion: EnemyFusion,
    self_pose: SelfPoseProvider,
    costmap: Option<Arc<dyn CostmapProvider>>,
    /// 遥测通道发送端
    ///
    /// 需要在 Drop 时 **提前关闭通道**（在 join 摄入线程之前），
    /// 否则 `ingest_loop` 可能收不到 `Disconnected` 而延迟退出。
    telemetry_tx: ManuallyDrop<Sender<TelemetryRecord>>,
    ingest_thread: Option<JoinHandle<()>>,
    feedback_thread: Option<JoinHandle<()>>,
    is_running: Arc<AtomicBool>,
}

impl Blackboard {
    /// 创建 Builder
    pub fn builder() -> BlackboardBuilder {
        BlackboardBuilder::new()
    }

    // ============================================================
    // 生产者侧
    // ============================================================

    /// 克隆遥测通道发送端（生产者各自持有一份）
    pub fn telemetry_sender(&self) -> Sender<TelemetryRecord> {
        (*self.telemetry_tx).clone()
    }

    /// 非阻塞投递一条遥测记录
    ///
    /// 队列满时丢弃本条记录并计数，生产者永远不会被慢消费阻塞。
    pub fn send_telemetry(&self, record: TelemetryRecord) -> Result<(), BlackboardError> {
        match self.telemetry_tx.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(record)) => {
                self.metrics.inc_records_dropped();
                warn!(category = ?record.category(), "telemetry channel full, record dropped");
                Err(BlackboardError::ChannelFull(self.config.telemetry_channel_capacity))
            },
            Err(TrySendError::Disconnected(_)) => Err(BlackboardError::ChannelClosed),
        }
    }

    /// 同步应用一条遥测记录（绕过队列）
    ///
    /// 供已运行在自有线程上的生产者直接调用；与摄入线程并发安全。
    pub fn apply_telemetry(&self, record: TelemetryRecord) {
        ingest::apply_record(&self.ctx, &self.metrics, record);
    }

    /// 同步处理一帧感知反馈（未附加会话时由生产者直接调用）
    pub fn on_perception_feedback(&self, feedback: &PerceptionFeedback) {
        self.fusion.on_feedback(feedback);
    }

    // ============================================================
    // 决策引擎查询接口
    // ============================================================

    /// 最近一次通过滞回门的敌方世界系位姿
    ///
    /// 本身不做过期判断：是否可信由 `is_enemy_detected()` 与
    /// `robot_detected()` 的窗口语义给出。
    pub fn enemy_pose(&self) -> Pose {
        **self.ctx.enemy_pose.load()
    }

    /// 最近一帧感知反馈的检测标志
    pub fn is_enemy_detected(&self) -> bool {
        self.ctx.enemy_detected.load(Ordering::Acquire)
    }

    /// 机器人在世界系下的位姿（按需查询变换服务，失败返回缓存值）
    pub fn robot_map_pose(&self) -> Pose {
        self.self_pose.robot_map_pose()
    }

    /// 窗口内的装甲受击方向（默认 100 ms，超窗返回 `None` 变体）
    pub fn armor_attacked(&self) -> ArmorAttacked {
        self.ctx
            .armor_attacked
            .get(self.config.armor_attacked_window())
            .unwrap_or_default()
    }

    /// 窗口内的敌方机器人方向（默认 200 ms，超窗返回 `None` 变体）
    pub fn robot_detected(&self) -> RobotDetected {
        self.ctx
            .robot_detected
            .get(self.config.robot_detected_window())
            .unwrap_or_default()
    }

    /// 当前按方向受击计数快照
    pub fn damage_counters(&self) -> DamageCounters {
        **self.ctx.damage_counters.load()
    }

    // === 遥测快照读取（每类独立的最新值或文档化默认值）===

    pub fn game_status(&self) -> GameStatus {
        **self.ctx.game_status.load()
    }

    pub fn game_result(&self) -> GameResult {
        **self.ctx.game_result.load()
    }

    pub fn survivors(&self) -> GameSurvivor {
        **self.ctx.survivor.load()
    }

    pub fn bonus_status(&self) -> BonusStatus {
        **self.ctx.bonus_status.load()
    }

    pub fn supplier_status(&self) -> SupplierStatus {
        **self.ctx.supplier_status.load()
    }

    pub fn robot_status(&self) -> RobotStatus {
        **self.ctx.robot_status.load()
    }

    pub fn robot_heat(&self) -> RobotHeat {
        **self.ctx.robot_heat.load()
    }

    pub fn robot_bonus(&self) -> RobotBonus {
        **self.ctx.robot_bonus.load()
    }

    pub fn robot_shoot(&self) -> RobotShoot {
        **self.ctx.robot_shoot.load()
    }

    /// 最近一次伤害事件
    pub fn last_damage(&self) -> DamageEvent {
        **self.ctx.last_damage.load()
    }

    // === 代价地图透传（无融合逻辑）===

    /// 代价地图提供方句柄
    pub fn cost_map(&self) -> Option<Arc<dyn CostmapProvider>> {
        self.costmap.clone()
    }

    /// 当前占据栅格快照
    pub fn cost_map_2d(&self) -> Option<Arc<OccupancyGrid>> {
        self.costmap.as_ref().map(|provider| provider.grid())
    }

    /// 原始字节地图
    pub fn char_map(&self) -> Option<Arc<[u8]>> {
        self.costmap.as_ref().map(|provider| provider.char_map())
    }

    // === 监控 ===

    /// 运行指标快照
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// 当前生效的配置
    pub fn config(&self) -> &BlackboardConfig {
        &self.config
    }
}

impl Drop for Blackboard {
    fn drop(&mut self) {
        self.is_running.store(false, Ordering::Release);
        // 先关闭通道，让摄入线程立刻收到 Disconnected
        unsafe {
            ManuallyDrop::drop(&mut self.telemetry_tx);
        }
        if let Some(handle) = self.ingest_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.feedback_thread.take() {
            let _ = handle.join();
        }
    }
}

/// Blackboard Builder（链式构造）
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use vanguard_blackboard::{Blackboard, BlackboardConfig};
/// # use vanguard_world::{FrameTransformer, StampedPose, TransformError};
/// # struct Localization;
/// # impl FrameTransformer for Localization {
/// #     fn transform_pose(
/// #         &self,
/// #         pose: &StampedPose,
/// #         target_frame: &str,
/// #     ) -> Result<StampedPose, TransformError> {
/// #         Ok(StampedPose::new(target_frame, pose.pose))
/// #     }
/// # }
/// let config = BlackboardConfig::from_toml_str("sensor_frame = \"front_camera\"").unwrap();
/// let blackboard = Blackboard::builder()
///     .config(config)
///     .transformer(Arc::new(Localization))
///     .build()
///     .unwrap();
/// ```
pub struct BlackboardBuilder {
    config: BlackboardConfig,
    transformer: Option<Arc<dyn FrameTransformer>>,
    costmap: Option<Arc<dyn CostmapProvider>>,
    perception: Option<Box<dyn PerceptionSource>>,
}

impl BlackboardBuilder {
    pub fn new() -> Self {
        Self {
            config: BlackboardConfig::default(),
            transformer: None,
            costmap: None,
            perception: None,
        }
    }

    /// 覆盖默认配置
    pub fn config(mut self, config: BlackboardConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置坐标系变换服务（必需）
    pub fn transformer(mut self, transformer: Arc<dyn FrameTransformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// 设置代价地图提供方（可选，缺省时透传接口返回 `None`）
    pub fn costmap(mut self, costmap: Arc<dyn CostmapProvider>) -> Self {
        self.costmap = Some(costmap);
        self
    }

    /// 附加感知源（可选；build 时建立一次会话并启动反馈泵线程）
    pub fn perception(mut self, source: Box<dyn PerceptionSource>) -> Self {
        self.perception = Some(source);
        self
    }

    /// 构建黑板并启动后台线程
    ///
    /// # 错误
    /// - `MissingTransformer`: 未提供变换服务
    /// - `Session`: 感知会话建立失败
    pub fn build(mut self) -> Result<Blackboard, BlackboardError> {
        let transformer = self.transformer.take().ok_or(BlackboardError::MissingTransformer)?;

        let ctx = BlackboardContext::new_shared();
        let metrics = Arc::new(BlackboardMetrics::new());
        let is_running = Arc::new(AtomicBool::new(true));

        let fusion = EnemyFusion::new(ctx.clone(), transformer.clone(), metrics.clone(), &self.config);
        let self_pose = SelfPoseProvider::new(
            ctx.clone(),
            transformer,
            metrics.clone(),
            self.config.world_frame.clone(),
            self.config.body_frame.clone(),
        );

        // 摄入线程
        let (telemetry_tx, telemetry_rx) =
            crossbeam_channel::bounded(self.config.telemetry_channel_capacity);
        let ingest_thread = {
            let ctx = ctx.clone();
            let metrics = metrics.clone();
            let is_running = is_running.clone();
            spawn(move || ingest::ingest_loop(telemetry_rx, ctx, metrics, is_running))
        };

        // 感知反馈泵（仅当附加了感知源）
        let feedback_thread = match self.perception.as_mut() {
            Some(source) => {
                let session = source.start_session()?;
                let rx = session.into_receiver();
                let fusion = fusion.clone();
                let is_running = is_running.clone();
                Some(spawn(move || session::feedback_loop(rx, fusion, is_running)))
            },
            None => None,
        };

        Ok(Blackboard {
            ctx,
            config: self.config,
            metrics,
            fusion,
            self_pose,
            costmap: self.costmap,
            telemetry_tx: ManuallyDrop::new(telemetry_tx),
            ingest_thread: Some(ingest_thread),
            feedback_thread,
            is_running,
        })
    }
}

impl Default for BlackboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
