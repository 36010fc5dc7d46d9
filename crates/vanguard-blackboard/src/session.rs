//! 感知会话抽象
//!
//! 装甲检测运行在独立的感知节点里，交互模式是"建立一次会话，
//! 之后异步收反馈"。黑板只依赖反馈回调契约：会话如何握手、
//! 传输走什么通道都是实现方的事。

use crate::error::BlackboardError;
use crate::fusion::EnemyFusion;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;
use vanguard_msgs::PerceptionFeedback;

/// 反馈泵空转时的接收超时（用于周期性检查运行标志）
const RECV_TIMEOUT: Duration = Duration::from_millis(100);

/// 已建立的感知会话
///
/// 持有反馈帧的接收端；发送端由感知源的实现方持有。
pub struct PerceptionSession {
    feedback_rx: Receiver<PerceptionFeedback>,
}

impl PerceptionSession {
    pub fn new(feedback_rx: Receiver<PerceptionFeedback>) -> Self {
        Self { feedback_rx }
    }

    pub(crate) fn into_receiver(self) -> Receiver<PerceptionFeedback> {
        self.feedback_rx
    }
}

/// 感知源（装甲检测节点的客户端抽象）
pub trait PerceptionSource: Send {
    /// 建立检测会话：发送一次初始目标/握手，返回反馈通道。
    /// 会话建立失败返回 `BlackboardError::Session`。
    fn start_session(&mut self) -> Result<PerceptionSession, BlackboardError>;
}

/// 反馈泵主循环：把会话反馈逐帧送进融合器
pub(crate) fn feedback_loop(
    rx: Receiver<PerceptionFeedback>,
    fusion: EnemyFusion,
    is_running: Arc<AtomicBool>,
) {
    info!("perception feedback thread started");
    loop {
        if !is_running.load(Ordering::Acquire) {
            break;
        }
        match rx.recv_timeout(RECV_TIMEOUT) {
            Ok(feedback) => fusion.on_feedback(&feedback),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                info!("perception feedback channel disconnected, feedback thread exiting");
                break;
            },
        }
    }
    info!("perception feedback thread stopped");
}
