//! 时间窗口过期门
//!
//! `StaleGuard<T>` 把"值 + 最近更新时刻"打包成一个无锁槽位。
//! 新鲜/过期纯粹是读取时刻对已流逝时间的函数，没有定时器，
//! 也没有终态：下一次 `set` 重新进入新鲜状态。
//!
//! 边界约定：`elapsed <= window` 视为新鲜（恰好等于窗口时仍返回值）。

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 值与其更新时刻
#[derive(Debug, Clone, Copy)]
struct Stamped<T> {
    value: T,
    at: Instant,
}

/// 带过期窗口的最新值槽位
///
/// 写入方 `set`，读取方用自己选择的窗口 `get`；同一个槽位可以被
/// 不同读取方用不同窗口查询。
#[derive(Debug, Default)]
pub struct StaleGuard<T> {
    slot: ArcSwapOption<Stamped<T>>,
}

impl<T: Clone> StaleGuard<T> {
    /// 创建空槽位（从未写入，任何窗口下都返回 `None`）
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    /// 存入新值并盖上当前时间戳
    pub fn set(&self, value: T) {
        self.slot.store(Some(Arc::new(Stamped {
            value,
            at: Instant::now(),
        })));
    }

    /// 读取槽位：窗口内返回最近写入的值，超窗或从未写入返回 `None`
    pub fn get(&self, window: Duration) -> Option<T> {
        let guard = self.slot.load();
        guard.as_ref().and_then(|stamped| {
            if stamped.at.elapsed() <= window {
                Some(stamped.value.clone())
            } else {
                None
            }
        })
    }

    /// 槽位最近一次写入距今的时长，从未写入返回 `None`
    pub fn age(&self) -> Option<Duration> {
        self.slot.load().as_ref().map(|stamped| stamped.at.elapsed())
    }

    /// 清空槽位
    pub fn clear(&self) {
        self.slot.store(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_never_set_is_none() {
        let guard: StaleGuard<u8> = StaleGuard::new();
        assert_eq!(guard.get(Duration::from_secs(3600)), None);
        assert_eq!(guard.age(), None);
    }

    #[test]
    fn test_fresh_within_window() {
        let guard = StaleGuard::new();
        guard.set(7u8);
        assert_eq!(guard.get(Duration::from_millis(100)), Some(7));
    }

    #[test]
    fn test_stale_after_window() {
        let guard = StaleGuard::new();
        guard.set(7u8);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(guard.get(Duration::from_millis(5)), None);
        // 同一槽位换更宽的窗口仍可读到
        assert_eq!(guard.get(Duration::from_secs(10)), Some(7));
    }

    #[test]
    fn test_set_refreshes() {
        let guard = StaleGuard::new();
        guard.set(1u8);
        thread::sleep(Duration::from_millis(30));
        guard.set(2u8);
        assert_eq!(guard.get(Duration::from_millis(20)), Some(2));
    }

    #[test]
    fn test_clear_empties_slot() {
        let guard = StaleGuard::new();
        guard.set(1u8);
        guard.clear();
        assert_eq!(guard.get(Duration::from_secs(10)), None);
    }
}
