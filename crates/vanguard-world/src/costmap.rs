//! 只读代价地图抽象
//!
//! 代价地图由独立子系统计算，黑板对其不做任何融合，只把访问句柄
//! 透传给决策引擎。网格数据用 `Arc<[u8]>` 共享，读取方拿到的是
//! 某一时刻的完整快照。

use crate::pose::Pose;
use std::sync::Arc;

/// 占据栅格快照
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    /// 栅格宽度（格数）
    pub width: u32,
    /// 栅格高度（格数）
    pub height: u32,
    /// 每格边长（米）
    pub resolution: f64,
    /// 栅格原点在世界坐标系下的位姿
    pub origin: Pose,
    /// 按行优先存储的代价值
    pub data: Arc<[u8]>,
}

impl OccupancyGrid {
    /// 读取指定格的代价值，越界返回 `None`
    pub fn cost_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }
}

/// 代价地图提供方
///
/// 实现方负责保证返回的快照内部一致；黑板透传时不加任何锁。
pub trait CostmapProvider: Send + Sync {
    /// 当前占据栅格快照
    fn grid(&self) -> Arc<OccupancyGrid>;

    /// 原始字节地图（与栅格 `data` 同构的扁平数组）
    fn char_map(&self) -> Arc<[u8]>;
}
