//! 黑板层错误类型定义
//!
//! 决策引擎的查询接口永远不返回错误（缺失/过期数据降级为默认值），
//! 这里的错误只出现在构建和生产者侧的投递路径上。

use thiserror::Error;

/// 黑板层错误类型
#[derive(Error, Debug)]
pub enum BlackboardError {
    /// 遥测通道已关闭（摄入线程退出）
    #[error("telemetry channel closed")]
    ChannelClosed,

    /// 遥测通道已满（生产者投递永不阻塞，满则丢弃本条记录）
    #[error("telemetry channel full (capacity: {0})")]
    ChannelFull(usize),

    /// 构建时未提供坐标系变换服务
    #[error("frame transformer is required but not provided")]
    MissingTransformer,

    /// 感知会话建立失败
    #[error("perception session error: {0}")]
    Session(String),

    /// 配置解析错误
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// 配置文件读取错误
    #[error("config io error: {0}")]
    ConfigIo(#[from] std::io::Error),
}
