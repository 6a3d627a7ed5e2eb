//! # 数据模型模块
//!
//! 定义 CGGTTS 文件头、QC 统计量与阈值。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `batch/` 和 `commands/` 使用
//! - 子模块: header, stats

pub mod header;
pub mod stats;

pub use header::{CalibrationDelays, Delays2E, Header, ReceiverDelays, Version};
pub use stats::{Stats, Thresholds};
