//! # headers 子命令 CLI 定义
//!
//! 检查相邻文件的文件头变化（坐标、校准时延、参考时标、版本日期）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/headers.rs`

use super::InputArgs;
use clap::Args;

/// headers 子命令参数
#[derive(Args, Debug)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
