//! # headers 命令实现
//!
//! 比较序列中相邻文件的文件头，每处变化输出一行。
//! 只解析文件头，数据行不影响比较。
//! 文件头无法解析的文件被跳过，下一个文件与它之前最近一个成功解析的文件比较。
//!
//! ## 依赖关系
//! - 使用 `cli/headers.rs` 定义的参数
//! - 使用 `batch/compare.rs`

use super::check_inputs;
use crate::batch::{compare_sequence, ParseScope};
use crate::cli::headers::HeadersArgs;
use crate::error::Result;
use crate::utils::output::Diagnostics;

/// 执行 headers 命令
pub fn execute(args: HeadersArgs, diagnostics: &Diagnostics) -> Result<()> {
    let result = check_inputs(&args.input, &ParseScope::HeaderOnly, diagnostics)?;

    let changes = compare_sequence(&result.parsed);
    for change in &changes {
        println!("{}", change);
    }

    log::debug!(
        "{} header change(s) across {} file(s)",
        changes.len(),
        result.parsed.len()
    );

    Ok(())
}
