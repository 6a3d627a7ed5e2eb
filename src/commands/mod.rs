//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `models/`, `utils/`
//! - 子模块: stats, headers

pub mod headers;
pub mod stats;

use crate::batch::{self, BatchResult, BatchRunner, ParseScope};
use crate::cli::{Commands, InputArgs};
use crate::error::Result;
use crate::utils::output::{self, Diagnostics};

/// 执行命令
pub fn run(cmd: Commands, diagnostics: &Diagnostics) -> Result<()> {
    match cmd {
        Commands::Stats(args) => stats::execute(args, diagnostics),
        Commands::Headers(args) => headers::execute(args, diagnostics),
    }
}

/// 解析输入路径并批量解析文件
///
/// 序列无法识别等致命错误在读取任何文件之前返回。
fn check_inputs(input: &InputArgs, scope: &ParseScope, diagnostics: &Diagnostics) -> Result<BatchResult> {
    let files = batch::resolve_inputs(&input.infiles, &input.options())?;
    let runner = BatchRunner::new(input.jobs);
    log::debug!("{} file(s) to check, {} job(s)", files.len(), runner.jobs());

    let result = runner.run(&files, scope, diagnostics)?;

    if !result.failures.is_empty() && diagnostics.warnings {
        output::print_info(&format!(
            "{} of {} file(s) skipped",
            result.failures.len(),
            result.total()
        ));
    }

    Ok(result)
}
