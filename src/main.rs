//! # cggttsqc - CGGTTS 文件质量检查
//!
//! 解析 CGGTTS 时间比对文件（01 与 2E 两种文件头格式），
//! 统计数据行质量，或检查时间序列中相邻文件的文件头变化。
//!
//! ## 子命令
//! - `stats`   - 逐文件 QC 统计表
//! - `headers` - 相邻文件的文件头变化
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (序列推断、批量解析、文件头比较)
//!   │     ├── parsers/   (CGGTTS 解析器)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出与进度条)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::output::Diagnostics;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    let diagnostics = Diagnostics::new(cli.debug, cli.nowarn);

    env_logger::Builder::new()
        .filter_level(diagnostics.log_level())
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(e) = commands::run(cli.command, &diagnostics) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
