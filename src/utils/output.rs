//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及贯穿整个运行的诊断开关。
//! 报告本身（QC 表格、文件头变化）写到 stdout，诊断信息写到 stderr。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `batch/runner.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;
use log::LevelFilter;

/// 诊断开关：调试输出与警告
///
/// 由命令行构造一次，按引用传给需要报告问题的代码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub debug: bool,
    pub warnings: bool,
}

impl Diagnostics {
    pub fn new(debug: bool, nowarn: bool) -> Self {
        Diagnostics {
            debug,
            warnings: !nowarn,
        }
    }

    /// 输出警告（`--nowarn` 时静默）
    pub fn warn(&self, msg: &str) {
        if self.warnings {
            print_warning(msg);
        }
    }

    /// `log` 的过滤级别
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[*]".blue().bold(), msg);
}
