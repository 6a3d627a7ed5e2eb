//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `stats`: 逐文件 QC 统计表
//! - `headers`: 相邻文件的文件头变化
//!
//! 两种报告互斥，因此拆成两个子命令。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: stats, headers

pub mod headers;
pub mod stats;

use crate::batch::InputOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cggttsqc - CGGTTS 文件质量检查
#[derive(Parser)]
#[command(name = "cggttsqc")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Quality check CGGTTS files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debugging information to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Suppress warnings about unreadable or malformed files
    #[arg(long, global = true, default_value_t = false)]
    pub nowarn: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Print per-file track statistics (tracks, short tracks, satellites, DSG, elevation)
    Stats(stats::StatsArgs),

    /// Report header changes between consecutive files
    Headers(headers::HeadersArgs),
}

// ─────────────────────────────────────────────────────────────
// 输入文件参数（两个子命令共用）
// ─────────────────────────────────────────────────────────────

/// 输入文件参数
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input files or directories. Two files are treated as the first and last of a sequence
    #[arg(required = true, num_args = 1..)]
    pub infiles: Vec<PathBuf>,

    /// Do not interpret two input files as a sequence
    #[arg(long, default_value_t = false)]
    pub no_sequence: bool,

    /// Glob pattern for files inside directory inputs (comma separated)
    #[arg(long, default_value = "*")]
    pub pattern: String,

    /// Recurse into subdirectories of directory inputs
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,
}

impl InputArgs {
    pub fn options(&self) -> InputOptions {
        InputOptions {
            infer_sequence: !self.no_sequence,
            pattern: self.pattern.clone(),
            recursive: self.recursive,
        }
    }
}
