//! # stats 命令实现
//!
//! 逐文件输出 QC 统计表。
//!
//! ## 功能
//! - 批量解析文件，跳过无法读取或格式错误的文件
//! - 终端表格输出（文件、跟踪数、短跟踪、最少/最多卫星、高 DSG、低高度角）
//! - 可选 CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/stats.rs` 定义的参数
//! - 使用 `batch/runner.rs`
//! - 使用 `tabled`, `csv`

use super::check_inputs;
use crate::batch::{ParseScope, ParsedFile};
use crate::cli::stats::StatsArgs;
use crate::error::{CggttsError, Result};
use crate::utils::output::Diagnostics;

use serde::Serialize;
use std::path::Path;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// 统计表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Tabled, Serialize)]
struct StatsRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Tracks")]
    ntracks: usize,
    #[tabled(rename = "Short")]
    shorttracks: usize,
    #[tabled(rename = "min SV")]
    minsats: usize,
    #[tabled(rename = "max SV")]
    maxsats: usize,
    #[tabled(rename = "DSG")]
    highdsg: usize,
    #[tabled(rename = "elv")]
    lowelv: usize,
}

impl From<&ParsedFile> for StatsRow {
    fn from(parsed: &ParsedFile) -> Self {
        let s = &parsed.stats;
        StatsRow {
            file: parsed.name.clone(),
            ntracks: s.ntracks,
            shorttracks: s.shorttracks,
            minsats: s.minsats,
            maxsats: s.maxsats,
            highdsg: s.highdsg,
            lowelv: s.lowelv,
        }
    }
}

/// 执行 stats 命令
pub fn execute(args: StatsArgs, diagnostics: &Diagnostics) -> Result<()> {
    let thresholds = args.thresholds()?;
    log::debug!("{:?}", thresholds);

    let result = check_inputs(&args.input, &ParseScope::Full(thresholds), diagnostics)?;
    let rows: Vec<StatsRow> = result.parsed.iter().map(StatsRow::from).collect();

    println!("{}", render_table(&rows));

    if let Some(ref path) = args.output_csv {
        save_stats_csv(&rows, path)?;
        log::debug!("Statistics saved to '{}'", path.display());
    }

    Ok(())
}

/// 生成固定列宽的统计表（表头 + 每文件一行）
fn render_table(rows: &[StatsRow]) -> String {
    Table::new(rows)
        .with(Style::blank())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// 保存统计结果到 CSV
fn save_stats_csv(rows: &[StatsRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| CggttsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
