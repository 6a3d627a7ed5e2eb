//! # 解析器模块
//!
//! CGGTTS 文件解析：严格的文件头语法 + 数据行统计。
//! 解析结果只依赖文件内容与阈值，失败以 `CggttsError` 值返回，从不打印或退出。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: lines, header, tracks

pub mod header;
pub mod lines;
pub mod tracks;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::{CggttsError, Result};
use crate::models::{Header, Stats, Thresholds};
use lines::LineCursor;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 解析 CGGTTS 文件
pub fn parse_cggtts_file(path: &Path, thresholds: &Thresholds) -> Result<(Header, Stats)> {
    parse_cggtts_reader(open(path)?, &path.display().to_string(), thresholds)
}

/// 只解析 CGGTTS 文件头，不读取数据行
pub fn parse_cggtts_header(path: &Path) -> Result<Header> {
    let mut cursor = LineCursor::new(open(path)?, path.display().to_string());
    header::parse_header(&mut cursor)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    log::debug!("Checking {}", path.display());

    let file = File::open(path).map_err(|e| CggttsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufReader::new(file))
}

/// 从任意 `BufRead` 解析；`name` 只用于错误信息
pub fn parse_cggtts_reader<R: BufRead>(
    reader: R,
    name: &str,
    thresholds: &Thresholds,
) -> Result<(Header, Stats)> {
    let mut cursor = LineCursor::new(reader, name);
    let header = header::parse_header(&mut cursor)?;
    let stats = tracks::collect_stats(&mut cursor, thresholds)?;

    log::debug!(
        "{}: {} tracks, satellites {}..{}",
        name,
        stats.ntracks,
        stats.minsats,
        stats.maxsats
    );

    Ok((header, stats))
}
