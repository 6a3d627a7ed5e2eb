//! # 批量执行器
//!
//! 对文件序列执行 CGGTTS 解析。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代（默认单线程，按输入顺序收集结果）
//! - 进度条显示
//! - 单文件失败只跳过该文件并给出警告
//! - headers 命令只解析文件头，数据行错误不影响文件头比较
//!
//! ## 依赖关系
//! - 被 `commands/stats.rs`, `commands/headers.rs` 调用
//! - 使用 `parsers/`
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{CggttsError, Result};
use crate::models::{Header, Stats, Thresholds};
use crate::parsers;
use crate::utils::output::Diagnostics;
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 每个文件的解析范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseScope {
    /// 文件头 + 数据行统计
    Full(Thresholds),
    /// 只解析文件头
    HeaderOnly,
}

/// 成功解析的文件
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub path: PathBuf,
    /// 不含目录的文件名，用于报告
    pub name: String,
    pub header: Header,
    /// `HeaderOnly` 时为默认值
    pub stats: Stats,
}

/// 单个文件处理结果
#[derive(Debug)]
pub enum ProcessResult {
    /// 解析成功
    Parsed(ParsedFile),
    /// 跳过（无法读取或格式错误）
    Failed(PathBuf, CggttsError),
}

/// 批量处理结果，保持输入顺序
#[derive(Debug, Default)]
pub struct BatchResult {
    pub parsed: Vec<ParsedFile>,
    pub failures: Vec<(PathBuf, CggttsError)>,
}

impl BatchResult {
    /// 合并处理结果；不属于单个文件的错误直接返回
    pub fn merge(&mut self, result: ProcessResult) -> Result<()> {
        match result {
            ProcessResult::Parsed(file) => self.parsed.push(file),
            ProcessResult::Failed(_, err) if !err.is_per_file() => return Err(err),
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
        Ok(())
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.parsed.len() + self.failures.len()
    }
}

/// 报告中使用的文件名
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 解析单个文件
pub fn process_file(path: &Path, scope: &ParseScope) -> ProcessResult {
    let parsed = match scope {
        ParseScope::Full(thresholds) => parsers::parse_cggtts_file(path, thresholds),
        ParseScope::HeaderOnly => parsers::parse_cggtts_header(path).map(|header| (header, Stats::default())),
    };

    match parsed {
        Ok((header, stats)) => ProcessResult::Parsed(ParsedFile {
            path: path.to_path_buf(),
            name: display_name(path),
            header,
            stats,
        }),
        Err(e) => ProcessResult::Failed(path.to_path_buf(), e),
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = 全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 解析文件列表，结果顺序与输入一致
    ///
    /// 单文件错误被记录并跳过；其它错误中止整个批处理。
    pub fn run(&self, files: &[PathBuf], scope: &ParseScope, diagnostics: &Diagnostics) -> Result<BatchResult> {
        let pb = progress::create_progress_bar(files.len() as u64, "Checking");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| CggttsError::InvalidArgument(format!("cannot start {} jobs: {}", self.jobs, e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = process_file(file, scope);

                    match &result {
                        ProcessResult::Parsed(parsed)
                            if matches!(scope, ParseScope::Full(_)) && parsed.stats.is_empty() =>
                        {
                            pb.suspend(|| diagnostics.warn(&format!("No tracks in {}", parsed.path.display())));
                        }
                        ProcessResult::Failed(_, e) if e.is_per_file() => {
                            pb.suspend(|| diagnostics.warn(&e.to_string()));
                        }
                        _ => {}
                    }

                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result)?;
        }

        log::debug!(
            "Parsed {} of {} file(s) with {} job(s)",
            batch_result.parsed.len(),
            batch_result.total(),
            self.jobs
        );

        Ok(batch_result)
    }
}
