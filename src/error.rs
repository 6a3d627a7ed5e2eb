//! # 统一错误处理模块
//!
//! 定义 cggttsqc 的所有错误类型，使用 `thiserror` 派生。
//!
//! 单文件错误（`FileReadError`, `MalformedHeader`, `MalformedTrack`）只会导致
//! 该文件被跳过；其余错误会终止整个运行。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// cggttsqc 统一错误类型
#[derive(Error, Debug)]
pub enum CggttsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unable to open {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid format in {path} line {line}: {reason}")]
    MalformedHeader {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid track in {path} line {line}: {reason}")]
    MalformedTrack {
        path: String,
        line: usize,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    InvalidSequence(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl CggttsError {
    /// 是否只影响单个文件（批处理可以跳过并继续）
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            CggttsError::FileReadError { .. }
                | CggttsError::MalformedHeader { .. }
                | CggttsError::MalformedTrack { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CggttsError>;
