//! # 逐行读取游标
//!
//! 在 `BufRead` 之上记录当前行号（从 1 开始），并把读取失败和格式错误
//! 统一转换为带文件名与行号的 `CggttsError`。
//!
//! 按字节读取，非 UTF-8 字节（例如 Latin-1 编码的注释）替换为 U+FFFD，
//! 不会让整个文件被当作无法读取。
//!
//! ## 依赖关系
//! - 被 `parsers/header.rs`, `parsers/tracks.rs` 使用

use crate::error::{CggttsError, Result};
use std::io::BufRead;

pub struct LineCursor<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    path: String,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R, path: impl Into<String>) -> Self {
        LineCursor {
            reader,
            buf: Vec::new(),
            line_no: 0,
            path: path.into(),
        }
    }

    /// 最近一次读取的行号
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 读取下一行并去掉行尾空白；文件结束时返回 `None`
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| CggttsError::FileReadError {
                path: self.path.clone(),
                source: e,
            })?;
        if n == 0 {
            return Ok(None);
        }

        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).trim_end().to_string()))
    }

    /// 文件头中必须存在的下一行；文件提前结束视为格式错误
    pub fn require_line(&mut self, expected: &str) -> Result<String> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => {
                self.line_no += 1;
                Err(self.malformed(format!("unexpected end of file, expected {}", expected)))
            }
        }
    }

    /// 当前行的文件头格式错误
    pub fn malformed(&self, reason: impl Into<String>) -> CggttsError {
        CggttsError::MalformedHeader {
            path: self.path.clone(),
            line: self.line_no,
            reason: reason.into(),
        }
    }

    /// 当前行的数据行格式错误
    pub fn malformed_track(&self, reason: impl Into<String>) -> CggttsError {
        CggttsError::MalformedTrack {
            path: self.path.clone(),
            line: self.line_no,
            reason: reason.into(),
        }
    }
}
