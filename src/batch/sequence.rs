//! # 文件序列推断
//!
//! 给出恰好两个文件名时，把它们视为一个连续序列的首尾，生成中间的全部文件名。
//!
//! ## 支持的命名方式
//! - 纯数字：`57570.cctf` … `57575.cctf`（扩展名必须相同）
//! - BIPM：`GZAU0157.570` … `GZAU0157.575`，数字部分 `DD.DDD` 即 MJD
//!
//! 无法识别的两文件序列是致命错误，在读取任何文件之前终止运行。
//!
//! ## 依赖关系
//! - 被 `batch/mod.rs` 的 `resolve_inputs` 调用
//! - 使用 `regex` crate

use crate::error::{CggttsError, Result};

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PLAIN_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)$").expect("built-in sequence pattern must compile"));

static BIPM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([GRECJ][SMZ][A-Za-z]{2}[0-9_]{2})(\d{2})\.(\d{3})$")
        .expect("built-in sequence pattern must compile")
});

/// 识别出的命名方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceStyle {
    /// `<n><ext>`，`width` 非空时补零到该宽度
    Plain { extension: String, width: Option<usize> },
    /// `<stub><DD>.<DDD>`
    Bipm { stub: String },
}

impl SequenceStyle {
    /// 序号对应的文件名
    pub fn file_name(&self, n: u64) -> String {
        match self {
            SequenceStyle::Plain { extension, width } => match width {
                Some(w) => format!("{:0w$}{}", n, extension, w = *w),
                None => format!("{}{}", n, extension),
            },
            SequenceStyle::Bipm { stub } => format!("{}{:02}.{:03}", stub, n / 1000, n % 1000),
        }
    }
}

/// 一个已识别的文件序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSequence {
    pub directory: PathBuf,
    pub style: SequenceStyle,
    pub start: u64,
    pub stop: u64,
}

impl FileSequence {
    /// 识别两个端点文件构成的序列；端点顺序无关
    pub fn infer(first: &Path, last: &Path) -> Result<Self> {
        let dir1 = first.parent().unwrap_or_else(|| Path::new(""));
        let dir2 = last.parent().unwrap_or_else(|| Path::new(""));
        if dir1 != dir2 {
            return Err(CggttsError::InvalidSequence(
                "The paths have to be the same for a sequence".to_string(),
            ));
        }

        let (name1, name2) = match (file_name(first), file_name(last)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(unrecognised()),
        };
        log::debug!("Sequence {} -> {}", name1, name2);

        let (style, a, b) = match plain(first, last)? {
            Some(found) => found,
            None => bipm(name1, name2).ok_or_else(unrecognised)?,
        };

        let (start, stop) = if a <= b { (a, b) } else { (b, a) };
        log::debug!("{:?} file sequence: {} -> {}", style, start, stop);

        Ok(FileSequence {
            directory: dir1.to_path_buf(),
            style,
            start,
            stop,
        })
    }

    /// 序列中的全部文件路径（升序）
    pub fn paths(&self) -> Vec<PathBuf> {
        (self.start..=self.stop)
            .map(|n| self.directory.join(self.style.file_name(n)))
            .collect()
    }
}

fn unrecognised() -> CggttsError {
    CggttsError::InvalidSequence("The filenames do not form a recognised sequence".to_string())
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn stem_and_extension(path: &Path) -> Option<(&str, String)> {
    let stem = path.file_stem()?.to_str()?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    Some((stem, extension))
}

/// 纯数字文件名：两个主干都是数字时扩展名必须一致
fn plain(first: &Path, last: &Path) -> Result<Option<(SequenceStyle, u64, u64)>> {
    let (Some((stem1, ext1)), Some((stem2, ext2))) = (stem_and_extension(first), stem_and_extension(last)) else {
        return Ok(None);
    };
    if !PLAIN_STEM.is_match(stem1) || !PLAIN_STEM.is_match(stem2) {
        return Ok(None);
    }
    if ext1 != ext2 {
        return Err(CggttsError::InvalidSequence(
            "The file extensions have to be the same for a sequence".to_string(),
        ));
    }

    let (Ok(a), Ok(b)) = (stem1.parse::<u64>(), stem2.parse::<u64>()) else {
        return Err(unrecognised());
    };

    // 以 0 开头的编号保持相同宽度
    let width = (stem1.starts_with('0') && stem1.len() == stem2.len()).then_some(stem1.len());

    Ok(Some((
        SequenceStyle::Plain {
            extension: ext1,
            width,
        },
        a,
        b,
    )))
}

/// BIPM 命名：台站代码必须一致，数字部分拼接为 MJD
fn bipm(name1: &str, name2: &str) -> Option<(SequenceStyle, u64, u64)> {
    let c1 = BIPM_NAME.captures(name1)?;
    let c2 = BIPM_NAME.captures(name2)?;
    if c1[1] != c2[1] {
        return None;
    }

    let a = format!("{}{}", &c1[2], &c1[3]).parse().ok()?;
    let b = format!("{}{}", &c2[2], &c2[3]).parse().ok()?;

    Some((
        SequenceStyle::Bipm {
            stub: c1[1].to_string(),
        },
        a,
        b,
    ))
}
