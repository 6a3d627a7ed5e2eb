//! # 文件收集器
//!
//! 把目录输入展开为其中匹配模式的文件列表。
//!
//! ## 功能
//! - glob 模式匹配（逗号分隔的多模式）
//! - 可选递归目录搜索
//! - 结果按路径排序，保证序列顺序稳定
//!
//! ## 依赖关系
//! - 被 `batch/mod.rs` 的 `resolve_inputs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{CggttsError, Result};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<glob::Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配全部文件）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                glob::Pattern::new(s).map_err(|e| {
                    CggttsError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        let walker = if self.recursive {
            WalkDir::new(&self.input)
        } else {
            WalkDir::new(&self.input).max_depth(1)
        };

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };
        self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["GZAU0157.572", "GZAU0157.570", "GZAU0157.571", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("old").join("GZAU0157.569"), "").unwrap();

        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("GZAU*")
            .unwrap()
            .collect();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["GZAU0157.570", "GZAU0157.571", "GZAU0157.572"]);

        let all = FileCollector::new(dir.path().to_path_buf())
            .recursive(true)
            .collect();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_multiple_patterns() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["57570.cctf", "57571.cctf", "GZAU0157.570", "README"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.cctf, G*")
            .unwrap()
            .collect();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileCollector::new(PathBuf::from(".")).with_pattern("[");
        assert!(matches!(result, Err(CggttsError::InvalidArgument(_))));
    }
}
