//! # 批量处理模块
//!
//! 把命令行输入解析为有序的文件序列，批量解析，并比较相邻文件的文件头。
//!
//! ## 功能
//! - 两文件序列推断（纯数字 / BIPM 命名）
//! - 目录展开
//! - 并行解析，结果保持输入顺序
//! - 相邻文件头比较
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/`
//! - 使用 `rayon` 进行并行处理，`indicatif` 显示进度

pub mod collector;
pub mod compare;
pub mod runner;
pub mod sequence;

pub use collector::FileCollector;
pub use compare::compare_sequence;
pub use runner::{BatchResult, BatchRunner, ParseScope, ParsedFile};
pub use sequence::FileSequence;

use crate::error::Result;
use std::path::PathBuf;

/// 输入解析选项
#[derive(Debug, Clone)]
pub struct InputOptions {
    /// 两个文件输入时是否推断序列
    pub infer_sequence: bool,
    /// 目录输入的文件名模式
    pub pattern: String,
    /// 目录输入是否递归
    pub recursive: bool,
}

/// 把命令行给出的路径解析为待检查的文件列表
///
/// 恰好两个非目录路径且未禁用推断时，按序列展开；否则原样保留，
/// 目录展开为其中匹配的文件。
pub fn resolve_inputs(inputs: &[PathBuf], options: &InputOptions) -> Result<Vec<PathBuf>> {
    if options.infer_sequence && inputs.len() == 2 && !inputs.iter().any(|p| p.is_dir()) {
        return Ok(FileSequence::infer(&inputs[0], &inputs[1])?.paths());
    }

    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = FileCollector::new(input.clone())
                .with_pattern(&options.pattern)?
                .recursive(options.recursive)
                .collect();
            log::debug!("{}: {} file(s) match '{}'", input.display(), found.len(), options.pattern);
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
