//! # stats 子命令 CLI 定义
//!
//! 逐文件输出 QC 统计表。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/stats.rs`

use super::InputArgs;
use crate::error::{CggttsError, Result};
use crate::models::Thresholds;

use clap::Args;
use std::path::PathBuf;

/// stats 子命令参数
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Upper limit for DSG, in ns
    #[arg(long, env = "CGGTTSQC_DSG", default_value_t = 20.0)]
    pub dsg: f64,

    /// Lower limit for elevation, in degrees
    #[arg(long, env = "CGGTTSQC_ELEVATION", default_value_t = 10.0)]
    pub elevation: f64,

    /// Lower limit for track length, in s
    #[arg(long, env = "CGGTTSQC_TRACKLENGTH", default_value_t = 780)]
    pub tracklength: i64,

    /// Also write the statistics to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}

impl StatsArgs {
    /// 换算为文件中使用的单位
    pub fn thresholds(&self) -> Result<Thresholds> {
        if !self.dsg.is_finite() || !self.elevation.is_finite() {
            return Err(CggttsError::InvalidArgument(format!(
                "thresholds must be finite (dsg {}, elevation {})",
                self.dsg, self.elevation
            )));
        }
        Ok(Thresholds::from_user_units(self.dsg, self.elevation, self.tracklength))
    }
}
