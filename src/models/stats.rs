//! # 质量统计数据模型
//!
//! 单个文件的 QC 统计量，以及判定阈值。
//!
//! ## 依赖关系
//! - 被 `parsers/tracks.rs` 填充
//! - 被 `commands/stats.rs` 输出

use serde::Serialize;

/// 单个文件主体的 QC 统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// 数据行总数
    pub ntracks: usize,
    /// 同一 STTIME 下的最多卫星数
    pub maxsats: usize,
    /// 同一 STTIME 下的最少卫星数
    pub minsats: usize,
    /// 低于高度角阈值的数据行
    pub lowelv: usize,
    /// 高于 DSG 阈值的数据行
    pub highdsg: usize,
    /// 短于跟踪时长阈值的数据行
    pub shorttracks: usize,
}

impl Stats {
    /// 文件头之后没有任何数据行
    pub fn is_empty(&self) -> bool {
        self.ntracks == 0
    }
}

/// QC 判定阈值
///
/// DSG 与高度角以文件中的 0.1 单位定点数保存，跟踪时长以秒为单位。
/// 判定均为严格比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// DSG 上限 (0.1 ns)
    pub max_dsg: i64,
    /// 高度角下限 (0.1°)
    pub min_elevation: i64,
    /// 跟踪时长下限 (s)
    pub min_track_length: i64,
}

pub const DEFAULT_MAX_DSG_NS: f64 = 20.0;
pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 10.0;
pub const DEFAULT_MIN_TRACK_LENGTH_S: i64 = 780;

impl Thresholds {
    /// 从用户单位（ns、度、秒）换算
    pub fn from_user_units(max_dsg_ns: f64, min_elevation_deg: f64, min_track_length_s: i64) -> Self {
        Thresholds {
            max_dsg: to_tenths(max_dsg_ns),
            min_elevation: to_tenths(min_elevation_deg),
            min_track_length: min_track_length_s,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::from_user_units(
            DEFAULT_MAX_DSG_NS,
            DEFAULT_MIN_ELEVATION_DEG,
            DEFAULT_MIN_TRACK_LENGTH_S,
        )
    }
}

fn to_tenths(value: f64) -> i64 {
    (value * 10.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.max_dsg, 200);
        assert_eq!(t.min_elevation, 100);
        assert_eq!(t.min_track_length, 780);
    }

    #[test]
    fn test_fractional_user_units() {
        let t = Thresholds::from_user_units(2.5, 7.5, 600);
        assert_eq!(t.max_dsg, 25);
        assert_eq!(t.min_elevation, 75);
        assert_eq!(t.min_track_length, 600);
    }
}
