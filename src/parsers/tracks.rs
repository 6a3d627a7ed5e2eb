//! # CGGTTS 数据行统计
//!
//! 单遍扫描文件主体，计算 QC 统计量。
//!
//! ## 数据行格式
//! 以空白分隔的列，按位置取值（从 0 开始）：
//! - 列 3: STTIME，同一时刻的行视为同时跟踪的卫星
//! - 列 4: TRKL，跟踪时长 (s)
//! - 列 5: ELV，高度角 (0.1°)
//! - 列 11: DSG (0.1 ns)
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/lines.rs`, `models/stats.rs`

use super::lines::LineCursor;
use crate::error::Result;
use crate::models::{Stats, Thresholds};
use std::io::BufRead;

const STTIME: usize = 3;
const TRKL: usize = 4;
const ELV: usize = 5;
const DSG: usize = 11;

/// 一条数据行中参与统计的字段
#[derive(Debug, PartialEq, Eq)]
pub struct TrackRow<'a> {
    pub sttime: &'a str,
    pub trkl: i64,
    pub elv: i64,
    pub dsg: i64,
}

impl<'a> TrackRow<'a> {
    pub fn parse(line: &'a str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= DSG {
            return Err(format!(
                "expected at least {} fields, found {}",
                DSG + 1,
                fields.len()
            ));
        }

        let integer = |idx: usize, name: &str| {
            fields[idx]
                .parse::<i64>()
                .map_err(|_| format!("{} '{}' is not an integer", name, fields[idx]))
        };

        Ok(TrackRow {
            sttime: fields[STTIME],
            trkl: integer(TRKL, "TRKL")?,
            elv: integer(ELV, "ELV")?,
            dsg: integer(DSG, "DSG")?,
        })
    }
}

/// 同一 STTIME 的连续行数（卫星数）的极值
#[derive(Debug, Default)]
struct SatelliteRuns {
    current: Option<(String, usize)>,
    min: Option<usize>,
    max: Option<usize>,
}

impl SatelliteRuns {
    fn push(&mut self, sttime: &str) {
        if let Some((time, count)) = &mut self.current {
            if *time == sttime {
                *count += 1;
                return;
            }
        }
        self.close_run();
        self.current = Some((sttime.to_string(), 1));
    }

    fn close_run(&mut self) {
        if let Some((_, count)) = self.current.take() {
            self.min = Some(self.min.map_or(count, |m| m.min(count)));
            self.max = Some(self.max.map_or(count, |m| m.max(count)));
        }
    }

    /// 结束最后一组；没有任何数据行时返回 (0, 0)
    fn finish(mut self) -> (usize, usize) {
        self.close_run();
        (self.min.unwrap_or(0), self.max.unwrap_or(0))
    }
}

/// 读取文件头之后的所有数据行并统计
pub fn collect_stats<R: BufRead>(cursor: &mut LineCursor<R>, thresholds: &Thresholds) -> Result<Stats> {
    let mut stats = Stats::default();
    let mut runs = SatelliteRuns::default();

    while let Some(line) = cursor.next_line()? {
        if line.trim().is_empty() {
            continue;
        }
        let row = TrackRow::parse(&line).map_err(|reason| cursor.malformed_track(reason))?;

        runs.push(row.sttime);
        stats.ntracks += 1;
        if row.trkl < thresholds.min_track_length {
            stats.shorttracks += 1;
        }
        if row.elv < thresholds.min_elevation {
            stats.lowelv += 1;
        }
        if row.dsg > thresholds.max_dsg {
            stats.highdsg += 1;
        }
    }

    (stats.minsats, stats.maxsats) = runs.finish();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CggttsError;
    use crate::parsers::fixtures::track;

    fn stats_for(rows: &[String]) -> Result<Stats> {
        let body = rows.concat();
        let mut cursor = LineCursor::new(body.as_bytes(), "body");
        collect_stats(&mut cursor, &Thresholds::default())
    }

    #[test]
    fn test_parse_track_row() {
        let line = track(3, "000200", 780, 224, 15);
        let row = TrackRow::parse(&line).unwrap();
        assert_eq!(
            row,
            TrackRow {
                sttime: "000200",
                trkl: 780,
                elv: 224,
                dsg: 15
            }
        );
    }

    #[test]
    fn test_single_epoch() {
        let rows: Vec<String> = (1..=5).map(|prn| track(prn, "000200", 780, 300, 10)).collect();
        let stats = stats_for(&rows).unwrap();
        assert_eq!(stats.ntracks, 5);
        assert_eq!(stats.maxsats, 5);
        assert_eq!(stats.minsats, 5);
    }

    #[test]
    fn test_satellite_runs() {
        let rows = vec![
            track(1, "000200", 780, 300, 10),
            track(2, "000200", 780, 300, 10),
            track(3, "000200", 780, 300, 10),
            track(1, "001800", 780, 300, 10),
            track(1, "003400", 780, 300, 10),
            track(2, "003400", 780, 300, 10),
        ];
        let stats = stats_for(&rows).unwrap();
        assert_eq!(stats.ntracks, 6);
        assert_eq!(stats.maxsats, 3);
        assert_eq!(stats.minsats, 1);
    }

    #[test]
    fn test_final_run_is_counted() {
        let rows = vec![
            track(1, "000200", 780, 300, 10),
            track(2, "000200", 780, 300, 10),
            track(1, "001800", 780, 300, 10),
            track(2, "001800", 780, 300, 10),
            track(3, "001800", 780, 300, 10),
            track(4, "001800", 780, 300, 10),
        ];
        let stats = stats_for(&rows).unwrap();
        assert_eq!(stats.maxsats, 4);
        assert_eq!(stats.minsats, 2);
    }

    #[test]
    fn test_dsg_threshold_is_strict() {
        let stats = stats_for(&[track(1, "000200", 780, 300, 201)]).unwrap();
        assert_eq!(stats.highdsg, 1);

        let stats = stats_for(&[track(1, "000200", 780, 300, 200)]).unwrap();
        assert_eq!(stats.highdsg, 0);
    }

    #[test]
    fn test_elevation_and_track_length() {
        let rows = vec![
            track(1, "000200", 780, 100, 10),
            track(2, "000200", 779, 99, 10),
            track(3, "000200", 480, 50, 10),
        ];
        let stats = stats_for(&rows).unwrap();
        assert_eq!(stats.lowelv, 2);
        assert_eq!(stats.shorttracks, 2);
        assert_eq!(stats.highdsg, 0);
    }

    #[test]
    fn test_empty_body() {
        let stats = stats_for(&[]).unwrap();
        assert!(stats.is_empty());
        assert_eq!(stats.minsats, 0);
        assert_eq!(stats.maxsats, 0);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let rows = vec![track(1, "000200", 780, 300, 10), "\n".to_string(), "   \n".to_string()];
        let stats = stats_for(&rows).unwrap();
        assert_eq!(stats.ntracks, 1);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let rows = vec![
            track(1, "000200", 780, 300, 10),
            " 3 FF 57570 000200  780\n".to_string(),
        ];
        match stats_for(&rows) {
            Err(CggttsError::MalformedTrack { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 5"));
            }
            other => panic!("expected MalformedTrack, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let rows = vec![track(1, "000200", 780, 300, 10).replace(" 780 ", " ABC ")];
        match stats_for(&rows) {
            Err(CggttsError::MalformedTrack { reason, .. }) => assert!(reason.contains("TRKL")),
            other => panic!("expected MalformedTrack, got {:?}", other),
        }
    }
}
