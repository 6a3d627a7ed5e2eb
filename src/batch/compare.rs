//! # 文件头变化检测
//!
//! 比较时间序列中相邻两个（成功解析的）文件的文件头，
//! 报告坐标、校准时延、参考时标与版本日期的变化。
//!
//! ## 输出格式
//! ```text
//! PREVFILE->CURRFILE: <说明>: (<旧值>) -> (<新值>)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/headers.rs` 调用
//! - 使用 `models/header.rs`

use super::runner::ParsedFile;
use crate::models::header::DELAY_KEYS;
use crate::models::Header;

use std::fmt;

/// 一条文件头变化记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChange {
    pub prev_file: String,
    pub curr_file: String,
    pub description: &'static str,
    pub old: String,
    pub new: String,
}

impl fmt::Display for HeaderChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}: {}: ({}) -> ({})",
            self.prev_file, self.curr_file, self.description, self.old, self.new
        )
    }
}

fn delay_description(key: &str) -> &'static str {
    match key {
        "int dly" => "INT DLY changed",
        "cab dly" => "CAB DLY changed",
        "ref dly" => "REF DLY changed",
        "sys dly" => "SYS DLY changed",
        "tot dly" => "TOT DLY changed",
        _ => "delay changed",
    }
}

/// 比较两个文件头
///
/// 输出顺序固定：REV DATE、坐标、INT/CAB/REF/SYS/TOT DLY、REF。
/// 时延只在两边都存在且不同的情况下报告。
pub fn compare_headers(prev_file: &str, prev: &Header, curr_file: &str, curr: &Header) -> Vec<HeaderChange> {
    let mut changes = Vec::new();
    let mut push = |description: &'static str, old: String, new: String| {
        changes.push(HeaderChange {
            prev_file: prev_file.to_string(),
            curr_file: curr_file.to_string(),
            description,
            old,
            new,
        });
    };

    if prev.rev_date != curr.rev_date {
        push("REV DATE changed", prev.rev_date.clone(), curr.rev_date.clone());
    }

    // 坐标按原始文本比较，合并为一条
    if prev.x != curr.x || prev.y != curr.y || prev.z != curr.z {
        push(
            "coords changed",
            format!("{},{},{}", prev.x, prev.y, prev.z),
            format!("{},{},{}", curr.x, curr.y, curr.z),
        );
    }

    for key in DELAY_KEYS {
        if let (Some(old), Some(new)) = (prev.get(key), curr.get(key)) {
            if old != new {
                push(delay_description(key), old.to_string(), new.to_string());
            }
        }
    }

    if prev.reference != curr.reference {
        push("REF changed", prev.reference.clone(), curr.reference.clone());
    }

    changes
}

/// 依次比较序列中相邻的文件
pub fn compare_sequence(files: &[ParsedFile]) -> Vec<HeaderChange> {
    files
        .windows(2)
        .flat_map(|pair| compare_headers(&pair[0].name, &pair[0].header, &pair[1].name, &pair[1].header))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalibrationDelays, Delays2E, ReceiverDelays, Stats};
    use std::path::PathBuf;

    fn header() -> Header {
        Header {
            rev_date: "2016-06-16".to_string(),
            rcvr: "RCVR = TTS-4".to_string(),
            ch: "CH = 12".to_string(),
            ims: "IMS = 99999".to_string(),
            lab: "LAB = AUS".to_string(),
            x: "-4648240.14".to_string(),
            y: "+2560636.31".to_string(),
            z: "-3526318.64".to_string(),
            frame: "FRAME = ITRF".to_string(),
            comments: "NO COMMENTS".to_string(),
            delays: CalibrationDelays::V01(ReceiverDelays {
                internal: "53.0".to_string(),
                cable: "205.0".to_string(),
                reference: "0.0".to_string(),
            }),
            reference: "UTC(AUS)".to_string(),
        }
    }

    fn parsed(name: &str, header: Header) -> ParsedFile {
        ParsedFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            header,
            stats: Stats::default(),
        }
    }

    #[test]
    fn test_identical_headers() {
        assert!(compare_headers("a", &header(), "b", &header()).is_empty());
    }

    #[test]
    fn test_single_coordinate_change() {
        let mut curr = header();
        curr.x = "-4648240.20".to_string();

        let changes = compare_headers("57570.cctf", &header(), "57571.cctf", &curr);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].to_string(),
            "57570.cctf->57571.cctf: coords changed: (-4648240.14,+2560636.31,-3526318.64) -> (-4648240.20,+2560636.31,-3526318.64)"
        );
    }

    #[test]
    fn test_coordinates_compared_as_text() {
        let mut curr = header();
        curr.z = "-3526318.640".to_string();
        assert_eq!(compare_headers("a", &header(), "b", &curr).len(), 1);
    }

    #[test]
    fn test_change_order() {
        let mut curr = header();
        curr.reference = "UTC(AUS)2".to_string();
        curr.delays = CalibrationDelays::V01(ReceiverDelays {
            internal: "54.0".to_string(),
            cable: "205.0".to_string(),
            reference: "1.0".to_string(),
        });
        curr.y = "0".to_string();
        curr.rev_date = "2017-01-01".to_string();

        let descriptions: Vec<&str> = compare_headers("a", &header(), "b", &curr)
            .iter()
            .map(|c| c.description)
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "REV DATE changed",
                "coords changed",
                "INT DLY changed",
                "REF DLY changed",
                "REF changed"
            ]
        );
    }

    #[test]
    fn test_delay_absent_on_one_side_is_skipped() {
        let mut prev = header();
        prev.delays = CalibrationDelays::V2E(Delays2E::System {
            system: "185.9 ns".to_string(),
            reference: "30.0".to_string(),
        });
        let mut curr = header();
        curr.delays = CalibrationDelays::V2E(Delays2E::Total("240.0 ns".to_string()));

        assert!(compare_headers("a", &prev, "b", &curr).is_empty());
    }

    #[test]
    fn test_ref_dly_compared_across_layouts() {
        let mut prev = header();
        prev.delays = CalibrationDelays::V2E(Delays2E::System {
            system: "185.9 ns".to_string(),
            reference: "30.0".to_string(),
        });

        let changes = compare_headers("a", &prev, "b", &header());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to_string(), "a->b: REF DLY changed: (30.0) -> (0.0)");
    }

    #[test]
    fn test_sequence_compares_adjacent_files_only() {
        let mut second = header();
        second.reference = "UTC(X)".to_string();
        let files = vec![
            parsed("1.cctf", header()),
            parsed("2.cctf", second.clone()),
            parsed("3.cctf", second),
        ];

        let changes = compare_sequence(&files);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to_string(), "1.cctf->2.cctf: REF changed: (UTC(AUS)) -> (UTC(X))");
    }
}
