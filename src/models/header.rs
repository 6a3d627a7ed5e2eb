//! # CGGTTS 文件头数据模型
//!
//! 文件头的必需字段是普通字符串；校准时延的表达方式取决于格式版本，
//! 用 `CalibrationDelays` 按版本建模，保证版本与时延字段组合一致。
//!
//! ## 依赖关系
//! - 被 `parsers/header.rs` 构造
//! - 被 `batch/compare.rs` 比较

use serde::Serialize;

/// CGGTTS 格式版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Version {
    /// `GGTTS GPS DATA FORMAT VERSION = 01`
    V01,
    /// `CGGTTS GENERIC DATA FORMAT VERSION = 2E`
    V2E,
}

impl Version {
    /// 文件中出现的两字符版本标记
    pub fn tag(&self) -> &'static str {
        match self {
            Version::V01 => "01",
            Version::V2E => "2E",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "01" => Some(Version::V01),
            "2E" => Some(Version::V2E),
            _ => None,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// INT DLY + CAB DLY + REF DLY 三元组 (ns)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiverDelays {
    pub internal: String,
    pub cable: String,
    pub reference: String,
}

/// 2E 版本允许的三种时延写法
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Delays2E {
    /// `TOT DLY`
    Total(String),
    /// `SYS DLY` + `REF DLY`
    System { system: String, reference: String },
    /// `INT DLY` + `CAB DLY` + `REF DLY`
    Receiver(ReceiverDelays),
}

/// 按版本区分的校准时延
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CalibrationDelays {
    V01(ReceiverDelays),
    V2E(Delays2E),
}

impl CalibrationDelays {
    pub fn version(&self) -> Version {
        match self {
            CalibrationDelays::V01(_) => Version::V01,
            CalibrationDelays::V2E(_) => Version::V2E,
        }
    }

    /// 按键名取时延值；该版本写法中不存在的键返回 `None`
    pub fn get(&self, key: &str) -> Option<&str> {
        let receiver = match self {
            CalibrationDelays::V01(r) | CalibrationDelays::V2E(Delays2E::Receiver(r)) => r,
            CalibrationDelays::V2E(Delays2E::Total(tot)) => {
                return (key == TOT_DLY).then_some(tot.as_str());
            }
            CalibrationDelays::V2E(Delays2E::System { system, reference }) => {
                return match key {
                    SYS_DLY => Some(system.as_str()),
                    REF_DLY => Some(reference.as_str()),
                    _ => None,
                };
            }
        };
        match key {
            INT_DLY => Some(receiver.internal.as_str()),
            CAB_DLY => Some(receiver.cable.as_str()),
            REF_DLY => Some(receiver.reference.as_str()),
            _ => None,
        }
    }

    /// 当前写法包含的时延键，按文件中的顺序
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            CalibrationDelays::V01(_) | CalibrationDelays::V2E(Delays2E::Receiver(_)) => {
                &[INT_DLY, CAB_DLY, REF_DLY]
            }
            CalibrationDelays::V2E(Delays2E::System { .. }) => &[SYS_DLY, REF_DLY],
            CalibrationDelays::V2E(Delays2E::Total(_)) => &[TOT_DLY],
        }
    }
}

pub const INT_DLY: &str = "int dly";
pub const CAB_DLY: &str = "cab dly";
pub const REF_DLY: &str = "ref dly";
pub const SYS_DLY: &str = "sys dly";
pub const TOT_DLY: &str = "tot dly";

/// 所有可能出现的时延键，比较时按此顺序输出
pub const DELAY_KEYS: [&str; 5] = [INT_DLY, CAB_DLY, REF_DLY, SYS_DLY, TOT_DLY];

/// CGGTTS 文件头
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub rev_date: String,
    /// `RCVR` 整行
    pub rcvr: String,
    /// `CH` 整行
    pub ch: String,
    /// `IMS` 整行
    pub ims: String,
    /// `LAB` 整行
    pub lab: String,
    /// 天线坐标 (m)，保留原始文本
    pub x: String,
    pub y: String,
    pub z: String,
    /// `FRAME` 整行
    pub frame: String,
    /// 所有 COMMENTS 行拼接后的内容
    pub comments: String,
    pub delays: CalibrationDelays,
    /// `REF` 的值，例如 `UTC(AUS)`
    pub reference: String,
}

impl Header {
    pub fn version(&self) -> Version {
        self.delays.version()
    }

    /// 以键名访问字段（与 `fields()` 使用相同的键）
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "version" => Some(self.version().tag()),
            "rev date" => Some(self.rev_date.as_str()),
            "rcvr" => Some(self.rcvr.as_str()),
            "ch" => Some(self.ch.as_str()),
            "ims" => Some(self.ims.as_str()),
            "lab" => Some(self.lab.as_str()),
            "x" => Some(self.x.as_str()),
            "y" => Some(self.y.as_str()),
            "z" => Some(self.z.as_str()),
            "frame" => Some(self.frame.as_str()),
            "comments" => Some(self.comments.as_str()),
            "ref" => Some(self.reference.as_str()),
            _ => self.delays.get(key),
        }
    }

    /// 所有存在的字段，按文件中出现的顺序
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("version", self.version().tag()),
            ("rev date", self.rev_date.as_str()),
            ("rcvr", self.rcvr.as_str()),
            ("ch", self.ch.as_str()),
            ("ims", self.ims.as_str()),
            ("lab", self.lab.as_str()),
            ("x", self.x.as_str()),
            ("y", self.y.as_str()),
            ("z", self.z.as_str()),
            ("frame", self.frame.as_str()),
            ("comments", self.comments.as_str()),
        ];
        for &key in self.delays.keys() {
            if let Some(value) = self.delays.get(key) {
                fields.push((key, value));
            }
        }
        fields.push(("ref", self.reference.as_str()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_with(delays: CalibrationDelays) -> Header {
        Header {
            rev_date: "2016-06-16".to_string(),
            rcvr: "RCVR = Trimble".to_string(),
            ch: "CH = 12".to_string(),
            ims: "IMS = 99999".to_string(),
            lab: "LAB = AUS".to_string(),
            x: "-4648240.14".to_string(),
            y: "+2560636.31".to_string(),
            z: "-3526318.64".to_string(),
            frame: "FRAME = ITRF".to_string(),
            comments: "NO COMMENTS".to_string(),
            delays,
            reference: "UTC(AUS)".to_string(),
        }
    }

    fn receiver() -> ReceiverDelays {
        ReceiverDelays {
            internal: "53.0".to_string(),
            cable: "205.0".to_string(),
            reference: "0.0".to_string(),
        }
    }

    #[test]
    fn test_v01_fields() {
        let header = header_with(CalibrationDelays::V01(receiver()));
        assert_eq!(header.version(), Version::V01);

        let keys: Vec<&str> = header.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), 15);
        assert!(keys.contains(&"int dly"));
        assert!(keys.contains(&"cab dly"));
        assert!(keys.contains(&"ref dly"));
        assert_eq!(header.get("sys dly"), None);
        assert_eq!(header.get("tot dly"), None);
        assert_eq!(header.get("cab dly"), Some("205.0"));
    }

    #[test]
    fn test_2e_system_delays() {
        let header = header_with(CalibrationDelays::V2E(Delays2E::System {
            system: "185.9 ns (GPS C1)".to_string(),
            reference: "30.0".to_string(),
        }));
        assert_eq!(header.version().tag(), "2E");
        assert_eq!(header.get("sys dly"), Some("185.9 ns (GPS C1)"));
        assert_eq!(header.get("ref dly"), Some("30.0"));
        assert_eq!(header.get("int dly"), None);
        assert_eq!(header.fields().len(), 14);
    }

    #[test]
    fn test_2e_total_delay() {
        let header = header_with(CalibrationDelays::V2E(Delays2E::Total("240.0 ns".into())));
        assert_eq!(header.get("tot dly"), Some("240.0 ns"));
        assert_eq!(header.get("ref dly"), None);
        assert_eq!(header.fields().len(), 13);
    }

    #[test]
    fn test_version_tags() {
        assert_eq!(Version::from_tag("01"), Some(Version::V01));
        assert_eq!(Version::from_tag("2E"), Some(Version::V2E));
        assert_eq!(Version::from_tag("2D"), None);
    }
}
