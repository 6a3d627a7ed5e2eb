//! # CGGTTS 文件头解析器
//!
//! 文件头是严格按行排列的固定格式，每一行都有唯一的期望格式。
//! 这里把它写成 `HeaderStep`（标签、匹配器、提取器）的有序表，
//! 解析时依次套用；任何一步不匹配即返回 `MalformedHeader`。
//!
//! ## 文件头格式
//! ```text
//! GGTTS GPS DATA FORMAT VERSION = 01          # 或 CGGTTS     GENERIC DATA FORMAT VERSION = 2E
//! REV DATE = 2016-06-16
//! RCVR = ...
//! CH = 12
//! IMS = 99999
//! LAB = AUS
//! X = -4648240.14 m
//! Y = +2560636.31 m
//! Z = -3526318.64 m
//! FRAME = ITRF
//! COMMENTS = NO COMMENTS                      # 可能重复多行
//! INT DLY =   53.0 ns                         # 时延块，写法取决于版本
//! CAB DLY =  205.0 ns
//! REF DLY =    0.0 ns
//! REF = UTC(AUS)
//! CKSUM = 2C                                  # 只检查存在，不校验
//!
//! PRN CL  MJD  STTIME TRKL ELV AZTH ...       # 列标题
//!              hhmmss  s  .1dg .1dg ... .1ns.1ps/s ...   # 单位行，之后是数据
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/lines.rs`, `models/header.rs`
//! - 使用 `regex` crate

use super::lines::LineCursor;
use crate::error::Result;
use crate::models::{CalibrationDelays, Delays2E, Header, ReceiverDelays, Version};

use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

/// 列单位行中的标记，数据行从其下一行开始
pub const COLUMN_UNITS_MARKER: &str = ".1ns.1ps";

/// 行匹配方式
pub enum Matcher {
    /// 行中任意位置包含
    Contains(&'static str),
    /// 行以此开头
    StartsWith(&'static str),
    /// 正则匹配
    Pattern(&'static LazyLock<Regex>),
}

/// 从匹配行中取值的方式
pub enum Extractor {
    /// 整行
    Verbatim,
    /// 第一个 `=` 之后的内容（去掉首尾空白）
    AfterEquals,
    /// 正则捕获组
    Capture(usize),
}

/// 文件头语法中的一步
pub struct HeaderStep {
    pub label: &'static str,
    pub matcher: Matcher,
    pub extractor: Extractor,
}

impl HeaderStep {
    /// 对一行应用本步骤，返回提取的值；不匹配时返回 `None`
    pub fn apply(&self, line: &str) -> Option<String> {
        let captures = match &self.matcher {
            Matcher::Contains(tag) => {
                if !line.contains(tag) {
                    return None;
                }
                None
            }
            Matcher::StartsWith(tag) => {
                if !line.starts_with(tag) {
                    return None;
                }
                None
            }
            Matcher::Pattern(re) => Some(re.captures(line)?),
        };

        match self.extractor {
            Extractor::Verbatim => Some(line.to_string()),
            Extractor::AfterEquals => line
                .split_once('=')
                .map(|(_, value)| value.trim().to_string()),
            Extractor::Capture(group) => captures?
                .get(group)
                .map(|m| m.as_str().trim().to_string()),
        }
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("built-in header pattern must compile")
}

// ─────────────────────────────────────────────────────────────
// 正则
// ─────────────────────────────────────────────────────────────

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^(?:GGTTS GPS DATA FORMAT VERSION|CGGTTS     GENERIC DATA FORMAT VERSION)\s+=\s+(01|2E)")
});
static X_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^X\s+=\s+(.+)\s+m$"));
static Y_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^Y\s+=\s+(.+)\s+m$"));
static Z_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^Z\s+=\s+(.+)\s+m$"));
static INT_DLY_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^INT\s+DLY\s+=\s+(.+)\s+ns$"));
static CAB_DLY_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^CAB\s+DLY\s+=\s+(.+)\s+ns$"));
static REF_DLY_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^REF\s+DLY\s+=\s+(.+)\s+ns$"));

// ─────────────────────────────────────────────────────────────
// 语法步骤
// ─────────────────────────────────────────────────────────────

static VERSION: HeaderStep = HeaderStep {
    label: "format version",
    matcher: Matcher::Pattern(&VERSION_RE),
    extractor: Extractor::Capture(1),
};

/// 版本行之后、COMMENTS 之前的固定行：
/// REV DATE, RCVR, CH, IMS, LAB, X, Y, Z, FRAME
static PREAMBLE: [HeaderStep; 9] = [
    HeaderStep {
        label: "REV DATE",
        matcher: Matcher::Contains("REV DATE"),
        extractor: Extractor::AfterEquals,
    },
    HeaderStep {
        label: "RCVR",
        matcher: Matcher::Contains("RCVR"),
        extractor: Extractor::Verbatim,
    },
    HeaderStep {
        label: "CH",
        matcher: Matcher::Contains("CH"),
        extractor: Extractor::Verbatim,
    },
    HeaderStep {
        label: "IMS",
        matcher: Matcher::Contains("IMS"),
        extractor: Extractor::Verbatim,
    },
    HeaderStep {
        label: "LAB",
        matcher: Matcher::StartsWith("LAB"),
        extractor: Extractor::Verbatim,
    },
    HeaderStep {
        label: "X = <value> m",
        matcher: Matcher::Pattern(&X_RE),
        extractor: Extractor::Capture(1),
    },
    HeaderStep {
        label: "Y = <value> m",
        matcher: Matcher::Pattern(&Y_RE),
        extractor: Extractor::Capture(1),
    },
    HeaderStep {
        label: "Z = <value> m",
        matcher: Matcher::Pattern(&Z_RE),
        extractor: Extractor::Capture(1),
    },
    HeaderStep {
        label: "FRAME",
        matcher: Matcher::StartsWith("FRAME"),
        extractor: Extractor::Verbatim,
    },
];

static COMMENTS: HeaderStep = HeaderStep {
    label: "COMMENTS",
    matcher: Matcher::StartsWith("COMMENTS"),
    extractor: Extractor::AfterEquals,
};

static INT_DLY_NS: HeaderStep = HeaderStep {
    label: "INT DLY = <value> ns",
    matcher: Matcher::Pattern(&INT_DLY_RE),
    extractor: Extractor::Capture(1),
};

static CAB_DLY_NS: HeaderStep = HeaderStep {
    label: "CAB DLY = <value> ns",
    matcher: Matcher::Pattern(&CAB_DLY_RE),
    extractor: Extractor::Capture(1),
};

static REF_DLY_NS: HeaderStep = HeaderStep {
    label: "REF DLY = <value> ns",
    matcher: Matcher::Pattern(&REF_DLY_RE),
    extractor: Extractor::Capture(1),
};

/// 2E 时延块的首行：三种写法之一，值为 `=` 之后的全部内容
static TOT_DLY: HeaderStep = HeaderStep {
    label: "TOT DLY",
    matcher: Matcher::StartsWith("TOT DLY"),
    extractor: Extractor::AfterEquals,
};

static SYS_DLY: HeaderStep = HeaderStep {
    label: "SYS DLY",
    matcher: Matcher::StartsWith("SYS DLY"),
    extractor: Extractor::AfterEquals,
};

static INT_DLY: HeaderStep = HeaderStep {
    label: "INT DLY",
    matcher: Matcher::StartsWith("INT DLY"),
    extractor: Extractor::AfterEquals,
};

static RECEIVER_TAIL: [&HeaderStep; 2] = [&CAB_DLY_NS, &REF_DLY_NS];

static REF: HeaderStep = HeaderStep {
    label: "REF",
    matcher: Matcher::StartsWith("REF"),
    extractor: Extractor::AfterEquals,
};

// 只检查 CKSUM 行存在，不校验其值
static CKSUM: HeaderStep = HeaderStep {
    label: "CKSUM",
    matcher: Matcher::StartsWith("CKSUM"),
    extractor: Extractor::Verbatim,
};

// ─────────────────────────────────────────────────────────────
// 解析
// ─────────────────────────────────────────────────────────────

impl<R: BufRead> LineCursor<R> {
    /// 用给定步骤检查一行
    fn check(&self, step: &HeaderStep, line: &str) -> Result<String> {
        step.apply(line)
            .ok_or_else(|| self.malformed(format!("expected {}", step.label)))
    }

    /// 读取下一行并用给定步骤检查
    fn expect(&mut self, step: &HeaderStep) -> Result<String> {
        let line = self.require_line(step.label)?;
        self.check(step, &line)
    }

    /// 依次读取并检查多行
    fn expect_all<const N: usize>(&mut self, steps: [&HeaderStep; N]) -> Result<[String; N]> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, step) in values.iter_mut().zip(steps) {
            *slot = self.expect(step)?;
        }
        Ok(values)
    }
}

/// 解析文件头，并跳过列标题直到数据行开始
pub fn parse_header<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<Header> {
    let tag = cursor.expect(&VERSION)?;
    let version = Version::from_tag(&tag)
        .ok_or_else(|| cursor.malformed(format!("unsupported version '{}'", tag)))?;

    let [rev_date, rcvr, ch, ims, lab, x, y, z, frame] = cursor.expect_all(PREAMBLE.each_ref())?;

    // 有些文件错误地把 COMMENTS 写成多行，这里拼接成一条
    let mut comments = String::new();
    let mut comment_lines = 0;
    let mut line = cursor.require_line(COMMENTS.label)?;
    loop {
        if line.is_empty() {
            return Err(cursor.malformed("blank line in COMMENTS block"));
        }
        match COMMENTS.apply(&line) {
            Some(body) => {
                comments.push_str(&body);
                comment_lines += 1;
            }
            None => break,
        }
        line = cursor.require_line("calibration delays")?;
    }
    if comment_lines == 0 {
        return Err(cursor.malformed(format!("expected {}", COMMENTS.label)));
    }

    // 此时 `line` 已是时延块的第一行
    let delays = match version {
        Version::V01 => CalibrationDelays::V01(receiver_delays(cursor, &INT_DLY_NS, &line)?),
        Version::V2E => CalibrationDelays::V2E(delays_2e(cursor, &line)?),
    };

    let reference = cursor.expect(&REF)?;
    cursor.expect(&CKSUM)?;
    skip_column_legend(cursor)?;

    let header = Header {
        rev_date,
        rcvr,
        ch,
        ims,
        lab,
        x,
        y,
        z,
        frame,
        comments,
        delays,
        reference,
    };

    log::debug!("{}: header ends at line {}", cursor.path(), cursor.line_no());
    for (key, value) in header.fields() {
        log::debug!("  {:<9} {}", key, value);
    }

    Ok(header)
}

/// INT DLY（已读入的 `first`）+ CAB DLY + REF DLY
fn receiver_delays<R: BufRead>(
    cursor: &mut LineCursor<R>,
    first_step: &HeaderStep,
    first: &str,
) -> Result<ReceiverDelays> {
    let internal = cursor.check(first_step, first)?;
    let [cable, reference] = cursor.expect_all(RECEIVER_TAIL)?;
    Ok(ReceiverDelays {
        internal,
        cable,
        reference,
    })
}

fn delays_2e<R: BufRead>(cursor: &mut LineCursor<R>, first: &str) -> Result<Delays2E> {
    if let Some(total) = TOT_DLY.apply(first) {
        Ok(Delays2E::Total(total))
    } else if let Some(system) = SYS_DLY.apply(first) {
        let reference = cursor.expect(&REF_DLY_NS)?;
        Ok(Delays2E::System { system, reference })
    } else if first.starts_with("INT DLY") {
        Ok(Delays2E::Receiver(receiver_delays(cursor, &INT_DLY, first)?))
    } else {
        Err(cursor.malformed("expected TOT DLY, SYS DLY or INT DLY"))
    }
}

/// 丢弃列标题与单位行；单位行之前就结束的文件视为文件头不完整
fn skip_column_legend<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<()> {
    while let Some(line) = cursor.next_line()? {
        if line.contains(COLUMN_UNITS_MARKER) {
            return Ok(());
        }
    }
    Err(cursor.malformed(format!(
        "end of file before column units line ('{}')",
        COLUMN_UNITS_MARKER
    )))
}
