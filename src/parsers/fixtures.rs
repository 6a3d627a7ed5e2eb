//! 测试用的 CGGTTS 文件内容

pub const LEGEND: &str = "\
PRN CL  MJD  STTIME TRKL ELV AZTH   REFSV      SRSV     REFGPS    SRGPS  DSG IOE MDTR SMDT MDIO SMDI CK
             hhmmss  s  .1dg .1dg    .1ns     .1ps/s     .1ns    .1ps/s .1ns     .1ns.1ps/s.1ns.1ps/s
";

/// 01 版文件头，COMMENTS 部分由调用方给出
pub fn v01_header(comments: &str) -> String {
    format!(
        "GGTTS GPS DATA FORMAT VERSION = 01
REV DATE = 2016-06-16
RCVR = TTS-4 1003 2014 v2.1
CH = 12
IMS = 99999
LAB = AUS
X = -4648240.14 m
Y = +2560636.31 m
Z = -3526318.64 m
FRAME = ITRF
{comments}
INT DLY =   53.0 ns
CAB DLY =  205.0 ns
REF DLY =    0.0 ns
REF = UTC(AUS)
CKSUM = 2C

{LEGEND}"
    )
}

/// 2E 版文件头，时延块由调用方给出
pub fn v2e_header(delays: &str) -> String {
    format!(
        "CGGTTS     GENERIC DATA FORMAT VERSION = 2E
REV DATE = 2019-04-30
RCVR = MESIT GTR51 1702010 2017 v2.6
CH = 32
IMS = 99999
LAB = AUS
X = -4648240.14 m
Y = +2560636.31 m
Z = -3526318.64 m
FRAME = ITRF
COMMENTS = NO COMMENTS
{delays}
REF = UTC(AUS)
CKSUM = 1F

{LEGEND}"
    )
}

/// 一条 01 版数据行；只有 STTIME、TRKL、ELV、DSG 可变
pub fn track(prn: u32, sttime: &str, trkl: i64, elv: i64, dsg: i64) -> String {
    format!(
        "{prn:>2} FF 57570 {sttime}  {trkl:>3} {elv:>4} 1238   -19473       -7   -14587       -5 {dsg:>4}  26  182   -5   39   -2 8B\n"
    )
}

/// 完整的 01 版文件
pub fn v01_file(tracks: &[String]) -> String {
    let mut content = v01_header("COMMENTS = NO COMMENTS");
    for t in tracks {
        content.push_str(t);
    }
    content
}
