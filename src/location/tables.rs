//! Fixed reference tables for classifying qqwry text
//!
//! Reproduced verbatim from the legacy reference data. All lists are ordered:
//! the classifier takes the first match in list order.

use once_cell::sync::Lazy;
use regex::Regex;

/// ISP names, matched against the sub info in this order
pub const ISPS: [&str; 6] = ["联通", "移动", "铁通", "电信", "长城", "鹏博士"];

/// Province-level names. The first `MUNICIPALITY_COUNT` entries are
/// municipalities, which have no separate city tier.
pub const PROVINCES: [&str; 34] = [
    "北京",
    "天津",
    "重庆",
    "上海",
    "河北",
    "山西",
    "辽宁",
    "吉林",
    "黑龙江",
    "江苏",
    "浙江",
    "安徽",
    "福建",
    "江西",
    "山东",
    "河南",
    "湖北",
    "湖南",
    "广东",
    "海南",
    "四川",
    "贵州",
    "云南",
    "陕西",
    "甘肃",
    "青海",
    "台湾",
    "内蒙古",
    "广西",
    "宁夏",
    "新疆",
    "西藏",
    "香港",
    "澳门",
];

/// Number of municipality entries at the head of `PROVINCES`
pub const MUNICIPALITY_COUNT: usize = 4;

/// Province separator glyph
pub const PROVINCE_SUFFIX: &str = "省";

/// City-level suffixes: city, autonomous prefecture, prefecture, league
pub const CITY_SUFFIXES: [&str; 5] = ["市", "自治州", "州", "地区", "盟"];

/// County-level suffixes: county, district, banner
pub const COUNTY_SUFFIXES: [&str; 3] = ["县", "区", "旗"];

/// Region designators stripped from the remainder before the suffix scan
pub static REGION_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("自治区|特别行政区").expect("Failed to compile region suffix regex")
});
