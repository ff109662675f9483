//! Heuristic classification of decoded qqwry text
//!
//! The database stores free-form Chinese text like "广东省广州市" and
//! "中国电信". This module splits the main info into country/province/city
//! and maps the sub info onto a known ISP name, using the ordered substring
//! heuristics inherited from the legacy reference data. Entries with no
//! province match (foreign or reserved ranges) keep the full text as the
//! country and leave the other fields empty.

pub mod tables;

use serde::Serialize;

use crate::database::record::ZonePair;
use tables::{
    CITY_SUFFIXES, COUNTY_SUFFIXES, ISPS, MUNICIPALITY_COUNT, PROVINCES, PROVINCE_SUFFIX,
    REGION_SUFFIX_RE,
};

/// Structured geolocation result for one IP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub ip: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub isp: String,
}

/// Split a decoded string pair into structured location fields.
///
/// Pure and deterministic; unmatched fields stay empty. A province match
/// with no recognizable city suffix leaves the city empty, which is
/// expected for province-only entries.
pub fn classify(ip: &str, pair: &ZonePair) -> Location {
    let mut location = Location {
        ip: ip.to_string(),
        ..Location::default()
    };

    let main = pair.main_info.as_str();
    let mut is_china = false;

    if let Some(pos) = main.find(PROVINCE_SUFFIX) {
        is_china = true;
        location.province = main[..pos].to_string();
        location.city = match_city(&main[pos + PROVINCE_SUFFIX.len()..]);
    } else if let Some((idx, province)) = PROVINCES
        .iter()
        .enumerate()
        .find(|(_, p)| main.contains(*p))
    {
        is_china = true;
        location.province = (*province).to_string();
        if idx < MUNICIPALITY_COUNT {
            // municipalities have no separate city tier
            location.city = (*province).to_string();
        } else {
            let matched_at = main.find(province).unwrap_or(0);
            let rest = &main[matched_at + province.len()..];
            let rest = REGION_SUFFIX_RE.replace_all(rest, "");
            location.city = match_city(&rest);
        }
    }

    if is_china {
        location.country = "中国".to_string();
    } else {
        location.country = main.to_string();
    }
    location.isp = match_isp(&pair.sub_info);
    location
}

/// Scan for the first city-level suffix, falling back to county-level
/// suffixes while the city is still empty.
fn match_city(area: &str) -> String {
    let mut city = String::new();
    for suffix in CITY_SUFFIXES {
        if let Some(pos) = area.find(suffix) {
            city = area[..pos].to_string();
            break;
        }
    }
    if city.is_empty() {
        for suffix in COUNTY_SUFFIXES {
            if let Some(pos) = area.find(suffix) {
                city = area[..pos].to_string();
                break;
            }
        }
    }
    city
}

/// First ISP from the fixed list occurring in the sub info, by list order
fn match_isp(sub_info: &str) -> String {
    ISPS.iter()
        .find(|isp| sub_info.contains(*isp))
        .map(|isp| (*isp).to_string())
        .unwrap_or_default()
}
