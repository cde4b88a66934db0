use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::MetafTime;

lazy_static! {
    static ref LOCATION: Regex = Regex::new(r"^[A-Z][A-Z0-9]{3}$").expect("valid regex");
    static ref REPORT_TIME: Regex = Regex::new(r"^(\d{6})Z$").expect("valid regex");
}

/// ICAO location indicator of the reporting station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationGroup {
    pub icao: String,
}

impl GroupGrammar for LocationGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Header || !LOCATION.is_match(token) {
            return None;
        }
        Some(Self {
            icao: token.to_string(),
        })
    }
}

/// Issue time `DDHHMMZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportTimeGroup {
    pub time: MetafTime,
}

impl GroupGrammar for ReportTimeGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Header {
            return None;
        }
        let caps = REPORT_TIME.captures(token)?;
        let time = MetafTime::from_digits(&caps[1], true, true)?;
        Some(Self { time })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_requires_header() {
        assert!(LocationGroup::parse("EDDF", ReportPart::Header).is_some());
        assert!(LocationGroup::parse("K1A2", ReportPart::Header).is_some());
        assert!(LocationGroup::parse("1ABC", ReportPart::Header).is_none());
        assert!(LocationGroup::parse("EDDF", ReportPart::Metar).is_none());
    }

    #[test]
    fn report_time_keeps_out_of_range_values() {
        let g = ReportTimeGroup::parse("351299Z", ReportPart::Header).expect("shape matches");
        assert_eq!(g.time, MetafTime::new(Some(35), 12, 99));
        assert!(!g.time.is_valid());
    }
}
