use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{Precipitation, Value};

lazy_static! {
    static ref AMOUNT: Regex = Regex::new(r"^([P67])(\d{4}|////)$").expect("valid regex");
    static ref SNOW_DEPTH: Regex = Regex::new(r"^4/(\d{3})$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationKind {
    /// `Pnnnn`
    LastHour,
    /// `6nnnn`: three hours in the 03/09/15/21Z reports, six hours otherwise.
    LastThreeOrSixHours,
    /// `7nnnn`
    Last24Hours,
    /// `4/nnn`: snow on the ground.
    SnowDepth,
}

/// Precipitation amounts reported in remarks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecipitationGroup {
    pub kind: PrecipitationKind,
    pub amount: Value<Precipitation>,
}

impl GroupGrammar for PrecipitationGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Rmk {
            return None;
        }
        if let Some(caps) = AMOUNT.captures(token) {
            let kind = match &caps[1] {
                "P" => PrecipitationKind::LastHour,
                "6" => PrecipitationKind::LastThreeOrSixHours,
                _ => PrecipitationKind::Last24Hours,
            };
            return Some(Self {
                kind,
                amount: Precipitation::parse_hundredths_inch(&caps[2]),
            });
        }
        let caps = SNOW_DEPTH.captures(token)?;
        let inches = caps[1].parse::<u16>().ok()?;
        Some(Self {
            kind: PrecipitationKind::SnowDepth,
            amount: Value::Reported(Precipitation::inches(f64::from(inches))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_and_daily_amounts() {
        let g = PrecipitationGroup::parse("P0012", ReportPart::Rmk).unwrap();
        assert_eq!(g.kind, PrecipitationKind::LastHour);
        assert_eq!(g.amount, Value::Reported(Precipitation::inches(0.12)));
        let g = PrecipitationGroup::parse("7////", ReportPart::Rmk).unwrap();
        assert_eq!(g.kind, PrecipitationKind::Last24Hours);
        assert_eq!(g.amount, Value::NotReported);
    }

    #[test]
    fn snow_depth() {
        let g = PrecipitationGroup::parse("4/012", ReportPart::Rmk).unwrap();
        assert_eq!(g.amount, Value::Reported(Precipitation::inches(12.0)));
        assert!(PrecipitationGroup::parse("P0012", ReportPart::Metar).is_none());
    }
}
