//! Groups that fit no other kind: sunshine duration in remarks (`98096`) and
//! military airfield colour states (`BLU`, `YLO1`, `BLACKRED`).

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::Value;

lazy_static! {
    static ref SUNSHINE: Regex = Regex::new(r"^98(\d{3}|///)$").expect("valid regex");
    static ref COLOUR_STATE: Regex =
        Regex::new(r"^(BLACK)?(BLU|WHT|GRN|YLO1|YLO2|AMB|RED)$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColourCode {
    Blue,
    White,
    Green,
    Yellow1,
    Yellow2,
    Amber,
    Red,
}

impl ColourCode {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "BLU" => Some(ColourCode::Blue),
            "WHT" => Some(ColourCode::White),
            "GRN" => Some(ColourCode::Green),
            "YLO1" => Some(ColourCode::Yellow1),
            "YLO2" => Some(ColourCode::Yellow2),
            "AMB" => Some(ColourCode::Amber),
            "RED" => Some(ColourCode::Red),
            _ => None,
        }
    }

    /// Lowest visibility in metres and cloud base in feet for this state.
    /// Red has no minimum; it applies below the amber limits returned here.
    pub fn minimums(&self) -> (f64, f64) {
        match self {
            ColourCode::Blue => (8000.0, 2500.0),
            ColourCode::White => (5000.0, 1500.0),
            ColourCode::Green => (3700.0, 700.0),
            ColourCode::Yellow1 => (2500.0, 500.0),
            ColourCode::Yellow2 => (1600.0, 300.0),
            ColourCode::Amber | ColourCode::Red => (800.0, 200.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MiscGroup {
    /// Minutes of sunshine on the previous day.
    SunshineDuration { minutes: Value<u16> },
    /// `black` marks an airfield closed for reasons other than weather.
    ColourCode { code: ColourCode, black: bool },
}

impl GroupGrammar for MiscGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        match part {
            ReportPart::Rmk => {
                let caps = SUNSHINE.captures(token)?;
                let minutes = match caps[1].parse::<u16>() {
                    Ok(m) => Value::Reported(m),
                    Err(_) => Value::NotReported,
                };
                Some(MiscGroup::SunshineDuration { minutes })
            }
            ReportPart::Metar | ReportPart::Trend => {
                let caps = COLOUR_STATE.captures(token)?;
                let code = ColourCode::from_code(&caps[2])?;
                Some(MiscGroup::ColourCode {
                    code,
                    black: caps.get(1).is_some(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunshine_duration() {
        assert_eq!(
            MiscGroup::parse("98096", ReportPart::Rmk),
            Some(MiscGroup::SunshineDuration {
                minutes: Value::Reported(96),
            })
        );
        assert_eq!(
            MiscGroup::parse("98///", ReportPart::Rmk),
            Some(MiscGroup::SunshineDuration {
                minutes: Value::NotReported,
            })
        );
        assert!(MiscGroup::parse("98096", ReportPart::Metar).is_none());
        assert!(MiscGroup::parse("9809", ReportPart::Rmk).is_none());
    }

    #[test]
    fn colour_states() {
        assert_eq!(
            MiscGroup::parse("YLO1", ReportPart::Metar),
            Some(MiscGroup::ColourCode {
                code: ColourCode::Yellow1,
                black: false,
            })
        );
        assert_eq!(
            MiscGroup::parse("BLACKRED", ReportPart::Trend),
            Some(MiscGroup::ColourCode {
                code: ColourCode::Red,
                black: true,
            })
        );
        assert!(MiscGroup::parse("BLU", ReportPart::Taf).is_none());
        assert!(MiscGroup::parse("YLO", ReportPart::Metar).is_none());
        assert_eq!(ColourCode::Red.minimums(), ColourCode::Amber.minimums());
    }
}
