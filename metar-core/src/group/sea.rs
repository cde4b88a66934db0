use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{SeaState, Temperature, Value, WaveHeight};

lazy_static! {
    static ref SEA_SURFACE: Regex =
        Regex::new(r"^W(M?\d{2}|//)/([SH])(\d{1,3}|/{1,3})$").expect("valid regex");
}

/// Sea surface temperature with state of the sea or significant wave height
/// (`W15/S3`, `W12/H75`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeaSurfaceGroup {
    pub temperature: Value<Temperature>,
    pub waves: Value<WaveHeight>,
}

impl GroupGrammar for SeaSurfaceGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !matches!(part, ReportPart::Metar | ReportPart::Trend) {
            return None;
        }
        let caps = SEA_SURFACE.captures(token)?;
        let code = &caps[3];
        let waves = if code.starts_with('/') {
            Value::NotReported
        } else if &caps[2] == "S" {
            match code.chars().next().and_then(SeaState::from_code) {
                Some(state) if code.len() == 1 => Value::Reported(WaveHeight::State(state)),
                _ => Value::Unrecognized,
            }
        } else {
            // Height in decimetres.
            match code.parse::<u16>() {
                Ok(dm) => Value::Reported(WaveHeight::Height {
                    meters: f64::from(dm) / 10.0,
                }),
                Err(_) => Value::Unrecognized,
            }
        };
        Some(Self {
            temperature: Temperature::parse_code(&caps[1]),
            waves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_of_sea() {
        let g = SeaSurfaceGroup::parse("W15/S3", ReportPart::Metar).unwrap();
        assert_eq!(g.temperature, Value::Reported(Temperature::celsius(15.0)));
        assert_eq!(g.waves, Value::Reported(WaveHeight::State(SeaState::Slight)));
    }

    #[test]
    fn wave_height_and_missing_values() {
        let g = SeaSurfaceGroup::parse("WM01/H75", ReportPart::Metar).unwrap();
        assert_eq!(g.waves, Value::Reported(WaveHeight::Height { meters: 7.5 }));
        let g = SeaSurfaceGroup::parse("W///S/", ReportPart::Metar).unwrap();
        assert_eq!(g.temperature, Value::NotReported);
        assert_eq!(g.waves, Value::NotReported);
        assert!(SeaSurfaceGroup::parse("W15/S3", ReportPart::Taf).is_none());
    }
}
