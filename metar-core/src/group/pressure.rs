use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{Pressure, Value};

lazy_static! {
    static ref QNH_HPA: Regex = Regex::new(r"^Q(\d{4}|////)$").expect("valid regex");
    static ref QNH_INHG: Regex = Regex::new(r"^A(\d{4}|////)$").expect("valid regex");
    static ref FORECAST_INHG: Regex = Regex::new(r"^QNH(\d{4})INS$").expect("valid regex");
    static ref SEA_LEVEL: Regex = Regex::new(r"^SLP(\d{3}|NO)$").expect("valid regex");
    static ref TENDENCY: Regex = Regex::new(r"^5([0-8/])(\d{3}|///)$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureKind {
    /// Observed QNH from the report body.
    ObservedQnh,
    /// Lowest forecast QNH (TAF `QNHxxxxINS`).
    ForecastLowestQnh,
    /// Sea level pressure from remarks.
    SeaLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressureGroup {
    pub kind: PressureKind,
    pub pressure: Value<Pressure>,
}

impl PressureGroup {
    fn digits(s: &str, scale: f64, unit: fn(f64) -> Pressure) -> Value<Pressure> {
        if s.bytes().all(|b| b == b'/') {
            return Value::NotReported;
        }
        match s.parse::<u32>() {
            Ok(v) => Value::Reported(unit(f64::from(v) * scale)),
            Err(_) => Value::Unrecognized,
        }
    }
}

impl GroupGrammar for PressureGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        let observed = |pressure| {
            Some(Self {
                kind: PressureKind::ObservedQnh,
                pressure,
            })
        };
        match part {
            ReportPart::Metar | ReportPart::Trend => {
                if let Some(caps) = QNH_HPA.captures(token) {
                    return observed(Self::digits(&caps[1], 1.0, Pressure::hectopascal));
                }
                let caps = QNH_INHG.captures(token)?;
                observed(Self::digits(&caps[1], 0.01, Pressure::inches_hg))
            }
            ReportPart::Taf => {
                let caps = FORECAST_INHG.captures(token)?;
                Some(Self {
                    kind: PressureKind::ForecastLowestQnh,
                    pressure: Self::digits(&caps[1], 0.01, Pressure::inches_hg),
                })
            }
            ReportPart::Rmk => {
                let caps = SEA_LEVEL.captures(token)?;
                let pressure = match &caps[1] {
                    "NO" => Value::NotReported,
                    digits => match digits.parse::<u32>() {
                        // Tenths of hPa without the leading 9 or 10.
                        Ok(v) => {
                            let base = if v >= 500 { 900.0 } else { 1000.0 };
                            Value::Reported(Pressure::hectopascal(base + f64::from(v) / 10.0))
                        }
                        Err(_) => Value::Unrecognized,
                    },
                };
                Some(Self {
                    kind: PressureKind::SeaLevel,
                    pressure,
                })
            }
            ReportPart::Header => None,
        }
    }
}

/// Characteristic of pressure tendency over the last three hours, WMO code
/// table 0200, plus the US `PRESRR`/`PRESFR` remarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureTendency {
    IncreasingThenDecreasing,
    IncreasingThenSteady,
    IncreasingSteadily,
    DecreasingOrSteadyThenIncreasing,
    Steady,
    DecreasingThenIncreasing,
    DecreasingThenSteady,
    DecreasingSteadily,
    SteadyOrIncreasingThenDecreasing,
    RisingRapidly,
    FallingRapidly,
}

impl PressureTendency {
    fn from_code(c: &str) -> Value<Self> {
        match c {
            "0" => Value::Reported(PressureTendency::IncreasingThenDecreasing),
            "1" => Value::Reported(PressureTendency::IncreasingThenSteady),
            "2" => Value::Reported(PressureTendency::IncreasingSteadily),
            "3" => Value::Reported(PressureTendency::DecreasingOrSteadyThenIncreasing),
            "4" => Value::Reported(PressureTendency::Steady),
            "5" => Value::Reported(PressureTendency::DecreasingThenIncreasing),
            "6" => Value::Reported(PressureTendency::DecreasingThenSteady),
            "7" => Value::Reported(PressureTendency::DecreasingSteadily),
            "8" => Value::Reported(PressureTendency::SteadyOrIncreasingThenDecreasing),
            "/" => Value::NotReported,
            _ => Value::Unrecognized,
        }
    }

    /// Pressure now compared to three hours ago: `Some(true)` higher,
    /// `Some(false)` lower, `None` the same or indeterminate.
    pub fn is_higher(&self) -> Option<bool> {
        match self {
            PressureTendency::IncreasingThenSteady
            | PressureTendency::IncreasingSteadily
            | PressureTendency::DecreasingOrSteadyThenIncreasing
            | PressureTendency::RisingRapidly => Some(true),
            PressureTendency::DecreasingThenSteady
            | PressureTendency::DecreasingSteadily
            | PressureTendency::SteadyOrIncreasingThenDecreasing
            | PressureTendency::FallingRapidly => Some(false),
            PressureTendency::IncreasingThenDecreasing
            | PressureTendency::Steady
            | PressureTendency::DecreasingThenIncreasing => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressureTendencyGroup {
    pub tendency: Value<PressureTendency>,
    /// Amount of change over three hours.
    pub difference: Value<Pressure>,
}

impl GroupGrammar for PressureTendencyGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Rmk {
            return None;
        }
        let rapid = match token {
            "PRESRR" => Some(PressureTendency::RisingRapidly),
            "PRESFR" => Some(PressureTendency::FallingRapidly),
            _ => None,
        };
        if let Some(tendency) = rapid {
            return Some(Self {
                tendency: Value::Reported(tendency),
                difference: Value::NotReported,
            });
        }
        let caps = TENDENCY.captures(token)?;
        Some(Self {
            tendency: PressureTendency::from_code(&caps[1]),
            difference: PressureGroup::digits(&caps[2], 0.1, Pressure::hectopascal),
        })
    }
}
