//! Runway designators and runway state groups (`R24/290195`, `R24/CLRD62`,
//! `R/SNOCLO`, legacy `88290195`).

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{Precipitation, SurfaceFriction, Value};

lazy_static! {
    static ref RUNWAY: Regex = Regex::new(r"^(\d{2})([LCR])?$").expect("valid regex");
    static ref STATE: Regex =
        Regex::new(r"^R(\d{2}[LCR]?)/([0-9/])([0-9/])(\d{2}|//)(\d{2}|//)$").expect("valid regex");
    static ref CLEARED: Regex =
        Regex::new(r"^R(\d{2}[LCR]?)/CLRD(\d{2}|//)$").expect("valid regex");
    static ref SNOCLO: Regex = Regex::new(r"^(?:R(\d{2}[LCR]?)?/)?SNOCLO$").expect("valid regex");
    static ref LEGACY: Regex =
        Regex::new(r"^(\d{2})([0-9/])([0-9/])(\d{2}|//)(\d{2}|//)$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayDesignator {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Runway {
    pub number: u8,
    pub designator: Option<RunwayDesignator>,
}

impl Runway {
    /// Runway number with optional `L`/`C`/`R`, e.g. `24`, `09L`.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = RUNWAY.captures(s)?;
        let number = caps[1].parse::<u8>().ok()?;
        let designator = caps.get(2).map(|m| match m.as_str() {
            "L" => RunwayDesignator::Left,
            "C" => RunwayDesignator::Center,
            _ => RunwayDesignator::Right,
        });
        Some(Self { number, designator })
    }

    /// Runway `88`: the report applies to all runways.
    pub fn is_all_runways(&self) -> bool {
        self.number == 88 && self.designator.is_none()
    }

    /// Runway `99`: repetition of the last runway state message.
    pub fn is_repetition(&self) -> bool {
        self.number == 99 && self.designator.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayStatus {
    Normal,
    Cleared,
    SnowClosed,
    NotOperational,
}

/// Runway deposits, WMO code table 0919.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Deposits {
    ClearAndDry,
    Damp,
    WetAndWaterPatches,
    RimeAndFrostCovered,
    DrySnow,
    WetSnow,
    Slush,
    Ice,
    CompactedOrRolledSnow,
    FrozenRutsOrRidges,
}

impl Deposits {
    fn parse(c: &str) -> Value<Deposits> {
        match c {
            "0" => Value::Reported(Deposits::ClearAndDry),
            "1" => Value::Reported(Deposits::Damp),
            "2" => Value::Reported(Deposits::WetAndWaterPatches),
            "3" => Value::Reported(Deposits::RimeAndFrostCovered),
            "4" => Value::Reported(Deposits::DrySnow),
            "5" => Value::Reported(Deposits::WetSnow),
            "6" => Value::Reported(Deposits::Slush),
            "7" => Value::Reported(Deposits::Ice),
            "8" => Value::Reported(Deposits::CompactedOrRolledSnow),
            "9" => Value::Reported(Deposits::FrozenRutsOrRidges),
            "/" => Value::NotReported,
            _ => Value::Unrecognized,
        }
    }
}

/// Extent of runway contamination, WMO code table 0519.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    None,
    UpTo10Percent,
    From11To25Percent,
    From26To50Percent,
    From51To100Percent,
}

impl Extent {
    fn parse(c: &str) -> Value<Extent> {
        match c {
            "0" => Value::Reported(Extent::None),
            "1" => Value::Reported(Extent::UpTo10Percent),
            "2" => Value::Reported(Extent::From11To25Percent),
            "5" => Value::Reported(Extent::From26To50Percent),
            "9" => Value::Reported(Extent::From51To100Percent),
            "/" => Value::NotReported,
            _ => Value::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunwayStateGroup {
    /// `None` when the state applies to the whole aerodrome (`R/SNOCLO`).
    pub runway: Option<Runway>,
    pub status: RunwayStatus,
    pub deposits: Value<Deposits>,
    pub extent: Value<Extent>,
    pub depth: Value<Precipitation>,
    pub friction: Value<SurfaceFriction>,
}

impl RunwayStateGroup {
    fn with_status(runway: Option<Runway>, status: RunwayStatus) -> Self {
        Self {
            runway,
            status,
            deposits: Value::NotReported,
            extent: Value::NotReported,
            depth: Value::NotReported,
            friction: Value::NotReported,
        }
    }

    fn from_codes(runway: Runway, caps: &regex::Captures<'_>) -> Self {
        let (status, depth) = match &caps[4] {
            "99" => (RunwayStatus::NotOperational, Value::NotReported),
            code => (RunwayStatus::Normal, Precipitation::parse_deposit_depth(code)),
        };
        Self {
            runway: Some(runway),
            status,
            deposits: Deposits::parse(&caps[2]),
            extent: Extent::parse(&caps[3]),
            depth,
            friction: SurfaceFriction::parse_code(&caps[5]),
        }
    }
}

impl GroupGrammar for RunwayStateGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !matches!(part, ReportPart::Metar | ReportPart::Trend) {
            return None;
        }
        if let Some(caps) = STATE.captures(token) {
            let runway = Runway::parse(&caps[1])?;
            return Some(Self::from_codes(runway, &caps));
        }
        if let Some(caps) = CLEARED.captures(token) {
            let mut g = Self::with_status(Some(Runway::parse(&caps[1])?), RunwayStatus::Cleared);
            g.friction = SurfaceFriction::parse_code(&caps[2]);
            return Some(g);
        }
        if let Some(caps) = SNOCLO.captures(token) {
            let runway = match caps.get(1) {
                Some(m) => Some(Runway::parse(m.as_str())?),
                None => None,
            };
            return Some(Self::with_status(runway, RunwayStatus::SnowClosed));
        }
        if part == ReportPart::Metar {
            if let Some(caps) = LEGACY.captures(token) {
                let number = caps[1].parse::<u8>().ok()?;
                // Legacy form adds 50 to the number of right-hand parallel runways.
                let runway = match number {
                    51..=86 => Runway {
                        number: number - 50,
                        designator: Some(RunwayDesignator::Right),
                    },
                    _ => Runway {
                        number,
                        designator: None,
                    },
                };
                return Some(Self::from_codes(runway, &caps));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{BrakingAction, Bound};

    #[test]
    fn full_runway_state() {
        let g = RunwayStateGroup::parse("R24L/599230", ReportPart::Metar).expect("state");
        assert_eq!(
            g.runway,
            Some(Runway {
                number: 24,
                designator: Some(RunwayDesignator::Left),
            })
        );
        assert_eq!(g.deposits, Value::Reported(Deposits::WetSnow));
        assert_eq!(g.extent, Value::Reported(Extent::From51To100Percent));
        assert_eq!(g.depth, Value::Reported(Precipitation::millimeters(100.0)));
        assert_eq!(g.friction, Value::Reported(SurfaceFriction::Coefficient(0.30)));
    }

    #[test]
    fn cleared_and_closed() {
        let g = RunwayStateGroup::parse("R06/CLRD95", ReportPart::Metar).unwrap();
        assert_eq!(g.status, RunwayStatus::Cleared);
        assert_eq!(
            g.friction,
            Value::Reported(SurfaceFriction::BrakingAction(BrakingAction::Good))
        );
        let g = RunwayStateGroup::parse("R/SNOCLO", ReportPart::Metar).unwrap();
        assert_eq!(g.status, RunwayStatus::SnowClosed);
        assert!(g.runway.is_none());
    }

    #[test]
    fn special_depth_codes() {
        let g = RunwayStateGroup::parse("R88/190099", ReportPart::Metar).unwrap();
        assert!(g.runway.unwrap().is_all_runways());
        assert_eq!(
            g.depth,
            Value::Reported(Precipitation::millimeters(1.0).with_bound(Some(Bound::LessThan)))
        );
        assert_eq!(g.friction, Value::Reported(SurfaceFriction::Unreliable));
        let g = RunwayStateGroup::parse("R24/2/99//", ReportPart::Metar).unwrap();
        assert_eq!(g.status, RunwayStatus::NotOperational);
        assert_eq!(g.extent, Value::NotReported);
    }

    #[test]
    fn legacy_right_runway() {
        let g = RunwayStateGroup::parse("74290195", ReportPart::Metar).unwrap();
        assert_eq!(
            g.runway,
            Some(Runway {
                number: 24,
                designator: Some(RunwayDesignator::Right),
            })
        );
        assert!(RunwayStateGroup::parse("74290195", ReportPart::Rmk).is_none());
    }
}
