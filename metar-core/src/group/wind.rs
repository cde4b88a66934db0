use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{Direction, Distance, Speed, SpeedUnit, Value};

lazy_static! {
    static ref WIND: Regex =
        Regex::new(r"^(\d{3}|VRB|///)(\d{2,3}|//)(?:G(\d{2,3}))?(KT|MPS|KMH)$")
            .expect("valid regex");
    static ref SHEAR: Regex =
        Regex::new(r"^WS(\d{3})/(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?(KT|MPS|KMH)$")
            .expect("valid regex");
    static ref SECTOR: Regex = Regex::new(r"^(\d{3})V(\d{3})$").expect("valid regex");
}

/// Surface wind, optionally with a variable direction sector, or wind shear
/// at a given height (`WS020/27045KT`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindGroup {
    pub direction: Value<Direction>,
    pub speed: Value<Speed>,
    pub gust: Option<Speed>,
    pub variable_sector: Option<(u16, u16)>,
    pub shear_height: Option<Distance>,
}

impl WindGroup {
    /// `00000KT`
    pub fn is_calm(&self) -> bool {
        matches!(self.direction, Value::Reported(Direction::Degrees(0)))
            && matches!(self.speed, Value::Reported(s) if s.value == 0)
            && self.gust.is_none()
    }

    /// Only a variable sector, as when `dddVddd` appears on its own.
    pub fn is_sector_only(&self) -> bool {
        self.variable_sector.is_some()
            && self.direction == Value::NotReported
            && self.speed == Value::NotReported
    }

    fn parse_sector(token: &str) -> Option<(u16, u16)> {
        let caps = SECTOR.captures(token)?;
        let from = caps[1].parse::<u16>().ok()?;
        let to = caps[2].parse::<u16>().ok()?;
        Some((from, to))
    }

    fn parse_gust(caps: &regex::Captures<'_>, index: usize, unit: SpeedUnit) -> Option<Speed> {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(|g| Speed::new(g, unit))
    }
}

impl GroupGrammar for WindGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !part.is_body() {
            return None;
        }
        if let Some(caps) = WIND.captures(token) {
            let unit = SpeedUnit::from_code(&caps[4])?;
            return Some(Self {
                direction: Direction::parse_wind(&caps[1]),
                speed: Speed::parse(&caps[2], unit),
                gust: Self::parse_gust(&caps, 3, unit),
                variable_sector: None,
                shear_height: None,
            });
        }
        if let Some(caps) = SHEAR.captures(token) {
            let unit = SpeedUnit::from_code(&caps[5])?;
            let height = Distance::parse_hundreds_of_feet(&caps[1]);
            return Some(Self {
                direction: Direction::parse_wind(&caps[2]),
                speed: Speed::parse(&caps[3], unit),
                gust: Self::parse_gust(&caps, 4, unit),
                variable_sector: None,
                shear_height: height.reported().copied(),
            });
        }
        let sector = Self::parse_sector(token)?;
        Some(Self {
            direction: Value::NotReported,
            speed: Value::NotReported,
            gust: None,
            variable_sector: Some(sector),
            shear_height: None,
        })
    }

    fn append(&mut self, token: &str, part: ReportPart) -> bool {
        if !part.is_body() || self.variable_sector.is_some() || self.shear_height.is_some() {
            return false;
        }
        match Self::parse_sector(token) {
            Some(sector) => {
                self.variable_sector = Some(sector);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_with_gust_and_sector() {
        let mut g = WindGroup::parse("27010G20KT", ReportPart::Metar).expect("wind");
        assert_eq!(g.direction, Value::Reported(Direction::Degrees(270)));
        assert_eq!(g.speed, Value::Reported(Speed::new(10, SpeedUnit::Knots)));
        assert_eq!(g.gust, Some(Speed::new(20, SpeedUnit::Knots)));
        assert!(g.append("240V300", ReportPart::Metar));
        assert_eq!(g.variable_sector, Some((240, 300)));
        assert!(!g.append("250V310", ReportPart::Metar));
    }

    #[test]
    fn calm_and_variable() {
        assert!(WindGroup::parse("00000KT", ReportPart::Metar).unwrap().is_calm());
        let vrb = WindGroup::parse("VRB03MPS", ReportPart::Taf).unwrap();
        assert_eq!(vrb.direction, Value::Reported(Direction::Variable));
        assert!(!vrb.is_calm());
    }

    #[test]
    fn missing_values() {
        let g = WindGroup::parse("/////KT", ReportPart::Metar).unwrap();
        assert_eq!(g.direction, Value::NotReported);
        assert_eq!(g.speed, Value::NotReported);
        let g = WindGroup::parse("40010KT", ReportPart::Metar).unwrap();
        assert_eq!(g.direction, Value::Unrecognized);
    }

    #[test]
    fn wind_shear() {
        let g = WindGroup::parse("WS020/27045KT", ReportPart::Taf).unwrap();
        assert_eq!(g.shear_height, Some(Distance::feet(2000.0)));
        assert_eq!(g.speed, Value::Reported(Speed::new(45, SpeedUnit::Knots)));
    }

    #[test]
    fn standalone_sector() {
        let g = WindGroup::parse("180V240", ReportPart::Metar).unwrap();
        assert!(g.is_sector_only());
        assert!(WindGroup::parse("27010KT", ReportPart::Header).is_none());
    }
}
