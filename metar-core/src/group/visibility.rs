//! Prevailing, directional and runway visual range visibility.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::runway::Runway;
use super::{GroupGrammar, ReportPart};
use crate::value::{Bound, Cardinal, Distance, Value};

lazy_static! {
    static ref METERS: Regex =
        Regex::new(r"^(\d{4}|////)(NDV|N|NE|E|SE|S|SW|W|NW)?$").expect("valid regex");
    static ref KILOMETERS: Regex = Regex::new(r"^(\d{1,2})KM$").expect("valid regex");
    static ref WHOLE_MILES: Regex = Regex::new(r"^([PM])?(\d{1,2})SM$").expect("valid regex");
    static ref FRACTION_MILES: Regex =
        Regex::new(r"^([PM])?(\d)/(\d{1,2})SM$").expect("valid regex");
    static ref WHOLE_PART: Regex = Regex::new(r"^\d$").expect("valid regex");
    static ref RVR: Regex = Regex::new(
        r"^R(\d{2}[LCR]?)/([PM])?(\d{4})(?:V([PM])?(\d{4}))?(FT)?/?([UDN])?$"
    )
    .expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityTrend {
    Upward,
    Downward,
    NoChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityGroup {
    /// Set for runway visual range.
    pub runway: Option<Runway>,
    pub distance: Value<Distance>,
    /// Upper end of a variable runway visual range.
    pub max_distance: Option<Value<Distance>>,
    pub direction: Option<Cardinal>,
    pub no_directional_variation: bool,
    pub trend: Option<VisibilityTrend>,
    /// Whole statute miles still waiting for their fraction (`1` + `1/2SM`).
    #[serde(skip)]
    pending_whole_miles: Option<u8>,
}

impl VisibilityGroup {
    fn prevailing(distance: Value<Distance>) -> Self {
        Self {
            runway: None,
            distance,
            max_distance: None,
            direction: None,
            no_directional_variation: false,
            trend: None,
            pending_whole_miles: None,
        }
    }

    pub fn is_runway_visual_range(&self) -> bool {
        self.runway.is_some()
    }

    fn meters(digits: &str) -> Value<Distance> {
        match digits {
            "////" => Value::NotReported,
            "9999" => Value::Reported(Distance::meters(10_000.0).with_bound(Some(Bound::MoreThan))),
            "0000" => Value::Reported(Distance::meters(50.0).with_bound(Some(Bound::LessThan))),
            _ => match digits.parse::<u32>() {
                Ok(m) => Value::Reported(Distance::meters(f64::from(m))),
                Err(_) => Value::Unrecognized,
            },
        }
    }

    fn fraction(caps: &regex::Captures<'_>, whole: u8) -> Option<Distance> {
        let numerator = caps[2].parse::<u8>().ok()?;
        let denominator = caps[3].parse::<u8>().ok()?;
        if denominator == 0 || numerator >= denominator {
            return None;
        }
        let miles = f64::from(whole) + f64::from(numerator) / f64::from(denominator);
        let bound = caps.get(1).and_then(|m| Bound::from_prefix(m.as_str()));
        Some(Distance::statute_miles(miles).with_bound(bound))
    }

    fn runway_visual_range(caps: &regex::Captures<'_>) -> Option<Self> {
        let runway = Runway::parse(&caps[1])?;
        let feet = caps.get(6).is_some();
        let distance = |prefix: Option<regex::Match<'_>>, digits: &str| -> Value<Distance> {
            let Ok(v) = digits.parse::<u32>() else {
                return Value::Unrecognized;
            };
            let bound = prefix.and_then(|m| Bound::from_prefix(m.as_str()));
            let d = if feet {
                Distance::feet(f64::from(v))
            } else {
                Distance::meters(f64::from(v))
            };
            Value::Reported(d.with_bound(bound))
        };
        let trend = caps.get(7).map(|m| match m.as_str() {
            "U" => VisibilityTrend::Upward,
            "D" => VisibilityTrend::Downward,
            _ => VisibilityTrend::NoChange,
        });
        Some(Self {
            runway: Some(runway),
            distance: distance(caps.get(2), &caps[3]),
            max_distance: caps.get(5).map(|m| distance(caps.get(4), m.as_str())),
            direction: None,
            no_directional_variation: false,
            trend,
            pending_whole_miles: None,
        })
    }
}

impl GroupGrammar for VisibilityGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !part.is_body() {
            return None;
        }
        if let Some(caps) = METERS.captures(token) {
            let mut g = Self::prevailing(Self::meters(&caps[1]));
            match caps.get(2).map(|m| m.as_str()) {
                Some("NDV") => g.no_directional_variation = true,
                Some(dir) => g.direction = Cardinal::from_code(dir),
                None => {}
            }
            return Some(g);
        }
        if let Some(caps) = KILOMETERS.captures(token) {
            let km = caps[1].parse::<u32>().ok()?;
            let distance = Distance::meters(f64::from(km) * 1000.0);
            return Some(Self::prevailing(Value::Reported(distance)));
        }
        if let Some(caps) = WHOLE_MILES.captures(token) {
            let miles = caps[2].parse::<u32>().ok()?;
            let bound = caps.get(1).and_then(|m| Bound::from_prefix(m.as_str()));
            let d = Distance::statute_miles(f64::from(miles)).with_bound(bound);
            return Some(Self::prevailing(Value::Reported(d)));
        }
        if token == "////SM" {
            return Some(Self::prevailing(Value::NotReported));
        }
        if let Some(caps) = FRACTION_MILES.captures(token) {
            let d = Self::fraction(&caps, 0)?;
            return Some(Self::prevailing(Value::Reported(d)));
        }
        if WHOLE_PART.is_match(token) {
            let mut g = Self::prevailing(Value::Unrecognized);
            g.pending_whole_miles = token.parse().ok();
            return Some(g);
        }
        if let Some(caps) = RVR.captures(token) {
            return Self::runway_visual_range(&caps);
        }
        None
    }

    fn append(&mut self, token: &str, _part: ReportPart) -> bool {
        let Some(whole) = self.pending_whole_miles else {
            return false;
        };
        let Some(caps) = FRACTION_MILES.captures(token) else {
            return false;
        };
        if caps.get(1).is_some() {
            return false;
        }
        match Self::fraction(&caps, whole) {
            Some(d) => {
                self.distance = Value::Reported(d);
                self.pending_whole_miles = None;
                true
            }
            None => false,
        }
    }

    fn is_complete(&self) -> bool {
        self.pending_whole_miles.is_none()
    }
}
