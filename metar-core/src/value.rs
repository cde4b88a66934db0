//! Typed meteorological quantities.
//!
//! Every quantity decoded from a report is wrapped in [`Value`], which keeps the
//! three states a report can put a field in apart: a reading, an explicit
//! "not reported" (slashes in the report), or a code this decoder does not know.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub const KM_PER_STATUTE_MILE: f64 = 1.60934;
pub const HPA_PER_INHG: f64 = 33.8639;
pub const FEET_PER_METER: f64 = 3.28084;
pub const KMH_PER_KNOT: f64 = 1.852;
pub const MPS_PER_KNOT: f64 = 0.514444;
pub const MPH_PER_KNOT: f64 = 1.15078;
pub const MM_PER_INCH: f64 = 25.4;

/// Days a day-of-month may lie before the reference date and still count as
/// the reference month. Anything earlier is taken to be next month.
pub const DAY_ROLLOVER_TOLERANCE: u32 = 7;

/// A field as found in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Value<T> {
    Reported(T),
    /// The field is present but filled with slashes, or explicitly absent.
    NotReported,
    /// The field is present but its code or unit is not recognised.
    Unrecognized,
}

impl<T> Value<T> {
    pub fn reported(&self) -> Option<&T> {
        match self {
            Value::Reported(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, Value::Reported(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Value::Reported(v) => Value::Reported(f(v)),
            Value::NotReported => Value::NotReported,
            Value::Unrecognized => Value::Unrecognized,
        }
    }
}

/// Upper or lower bound qualifier, e.g. `P6SM` or `M1/4SM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    LessThan,
    MoreThan,
}

impl Bound {
    pub fn from_prefix(c: &str) -> Option<Self> {
        match c {
            "M" => Some(Bound::LessThan),
            "P" => Some(Bound::MoreThan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Meters,
    StatuteMiles,
    Feet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
    pub bound: Option<Bound>,
}

impl Distance {
    pub fn meters(value: f64) -> Self {
        Self {
            value,
            unit: DistanceUnit::Meters,
            bound: None,
        }
    }

    pub fn statute_miles(value: f64) -> Self {
        Self {
            value,
            unit: DistanceUnit::StatuteMiles,
            bound: None,
        }
    }

    pub fn feet(value: f64) -> Self {
        Self {
            value,
            unit: DistanceUnit::Feet,
            bound: None,
        }
    }

    pub fn with_bound(mut self, bound: Option<Bound>) -> Self {
        self.bound = bound;
        self
    }

    pub fn to_meters(&self) -> f64 {
        match self.unit {
            DistanceUnit::Meters => self.value,
            DistanceUnit::StatuteMiles => self.value * KM_PER_STATUTE_MILE * 1000.0,
            DistanceUnit::Feet => self.value / FEET_PER_METER,
        }
    }

    pub fn to_feet(&self) -> f64 {
        match self.unit {
            DistanceUnit::Feet => self.value,
            _ => self.to_meters() * FEET_PER_METER,
        }
    }

    pub fn to_statute_miles(&self) -> f64 {
        match self.unit {
            DistanceUnit::StatuteMiles => self.value,
            _ => self.to_meters() / (KM_PER_STATUTE_MILE * 1000.0),
        }
    }

    /// Three-digit height in hundreds of feet, as used by cloud and layer groups.
    pub fn parse_hundreds_of_feet(s: &str) -> Value<Distance> {
        if s.bytes().all(|b| b == b'/') {
            return Value::NotReported;
        }
        match s.parse::<u32>() {
            Ok(h) if s.len() == 3 => Value::Reported(Distance::feet(f64::from(h) * 100.0)),
            _ => Value::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    Knots,
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KT" => Some(SpeedUnit::Knots),
            "MPS" => Some(SpeedUnit::MetersPerSecond),
            "KMH" => Some(SpeedUnit::KilometersPerHour),
            "MPH" => Some(SpeedUnit::MilesPerHour),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Speed {
    pub value: u32,
    pub unit: SpeedUnit,
}

impl Speed {
    pub fn new(value: u32, unit: SpeedUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_knots(&self) -> f64 {
        let v = f64::from(self.value);
        match self.unit {
            SpeedUnit::Knots => v,
            SpeedUnit::MetersPerSecond => v / MPS_PER_KNOT,
            SpeedUnit::KilometersPerHour => v / KMH_PER_KNOT,
            SpeedUnit::MilesPerHour => v / MPH_PER_KNOT,
        }
    }

    pub fn parse(digits: &str, unit: SpeedUnit) -> Value<Speed> {
        if digits.bytes().all(|b| b == b'/') {
            return Value::NotReported;
        }
        match digits.parse::<u32>() {
            Ok(v) => Value::Reported(Speed::new(v, unit)),
            Err(_) => Value::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    Hectopascal,
    InchesHg,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pressure {
    pub value: f64,
    pub unit: PressureUnit,
}

impl Pressure {
    pub fn hectopascal(value: f64) -> Self {
        Self {
            value,
            unit: PressureUnit::Hectopascal,
        }
    }

    pub fn inches_hg(value: f64) -> Self {
        Self {
            value,
            unit: PressureUnit::InchesHg,
        }
    }

    pub fn to_hpa(&self) -> f64 {
        match self.unit {
            PressureUnit::Hectopascal => self.value,
            PressureUnit::InchesHg => self.value * HPA_PER_INHG,
        }
    }

    pub fn to_inhg(&self) -> f64 {
        match self.unit {
            PressureUnit::Hectopascal => self.value / HPA_PER_INHG,
            PressureUnit::InchesHg => self.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Temperature {
    pub celsius: f64,
}

impl Temperature {
    pub fn celsius(celsius: f64) -> Self {
        Self { celsius }
    }

    pub fn to_fahrenheit(&self) -> f64 {
        self.celsius * 9.0 / 5.0 + 32.0
    }

    /// Whole degrees with optional `M` for minus: `15`, `M05`, `//`.
    pub fn parse_code(s: &str) -> Value<Temperature> {
        if s.is_empty() || s.bytes().all(|b| b == b'/') {
            return Value::NotReported;
        }
        let (sign, digits) = match s.strip_prefix('M') {
            Some(rest) => (-1.0, rest),
            None => (1.0, s),
        };
        if digits.len() != 2 {
            return Value::Unrecognized;
        }
        match digits.parse::<u8>() {
            Ok(v) => Value::Reported(Temperature::celsius(sign * f64::from(v))),
            Err(_) => Value::Unrecognized,
        }
    }

    /// Sign digit plus tenths of a degree, as in remarks: `1` + `023` is -2.3.
    pub fn parse_tenths(sign: &str, digits: &str) -> Value<Temperature> {
        if digits.bytes().all(|b| b == b'/') {
            return Value::NotReported;
        }
        let Ok(tenths) = digits.parse::<u16>() else {
            return Value::Unrecognized;
        };
        let magnitude = f64::from(tenths) / 10.0;
        match sign {
            "0" => Value::Reported(Temperature::celsius(magnitude)),
            "1" => Value::Reported(Temperature::celsius(-magnitude)),
            _ => Value::Unrecognized,
        }
    }

    /// Relative humidity in percent (Magnus formula).
    pub fn relative_humidity(air: Temperature, dew_point: Temperature) -> f64 {
        const B: f64 = 17.625;
        const C: f64 = 243.04;
        let gamma = |t: f64| (B * t) / (C + t);
        let rh = 100.0 * (gamma(dew_point.celsius) - gamma(air.celsius)).exp();
        rh.min(100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinal {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Cardinal {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Cardinal::North),
            "NE" => Some(Cardinal::NorthEast),
            "E" => Some(Cardinal::East),
            "SE" => Some(Cardinal::SouthEast),
            "S" => Some(Cardinal::South),
            "SW" => Some(Cardinal::SouthWest),
            "W" => Some(Cardinal::West),
            "NW" => Some(Cardinal::NorthWest),
            _ => None,
        }
    }

    pub fn from_degrees(degrees: u16) -> Self {
        const POINTS: [Cardinal; 8] = [
            Cardinal::North,
            Cardinal::NorthEast,
            Cardinal::East,
            Cardinal::SouthEast,
            Cardinal::South,
            Cardinal::SouthWest,
            Cardinal::West,
            Cardinal::NorthWest,
        ];
        let sector = ((u32::from(degrees % 360) * 2 + 45) / 90) % 8;
        POINTS[sector as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinal::North => "N",
            Cardinal::NorthEast => "NE",
            Cardinal::East => "E",
            Cardinal::SouthEast => "SE",
            Cardinal::South => "S",
            Cardinal::SouthWest => "SW",
            Cardinal::West => "W",
            Cardinal::NorthWest => "NW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Direction {
    Degrees(u16),
    Point(Cardinal),
    Variable,
    Overhead,
    AllQuadrants,
}

impl Direction {
    /// Three-digit wind direction in degrees, `VRB` or slashes.
    pub fn parse_wind(s: &str) -> Value<Direction> {
        match s {
            "VRB" => Value::Reported(Direction::Variable),
            "///" => Value::NotReported,
            _ => match s.parse::<u16>() {
                Ok(d) if s.len() == 3 && d <= 360 => Value::Reported(Direction::Degrees(d)),
                _ => Value::Unrecognized,
            },
        }
    }

    /// Direction words used by remarks and directional visibility.
    pub fn parse_location(s: &str) -> Option<Direction> {
        match s {
            "OHD" => Some(Direction::Overhead),
            "ALQDS" | "ALQS" => Some(Direction::AllQuadrants),
            _ => Cardinal::from_code(s).map(Direction::Point),
        }
    }
}

/// Day-of-month (optional), hour and minute, as written in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetafTime {
    pub day: Option<u8>,
    pub hour: u8,
    pub minute: u8,
}

impl MetafTime {
    pub fn new(day: Option<u8>, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Parse fixed-width digits `[DD]HH[MM]`. `with_day` and `with_minute`
    /// select which parts the digits contain.
    pub fn from_digits(s: &str, with_day: bool, with_minute: bool) -> Option<Self> {
        let expected = 2 + if with_day { 2 } else { 0 } + if with_minute { 2 } else { 0 };
        if s.len() != expected || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let num = |range: std::ops::Range<usize>| s[range].parse::<u8>().ok();
        let (day, rest) = if with_day {
            (Some(num(0..2)?), 2)
        } else {
            (None, 0)
        };
        let hour = num(rest..rest + 2)?;
        let minute = if with_minute {
            num(rest + 2..rest + 4)?
        } else {
            0
        };
        Some(Self::new(day, hour, minute))
    }

    pub fn is_valid(&self) -> bool {
        let day_ok = self.day.is_none_or(|d| (1..=31).contains(&d));
        let hour_ok = self.hour < 24 || (self.hour == 24 && self.minute == 0);
        day_ok && hour_ok && self.minute <= 59
    }

    /// Resolve to an absolute UTC date and time using a reference date that
    /// lies within 28 days after the report was issued.
    ///
    /// A day-of-month more than [`DAY_ROLLOVER_TOLERANCE`] days before the
    /// reference day is placed in the following month. Without a day the
    /// reference day is used.
    pub fn resolve(&self, reference: NaiveDate) -> Option<NaiveDateTime> {
        if !self.is_valid() {
            return None;
        }
        let day = self.day.map(u32::from).unwrap_or_else(|| reference.day());
        let (mut year, mut month) = (reference.year(), reference.month());
        if day + DAY_ROLLOVER_TOLERANCE < reference.day() {
            (year, month) = if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            };
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let (hour, carry) = if self.hour == 24 {
            (0, 1)
        } else {
            (self.hour, 0)
        };
        let time = NaiveTime::from_hms_opt(u32::from(hour), u32::from(self.minute), 0)?;
        Some(date.and_time(time) + Duration::days(carry))
    }

    /// Minutes elapsed since the start of `start_day`, wrapping at month end.
    /// Used to compare times inside one report without a calendar.
    pub fn minutes_since_day(&self, start_day: u8) -> u32 {
        let day = self.day.unwrap_or(start_day);
        let offset = if day >= start_day {
            u32::from(day - start_day)
        } else {
            (u32::from(day) + 31).saturating_sub(u32::from(start_day))
        };
        offset * 24 * 60 + u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

/// State of the sea surface, WMO code table 3700.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeaState {
    CalmGlassy,
    CalmRippled,
    Smooth,
    Slight,
    Moderate,
    Rough,
    VeryRough,
    High,
    VeryHigh,
    Phenomenal,
}

impl SeaState {
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            '0' => Some(SeaState::CalmGlassy),
            '1' => Some(SeaState::CalmRippled),
            '2' => Some(SeaState::Smooth),
            '3' => Some(SeaState::Slight),
            '4' => Some(SeaState::Moderate),
            '5' => Some(SeaState::Rough),
            '6' => Some(SeaState::VeryRough),
            '7' => Some(SeaState::High),
            '8' => Some(SeaState::VeryHigh),
            '9' => Some(SeaState::Phenomenal),
            _ => None,
        }
    }

    /// Upper bound of significant wave height for this state, in metres.
    pub fn max_wave_height(&self) -> Option<f64> {
        match self {
            SeaState::CalmGlassy => Some(0.0),
            SeaState::CalmRippled => Some(0.1),
            SeaState::Smooth => Some(0.5),
            SeaState::Slight => Some(1.25),
            SeaState::Moderate => Some(2.5),
            SeaState::Rough => Some(4.0),
            SeaState::VeryRough => Some(6.0),
            SeaState::High => Some(9.0),
            SeaState::VeryHigh => Some(14.0),
            SeaState::Phenomenal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WaveHeight {
    Height { meters: f64 },
    State(SeaState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrakingAction {
    Poor,
    MediumPoor,
    Medium,
    MediumGood,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SurfaceFriction {
    Coefficient(f64),
    BrakingAction(BrakingAction),
    Unreliable,
}

impl SurfaceFriction {
    /// Two-digit runway friction code from a runway state group.
    pub fn parse_code(s: &str) -> Value<SurfaceFriction> {
        if s == "//" {
            return Value::NotReported;
        }
        let Ok(code) = s.parse::<u8>() else {
            return Value::Unrecognized;
        };
        match code {
            0..=90 => Value::Reported(SurfaceFriction::Coefficient(f64::from(code) / 100.0)),
            91 => Value::Reported(SurfaceFriction::BrakingAction(BrakingAction::Poor)),
            92 => Value::Reported(SurfaceFriction::BrakingAction(BrakingAction::MediumPoor)),
            93 => Value::Reported(SurfaceFriction::BrakingAction(BrakingAction::Medium)),
            94 => Value::Reported(SurfaceFriction::BrakingAction(BrakingAction::MediumGood)),
            95 => Value::Reported(SurfaceFriction::BrakingAction(BrakingAction::Good)),
            99 => Value::Reported(SurfaceFriction::Unreliable),
            _ => Value::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationUnit {
    Millimeters,
    Inches,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Precipitation {
    pub value: f64,
    pub unit: PrecipitationUnit,
    pub bound: Option<Bound>,
}

impl Precipitation {
    pub fn millimeters(value: f64) -> Self {
        Self {
            value,
            unit: PrecipitationUnit::Millimeters,
            bound: None,
        }
    }

    pub fn inches(value: f64) -> Self {
        Self {
            value,
            unit: PrecipitationUnit::Inches,
            bound: None,
        }
    }

    pub fn with_bound(mut self, bound: Option<Bound>) -> Self {
        self.bound = bound;
        self
    }

    pub fn to_millimeters(&self) -> f64 {
        match self.unit {
            PrecipitationUnit::Millimeters => self.value,
            PrecipitationUnit::Inches => self.value * MM_PER_INCH,
        }
    }

    pub fn to_inches(&self) -> f64 {
        match self.unit {
            PrecipitationUnit::Millimeters => self.value / MM_PER_INCH,
            PrecipitationUnit::Inches => self.value,
        }
    }

    /// Four digits in hundredths of an inch, as in `P0012` or `60105`.
    pub fn parse_hundredths_inch(s: &str) -> Value<Precipitation> {
        if s.bytes().all(|b| b == b'/') {
            return Value::NotReported;
        }
        match s.parse::<u16>() {
            Ok(v) => Value::Reported(Precipitation::inches(f64::from(v) / 100.0)),
            Err(_) => Value::Unrecognized,
        }
    }

    /// Runway deposit depth code (WMO code table 1079), `99` excluded.
    pub fn parse_deposit_depth(s: &str) -> Value<Precipitation> {
        if s == "//" {
            return Value::NotReported;
        }
        let Ok(code) = s.parse::<u8>() else {
            return Value::Unrecognized;
        };
        match code {
            0 => Value::Reported(Precipitation::millimeters(1.0).with_bound(Some(Bound::LessThan))),
            1..=90 => Value::Reported(Precipitation::millimeters(f64::from(code))),
            92..=97 => Value::Reported(Precipitation::millimeters(f64::from(code - 90) * 50.0)),
            98 => {
                let amount = Precipitation::millimeters(400.0);
                Value::Reported(amount.with_bound(Some(Bound::MoreThan)))
            }
            _ => Value::Unrecognized,
        }
    }
}
