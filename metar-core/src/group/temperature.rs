//! Air temperature and dew point, and minimum/maximum temperature groups.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{MetafTime, Temperature, Value};

lazy_static! {
    static ref AIR_DEW: Regex = Regex::new(r"^(M?\d{2}|//)/(M?\d{2}|//)?$").expect("valid regex");
    static ref PRECISE: Regex =
        Regex::new(r"^T([01])(\d{3})(?:([01])(\d{3}))?$").expect("valid regex");
    static ref FORECAST: Regex = Regex::new(r"^(TX|TN)(M?\d{2})/(\d{4})Z$").expect("valid regex");
    static ref SIX_HOUR: Regex = Regex::new(r"^([12])([01])(\d{3}|///)$").expect("valid regex");
    static ref DAILY: Regex =
        Regex::new(r"^4([01/])(\d{3}|///)([01/])(\d{3}|///)$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureGroup {
    pub air: Value<Temperature>,
    pub dew_point: Value<Temperature>,
    /// Tenths of a degree, from the remarks `T` group.
    pub precise: bool,
}

impl TemperatureGroup {
    pub fn relative_humidity(&self) -> Option<f64> {
        match (self.air, self.dew_point) {
            (Value::Reported(air), Value::Reported(dew)) => {
                Some(Temperature::relative_humidity(air, dew))
            }
            _ => None,
        }
    }
}

impl GroupGrammar for TemperatureGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        match part {
            ReportPart::Metar => {
                let caps = AIR_DEW.captures(token)?;
                let dew_point = caps
                    .get(2)
                    .map(|m| Temperature::parse_code(m.as_str()))
                    .unwrap_or(Value::NotReported);
                Some(Self {
                    air: Temperature::parse_code(&caps[1]),
                    dew_point,
                    precise: false,
                })
            }
            ReportPart::Rmk => {
                let caps = PRECISE.captures(token)?;
                let dew_point = match (caps.get(3), caps.get(4)) {
                    (Some(sign), Some(digits)) => {
                        Temperature::parse_tenths(sign.as_str(), digits.as_str())
                    }
                    _ => Value::NotReported,
                };
                Some(Self {
                    air: Temperature::parse_tenths(&caps[1], &caps[2]),
                    dew_point,
                    precise: true,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MinMaxPeriod {
    /// TAF `TX`/`TN` forecast extremes with their times.
    Forecast,
    /// Remarks `1sTTT` / `2sTTT`.
    Observed6Hours,
    /// Remarks `4sTTTsTTT`.
    Observed24Hours,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMaxTemperatureGroup {
    pub period: MinMaxPeriod,
    pub minimum: Option<Value<Temperature>>,
    pub minimum_time: Option<MetafTime>,
    pub maximum: Option<Value<Temperature>>,
    pub maximum_time: Option<MetafTime>,
}

impl MinMaxTemperatureGroup {
    fn empty(period: MinMaxPeriod) -> Self {
        Self {
            period,
            minimum: None,
            minimum_time: None,
            maximum: None,
            maximum_time: None,
        }
    }

    fn parse_forecast(token: &str) -> Option<(bool, Value<Temperature>, MetafTime)> {
        let caps = FORECAST.captures(token)?;
        let is_max = &caps[1] == "TX";
        let time = MetafTime::from_digits(&caps[3], true, false)?;
        Some((is_max, Temperature::parse_code(&caps[2]), time))
    }
}

impl GroupGrammar for MinMaxTemperatureGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        match part {
            ReportPart::Taf | ReportPart::Trend => {
                let (is_max, temperature, time) = Self::parse_forecast(token)?;
                let mut g = Self::empty(MinMaxPeriod::Forecast);
                if is_max {
                    g.maximum = Some(temperature);
                    g.maximum_time = Some(time);
                } else {
                    g.minimum = Some(temperature);
                    g.minimum_time = Some(time);
                }
                Some(g)
            }
            ReportPart::Rmk => {
                if let Some(caps) = SIX_HOUR.captures(token) {
                    let mut g = Self::empty(MinMaxPeriod::Observed6Hours);
                    let t = Temperature::parse_tenths(&caps[2], &caps[3]);
                    if &caps[1] == "1" {
                        g.maximum = Some(t);
                    } else {
                        g.minimum = Some(t);
                    }
                    return Some(g);
                }
                let caps = DAILY.captures(token)?;
                let mut g = Self::empty(MinMaxPeriod::Observed24Hours);
                g.maximum = Some(Temperature::parse_tenths(&caps[1], &caps[2]));
                g.minimum = Some(Temperature::parse_tenths(&caps[3], &caps[4]));
                Some(g)
            }
            _ => None,
        }
    }

    fn append(&mut self, token: &str, _part: ReportPart) -> bool {
        if self.period != MinMaxPeriod::Forecast {
            return false;
        }
        let Some((is_max, temperature, time)) = Self::parse_forecast(token) else {
            return false;
        };
        match (is_max, self.maximum.is_some(), self.minimum.is_some()) {
            (true, false, _) => {
                self.maximum = Some(temperature);
                self.maximum_time = Some(time);
                true
            }
            (false, _, false) => {
                self.minimum = Some(temperature);
                self.minimum_time = Some(time);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_and_dew_point() {
        let g = TemperatureGroup::parse("15/M02", ReportPart::Metar).unwrap();
        assert_eq!(g.air, Value::Reported(Temperature::celsius(15.0)));
        assert_eq!(g.dew_point, Value::Reported(Temperature::celsius(-2.0)));
        let g = TemperatureGroup::parse("M01/", ReportPart::Metar).unwrap();
        assert_eq!(g.dew_point, Value::NotReported);
        assert!(TemperatureGroup::parse("15/10", ReportPart::Taf).is_none());
    }

    #[test]
    fn precise_remark() {
        let g = TemperatureGroup::parse("T01560033", ReportPart::Rmk).unwrap();
        assert!(g.precise);
        assert_eq!(g.air, Value::Reported(Temperature::celsius(15.6)));
        assert_eq!(g.dew_point, Value::Reported(Temperature::celsius(3.3)));
        assert!(g.relative_humidity().is_some());
    }

    #[test]
    fn taf_max_then_min() {
        let mut g = MinMaxTemperatureGroup::parse("TX25/1514Z", ReportPart::Taf).unwrap();
        assert!(g.append("TNM02/1605Z", ReportPart::Taf));
        assert!(!g.append("TX20/1614Z", ReportPart::Taf));
        assert_eq!(g.maximum, Some(Value::Reported(Temperature::celsius(25.0))));
        assert_eq!(g.minimum, Some(Value::Reported(Temperature::celsius(-2.0))));
        assert_eq!(g.minimum_time, Some(MetafTime::new(Some(16), 5, 0)));
    }

    #[test]
    fn remark_extremes() {
        let g = MinMaxTemperatureGroup::parse("401120084", ReportPart::Rmk).unwrap();
        assert_eq!(g.period, MinMaxPeriod::Observed24Hours);
        assert_eq!(g.maximum, Some(Value::Reported(Temperature::celsius(11.2))));
        assert_eq!(g.minimum, Some(Value::Reported(Temperature::celsius(8.4))));
        let g = MinMaxTemperatureGroup::parse("21012", ReportPart::Rmk).unwrap();
        assert_eq!(g.minimum, Some(Value::Reported(Temperature::celsius(-1.2))));
        assert!(g.maximum.is_none());
    }
}
