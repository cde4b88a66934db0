//! Decoded reports and the per-station pairing of an observation with its
//! forecast.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::explain::{explain, explain_group};
use crate::group::{Group, GroupInfo, Keyword, PressureKind, ReportPart};
use crate::parser::{ParseResult, parse_with_policy};

/// A raw report together with its parse result and rendered text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub raw: String,
    pub reference_date: NaiveDate,
    pub result: ParseResult,
    pub text: String,
}

impl Decoded {
    pub fn has_parse_error(&self) -> bool {
        self.result.metadata.error.is_some()
    }
}

/// Parse `raw` and render it. Calling this again with the same arguments
/// gives the same result; hosts call it whenever the text, the reference
/// date, the settings or the current day change.
pub fn recompute(
    raw: &str,
    reference_date: NaiveDate,
    settings: &Settings,
    today: NaiveDate,
) -> Decoded {
    let result = parse_with_policy(raw, reference_date, &settings.error_policy);
    let text = explain(&result, settings, today);
    if let Some(error) = &result.metadata.error {
        debug!(%error, "report decoded with error");
    }
    Decoded {
        raw: raw.to_string(),
        reference_date,
        result,
        text,
    }
}

/// Flight rules category derived from ceiling and prevailing visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl FlightCategory {
    /// `ceiling_feet` is `None` when no layer forms a ceiling.
    pub fn from_conditions(ceiling_feet: Option<f64>, visibility_miles: f64) -> Self {
        let ceiling = ceiling_feet.unwrap_or(f64::INFINITY);
        if ceiling < 500.0 || visibility_miles < 1.0 {
            FlightCategory::Lifr
        } else if ceiling < 1000.0 || visibility_miles < 3.0 {
            FlightCategory::Ifr
        } else if ceiling <= 3000.0 || visibility_miles <= 5.0 {
            FlightCategory::Mvfr
        } else {
            FlightCategory::Vfr
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
        }
    }
}

impl std::fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CAVOK implies visibility of 10 km or more.
const CAVOK_VISIBILITY_MILES: f64 = 6.2;

/// Latest observation and forecast for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub id: String,
    pub metar: Option<Decoded>,
    pub taf: Option<Decoded>,
}

impl WeatherReport {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metar: None,
            taf: None,
        }
    }

    /// Station from the observation, else from the forecast.
    pub fn station_id(&self) -> Option<&str> {
        [&self.metar, &self.taf]
            .into_iter()
            .flatten()
            .find_map(|d| d.result.metadata.station.as_deref())
    }

    /// Observed QNH in whole hectopascal.
    pub fn qnh(&self) -> Option<i64> {
        self.metar_body().find_map(|info| match &info.group {
            Group::Pressure(p) if p.kind == PressureKind::ObservedQnh => {
                p.pressure.reported().map(|v| v.to_hpa().round() as i64)
            }
            _ => None,
        })
    }

    pub fn flight_category(&self) -> Option<FlightCategory> {
        let mut ceiling: Option<f64> = None;
        let mut visibility: Option<f64> = None;
        for info in self.metar_body() {
            match &info.group {
                Group::Keyword(k) if k.keyword == Keyword::Cavok => {
                    visibility.get_or_insert(CAVOK_VISIBILITY_MILES);
                }
                Group::Cloud(c) => {
                    if let Some(base) = c.ceiling_feet() {
                        ceiling = Some(ceiling.map_or(base, |lowest| lowest.min(base)));
                    }
                }
                Group::Visibility(v) if !v.is_runway_visual_range() && v.direction.is_none() => {
                    if let Some(d) = v.distance.reported() {
                        visibility.get_or_insert(d.to_statute_miles());
                    }
                }
                _ => {}
            }
        }
        visibility.map(|miles| FlightCategory::from_conditions(ceiling, miles))
    }

    /// Short summary of the observation: flight category, wind, visibility,
    /// temperature and QNH.
    pub fn one_line_description(&self, settings: &Settings, today: NaiveDate) -> Option<String> {
        let metar = self.metar.as_ref()?;
        let mut fragments: Vec<String> = Vec::new();
        if let Some(category) = self.flight_category() {
            fragments.push(category.to_string());
        }
        let mut seen = Vec::new();
        for info in self.metar_body() {
            let kind = match &info.group {
                Group::Wind(w) if w.shear_height.is_none() => "wind",
                Group::Visibility(v) if !v.is_runway_visual_range() && v.direction.is_none() => {
                    "visibility"
                }
                Group::Temperature(_) => "temperature",
                Group::Pressure(p) if p.kind == PressureKind::ObservedQnh => "qnh",
                _ => continue,
            };
            if seen.contains(&kind) {
                continue;
            }
            seen.push(kind);
            fragments.push(explain_group(&metar.result, info, settings, today));
        }
        (!fragments.is_empty()).then(|| fragments.join("; "))
    }

    fn metar_body(&self) -> impl Iterator<Item = &GroupInfo> {
        self.metar
            .iter()
            .flat_map(|d| d.result.groups.iter())
            .filter(|info| info.part == ReportPart::Metar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    fn station(metar: Option<&str>, taf: Option<&str>) -> WeatherReport {
        let settings = Settings::default();
        WeatherReport {
            id: "test".to_string(),
            metar: metar.map(|m| recompute(m, date(), &settings, date())),
            taf: taf.map(|t| recompute(t, date(), &settings, date())),
        }
    }

    #[test]
    fn decoded_text_and_error_flag() {
        let raw = "METAR EGLL 121250Z 27010KT 9999 Q1013";
        let d = recompute(raw, date(), &Settings::default(), date());
        assert!(!d.has_parse_error());
        assert!(d.text.contains("QNH 1013 hPa"));

        let d = recompute("METAR 27010KT 9999", date(), &Settings::default(), date());
        assert!(d.has_parse_error());
        assert!(!d.text.is_empty());
    }

    #[test]
    fn station_falls_back_to_forecast() {
        let r = station(None, Some("TAF KJFK 121130Z 1212/1318 18010KT P6SM"));
        assert_eq!(r.station_id(), Some("KJFK"));
        assert_eq!(r.qnh(), None);
        assert_eq!(r.flight_category(), None);
        assert_eq!(r.one_line_description(&Settings::default(), date()), None);
        assert_eq!(WeatherReport::new("empty").station_id(), None);
    }

    #[test]
    fn qnh_in_whole_hectopascal() {
        assert_eq!(station(Some("METAR EGLL 121250Z Q1013"), None).qnh(), Some(1013));
        assert_eq!(station(Some("METAR KORD 121651Z A2992"), None).qnh(), Some(1013));
    }

    #[test]
    fn flight_categories() {
        let cases = [
            ("METAR EGLL 121250Z 9999 SCT040", FlightCategory::Vfr),
            ("METAR EGLL 121250Z 9999 BKN030", FlightCategory::Mvfr),
            ("METAR KORD 121651Z 2SM BKN008", FlightCategory::Ifr),
            ("METAR EGLL 121250Z 0800 OVC004", FlightCategory::Lifr),
            ("METAR EGLL 121250Z 27010KT CAVOK 15/10 Q1013", FlightCategory::Vfr),
        ];
        for (text, expected) in cases {
            assert_eq!(station(Some(text), None).flight_category(), Some(expected), "{text}");
        }
        assert_eq!(station(Some("METAR EGLL 121250Z BKN030"), None).flight_category(), None);
    }

    #[test]
    fn one_line_summary() {
        let raw = "METAR EGLL 121250Z 27010KT 9999 SCT040 15/10 Q1013 BECMG 18015KT";
        let r = station(Some(raw), None);
        let line = r.one_line_description(&Settings::default(), date()).unwrap();
        assert!(line.starts_with(
            "VFR; Wind from 270° at 10 kt; Visibility more than 10 km; Temperature 15 °C"
        ));
        assert!(line.ends_with("; QNH 1013 hPa"));
        assert!(!line.contains("180°"));
    }

    #[test]
    fn recompute_is_deterministic() {
        let raw = "METAR EGLL 121250Z 27010G20KT 9999 -SHRA BKN030 15/10 Q1013";
        let a = recompute(raw, date(), &Settings::default(), date());
        let b = recompute(raw, date(), &Settings::default(), date());
        assert_eq!(a, b);
    }
}
