//! Plain-language rendering of parsed reports.
//!
//! [`explain`] renders every group of a [`ParseResult`] in report order and
//! joins the fragments with [`LINE_BREAK`]. The report part a group was read
//! from selects the wording: `NSW` in a trend ends significant weather, a
//! time span in the header is the forecast validity, and so on.

use chrono::{Duration, NaiveDate};

use crate::classify::ReportKind;
use crate::config::Settings;
use crate::format;
use crate::group::{
    CloudAmount, CloudGroup, ColourCode, Group, GroupInfo, Keyword, LightningGroup,
    LowMidHighCloudGroup, MinMaxPeriod, MinMaxTemperatureGroup, MiscGroup, PrecipitationGroup,
    PrecipitationKind, PressureGroup, PressureKind, PressureTendencyGroup, ReportPart,
    RunwayStateGroup, RunwayStatus, SeaSurfaceGroup, TemperatureGroup, TrendGroup, TrendKind,
    VicinityGroup, VisibilityGroup, WeatherGroup, WindGroup,
};
use crate::parser::ParseResult;
use crate::value::{Direction, Distance, MetafTime, Temperature, Value};

/// Separator placed between the fragments of decoded text.
pub const LINE_BREAK: &str = "<br>";

/// Render a parsed report as text, one fragment per group.
pub fn explain(result: &ParseResult, settings: &Settings, today: NaiveDate) -> String {
    let explainer = Explainer {
        result,
        settings,
        today,
    };
    result
        .groups
        .iter()
        .map(|info| explainer.group(info))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Render a single group of `result`.
pub fn explain_group(
    result: &ParseResult,
    info: &GroupInfo,
    settings: &Settings,
    today: NaiveDate,
) -> String {
    Explainer {
        result,
        settings,
        today,
    }
    .group(info)
}

struct Explainer<'a> {
    result: &'a ParseResult,
    settings: &'a Settings,
    today: NaiveDate,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn clock(t: &MetafTime) -> String {
    format!("{:02}:{:02} UTC", t.hour, t.minute)
}

impl Explainer<'_> {
    fn group(&self, info: &GroupInfo) -> String {
        let part = info.part;
        match &info.group {
            Group::Keyword(g) => self.keyword(g.keyword, part),
            Group::Location(g) => format!("Station {}", g.icao),
            Group::ReportTime(g) => match self.result.metadata.kind {
                ReportKind::Taf => format!("Issued {}", self.time(&g.time)),
                _ => format!("Observed {}", self.time(&g.time)),
            },
            Group::Trend(g) => self.trend(g, part),
            Group::Wind(g) => self.wind(g),
            Group::Visibility(g) => self.visibility(g),
            Group::Cloud(g) => self.cloud(g),
            Group::Weather(g) => self.weather(g, part),
            Group::Temperature(g) => self.temperature(g),
            Group::MinMaxTemperature(g) => self.min_max_temperature(g),
            Group::Pressure(g) => self.pressure(g),
            Group::PressureTendency(g) => self.pressure_tendency(g),
            Group::RunwayState(g) => self.runway_state(g),
            Group::SeaSurface(g) => self.sea_surface(g),
            Group::Precipitation(g) => self.precipitation(g),
            Group::LayerForecast(g) => format!(
                "{} from {} to {}",
                capitalize(format::layer_kind(g.kind)),
                format::value(&g.base, format::height),
                format::value(&g.top, format::height),
            ),
            Group::CloudTypes(g) => {
                let layers: Vec<String> = g
                    .layers
                    .iter()
                    .map(|l| format!("{} {} oktas", format::cloud_type(l.cloud_type), l.oktas))
                    .collect();
                format!("Cloud layers: {}", layers.join(", "))
            }
            Group::LowMidHighCloud(g) => self.low_mid_high(g),
            Group::Lightning(g) => self.lightning(g),
            Group::Vicinity(g) => self.vicinity(g),
            Group::Misc(g) => self.misc(g),
            Group::Unknown => format!("{}: not decoded", info.raw),
        }
    }

    /// A time relative to `today`: `today 14:00 UTC`, `tomorrow 06:00 UTC`,
    /// or the date when further away.
    fn time(&self, t: &MetafTime) -> String {
        if t.day.is_none() {
            return clock(t);
        }
        let Some(resolved) = t.resolve(self.result.reference_date) else {
            return format!("day {} {} (invalid time)", t.day.unwrap_or_default(), clock(t));
        };
        let date = resolved.date();
        let hhmm = resolved.format("%H:%M UTC");
        if date == self.today {
            format!("today {hhmm}")
        } else if date == self.today + Duration::days(1) {
            format!("tomorrow {hhmm}")
        } else if date == self.today - Duration::days(1) {
            format!("yesterday {hhmm}")
        } else {
            format!("{} {hhmm}", resolved.format("%-d %B %Y"))
        }
    }

    fn keyword(&self, keyword: Keyword, part: ReportPart) -> String {
        let text = match keyword {
            Keyword::Metar => "METAR: routine weather report",
            Keyword::Speci => "SPECI: special weather report",
            Keyword::Taf => "TAF: aerodrome forecast",
            Keyword::Amd => "Amended report",
            Keyword::Cor => "Corrected report",
            Keyword::Nil => "Missing report",
            Keyword::Cnl => "Cancelled report",
            Keyword::Auto => "Fully automated report",
            Keyword::Cavok if part == ReportPart::Metar => {
                "Ceiling and visibility OK: visibility 10 km or more, no clouds below 5000 ft, \
                 no cumulonimbus or towering cumulus, no significant weather"
            }
            Keyword::Cavok => "Ceiling and visibility OK expected",
            Keyword::Rmk => "Remarks follow",
            Keyword::Maintenance => "Station requires maintenance",
            Keyword::Ao1 => "Automated station without precipitation discriminator",
            Keyword::Ao2 => "Automated station with precipitation discriminator",
            Keyword::Nospeci => "Station does not issue SPECI reports",
        };
        text.to_string()
    }

    fn period(&self, g: &TrendGroup) -> String {
        let mut text = String::new();
        if let Some(from) = &g.from {
            text.push_str(&format!(" from {}", self.time(from)));
        }
        if let Some(until) = &g.until {
            text.push_str(&format!(" until {}", self.time(until)));
        }
        if let Some(at) = &g.at {
            text.push_str(&format!(" at {}", self.time(at)));
        }
        text
    }

    fn trend(&self, g: &TrendGroup, part: ReportPart) -> String {
        if part == ReportPart::Header {
            return format!("Forecast valid{}", self.period(g));
        }
        let period = self.period(g);
        let text = match g.kind {
            TrendKind::TimeSpan => format!("During the period{period}"),
            TrendKind::Nosig => {
                "No significant changes expected within the next 2 hours".to_string()
            }
            TrendKind::Becmg => format!("Conditions becoming{period}"),
            TrendKind::Tempo => format!("Temporarily{period}"),
            TrendKind::Inter => format!("Intermittently{period}"),
            TrendKind::From => format!("Conditions changing{period}"),
            TrendKind::Until => format!("Conditions lasting{period}"),
            TrendKind::At => format!("Conditions expected{period}"),
            TrendKind::Prob => format!("Conditions possible{period}"),
        };
        match g.probability {
            Some(p) => format!(
                "{}, {}",
                capitalize(&format::probability(p)),
                lowercase_first(&text)
            ),
            None => text,
        }
    }

    fn wind(&self, g: &WindGroup) -> String {
        let sector = g.variable_sector.map(|(from, to)| {
            let s = self.settings;
            format!(
                "direction varying between {} and {}",
                format::direction(&Direction::Degrees(from), s),
                format::direction(&Direction::Degrees(to), s),
            )
        });
        if g.is_sector_only() {
            return capitalize(&sector.unwrap_or_default());
        }
        let mut text = if g.is_calm() {
            "Calm".to_string()
        } else {
            let speed = format::value(&g.speed, format::speed);
            let mut t = match &g.direction {
                Value::Reported(Direction::Variable) => format!("Variable wind at {speed}"),
                Value::Reported(d) => {
                    format!("Wind from {} at {speed}", format::direction(d, self.settings))
                }
                Value::NotReported => format!("Wind direction not reported, speed {speed}"),
                Value::Unrecognized => format!("Wind direction not recognised, speed {speed}"),
            };
            if let Some(gust) = &g.gust {
                t.push_str(&format!(", gusting to {}", format::speed(gust)));
            }
            t
        };
        if let Some(sector) = sector {
            text.push_str(&format!(", {sector}"));
        }
        match &g.shear_height {
            Some(h) => format!("Wind shear at {}: {}", format::height(h), lowercase_first(&text)),
            None => text,
        }
    }

    fn visibility(&self, g: &VisibilityGroup) -> String {
        if let Some(runway) = &g.runway {
            let range = |d: &Distance| format::runway_visual_range(d, self.settings);
            let mut text = format!(
                "Runway visual range for {}: {}",
                format::runway(runway),
                format::value(&g.distance, range)
            );
            if let Some(max) = &g.max_distance {
                text.push_str(&format!(", varying up to {}", format::value(max, range)));
            }
            if let Some(trend) = g.trend {
                text.push_str(&format!(", {}", format::visibility_trend(trend)));
            }
            return text;
        }
        let mut text = format!(
            "Visibility {}",
            format::value(&g.distance, |d| format::visibility(d, self.settings))
        );
        if let Some(dir) = g.direction {
            text.push_str(&format!(" towards {}", format::cardinal(dir)));
        }
        if g.no_directional_variation {
            text.push_str(", no directional variation");
        }
        text
    }

    fn cloud(&self, g: &CloudGroup) -> String {
        let amount = format::cloud_amount(g.amount);
        let height = |d: &Distance| format!("{} AGL", format::height(d));
        match g.amount {
            CloudAmount::NoSignificantClouds
            | CloudAmount::NoCloudsDetected
            | CloudAmount::SkyClear
            | CloudAmount::Clear => return amount.to_string(),
            CloudAmount::VerticalVisibility => {
                return format!(
                    "{amount}, vertical visibility {}",
                    format::value(&g.height, height)
                );
            }
            _ => {}
        }
        let clouds = match &g.convective {
            Some(Value::Reported(c)) => {
                format!("{amount} {}", format::convective_type(*c).to_lowercase())
            }
            Some(_) => format!("{amount} clouds of unknown convective type"),
            None => format!("{amount} clouds"),
        };
        match &g.height {
            Value::Reported(d) => format!("{clouds} at {}", height(d)),
            _ => format!("{clouds}, base {}", format::value(&g.height, height)),
        }
    }

    fn weather(&self, g: &WeatherGroup, part: ReportPart) -> String {
        match g {
            WeatherGroup::NoSignificantWeather if part == ReportPart::Metar => {
                "No significant weather".to_string()
            }
            WeatherGroup::NoSignificantWeather => "End of significant weather".to_string(),
            WeatherGroup::NotReported => "Weather not reported".to_string(),
            WeatherGroup::Phenomena(wp) => capitalize(&format::weather_phenomena(wp)),
        }
    }

    fn temperature(&self, g: &TemperatureGroup) -> String {
        let t = |v: &Temperature| format::temperature(v, self.settings);
        let mut text = format!(
            "{}emperature {}, dew point {}",
            if g.precise { "Precise t" } else { "T" },
            format::value(&g.air, t),
            format::value(&g.dew_point, t),
        );
        if let Some(rh) = g.relative_humidity() {
            text.push_str(&format!(", relative humidity {}", format::relative_humidity(rh)));
        }
        text
    }

    fn min_max_temperature(&self, g: &MinMaxTemperatureGroup) -> String {
        let t = |v: &Temperature| format::temperature(v, self.settings);
        let span = match g.period {
            MinMaxPeriod::Forecast => "forecast",
            MinMaxPeriod::Observed6Hours => "over the last 6 hours",
            MinMaxPeriod::Observed24Hours => "over the last 24 hours",
        };
        let mut parts = Vec::new();
        if let Some(max) = &g.maximum {
            let mut s = format!("maximum temperature {span} {}", format::value(max, t));
            if let Some(at) = &g.maximum_time {
                s.push_str(&format!(" at {}", self.time(at)));
            }
            parts.push(s);
        }
        if let Some(min) = &g.minimum {
            let mut s = format!("minimum temperature {span} {}", format::value(min, t));
            if let Some(at) = &g.minimum_time {
                s.push_str(&format!(" at {}", self.time(at)));
            }
            parts.push(s);
        }
        capitalize(&parts.join(", "))
    }

    fn pressure(&self, g: &PressureGroup) -> String {
        let label = match g.kind {
            PressureKind::ObservedQnh => "QNH",
            PressureKind::ForecastLowestQnh => "Lowest forecast QNH",
            PressureKind::SeaLevel => "Sea level pressure",
        };
        format!("{label} {}", format::value(&g.pressure, |p| format::pressure(p, self.settings)))
    }

    fn pressure_tendency(&self, g: &PressureTendencyGroup) -> String {
        let mut text = format!(
            "Pressure tendency over the last 3 hours: {}",
            format::value(&g.tendency, |t| format::pressure_tendency(*t).to_string())
        );
        if g.difference.is_reported() || g.tendency.is_reported() {
            let direction = match g.tendency.reported().and_then(|t| t.is_higher()) {
                Some(true) => "higher",
                Some(false) => "lower",
                None => "different",
            };
            if let Value::Reported(p) = &g.difference {
                text.push_str(&format!(
                    ", now {} {direction} than 3 hours ago",
                    format::pressure(p, self.settings)
                ));
            }
        }
        text
    }

    fn runway_state(&self, g: &RunwayStateGroup) -> String {
        let Some(runway) = &g.runway else {
            return "Aerodrome closed due to snow".to_string();
        };
        let name = capitalize(&format::runway(runway));
        let friction = format::value(&g.friction, format::surface_friction);
        match g.status {
            RunwayStatus::SnowClosed => format!("{name} closed due to snow"),
            RunwayStatus::Cleared => format!("{name}: contamination cleared, {friction}"),
            RunwayStatus::NotOperational => format!(
                "{name} not operational: deposits {}, covering {}",
                format::value(&g.deposits, |d| format::deposits(*d).to_string()),
                format::value(&g.extent, |e| format::extent(*e).to_string()),
            ),
            RunwayStatus::Normal => format!(
                "{name}: deposits {}, covering {}, depth {}, {friction}",
                format::value(&g.deposits, |d| format::deposits(*d).to_string()),
                format::value(&g.extent, |e| format::extent(*e).to_string()),
                format::value(&g.depth, |d| format::precipitation(d, self.settings)),
            ),
        }
    }

    fn sea_surface(&self, g: &SeaSurfaceGroup) -> String {
        format!(
            "Sea surface temperature {}, waves {}",
            format::value(&g.temperature, |t| format::temperature(t, self.settings)),
            format::value(&g.waves, |w| format::wave_height(w, self.settings)),
        )
    }

    fn precipitation(&self, g: &PrecipitationGroup) -> String {
        let label = match g.kind {
            PrecipitationKind::LastHour => "Precipitation over the last hour",
            PrecipitationKind::LastThreeOrSixHours => "Precipitation over the last 3 or 6 hours",
            PrecipitationKind::Last24Hours => "Precipitation over the last 24 hours",
            PrecipitationKind::SnowDepth => "Snow depth on the ground",
        };
        let amount = format::value(&g.amount, |p| {
            if p.value == 0.0 && g.kind != PrecipitationKind::SnowDepth {
                "trace".to_string()
            } else {
                format::precipitation(p, self.settings)
            }
        });
        format!("{label}: {amount}")
    }

    fn low_mid_high(&self, g: &LowMidHighCloudGroup) -> String {
        format!(
            "Low clouds: {}; middle clouds: {}; high clouds: {}",
            format::value(&g.low, |l| format::low_layer(*l).to_string()),
            format::value(&g.mid, |m| format::mid_layer(*m).to_string()),
            format::value(&g.high, |h| format::high_layer(*h).to_string()),
        )
    }

    fn lightning(&self, g: &LightningGroup) -> String {
        let mut text = match g.frequency {
            Some(f) => format!("{} lightning", capitalize(format::lightning_frequency(f))),
            None => "Lightning".to_string(),
        };
        if !g.types.is_empty() {
            let types: Vec<&str> = g.types.iter().map(|t| format::lightning_type(*t)).collect();
            text.push_str(&format!(" ({})", types.join(", ")));
        }
        if let Some(p) = g.proximity {
            text.push_str(&format!(", {}", format::proximity(p)));
        }
        if !g.directions.is_empty() {
            text.push_str(&format!(", {}", format::directions(&g.directions, self.settings)));
        }
        text
    }

    fn vicinity(&self, g: &VicinityGroup) -> String {
        let mut text = format::vicinity_phenomenon(g.phenomenon).to_string();
        if let Some(p) = g.proximity {
            text.push_str(&format!(", {}", format::proximity(p)));
        }
        if !g.directions.is_empty() {
            text.push_str(&format!(", {}", format::directions(&g.directions, self.settings)));
        }
        if let Some(m) = g.moving {
            text.push_str(&format!(", moving {}", format::cardinal(m)));
        }
        text
    }

    fn misc(&self, g: &MiscGroup) -> String {
        match g {
            MiscGroup::SunshineDuration { minutes } => format!(
                "Sunshine duration on the previous day: {}",
                format::value(minutes, |m| format!("{m} minutes"))
            ),
            MiscGroup::ColourCode { code, black } => {
                let (meters, feet) = code.minimums();
                let visibility = format::visibility(&Distance::meters(meters), self.settings);
                let base = format::height(&Distance::feet(feet));
                let condition = if *code == ColourCode::Red {
                    format!("visibility below {visibility} or cloud base below {base}")
                } else {
                    format!("visibility {visibility} or more, cloud base {base} or higher")
                };
                let text = format!("Colour state {}: {condition}", format::colour_code(*code));
                if *black {
                    format!(
                        "Airfield closed for reasons other than weather; {}",
                        lowercase_first(&text)
                    )
                } else {
                    text
                }
            }
        }
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitSystem;
    use crate::parser::parse;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn lines(
        text: &str,
        reference: NaiveDate,
        today: NaiveDate,
        settings: &Settings,
    ) -> Vec<String> {
        let result = parse(text, reference);
        explain(&result, settings, today)
            .split(LINE_BREAK)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn metar_lines() {
        let out = lines(
            "METAR EGLL 121250Z 27010G20KT 240V300 9999 -SHRA BKN030 15/10 Q1013 NOSIG",
            day(12),
            day(12),
            &Settings::default(),
        );
        assert_eq!(out[0], "METAR: routine weather report");
        assert_eq!(out[1], "Station EGLL");
        assert_eq!(out[2], "Observed today 12:50 UTC");
        assert_eq!(
            out[3],
            "Wind from 270° at 10 kt, gusting to 20 kt, direction varying between 240° and 300°"
        );
        assert_eq!(out[4], "Visibility more than 10 km");
        assert_eq!(out[5], "Light showers of rain");
        assert_eq!(out[6], "Broken clouds at 3000 ft AGL");
        assert!(out[7].starts_with("Temperature 15 °C, dew point 10 °C, relative humidity 72%"));
        assert_eq!(out[8], "QNH 1013 hPa");
        assert_eq!(out[9], "No significant changes expected within the next 2 hours");
    }

    #[test]
    fn taf_validity_is_relative_to_today() {
        let out = lines(
            "TAF KJFK 121130Z 1212/1318 18010KT P6SM",
            day(12),
            day(13),
            &Settings::default(),
        );
        assert_eq!(out[2], "Issued yesterday 11:30 UTC");
        assert_eq!(out[3], "Forecast valid from yesterday 12:00 UTC until today 18:00 UTC");
    }

    #[test]
    fn imperial_and_cardinal_settings() {
        let settings = Settings {
            units: UnitSystem::Imperial,
            true_cardinal_directions: true,
            ..Default::default()
        };
        let out = lines("METAR KORD 121651Z 27010KT 1 1/2SM A2992", day(12), day(12), &settings);
        assert_eq!(out[3], "Wind from W at 10 kt");
        assert_eq!(out[4], "Visibility 1 1/2 SM");
        assert_eq!(out[5], "QNH 29.92 inHg");
    }

    #[test]
    fn colour_states_and_sunshine() {
        let out = lines(
            "METAR EGVN 121250Z 27010KT 9999 FEW030 15/10 Q1013 BLU BLACKAMB RMK 98096",
            day(12),
            day(12),
            &Settings::default(),
        );
        assert!(out.contains(
            &"Colour state BLUE: visibility 8 km or more, cloud base 2500 ft or higher".to_string()
        ));
        assert!(out.contains(
            &"Airfield closed for reasons other than weather; colour state AMBER: visibility 800 m \
              or more, cloud base 200 ft or higher"
                .to_string()
        ));
        assert!(out.contains(&"Sunshine duration on the previous day: 96 minutes".to_string()));
    }

    #[test]
    fn nsw_in_trend_ends_weather() {
        let out = lines(
            "METAR EGLL 121250Z 9999 RA BECMG NSW",
            day(12),
            day(12),
            &Settings::default(),
        );
        assert_eq!(out[5], "Conditions becoming");
        assert_eq!(out[6], "End of significant weather");
    }

    #[test]
    fn unknown_groups_keep_raw_text() {
        let out = lines("METAR EGLL 121250Z GARBAGE", day(12), day(12), &Settings::default());
        assert_eq!(out[3], "GARBAGE: not decoded");
    }

    #[test]
    fn remarks() {
        let out = lines(
            "METAR KORD 121651Z 18005KT RMK AO2 FRQ LTGICCG DSNT NE-SE CB DSNT W MOV E SLP132",
            day(12),
            day(12),
            &Settings::default(),
        );
        assert_eq!(out[4], "Remarks follow");
        assert_eq!(out[5], "Automated station with precipitation discriminator");
        assert_eq!(
            out[6],
            "Frequent lightning (in-cloud, cloud-to-ground), distant (10 to 30 miles), NE, E and SE"
        );
        assert_eq!(out[7], "Cumulonimbus, distant (10 to 30 miles), W, moving east");
        assert_eq!(out[8], "Sea level pressure 1013 hPa");
    }

    #[test]
    fn prob_tempo() {
        let out = lines(
            "TAF KJFK 121130Z 1212/1318 PROB30 TEMPO 1218/1222 TSRA",
            day(12),
            day(12),
            &Settings::default(),
        );
        assert_eq!(
            out[4],
            "Probability 30%, temporarily from today 18:00 UTC until today 22:00 UTC"
        );
        assert_eq!(out[5], "Thunderstorm with rain");
    }
}
