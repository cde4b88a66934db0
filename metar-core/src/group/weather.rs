//! Present, forecast and recent weather phenomena (`-SHRA`, `VCTS`, `RERA`,
//! `FZFG`, `NSW`).

use serde::Serialize;

use super::{GroupGrammar, ReportPart};

const MAX_WEATHER_CODES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    None,
    Light,
    Heavy,
    Vicinity,
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Descriptor {
    None,
    Shallow,
    Partial,
    Patches,
    LowDrifting,
    Blowing,
    Showers,
    Thunderstorm,
    Freezing,
}

impl Descriptor {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "MI" => Some(Descriptor::Shallow),
            "PR" => Some(Descriptor::Partial),
            "BC" => Some(Descriptor::Patches),
            "DR" => Some(Descriptor::LowDrifting),
            "BL" => Some(Descriptor::Blowing),
            "SH" => Some(Descriptor::Showers),
            "TS" => Some(Descriptor::Thunderstorm),
            "FZ" => Some(Descriptor::Freezing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Drizzle,
    Rain,
    Snow,
    SnowGrains,
    IceCrystals,
    IcePellets,
    Hail,
    SmallHail,
    UnknownPrecipitation,
    Mist,
    Fog,
    Smoke,
    VolcanicAsh,
    Dust,
    Sand,
    Haze,
    Spray,
    DustWhirls,
    Squalls,
    FunnelCloud,
    Sandstorm,
    Duststorm,
}

impl Weather {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DZ" => Some(Weather::Drizzle),
            "RA" => Some(Weather::Rain),
            "SN" => Some(Weather::Snow),
            "SG" => Some(Weather::SnowGrains),
            "IC" => Some(Weather::IceCrystals),
            "PL" => Some(Weather::IcePellets),
            "GR" => Some(Weather::Hail),
            "GS" => Some(Weather::SmallHail),
            "UP" => Some(Weather::UnknownPrecipitation),
            "BR" => Some(Weather::Mist),
            "FG" => Some(Weather::Fog),
            "FU" => Some(Weather::Smoke),
            "VA" => Some(Weather::VolcanicAsh),
            "DU" => Some(Weather::Dust),
            "SA" => Some(Weather::Sand),
            "HZ" => Some(Weather::Haze),
            "PY" => Some(Weather::Spray),
            "PO" => Some(Weather::DustWhirls),
            "SQ" => Some(Weather::Squalls),
            "FC" => Some(Weather::FunnelCloud),
            "SS" => Some(Weather::Sandstorm),
            "DS" => Some(Weather::Duststorm),
            _ => None,
        }
    }

    pub fn is_precipitation(&self) -> bool {
        matches!(
            self,
            Weather::Drizzle
                | Weather::Rain
                | Weather::Snow
                | Weather::SnowGrains
                | Weather::IceCrystals
                | Weather::IcePellets
                | Weather::Hail
                | Weather::SmallHail
                | Weather::UnknownPrecipitation
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherPhenomena {
    pub qualifier: Qualifier,
    pub descriptor: Descriptor,
    pub weather: Vec<Weather>,
}

impl WeatherPhenomena {
    /// Decode one weather code such as `+TSRAGR`.
    pub fn parse(code: &str) -> Option<Self> {
        if !code.is_ascii() {
            return None;
        }
        let (qualifier, rest) = if let Some(r) = code.strip_prefix('-') {
            (Qualifier::Light, r)
        } else if let Some(r) = code.strip_prefix('+') {
            (Qualifier::Heavy, r)
        } else if let Some(r) = code.strip_prefix("VC") {
            (Qualifier::Vicinity, r)
        } else if let Some(r) = code.strip_prefix("RE") {
            (Qualifier::Recent, r)
        } else {
            (Qualifier::None, code)
        };
        let (descriptor, rest) = match rest.get(..2).and_then(Descriptor::from_code) {
            Some(d) => (d, &rest[2..]),
            None => (Descriptor::None, rest),
        };
        if rest.len() % 2 != 0 || rest.len() / 2 > MAX_WEATHER_CODES {
            return None;
        }
        let weather = rest
            .as_bytes()
            .chunks(2)
            .map(|c| std::str::from_utf8(c).ok().and_then(Weather::from_code))
            .collect::<Option<Vec<_>>>()?;
        if weather.is_empty() && descriptor == Descriptor::None {
            return None;
        }
        // Intensity applies to precipitation, funnel clouds and dust/sand storms.
        if matches!(qualifier, Qualifier::Light | Qualifier::Heavy)
            && !weather.is_empty()
            && !weather.iter().any(|w| {
                w.is_precipitation()
                    || matches!(w, Weather::FunnelCloud | Weather::Sandstorm | Weather::Duststorm)
            })
        {
            return None;
        }
        Some(Self {
            qualifier,
            descriptor,
            weather,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "phenomena", rename_all = "snake_case")]
pub enum WeatherGroup {
    /// `NSW`
    NoSignificantWeather,
    /// `//`
    NotReported,
    Phenomena(WeatherPhenomena),
}

impl GroupGrammar for WeatherGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !part.is_body() {
            return None;
        }
        match token {
            "NSW" => Some(WeatherGroup::NoSignificantWeather),
            "//" => Some(WeatherGroup::NotReported),
            _ => WeatherPhenomena::parse(token).map(WeatherGroup::Phenomena),
        }
    }
}
