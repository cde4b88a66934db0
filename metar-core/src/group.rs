//! The closed set of report groups and their token grammars.
//!
//! Each group kind lives in its own submodule and implements [`GroupGrammar`]:
//! how a token starts the group, how following tokens extend it, and whether
//! it is complete. [`Group::parse`] tries every grammar in a fixed priority
//! order and falls back to [`Group::Unknown`].

use serde::Serialize;

pub mod cloud;
pub mod header;
pub mod keyword;
pub mod layer;
pub mod misc;
pub mod precipitation;
pub mod pressure;
pub mod remarks;
pub mod runway;
pub mod sea;
pub mod temperature;
pub mod trend;
pub mod visibility;
pub mod weather;
pub mod wind;

pub use cloud::{CloudAmount, CloudGroup, ConvectiveType};
pub use header::{LocationGroup, ReportTimeGroup};
pub use keyword::{Keyword, KeywordGroup};
pub use layer::{LayerForecastGroup, LayerKind};
pub use misc::{ColourCode, MiscGroup};
pub use precipitation::{PrecipitationGroup, PrecipitationKind};
pub use pressure::{PressureGroup, PressureKind, PressureTendency, PressureTendencyGroup};
pub use remarks::{
    CloudLayerType, CloudType, CloudTypesGroup, HighLayer, LightningFrequency, LightningGroup,
    LightningType, LowLayer, LowMidHighCloudGroup, MidLayer, Proximity, VicinityGroup,
    VicinityPhenomenon,
};
pub use runway::{Deposits, Extent, Runway, RunwayDesignator, RunwayStateGroup, RunwayStatus};
pub use sea::SeaSurfaceGroup;
pub use temperature::{MinMaxPeriod, MinMaxTemperatureGroup, TemperatureGroup};
pub use trend::{Probability, TrendGroup, TrendKind};
pub use visibility::{VisibilityGroup, VisibilityTrend};
pub use weather::{Descriptor, Qualifier, Weather, WeatherGroup, WeatherPhenomena};
pub use wind::WindGroup;

/// Structural section of a report a group was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPart {
    Header,
    Metar,
    Taf,
    Trend,
    Rmk,
}

impl ReportPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPart::Header => "header",
            ReportPart::Metar => "metar",
            ReportPart::Taf => "taf",
            ReportPart::Trend => "trend",
            ReportPart::Rmk => "rmk",
        }
    }

    /// Main body or trend of a report, where observation groups may appear.
    pub fn is_body(&self) -> bool {
        matches!(self, ReportPart::Metar | ReportPart::Taf | ReportPart::Trend)
    }
}

impl std::fmt::Display for ReportPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token grammar of one group kind.
pub trait GroupGrammar: Sized {
    /// Start a group from a single token, if the token belongs to this kind.
    fn parse(token: &str, part: ReportPart) -> Option<Self>;

    /// Try to extend the group with the next token.
    fn append(&mut self, _token: &str, _part: ReportPart) -> bool {
        false
    }

    /// Whether the group is meaningful as it stands. Incomplete groups left
    /// at the end of parsing are reported as unknown.
    fn is_complete(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Group {
    Keyword(KeywordGroup),
    Location(LocationGroup),
    ReportTime(ReportTimeGroup),
    Trend(TrendGroup),
    Wind(WindGroup),
    Visibility(VisibilityGroup),
    Cloud(CloudGroup),
    Weather(WeatherGroup),
    Temperature(TemperatureGroup),
    MinMaxTemperature(MinMaxTemperatureGroup),
    Pressure(PressureGroup),
    PressureTendency(PressureTendencyGroup),
    RunwayState(RunwayStateGroup),
    SeaSurface(SeaSurfaceGroup),
    Precipitation(PrecipitationGroup),
    LayerForecast(LayerForecastGroup),
    CloudTypes(CloudTypesGroup),
    LowMidHighCloud(LowMidHighCloudGroup),
    Lightning(LightningGroup),
    Vicinity(VicinityGroup),
    Misc(MiscGroup),
    Unknown,
}

impl Group {
    /// Classify a token. The first grammar that accepts it wins.
    pub fn parse(token: &str, part: ReportPart) -> Group {
        if let Some(g) = KeywordGroup::parse(token, part) {
            return Group::Keyword(g);
        }
        if let Some(g) = LocationGroup::parse(token, part) {
            return Group::Location(g);
        }
        if let Some(g) = ReportTimeGroup::parse(token, part) {
            return Group::ReportTime(g);
        }
        if let Some(g) = TrendGroup::parse(token, part) {
            return Group::Trend(g);
        }
        if let Some(g) = WindGroup::parse(token, part) {
            return Group::Wind(g);
        }
        if let Some(g) = RunwayStateGroup::parse(token, part) {
            return Group::RunwayState(g);
        }
        if let Some(g) = VisibilityGroup::parse(token, part) {
            return Group::Visibility(g);
        }
        if let Some(g) = CloudGroup::parse(token, part) {
            return Group::Cloud(g);
        }
        if let Some(g) = WeatherGroup::parse(token, part) {
            return Group::Weather(g);
        }
        if let Some(g) = TemperatureGroup::parse(token, part) {
            return Group::Temperature(g);
        }
        if let Some(g) = MinMaxTemperatureGroup::parse(token, part) {
            return Group::MinMaxTemperature(g);
        }
        if let Some(g) = PressureGroup::parse(token, part) {
            return Group::Pressure(g);
        }
        if let Some(g) = PressureTendencyGroup::parse(token, part) {
            return Group::PressureTendency(g);
        }
        if let Some(g) = SeaSurfaceGroup::parse(token, part) {
            return Group::SeaSurface(g);
        }
        if let Some(g) = PrecipitationGroup::parse(token, part) {
            return Group::Precipitation(g);
        }
        if let Some(g) = LayerForecastGroup::parse(token, part) {
            return Group::LayerForecast(g);
        }
        if let Some(g) = CloudTypesGroup::parse(token, part) {
            return Group::CloudTypes(g);
        }
        if let Some(g) = LowMidHighCloudGroup::parse(token, part) {
            return Group::LowMidHighCloud(g);
        }
        if let Some(g) = LightningGroup::parse(token, part) {
            return Group::Lightning(g);
        }
        if let Some(g) = VicinityGroup::parse(token, part) {
            return Group::Vicinity(g);
        }
        if let Some(g) = MiscGroup::parse(token, part) {
            return Group::Misc(g);
        }
        Group::Unknown
    }

    pub fn append(&mut self, token: &str, part: ReportPart) -> bool {
        match self {
            Group::Keyword(g) => g.append(token, part),
            Group::Location(g) => g.append(token, part),
            Group::ReportTime(g) => g.append(token, part),
            Group::Trend(g) => g.append(token, part),
            Group::Wind(g) => g.append(token, part),
            Group::Visibility(g) => g.append(token, part),
            Group::Cloud(g) => g.append(token, part),
            Group::Weather(g) => g.append(token, part),
            Group::Temperature(g) => g.append(token, part),
            Group::MinMaxTemperature(g) => g.append(token, part),
            Group::Pressure(g) => g.append(token, part),
            Group::PressureTendency(g) => g.append(token, part),
            Group::RunwayState(g) => g.append(token, part),
            Group::SeaSurface(g) => g.append(token, part),
            Group::Precipitation(g) => g.append(token, part),
            Group::LayerForecast(g) => g.append(token, part),
            Group::CloudTypes(g) => g.append(token, part),
            Group::LowMidHighCloud(g) => g.append(token, part),
            Group::Lightning(g) => g.append(token, part),
            Group::Vicinity(g) => g.append(token, part),
            Group::Misc(g) => g.append(token, part),
            Group::Unknown => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Group::Keyword(g) => g.is_complete(),
            Group::Location(g) => g.is_complete(),
            Group::ReportTime(g) => g.is_complete(),
            Group::Trend(g) => g.is_complete(),
            Group::Wind(g) => g.is_complete(),
            Group::Visibility(g) => g.is_complete(),
            Group::Cloud(g) => g.is_complete(),
            Group::Weather(g) => g.is_complete(),
            Group::Temperature(g) => g.is_complete(),
            Group::MinMaxTemperature(g) => g.is_complete(),
            Group::Pressure(g) => g.is_complete(),
            Group::PressureTendency(g) => g.is_complete(),
            Group::RunwayState(g) => g.is_complete(),
            Group::SeaSurface(g) => g.is_complete(),
            Group::Precipitation(g) => g.is_complete(),
            Group::LayerForecast(g) => g.is_complete(),
            Group::CloudTypes(g) => g.is_complete(),
            Group::LowMidHighCloud(g) => g.is_complete(),
            Group::Lightning(g) => g.is_complete(),
            Group::Vicinity(g) => g.is_complete(),
            Group::Misc(g) => g.is_complete(),
            Group::Unknown => true,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Group::Unknown)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Group::Keyword(_) => "keyword",
            Group::Location(_) => "location",
            Group::ReportTime(_) => "report_time",
            Group::Trend(_) => "trend",
            Group::Wind(_) => "wind",
            Group::Visibility(_) => "visibility",
            Group::Cloud(_) => "cloud",
            Group::Weather(_) => "weather",
            Group::Temperature(_) => "temperature",
            Group::MinMaxTemperature(_) => "min_max_temperature",
            Group::Pressure(_) => "pressure",
            Group::PressureTendency(_) => "pressure_tendency",
            Group::RunwayState(_) => "runway_state",
            Group::SeaSurface(_) => "sea_surface",
            Group::Precipitation(_) => "precipitation",
            Group::LayerForecast(_) => "layer_forecast",
            Group::CloudTypes(_) => "cloud_types",
            Group::LowMidHighCloud(_) => "low_mid_high_cloud",
            Group::Lightning(_) => "lightning",
            Group::Vicinity(_) => "vicinity",
            Group::Misc(_) => "misc",
            Group::Unknown => "unknown",
        }
    }
}

/// A group together with the report part it was read from and its raw tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupInfo {
    pub group: Group,
    pub part: ReportPart,
    pub raw: String,
}

/// Append direction words to a remark direction list: `N`, `NE-SE`, `OHD`,
/// `ALQDS`, or `AND` between two directions. A sector is expanded to every
/// compass point it covers, clockwise.
pub(crate) fn append_directions(
    directions: &mut Vec<crate::value::Direction>,
    token: &str,
) -> bool {
    use crate::value::{Cardinal, Direction};

    if token == "AND" {
        return !directions.is_empty();
    }
    if let Some(d) = Direction::parse_location(token) {
        directions.push(d);
        return true;
    }
    let Some((from, to)) = token.split_once('-') else {
        return false;
    };
    let (Some(from), Some(to)) = (Cardinal::from_code(from), Cardinal::from_code(to)) else {
        return false;
    };
    const ORDER: [Cardinal; 8] = [
        Cardinal::North,
        Cardinal::NorthEast,
        Cardinal::East,
        Cardinal::SouthEast,
        Cardinal::South,
        Cardinal::SouthWest,
        Cardinal::West,
        Cardinal::NorthWest,
    ];
    let (Some(start), Some(end)) = (
        ORDER.iter().position(|c| *c == from),
        ORDER.iter().position(|c| *c == to),
    ) else {
        return false;
    };
    let mut i = start;
    loop {
        directions.push(Direction::Point(ORDER[i]));
        if i == end {
            break;
        }
        i = (i + 1) % ORDER.len();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Cardinal, Direction};

    #[test]
    fn classification_depends_on_report_part() {
        assert!(matches!(Group::parse("KJFK", ReportPart::Header), Group::Location(_)));
        assert!(Group::parse("KJFK", ReportPart::Metar).is_unknown());
        assert!(matches!(Group::parse("TS", ReportPart::Metar), Group::Weather(_)));
        assert!(matches!(Group::parse("TS", ReportPart::Rmk), Group::Vicinity(_)));
    }

    #[test]
    fn common_metar_tokens() {
        let cases = [
            ("27010G20KT", "wind"),
            ("9999", "visibility"),
            ("R24/P1500N", "visibility"),
            ("R24/290195", "runway_state"),
            ("BKN030CB", "cloud"),
            ("-SHRA", "weather"),
            ("15/M02", "temperature"),
            ("Q1013", "pressure"),
            ("A2992", "pressure"),
            ("W15/S3", "sea_surface"),
            ("NOSIG", "trend"),
            ("CAVOK", "keyword"),
        ];
        for (token, kind) in cases {
            assert_eq!(Group::parse(token, ReportPart::Metar).kind_name(), kind, "token {token}");
        }
    }

    #[test]
    fn common_remark_tokens() {
        let cases = [
            ("AO2", "keyword"),
            ("SLP132", "pressure"),
            ("T01560033", "temperature"),
            ("P0012", "precipitation"),
            ("52015", "pressure_tendency"),
            ("SC6AC2", "cloud_types"),
            ("8/578", "low_mid_high_cloud"),
            ("LTGICCG", "lightning"),
            ("VIRGA", "vicinity"),
            ("401120084", "min_max_temperature"),
            ("98096", "misc"),
        ];
        for (token, kind) in cases {
            assert_eq!(Group::parse(token, ReportPart::Rmk).kind_name(), kind, "token {token}");
        }
    }

    #[test]
    fn completeness_follows_each_grammar() {
        assert!(!Group::parse("PROB30", ReportPart::Taf).is_complete());
        assert!(!Group::parse("1", ReportPart::Metar).is_complete());
        assert!(!Group::parse("FRQ", ReportPart::Rmk).is_complete());
        let complete = [
            ("METAR", ReportPart::Header),
            ("27010KT", ReportPart::Metar),
            ("BKN030", ReportPart::Metar),
            ("GRN", ReportPart::Metar),
            ("SLP132", ReportPart::Rmk),
            ("98096", ReportPart::Rmk),
        ];
        for (token, part) in complete {
            let group = Group::parse(token, part);
            assert!(!group.is_unknown(), "token {token}");
            assert!(group.is_complete(), "token {token}");
        }
        assert!(Group::Unknown.is_complete());
    }

    #[test]
    fn direction_sectors_expand_clockwise() {
        let mut dirs = Vec::new();
        assert!(append_directions(&mut dirs, "NW-NE"));
        assert_eq!(
            dirs,
            vec![
                Direction::Point(Cardinal::NorthWest),
                Direction::Point(Cardinal::North),
                Direction::Point(Cardinal::NorthEast),
            ]
        );
        assert!(append_directions(&mut dirs, "AND"));
        assert!(!append_directions(&mut dirs, "MOV"));
    }
}
