//! TAF icing (`6IhhhT`) and turbulence (`5BhhhT`) layer forecasts.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{Distance, Value};

lazy_static! {
    static ref LAYER: Regex = Regex::new(r"^([56])([0-9X])(\d{3})(\d)$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    IcingTraceOrNone,
    IcingLightMixed,
    IcingLightRimeInCloud,
    IcingLightClearInPrecipitation,
    IcingModerateMixed,
    IcingModerateRimeInCloud,
    IcingModerateClearInPrecipitation,
    IcingSevereMixed,
    IcingSevereRimeInCloud,
    IcingSevereClearInPrecipitation,
    TurbulenceNone,
    TurbulenceLight,
    TurbulenceModerateInClearAirOccasional,
    TurbulenceModerateInClearAirFrequent,
    TurbulenceModerateInCloudOccasional,
    TurbulenceModerateInCloudFrequent,
    TurbulenceSevereInClearAirOccasional,
    TurbulenceSevereInClearAirFrequent,
    TurbulenceSevereInCloudOccasional,
    TurbulenceSevereInCloudFrequent,
    TurbulenceExtreme,
}

impl LayerKind {
    fn from_codes(group: &str, code: &str) -> Option<Self> {
        use LayerKind::*;

        let kind = match (group, code) {
            ("6", "0") => IcingTraceOrNone,
            ("6", "1") => IcingLightMixed,
            ("6", "2") => IcingLightRimeInCloud,
            ("6", "3") => IcingLightClearInPrecipitation,
            ("6", "4") => IcingModerateMixed,
            ("6", "5") => IcingModerateRimeInCloud,
            ("6", "6") => IcingModerateClearInPrecipitation,
            ("6", "7") => IcingSevereMixed,
            ("6", "8") => IcingSevereRimeInCloud,
            ("6", "9") => IcingSevereClearInPrecipitation,
            ("5", "0") => TurbulenceNone,
            ("5", "1") => TurbulenceLight,
            ("5", "2") => TurbulenceModerateInClearAirOccasional,
            ("5", "3") => TurbulenceModerateInClearAirFrequent,
            ("5", "4") => TurbulenceModerateInCloudOccasional,
            ("5", "5") => TurbulenceModerateInCloudFrequent,
            ("5", "6") => TurbulenceSevereInClearAirOccasional,
            ("5", "7") => TurbulenceSevereInClearAirFrequent,
            ("5", "8") => TurbulenceSevereInCloudOccasional,
            ("5", "9") => TurbulenceSevereInCloudFrequent,
            ("5", "X") => TurbulenceExtreme,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerForecastGroup {
    pub kind: LayerKind,
    pub base: Value<Distance>,
    pub top: Value<Distance>,
}

impl GroupGrammar for LayerForecastGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !matches!(part, ReportPart::Taf | ReportPart::Trend) {
            return None;
        }
        let caps = LAYER.captures(token)?;
        let kind = LayerKind::from_codes(&caps[1], &caps[2])?;
        let base = Distance::parse_hundreds_of_feet(&caps[3]);
        let thickness_ft = caps[4].parse::<u32>().ok()? * 1000;
        let top = base.map(|b| Distance::feet(b.to_feet() + f64::from(thickness_ft)));
        Some(Self { kind, base, top })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icing_layer() {
        let g = LayerForecastGroup::parse("620304", ReportPart::Taf).unwrap();
        assert_eq!(g.kind, LayerKind::IcingLightRimeInCloud);
        assert_eq!(g.base, Value::Reported(Distance::feet(3000.0)));
        assert_eq!(g.top, Value::Reported(Distance::feet(7000.0)));
    }

    #[test]
    fn turbulence_layer() {
        let g = LayerForecastGroup::parse("5X0102", ReportPart::Trend).unwrap();
        assert_eq!(g.kind, LayerKind::TurbulenceExtreme);
        assert!(LayerForecastGroup::parse("6X0102", ReportPart::Taf).is_none());
        assert!(LayerForecastGroup::parse("620304", ReportPart::Metar).is_none());
    }
}
