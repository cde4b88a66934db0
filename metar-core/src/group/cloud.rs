use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::{Distance, Value};

lazy_static! {
    static ref LAYER: Regex =
        Regex::new(r"^(FEW|SCT|BKN|OVC|VV|///)(\d{3}|///)(CB|TCU|///)?$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudAmount {
    Few,
    Scattered,
    Broken,
    Overcast,
    /// Sky obscured; height is the vertical visibility.
    VerticalVisibility,
    NotReported,
    NoSignificantClouds,
    NoCloudsDetected,
    SkyClear,
    Clear,
}

impl CloudAmount {
    /// Amounts that form a ceiling.
    pub fn is_ceiling(&self) -> bool {
        matches!(
            self,
            CloudAmount::Broken | CloudAmount::Overcast | CloudAmount::VerticalVisibility
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvectiveType {
    Cumulonimbus,
    ToweringCumulus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloudGroup {
    pub amount: CloudAmount,
    /// Base height, or vertical visibility. Not reported for NSC, NCD, SKC, CLR.
    pub height: Value<Distance>,
    /// `None` when no convective suffix is present; `NotReported` for `///`.
    pub convective: Option<Value<ConvectiveType>>,
}

impl CloudGroup {
    fn without_layer(amount: CloudAmount) -> Self {
        Self {
            amount,
            height: Value::NotReported,
            convective: None,
        }
    }

    /// Base of a ceiling layer in feet, if this group is one.
    pub fn ceiling_feet(&self) -> Option<f64> {
        if !self.amount.is_ceiling() {
            return None;
        }
        self.height.reported().map(Distance::to_feet)
    }
}

impl GroupGrammar for CloudGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if !part.is_body() {
            return None;
        }
        let simple = match token {
            "NSC" => Some(CloudAmount::NoSignificantClouds),
            "NCD" => Some(CloudAmount::NoCloudsDetected),
            "SKC" => Some(CloudAmount::SkyClear),
            "CLR" => Some(CloudAmount::Clear),
            _ => None,
        };
        if let Some(amount) = simple {
            return Some(Self::without_layer(amount));
        }
        let caps = LAYER.captures(token)?;
        let amount = match &caps[1] {
            "FEW" => CloudAmount::Few,
            "SCT" => CloudAmount::Scattered,
            "BKN" => CloudAmount::Broken,
            "OVC" => CloudAmount::Overcast,
            "VV" => CloudAmount::VerticalVisibility,
            _ => CloudAmount::NotReported,
        };
        let convective = caps.get(3).map(|m| match m.as_str() {
            "CB" => Value::Reported(ConvectiveType::Cumulonimbus),
            "TCU" => Value::Reported(ConvectiveType::ToweringCumulus),
            _ => Value::NotReported,
        });
        Some(Self {
            amount,
            height: Distance::parse_hundreds_of_feet(&caps[2]),
            convective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_with_convective_cloud() {
        let g = CloudGroup::parse("BKN030CB", ReportPart::Metar).unwrap();
        assert_eq!(g.amount, CloudAmount::Broken);
        assert_eq!(g.height, Value::Reported(Distance::feet(3000.0)));
        assert_eq!(g.convective, Some(Value::Reported(ConvectiveType::Cumulonimbus)));
        assert_eq!(g.ceiling_feet(), Some(3000.0));
    }

    #[test]
    fn automated_station_slashes() {
        let g = CloudGroup::parse("//////TCU", ReportPart::Metar).unwrap();
        assert_eq!(g.amount, CloudAmount::NotReported);
        assert_eq!(g.height, Value::NotReported);
        let g = CloudGroup::parse("OVC005///", ReportPart::Metar).unwrap();
        assert_eq!(g.convective, Some(Value::NotReported));
    }

    #[test]
    fn vertical_visibility_and_clear_sky() {
        let g = CloudGroup::parse("VV002", ReportPart::Taf).unwrap();
        assert_eq!(g.ceiling_feet(), Some(200.0));
        let g = CloudGroup::parse("NSC", ReportPart::Trend).unwrap();
        assert_eq!(g.amount, CloudAmount::NoSignificantClouds);
        assert_eq!(g.ceiling_feet(), None);
        assert!(CloudGroup::parse("FEW020", ReportPart::Rmk).is_none());
    }
}
