//! Groups found only in remarks: cloud types with oktas, WMO low/mid/high
//! cloud codes, lightning, and phenomena observed around the station.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart, append_directions};
use crate::value::{Cardinal, Direction, Value};

lazy_static! {
    static ref CLOUD_TYPES: Regex =
        Regex::new(r"^(?:(?:CB|TCU|CU|CF|SC|NS|ST|SF|AS|ACC|AC|CI|CS|CC)\d)+$")
            .expect("valid regex");
    static ref CLOUD_TYPE: Regex =
        Regex::new(r"(CB|TCU|CU|CF|SC|NS|ST|SF|AS|ACC|AC|CI|CS|CC)(\d)").expect("valid regex");
    static ref LOW_MID_HIGH: Regex =
        Regex::new(r"^8/([0-9/])([0-9/])([0-9/])$").expect("valid regex");
    static ref LIGHTNING: Regex = Regex::new(r"^LTG((?:IC|CC|CG|CA)*)$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudType {
    Cumulonimbus,
    ToweringCumulus,
    Cumulus,
    CumulusFractus,
    Stratocumulus,
    Nimbostratus,
    Stratus,
    StratusFractus,
    Altostratus,
    Altocumulus,
    AltocumulusCastellanus,
    Cirrus,
    Cirrostratus,
    Cirrocumulus,
}

impl CloudType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CB" => Some(CloudType::Cumulonimbus),
            "TCU" => Some(CloudType::ToweringCumulus),
            "CU" => Some(CloudType::Cumulus),
            "CF" => Some(CloudType::CumulusFractus),
            "SC" => Some(CloudType::Stratocumulus),
            "NS" => Some(CloudType::Nimbostratus),
            "ST" => Some(CloudType::Stratus),
            "SF" => Some(CloudType::StratusFractus),
            "AS" => Some(CloudType::Altostratus),
            "AC" => Some(CloudType::Altocumulus),
            "ACC" => Some(CloudType::AltocumulusCastellanus),
            "CI" => Some(CloudType::Cirrus),
            "CS" => Some(CloudType::Cirrostratus),
            "CC" => Some(CloudType::Cirrocumulus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CloudLayerType {
    pub cloud_type: CloudType,
    pub oktas: u8,
}

/// Canadian cloud type remark, e.g. `SC6AC2`: layers bottom to top with
/// their sky cover in oktas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudTypesGroup {
    pub layers: Vec<CloudLayerType>,
}

impl GroupGrammar for CloudTypesGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Rmk || !CLOUD_TYPES.is_match(token) {
            return None;
        }
        let layers = CLOUD_TYPE
            .captures_iter(token)
            .map(|caps| {
                Some(CloudLayerType {
                    cloud_type: CloudType::from_code(&caps[1])?,
                    oktas: caps[2].parse().ok()?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { layers })
    }
}

/// Low cloud type, WMO code table 0513.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LowLayer {
    None,
    CuHumilisOrFractus,
    CuMediocrisOrCongestus,
    CbCalvus,
    ScCumulogenitus,
    ScNonCumulogenitus,
    StNebulosusOrFractus,
    StOrCuFractusPannus,
    CuAndScAtDifferentLevels,
    CbCapillatus,
}

/// Middle cloud type, WMO code table 0515.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MidLayer {
    None,
    AsTranslucidus,
    AsOpacusOrNs,
    AcTranslucidusSingleLevel,
    AcTranslucidusPatchesChanging,
    AcTranslucidusBandsThickening,
    AcCumulogenitus,
    AcDoubleLayerOrWithAsNs,
    AcCastellanusOrFloccus,
    AcChaoticSky,
}

/// High cloud type, WMO code table 0509.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighLayer {
    None,
    CiFibratusOrUncinus,
    CiSpissatus,
    CiSpissatusCumulonimbogenitus,
    CiUncinusOrFibratusIncreasing,
    CiCsBelow45Degrees,
    CiCsAbove45Degrees,
    CsCoveringSky,
    CsNotCoveringSky,
    Cc,
}

fn layer_code<T>(c: &str, table: [T; 10]) -> Value<T> {
    if c == "/" {
        return Value::NotReported;
    }
    match c.parse::<usize>() {
        Ok(i) if i < 10 => table
            .into_iter()
            .nth(i)
            .map_or(Value::Unrecognized, Value::Reported),
        _ => Value::Unrecognized,
    }
}

/// `8/LMH` remark: predominant cloud type in the low, middle and high layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LowMidHighCloudGroup {
    pub low: Value<LowLayer>,
    pub mid: Value<MidLayer>,
    pub high: Value<HighLayer>,
}

impl GroupGrammar for LowMidHighCloudGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Rmk {
            return None;
        }
        let caps = LOW_MID_HIGH.captures(token)?;
        use HighLayer as H;
        use LowLayer as L;
        use MidLayer as M;
        Some(Self {
            low: layer_code(
                &caps[1],
                [
                    L::None,
                    L::CuHumilisOrFractus,
                    L::CuMediocrisOrCongestus,
                    L::CbCalvus,
                    L::ScCumulogenitus,
                    L::ScNonCumulogenitus,
                    L::StNebulosusOrFractus,
                    L::StOrCuFractusPannus,
                    L::CuAndScAtDifferentLevels,
                    L::CbCapillatus,
                ],
            ),
            mid: layer_code(
                &caps[2],
                [
                    M::None,
                    M::AsTranslucidus,
                    M::AsOpacusOrNs,
                    M::AcTranslucidusSingleLevel,
                    M::AcTranslucidusPatchesChanging,
                    M::AcTranslucidusBandsThickening,
                    M::AcCumulogenitus,
                    M::AcDoubleLayerOrWithAsNs,
                    M::AcCastellanusOrFloccus,
                    M::AcChaoticSky,
                ],
            ),
            high: layer_code(
                &caps[3],
                [
                    H::None,
                    H::CiFibratusOrUncinus,
                    H::CiSpissatus,
                    H::CiSpissatusCumulonimbogenitus,
                    H::CiUncinusOrFibratusIncreasing,
                    H::CiCsBelow45Degrees,
                    H::CiCsAbove45Degrees,
                    H::CsCoveringSky,
                    H::CsNotCoveringSky,
                    H::Cc,
                ],
            ),
        })
    }
}

/// How far away a remark phenomenon is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Proximity {
    /// `DSNT`: 10 to 30 statute miles.
    Distant,
    /// `VC`: 5 to 10 statute miles.
    Vicinity,
}

impl Proximity {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "DSNT" => Some(Proximity::Distant),
            "VC" => Some(Proximity::Vicinity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightningFrequency {
    Occasional,
    Frequent,
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightningType {
    InCloud,
    CloudCloud,
    CloudGround,
    CloudAir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightningGroup {
    pub frequency: Option<LightningFrequency>,
    pub types: Vec<LightningType>,
    pub proximity: Option<Proximity>,
    pub directions: Vec<Direction>,
    /// A frequency word was read and `LTG` has not followed yet.
    #[serde(skip)]
    awaiting_ltg: bool,
}

impl LightningGroup {
    fn parse_types(token: &str) -> Option<Vec<LightningType>> {
        let caps = LIGHTNING.captures(token)?;
        let types = caps[1]
            .as_bytes()
            .chunks(2)
            .filter_map(|c| match c {
                b"IC" => Some(LightningType::InCloud),
                b"CC" => Some(LightningType::CloudCloud),
                b"CG" => Some(LightningType::CloudGround),
                b"CA" => Some(LightningType::CloudAir),
                _ => None,
            })
            .collect();
        Some(types)
    }
}

impl GroupGrammar for LightningGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Rmk {
            return None;
        }
        let frequency = match token {
            "OCNL" => Some(LightningFrequency::Occasional),
            "FRQ" => Some(LightningFrequency::Frequent),
            "CONS" => Some(LightningFrequency::Constant),
            _ => None,
        };
        let mut g = Self {
            frequency,
            types: Vec::new(),
            proximity: None,
            directions: Vec::new(),
            awaiting_ltg: frequency.is_some(),
        };
        if g.awaiting_ltg {
            return Some(g);
        }
        g.types = Self::parse_types(token)?;
        Some(g)
    }

    fn append(&mut self, token: &str, part: ReportPart) -> bool {
        if part != ReportPart::Rmk {
            return false;
        }
        if self.awaiting_ltg {
            return match Self::parse_types(token) {
                Some(types) => {
                    self.types = types;
                    self.awaiting_ltg = false;
                    true
                }
                None => false,
            };
        }
        if self.proximity.is_none() && self.directions.is_empty() {
            if let Some(p) = Proximity::from_code(token) {
                self.proximity = Some(p);
                return true;
            }
        }
        append_directions(&mut self.directions, token)
    }

    fn is_complete(&self) -> bool {
        !self.awaiting_ltg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VicinityPhenomenon {
    Thunderstorm,
    Cumulonimbus,
    CumulonimbusMammatus,
    ToweringCumulus,
    AltocumulusCastellanus,
    StandingLenticular,
    Virga,
    Fog,
}

impl VicinityPhenomenon {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "TS" => Some(VicinityPhenomenon::Thunderstorm),
            "CB" => Some(VicinityPhenomenon::Cumulonimbus),
            "CBMAM" => Some(VicinityPhenomenon::CumulonimbusMammatus),
            "TCU" => Some(VicinityPhenomenon::ToweringCumulus),
            "ACC" => Some(VicinityPhenomenon::AltocumulusCastellanus),
            "ACSL" | "SCSL" | "CCSL" => Some(VicinityPhenomenon::StandingLenticular),
            "VIRGA" => Some(VicinityPhenomenon::Virga),
            "FG" => Some(VicinityPhenomenon::Fog),
            _ => None,
        }
    }
}

/// Phenomenon observed around the station: `CB DSNT NW MOV E`, `VIRGA SW`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VicinityGroup {
    pub phenomenon: VicinityPhenomenon,
    pub proximity: Option<Proximity>,
    pub directions: Vec<Direction>,
    pub moving: Option<Cardinal>,
    /// `MOV` was read and its direction has not followed yet.
    #[serde(skip)]
    awaiting_movement: bool,
}

impl GroupGrammar for VicinityGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part != ReportPart::Rmk {
            return None;
        }
        Some(Self {
            phenomenon: VicinityPhenomenon::from_code(token)?,
            proximity: None,
            directions: Vec::new(),
            moving: None,
            awaiting_movement: false,
        })
    }

    fn append(&mut self, token: &str, part: ReportPart) -> bool {
        if part != ReportPart::Rmk || self.moving.is_some() {
            return false;
        }
        if self.awaiting_movement {
            return match Cardinal::from_code(token) {
                Some(c) => {
                    self.moving = Some(c);
                    self.awaiting_movement = false;
                    true
                }
                None => false,
            };
        }
        if token == "MOV" {
            self.awaiting_movement = true;
            return true;
        }
        if self.proximity.is_none() && self.directions.is_empty() {
            if let Some(p) = Proximity::from_code(token) {
                self.proximity = Some(p);
                return true;
            }
        }
        append_directions(&mut self.directions, token)
    }

    fn is_complete(&self) -> bool {
        !self.awaiting_movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_types_with_oktas() {
        let g = CloudTypesGroup::parse("SC6ACC2", ReportPart::Rmk).unwrap();
        assert_eq!(
            g.layers,
            vec![
                CloudLayerType {
                    cloud_type: CloudType::Stratocumulus,
                    oktas: 6,
                },
                CloudLayerType {
                    cloud_type: CloudType::AltocumulusCastellanus,
                    oktas: 2,
                },
            ]
        );
        assert!(CloudTypesGroup::parse("SC6XX2", ReportPart::Rmk).is_none());
    }

    #[test]
    fn low_mid_high_codes() {
        let g = LowMidHighCloudGroup::parse("8/57/", ReportPart::Rmk).unwrap();
        assert_eq!(g.low, Value::Reported(LowLayer::ScNonCumulogenitus));
        assert_eq!(g.mid, Value::Reported(MidLayer::AcDoubleLayerOrWithAsNs));
        assert_eq!(g.high, Value::NotReported);

        let copy = g;
        assert_eq!(
            copy,
            LowMidHighCloudGroup {
                low: Value::Reported(LowLayer::ScNonCumulogenitus),
                mid: Value::Reported(MidLayer::AcDoubleLayerOrWithAsNs),
                high: Value::NotReported,
            }
        );
    }

    #[test]
    fn frequent_lightning_with_sector() {
        let mut g = LightningGroup::parse("FRQ", ReportPart::Rmk).unwrap();
        assert!(!g.is_complete());
        assert!(g.append("LTGICCG", ReportPart::Rmk));
        assert!(g.append("DSNT", ReportPart::Rmk));
        assert!(g.append("NE-SE", ReportPart::Rmk));
        assert!(!g.append("SLP132", ReportPart::Rmk));
        assert_eq!(g.types, vec![LightningType::InCloud, LightningType::CloudGround]);
        assert_eq!(g.proximity, Some(Proximity::Distant));
        assert_eq!(g.directions.len(), 3);
        assert!(g.is_complete());
    }

    #[test]
    fn frequency_without_lightning_is_incomplete() {
        let mut g = LightningGroup::parse("OCNL", ReportPart::Rmk).unwrap();
        assert!(!g.append("RAIN", ReportPart::Rmk));
        assert!(!g.is_complete());
    }

    #[test]
    fn cumulonimbus_moving() {
        let mut g = VicinityGroup::parse("CB", ReportPart::Rmk).unwrap();
        assert!(g.append("DSNT", ReportPart::Rmk));
        assert!(g.append("W", ReportPart::Rmk));
        assert!(g.append("MOV", ReportPart::Rmk));
        assert!(!g.is_complete());
        assert!(g.append("E", ReportPart::Rmk));
        assert_eq!(g.moving, Some(Cardinal::East));
        assert!(!g.append("N", ReportPart::Rmk));
    }
}
