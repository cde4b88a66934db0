//! Value and enumeration formatters.
//!
//! Every function here is total: each enumeration member has its own arm and
//! unavailable values render as fixed placeholders.

use crate::config::{Settings, UnitSystem};
use crate::group::{
    CloudAmount, CloudType, ColourCode, ConvectiveType, Deposits, Descriptor, Extent, HighLayer,
    LayerKind, LightningFrequency, LightningType, LowLayer, MidLayer, PressureTendency, Probability,
    Proximity, Qualifier, Runway, RunwayDesignator, VicinityPhenomenon, VisibilityTrend, Weather,
    WeatherPhenomena,
};
use crate::value::{
    Bound, BrakingAction, Cardinal, Direction, Distance, FEET_PER_METER, Precipitation, Pressure,
    SeaState, Speed, SpeedUnit, SurfaceFriction, Temperature, Value, WaveHeight,
};

pub const NOT_REPORTED: &str = "not reported";
pub const NOT_RECOGNISED: &str = "not recognised";

/// Metric visibility at or above this is given in whole kilometres.
const KILOMETRE_VISIBILITY_THRESHOLD: f64 = 5000.0;

/// Imperial visibility at or above this is given in whole statute miles.
const WHOLE_MILE_THRESHOLD: f64 = 3.0;

/// Format a reported value with `f`, or the placeholder for its state.
pub fn value<T>(v: &Value<T>, f: impl FnOnce(&T) -> String) -> String {
    match v {
        Value::Reported(x) => f(x),
        Value::NotReported => NOT_REPORTED.to_string(),
        Value::Unrecognized => NOT_RECOGNISED.to_string(),
    }
}

/// One decimal, with a trailing `.0` dropped: `15`, `-2.3`.
pub fn one_decimal(x: f64) -> String {
    let s = format!("{x:.1}");
    let s = s.strip_suffix(".0").unwrap_or(&s);
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn bound(b: Option<Bound>) -> &'static str {
    match b {
        Some(Bound::LessThan) => "less than ",
        Some(Bound::MoreThan) => "more than ",
        None => "",
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Statute miles with common fractions: `1 1/2`, `3/4`, `10`.
pub fn miles_with_fraction(miles: f64) -> String {
    if miles >= WHOLE_MILE_THRESHOLD {
        return format!("{}", miles.round() as i64);
    }
    const DENOMINATOR: u32 = 16;
    let parts = (miles.max(0.0) * f64::from(DENOMINATOR)).round() as u32;
    let (whole, rest) = (parts / DENOMINATOR, parts % DENOMINATOR);
    if rest == 0 {
        return whole.to_string();
    }
    let d = gcd(rest, DENOMINATOR);
    let fraction = format!("{}/{}", rest / d, DENOMINATOR / d);
    if whole == 0 {
        fraction
    } else {
        format!("{whole} {fraction}")
    }
}

/// Prevailing or directional visibility.
pub fn visibility(d: &Distance, settings: &Settings) -> String {
    let text = match settings.units {
        UnitSystem::Metric => {
            let m = d.to_meters();
            if m >= KILOMETRE_VISIBILITY_THRESHOLD {
                format!("{} km", (m / 1000.0).round() as i64)
            } else {
                format!("{} m", m.round() as i64)
            }
        }
        UnitSystem::Imperial => format!("{} SM", miles_with_fraction(d.to_statute_miles())),
    };
    format!("{}{text}", bound(d.bound))
}

/// Runway visual range: metres, or feet in imperial units.
pub fn runway_visual_range(d: &Distance, settings: &Settings) -> String {
    let text = match settings.units {
        UnitSystem::Metric => format!("{} m", d.to_meters().round() as i64),
        UnitSystem::Imperial => format!("{} ft", d.to_feet().round() as i64),
    };
    format!("{}{text}", bound(d.bound))
}

/// Heights are always given in feet.
pub fn height(d: &Distance) -> String {
    format!("{}{} ft", bound(d.bound), d.to_feet().round() as i64)
}

pub fn meters_to_feet(m: f64) -> f64 {
    m * FEET_PER_METER
}

/// Speeds are always given in knots.
pub fn speed(s: &Speed) -> String {
    match s.unit {
        SpeedUnit::Knots => format!("{} kt", s.value),
        _ => format!("{} kt", s.to_knots().round() as i64),
    }
}

pub fn pressure(p: &Pressure, settings: &Settings) -> String {
    match settings.units {
        UnitSystem::Metric => format!("{} hPa", p.to_hpa().round() as i64),
        UnitSystem::Imperial => format!("{:.2} inHg", p.to_inhg()),
    }
}

pub fn temperature(t: &Temperature, settings: &Settings) -> String {
    match settings.units {
        UnitSystem::Metric => format!("{} °C", one_decimal(t.celsius)),
        UnitSystem::Imperial => format!("{} °F", one_decimal(t.to_fahrenheit())),
    }
}

pub fn precipitation(p: &Precipitation, settings: &Settings) -> String {
    let text = match settings.units {
        UnitSystem::Metric => format!("{} mm", one_decimal(p.to_millimeters())),
        UnitSystem::Imperial => format!("{:.2} in", p.to_inches()),
    };
    format!("{}{text}", bound(p.bound))
}

pub fn cardinal(c: Cardinal) -> &'static str {
    match c {
        Cardinal::North => "north",
        Cardinal::NorthEast => "northeast",
        Cardinal::East => "east",
        Cardinal::SouthEast => "southeast",
        Cardinal::South => "south",
        Cardinal::SouthWest => "southwest",
        Cardinal::West => "west",
        Cardinal::NorthWest => "northwest",
    }
}

pub fn direction(d: &Direction, settings: &Settings) -> String {
    match d {
        Direction::Degrees(deg) if settings.true_cardinal_directions => {
            Cardinal::from_degrees(*deg).as_str().to_string()
        }
        Direction::Degrees(deg) => format!("{deg}°"),
        Direction::Point(c) => c.as_str().to_string(),
        Direction::Variable => "variable".to_string(),
        Direction::Overhead => "overhead".to_string(),
        Direction::AllQuadrants => "all quadrants".to_string(),
    }
}

/// A list of remark directions: `N, NE and E`.
pub fn directions(list: &[Direction], settings: &Settings) -> String {
    let names: Vec<String> = list.iter().map(|d| direction(d, settings)).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

pub fn sea_state(s: SeaState) -> &'static str {
    match s {
        SeaState::CalmGlassy => "calm (glassy)",
        SeaState::CalmRippled => "calm (rippled)",
        SeaState::Smooth => "smooth",
        SeaState::Slight => "slight",
        SeaState::Moderate => "moderate",
        SeaState::Rough => "rough",
        SeaState::VeryRough => "very rough",
        SeaState::High => "high",
        SeaState::VeryHigh => "very high",
        SeaState::Phenomenal => "phenomenal",
    }
}

pub fn wave_height(w: &WaveHeight, settings: &Settings) -> String {
    let metres = |m: f64| match settings.units {
        UnitSystem::Metric => format!("{} m", one_decimal(m)),
        UnitSystem::Imperial => format!("{} ft", meters_to_feet(m).round() as i64),
    };
    match w {
        WaveHeight::Height { meters } => metres(*meters),
        WaveHeight::State(state) => match state.max_wave_height() {
            Some(max) => format!("{} sea, waves up to {}", sea_state(*state), metres(max)),
            None => format!("{} sea, waves higher than {}", sea_state(*state), metres(14.0)),
        },
    }
}

pub fn braking_action(b: BrakingAction) -> &'static str {
    match b {
        BrakingAction::Poor => "poor",
        BrakingAction::MediumPoor => "medium/poor",
        BrakingAction::Medium => "medium",
        BrakingAction::MediumGood => "medium/good",
        BrakingAction::Good => "good",
    }
}

pub fn surface_friction(f: &SurfaceFriction) -> String {
    match f {
        SurfaceFriction::Coefficient(c) => format!("friction coefficient {c:.2}"),
        SurfaceFriction::BrakingAction(b) => format!("braking action {}", braking_action(*b)),
        SurfaceFriction::Unreliable => "braking action unreliable or not measurable".to_string(),
    }
}

pub fn runway(r: &Runway) -> String {
    if r.is_all_runways() {
        return "all runways".to_string();
    }
    if r.is_repetition() {
        return "same runway as the previous report".to_string();
    }
    let designator = match r.designator {
        Some(RunwayDesignator::Left) => " left",
        Some(RunwayDesignator::Center) => " center",
        Some(RunwayDesignator::Right) => " right",
        None => "",
    };
    format!("runway {:02}{designator}", r.number)
}

pub fn deposits(d: Deposits) -> &'static str {
    match d {
        Deposits::ClearAndDry => "clear and dry",
        Deposits::Damp => "damp",
        Deposits::WetAndWaterPatches => "wet or water patches",
        Deposits::RimeAndFrostCovered => "rime or frost covered",
        Deposits::DrySnow => "dry snow",
        Deposits::WetSnow => "wet snow",
        Deposits::Slush => "slush",
        Deposits::Ice => "ice",
        Deposits::CompactedOrRolledSnow => "compacted or rolled snow",
        Deposits::FrozenRutsOrRidges => "frozen ruts or ridges",
    }
}

pub fn extent(e: Extent) -> &'static str {
    match e {
        Extent::None => "none of the runway",
        Extent::UpTo10Percent => "up to 10% of the runway",
        Extent::From11To25Percent => "11% to 25% of the runway",
        Extent::From26To50Percent => "26% to 50% of the runway",
        Extent::From51To100Percent => "51% to 100% of the runway",
    }
}

pub fn cloud_amount(a: CloudAmount) -> &'static str {
    match a {
        CloudAmount::Few => "Few",
        CloudAmount::Scattered => "Scattered",
        CloudAmount::Broken => "Broken",
        CloudAmount::Overcast => "Overcast",
        CloudAmount::VerticalVisibility => "Sky obscured",
        CloudAmount::NotReported => "Cloud cover not reported",
        CloudAmount::NoSignificantClouds => "No significant clouds",
        CloudAmount::NoCloudsDetected => "No clouds detected",
        CloudAmount::SkyClear => "Sky clear",
        CloudAmount::Clear => "Clear, no clouds below 12000 ft",
    }
}

pub fn convective_type(c: ConvectiveType) -> &'static str {
    match c {
        ConvectiveType::Cumulonimbus => "Cumulonimbus",
        ConvectiveType::ToweringCumulus => "Towering cumulus",
    }
}

pub fn cloud_type(c: CloudType) -> &'static str {
    match c {
        CloudType::Cumulonimbus => "cumulonimbus",
        CloudType::ToweringCumulus => "towering cumulus",
        CloudType::Cumulus => "cumulus",
        CloudType::CumulusFractus => "cumulus fractus",
        CloudType::Stratocumulus => "stratocumulus",
        CloudType::Nimbostratus => "nimbostratus",
        CloudType::Stratus => "stratus",
        CloudType::StratusFractus => "stratus fractus",
        CloudType::Altostratus => "altostratus",
        CloudType::Altocumulus => "altocumulus",
        CloudType::AltocumulusCastellanus => "altocumulus castellanus",
        CloudType::Cirrus => "cirrus",
        CloudType::Cirrostratus => "cirrostratus",
        CloudType::Cirrocumulus => "cirrocumulus",
    }
}

pub fn low_layer(l: LowLayer) -> &'static str {
    match l {
        LowLayer::None => "no low layer clouds",
        LowLayer::CuHumilisOrFractus => "cumulus humilis or fractus",
        LowLayer::CuMediocrisOrCongestus => "cumulus of moderate or strong vertical extent",
        LowLayer::CbCalvus => "cumulonimbus calvus",
        LowLayer::ScCumulogenitus => "stratocumulus formed by spreading of cumulus",
        LowLayer::ScNonCumulogenitus => "stratocumulus not formed from cumulus",
        LowLayer::StNebulosusOrFractus => "stratus nebulosus or fractus",
        LowLayer::StOrCuFractusPannus => "stratus or cumulus fractus of bad weather",
        LowLayer::CuAndScAtDifferentLevels => "cumulus and stratocumulus at different levels",
        LowLayer::CbCapillatus => "cumulonimbus capillatus",
    }
}

pub fn mid_layer(m: MidLayer) -> &'static str {
    match m {
        MidLayer::None => "no middle layer clouds",
        MidLayer::AsTranslucidus => "altostratus translucidus",
        MidLayer::AsOpacusOrNs => "altostratus opacus or nimbostratus",
        MidLayer::AcTranslucidusSingleLevel => "altocumulus translucidus at a single level",
        MidLayer::AcTranslucidusPatchesChanging => {
            "patches of altocumulus translucidus, continually changing"
        }
        MidLayer::AcTranslucidusBandsThickening => {
            "altocumulus translucidus in bands, progressively invading the sky"
        }
        MidLayer::AcCumulogenitus => "altocumulus formed by spreading of cumulus",
        MidLayer::AcDoubleLayerOrWithAsNs => {
            "altocumulus in two layers, or with altostratus or nimbostratus"
        }
        MidLayer::AcCastellanusOrFloccus => "altocumulus castellanus or floccus",
        MidLayer::AcChaoticSky => "altocumulus of a chaotic sky",
    }
}

pub fn high_layer(h: HighLayer) -> &'static str {
    match h {
        HighLayer::None => "no high layer clouds",
        HighLayer::CiFibratusOrUncinus => "cirrus fibratus or uncinus",
        HighLayer::CiSpissatus => "dense cirrus",
        HighLayer::CiSpissatusCumulonimbogenitus => "cirrus from the remains of a cumulonimbus",
        HighLayer::CiUncinusOrFibratusIncreasing => {
            "cirrus uncinus or fibratus, progressively invading the sky"
        }
        HighLayer::CiCsBelow45Degrees => "cirrus and cirrostratus, below 45° above the horizon",
        HighLayer::CiCsAbove45Degrees => "cirrus and cirrostratus, above 45° above the horizon",
        HighLayer::CsCoveringSky => "cirrostratus covering the whole sky",
        HighLayer::CsNotCoveringSky => "cirrostratus not covering the whole sky",
        HighLayer::Cc => "cirrocumulus",
    }
}

pub fn qualifier(q: Qualifier) -> &'static str {
    match q {
        Qualifier::None => "",
        Qualifier::Light => "light",
        Qualifier::Heavy => "heavy",
        Qualifier::Vicinity => "in the vicinity",
        Qualifier::Recent => "recent",
    }
}

pub fn descriptor(d: Descriptor) -> &'static str {
    match d {
        Descriptor::None => "",
        Descriptor::Shallow => "shallow",
        Descriptor::Partial => "partial",
        Descriptor::Patches => "patches of",
        Descriptor::LowDrifting => "low drifting",
        Descriptor::Blowing => "blowing",
        Descriptor::Showers => "showers of",
        Descriptor::Thunderstorm => "thunderstorm with",
        Descriptor::Freezing => "freezing",
    }
}

pub fn weather(w: Weather) -> &'static str {
    match w {
        Weather::Drizzle => "drizzle",
        Weather::Rain => "rain",
        Weather::Snow => "snow",
        Weather::SnowGrains => "snow grains",
        Weather::IceCrystals => "ice crystals",
        Weather::IcePellets => "ice pellets",
        Weather::Hail => "hail",
        Weather::SmallHail => "small hail or snow pellets",
        Weather::UnknownPrecipitation => "unknown precipitation",
        Weather::Mist => "mist",
        Weather::Fog => "fog",
        Weather::Smoke => "smoke",
        Weather::VolcanicAsh => "volcanic ash",
        Weather::Dust => "widespread dust",
        Weather::Sand => "sand",
        Weather::Haze => "haze",
        Weather::Spray => "spray",
        Weather::DustWhirls => "dust or sand whirls",
        Weather::Squalls => "squalls",
        Weather::FunnelCloud => "funnel cloud",
        Weather::Sandstorm => "sandstorm",
        Weather::Duststorm => "duststorm",
    }
}

/// Weather phenomena in reading order: `light showers of rain`,
/// `heavy thunderstorm with rain and hail`, `fog in the vicinity`.
pub fn weather_phenomena(wp: &WeatherPhenomena) -> String {
    if wp.qualifier == Qualifier::Heavy && wp.weather == [Weather::FunnelCloud] {
        return "tornado or waterspout".to_string();
    }
    let names: Vec<&str> = wp.weather.iter().map(|w| weather(*w)).collect();
    let phenomena = match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    };
    let descriptor = match (wp.descriptor, phenomena.is_empty()) {
        (Descriptor::Showers, true) => "showers",
        (Descriptor::Thunderstorm, true) => "thunderstorm",
        (d, _) => descriptor(d),
    };
    let mut words: Vec<&str> = Vec::new();
    if matches!(wp.qualifier, Qualifier::Light | Qualifier::Heavy | Qualifier::Recent) {
        words.push(qualifier(wp.qualifier));
    }
    words.extend(
        [descriptor, phenomena.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty()),
    );
    if wp.qualifier == Qualifier::Vicinity {
        words.push(qualifier(wp.qualifier));
    }
    words.join(" ")
}

pub fn layer_kind(k: LayerKind) -> &'static str {
    match k {
        LayerKind::IcingTraceOrNone => "trace icing or no icing",
        LayerKind::IcingLightMixed => "light mixed icing",
        LayerKind::IcingLightRimeInCloud => "light rime icing in cloud",
        LayerKind::IcingLightClearInPrecipitation => "light clear icing in precipitation",
        LayerKind::IcingModerateMixed => "moderate mixed icing",
        LayerKind::IcingModerateRimeInCloud => "moderate rime icing in cloud",
        LayerKind::IcingModerateClearInPrecipitation => "moderate clear icing in precipitation",
        LayerKind::IcingSevereMixed => "severe mixed icing",
        LayerKind::IcingSevereRimeInCloud => "severe rime icing in cloud",
        LayerKind::IcingSevereClearInPrecipitation => "severe clear icing in precipitation",
        LayerKind::TurbulenceNone => "no turbulence",
        LayerKind::TurbulenceLight => "light turbulence",
        LayerKind::TurbulenceModerateInClearAirOccasional => {
            "occasional moderate turbulence in clear air"
        }
        LayerKind::TurbulenceModerateInClearAirFrequent => {
            "frequent moderate turbulence in clear air"
        }
        LayerKind::TurbulenceModerateInCloudOccasional => "occasional moderate turbulence in cloud",
        LayerKind::TurbulenceModerateInCloudFrequent => "frequent moderate turbulence in cloud",
        LayerKind::TurbulenceSevereInClearAirOccasional => {
            "occasional severe turbulence in clear air"
        }
        LayerKind::TurbulenceSevereInClearAirFrequent => "frequent severe turbulence in clear air",
        LayerKind::TurbulenceSevereInCloudOccasional => "occasional severe turbulence in cloud",
        LayerKind::TurbulenceSevereInCloudFrequent => "frequent severe turbulence in cloud",
        LayerKind::TurbulenceExtreme => "extreme turbulence",
    }
}

pub fn pressure_tendency(t: PressureTendency) -> &'static str {
    match t {
        PressureTendency::IncreasingThenDecreasing => "increasing, then decreasing",
        PressureTendency::IncreasingThenSteady => "increasing, then steady",
        PressureTendency::IncreasingSteadily => "increasing steadily or unsteadily",
        PressureTendency::DecreasingOrSteadyThenIncreasing => {
            "decreasing or steady, then increasing"
        }
        PressureTendency::Steady => "steady",
        PressureTendency::DecreasingThenIncreasing => "decreasing, then increasing",
        PressureTendency::DecreasingThenSteady => "decreasing, then steady",
        PressureTendency::DecreasingSteadily => "decreasing steadily or unsteadily",
        PressureTendency::SteadyOrIncreasingThenDecreasing => {
            "steady or increasing, then decreasing"
        }
        PressureTendency::RisingRapidly => "rising rapidly",
        PressureTendency::FallingRapidly => "falling rapidly",
    }
}

pub fn probability(p: Probability) -> String {
    format!("probability {}%", p.percent())
}

pub fn visibility_trend(t: VisibilityTrend) -> &'static str {
    match t {
        VisibilityTrend::Upward => "increasing",
        VisibilityTrend::Downward => "decreasing",
        VisibilityTrend::NoChange => "not changing",
    }
}

pub fn colour_code(c: ColourCode) -> &'static str {
    match c {
        ColourCode::Blue => "BLUE",
        ColourCode::White => "WHITE",
        ColourCode::Green => "GREEN",
        ColourCode::Yellow1 => "YELLOW 1",
        ColourCode::Yellow2 => "YELLOW 2",
        ColourCode::Amber => "AMBER",
        ColourCode::Red => "RED",
    }
}

pub fn lightning_frequency(f: LightningFrequency) -> &'static str {
    match f {
        LightningFrequency::Occasional => "occasional",
        LightningFrequency::Frequent => "frequent",
        LightningFrequency::Constant => "continuous",
    }
}

pub fn lightning_type(t: LightningType) -> &'static str {
    match t {
        LightningType::InCloud => "in-cloud",
        LightningType::CloudCloud => "cloud-to-cloud",
        LightningType::CloudGround => "cloud-to-ground",
        LightningType::CloudAir => "cloud-to-air",
    }
}

pub fn proximity(p: Proximity) -> &'static str {
    match p {
        Proximity::Distant => "distant (10 to 30 miles)",
        Proximity::Vicinity => "in the vicinity (5 to 10 miles)",
    }
}

pub fn vicinity_phenomenon(v: VicinityPhenomenon) -> &'static str {
    match v {
        VicinityPhenomenon::Thunderstorm => "Thunderstorm",
        VicinityPhenomenon::Cumulonimbus => "Cumulonimbus",
        VicinityPhenomenon::CumulonimbusMammatus => "Cumulonimbus mammatus",
        VicinityPhenomenon::ToweringCumulus => "Towering cumulus",
        VicinityPhenomenon::AltocumulusCastellanus => "Altocumulus castellanus",
        VicinityPhenomenon::StandingLenticular => "Standing lenticular clouds",
        VicinityPhenomenon::Virga => "Virga",
        VicinityPhenomenon::Fog => "Fog",
    }
}

pub fn relative_humidity(rh: f64) -> String {
    format!("{}%", rh.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric() -> Settings {
        Settings::default()
    }

    fn imperial() -> Settings {
        Settings {
            units: UnitSystem::Imperial,
            ..Default::default()
        }
    }

    #[test]
    fn visibility_units() {
        assert_eq!(visibility(&Distance::statute_miles(10.0), &metric()), "16 km");
        assert_eq!(visibility(&Distance::meters(800.0), &metric()), "800 m");
        let more = Distance::meters(10_000.0).with_bound(Some(Bound::MoreThan));
        assert_eq!(visibility(&more, &metric()), "more than 10 km");
        assert_eq!(visibility(&Distance::statute_miles(1.5), &imperial()), "1 1/2 SM");
        assert_eq!(visibility(&Distance::statute_miles(0.25), &imperial()), "1/4 SM");
        assert_eq!(visibility(&Distance::meters(9000.0), &imperial()), "6 SM");
    }

    #[test]
    fn pressure_units() {
        assert_eq!(pressure(&Pressure::inches_hg(29.92), &metric()), "1013 hPa");
        assert_eq!(pressure(&Pressure::hectopascal(1013.0), &imperial()), "29.91 inHg");
    }

    #[test]
    fn temperature_trims_zero_decimal() {
        assert_eq!(temperature(&Temperature::celsius(15.0), &metric()), "15 °C");
        assert_eq!(temperature(&Temperature::celsius(-2.3), &metric()), "-2.3 °C");
        assert_eq!(temperature(&Temperature::celsius(15.0), &imperial()), "59 °F");
        assert_eq!(one_decimal(-0.01), "0");
    }

    #[test]
    fn speeds_are_knots() {
        assert_eq!(speed(&Speed::new(10, SpeedUnit::Knots)), "10 kt");
        assert_eq!(speed(&Speed::new(5, SpeedUnit::MetersPerSecond)), "10 kt");
    }

    #[test]
    fn directions_follow_setting() {
        let cardinal = Settings {
            true_cardinal_directions: true,
            ..Default::default()
        };
        assert_eq!(direction(&Direction::Degrees(270), &metric()), "270°");
        assert_eq!(direction(&Direction::Degrees(270), &cardinal), "W");
        let list = [
            Direction::Point(Cardinal::North),
            Direction::Point(Cardinal::NorthEast),
            Direction::Overhead,
        ];
        assert_eq!(directions(&list, &metric()), "N, NE and overhead");
    }

    #[test]
    fn placeholders() {
        let v: Value<Speed> = Value::NotReported;
        assert_eq!(value(&v, speed), NOT_REPORTED);
        let v: Value<Speed> = Value::Unrecognized;
        assert_eq!(value(&v, speed), NOT_RECOGNISED);
    }

    #[test]
    fn weather_reading_order() {
        let text = weather_phenomena(&WeatherPhenomena::parse("-SHRA").unwrap());
        assert_eq!(text, "light showers of rain");
        let text = weather_phenomena(&WeatherPhenomena::parse("+TSRAGR").unwrap());
        assert_eq!(text, "heavy thunderstorm with rain and hail");
        let text = weather_phenomena(&WeatherPhenomena::parse("VCSH").unwrap());
        assert_eq!(text, "showers in the vicinity");
        let text = weather_phenomena(&WeatherPhenomena::parse("+FC").unwrap());
        assert_eq!(text, "tornado or waterspout");
    }

    #[test]
    fn precipitation_and_waves() {
        assert_eq!(precipitation(&Precipitation::inches(0.5), &metric()), "12.7 mm");
        assert_eq!(precipitation(&Precipitation::inches(0.12), &imperial()), "0.12 in");
        assert_eq!(wave_height(&WaveHeight::Height { meters: 1.5 }, &metric()), "1.5 m");
        assert_eq!(wave_height(&WaveHeight::Height { meters: 1.5 }, &imperial()), "5 ft");
        assert_eq!(
            wave_height(&WaveHeight::State(SeaState::Moderate), &metric()),
            "moderate sea, waves up to 2.5 m"
        );
    }

    #[test]
    fn runway_names() {
        let r = Runway::parse("24L").unwrap();
        assert_eq!(runway(&r), "runway 24 left");
        assert_eq!(runway(&Runway::parse("88").unwrap()), "all runways");
        assert_eq!(runway(&Runway::parse("05").unwrap()), "runway 05");
    }
}
