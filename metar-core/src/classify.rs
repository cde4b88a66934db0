//! Report kind detection and structural validation.

use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorPolicy, ReportError};
use crate::group::{Group, GroupInfo, Keyword, ReportPart, TrendKind};
use crate::value::MetafTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Metar,
    Speci,
    Taf,
    Unknown,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Metar => "METAR",
            ReportKind::Speci => "SPECI",
            ReportKind::Taf => "TAF",
            ReportKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about a report as a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub kind: ReportKind,
    pub station: Option<String>,
    pub issue_time: Option<MetafTime>,
    pub valid_from: Option<MetafTime>,
    pub valid_until: Option<MetafTime>,
    pub amended: bool,
    pub correction: bool,
    pub automated: bool,
    pub nil: bool,
    pub cancelled: bool,
    /// The dominant problem, `None` when the report is well formed.
    pub error: Option<ReportError>,
}

impl ReportMetadata {
    fn empty(kind: ReportKind) -> Self {
        Self {
            kind,
            station: None,
            issue_time: None,
            valid_from: None,
            valid_until: None,
            amended: false,
            correction: false,
            automated: false,
            nil: false,
            cancelled: false,
            error: None,
        }
    }
}

fn keyword(info: &GroupInfo) -> Option<Keyword> {
    match &info.group {
        Group::Keyword(k) => Some(k.keyword),
        _ => None,
    }
}

fn validity(info: &GroupInfo) -> Option<(MetafTime, MetafTime)> {
    match &info.group {
        Group::Trend(t) if info.part == ReportPart::Header && t.kind == TrendKind::TimeSpan => {
            Some((t.from?, t.until?))
        }
        _ => None,
    }
}

/// Every time mentioned by a group.
fn times(group: &Group) -> Vec<MetafTime> {
    match group {
        Group::ReportTime(g) => vec![g.time],
        Group::Trend(g) => [g.from, g.until, g.at].into_iter().flatten().collect(),
        Group::MinMaxTemperature(g) => {
            [g.minimum_time, g.maximum_time].into_iter().flatten().collect()
        }
        _ => Vec::new(),
    }
}

fn detect_kind(groups: &[GroupInfo]) -> ReportKind {
    let declared = groups
        .iter()
        .filter(|g| g.part == ReportPart::Header)
        .filter_map(keyword)
        .find(Keyword::is_report_type);
    match declared {
        Some(Keyword::Metar) => return ReportKind::Metar,
        Some(Keyword::Speci) => return ReportKind::Speci,
        Some(Keyword::Taf) => return ReportKind::Taf,
        _ => {}
    }
    let header = groups.iter().filter(|g| g.part == ReportPart::Header);
    let location = header.clone().position(|g| matches!(g.group, Group::Location(_)));
    let span = header.clone().position(|g| validity(g).is_some());
    let time = header.clone().position(|g| matches!(g.group, Group::ReportTime(_)));
    match (location, span, time) {
        (Some(l), Some(s), _) if l < s => ReportKind::Taf,
        (Some(_), None, Some(_)) => ReportKind::Metar,
        _ => ReportKind::Unknown,
    }
}

/// Header groups must read location, report time, validity.
fn header_out_of_order(groups: &[GroupInfo]) -> bool {
    let rank = |g: &GroupInfo| match &g.group {
        Group::Location(_) => Some(0),
        Group::ReportTime(_) => Some(1),
        _ if validity(g).is_some() => Some(2),
        _ => None,
    };
    let ranks: Vec<u8> = groups
        .iter()
        .filter(|g| g.part == ReportPart::Header)
        .filter_map(rank)
        .collect();
    ranks.windows(2).any(|w| w[0] > w[1])
}

/// TAF change periods must start in chronological order.
fn changes_out_of_order(groups: &[GroupInfo], start_day: u8) -> bool {
    let starts: Vec<u32> = groups
        .iter()
        .filter(|g| g.part == ReportPart::Trend)
        .filter_map(|g| match &g.group {
            Group::Trend(t) if t.starts_section() => t.from,
            _ => None,
        })
        .filter(MetafTime::is_valid)
        .map(|t| t.minutes_since_day(start_day))
        .collect();
    starts.windows(2).any(|w| w[0] > w[1])
}

/// Derive report metadata from parsed groups. `end_of_report` is the index of
/// the first group following an end marker (`=`, `NIL`, `CNL`), if any.
pub fn classify(
    groups: &[GroupInfo],
    end_of_report: Option<usize>,
    policy: &ErrorPolicy,
) -> ReportMetadata {
    if groups.is_empty() {
        let mut metadata = ReportMetadata::empty(ReportKind::Unknown);
        metadata.error = policy.select(&[ReportError::EmptyReport]);
        return metadata;
    }

    let mut metadata = ReportMetadata::empty(detect_kind(groups));
    let mut errors = Vec::new();
    if metadata.kind == ReportKind::Unknown {
        errors.push(ReportError::ReportTypeUnrecognized);
    }

    for info in groups {
        match &info.group {
            Group::Location(l) if metadata.station.is_none() => {
                metadata.station = Some(l.icao.clone())
            }
            Group::ReportTime(t) if metadata.issue_time.is_none() => {
                metadata.issue_time = Some(t.time)
            }
            _ => {}
        }
        if metadata.valid_from.is_none() {
            if let Some((from, until)) = validity(info) {
                metadata.valid_from = Some(from);
                metadata.valid_until = Some(until);
            }
        }
        match keyword(info) {
            Some(Keyword::Amd) => metadata.amended = true,
            Some(Keyword::Cor) => metadata.correction = true,
            Some(Keyword::Auto) => metadata.automated = true,
            Some(Keyword::Nil) => metadata.nil = true,
            Some(Keyword::Cnl) => metadata.cancelled = true,
            _ => {}
        }
    }

    if metadata.station.is_none() {
        errors.push(ReportError::StationMissing);
    }
    let time_missing = match metadata.kind {
        ReportKind::Metar | ReportKind::Speci => metadata.issue_time.is_none(),
        ReportKind::Taf => metadata.valid_from.is_none(),
        ReportKind::Unknown => metadata.issue_time.is_none() && metadata.valid_from.is_none(),
    };
    if time_missing && !metadata.nil {
        errors.push(ReportError::TimeMissing);
    }
    if groups
        .iter()
        .flat_map(|g| times(&g.group))
        .any(|t| !t.is_valid())
    {
        errors.push(ReportError::TimeOutOfRange);
    }
    if end_of_report.is_some_and(|end| end < groups.len()) {
        errors.push(ReportError::GroupAfterEnd);
    }
    let start_day = metadata
        .valid_from
        .or(metadata.issue_time)
        .filter(MetafTime::is_valid)
        .and_then(|t| t.day)
        .unwrap_or(1);
    if header_out_of_order(groups)
        || (metadata.kind == ReportKind::Taf && changes_out_of_order(groups, start_day))
    {
        errors.push(ReportError::GroupsOutOfOrder);
    }
    let unparsed = groups
        .iter()
        .filter(|g| g.group.is_unknown() && g.part != ReportPart::Rmk)
        .count();
    if unparsed > 0 {
        errors.push(ReportError::UnparseableGroup(unparsed));
    }

    metadata.error = policy.select(&errors);
    if !errors.is_empty() {
        debug!(
            kind = %metadata.kind,
            ?errors,
            selected = ?metadata.error,
            "report validation found problems"
        );
    }
    metadata
}
