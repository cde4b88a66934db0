//! Report errors and the policy that picks the one reported for a report.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

/// Structural problem found in a report. A report carries at most one: the
/// highest ranked under the active [`ErrorPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum ReportError {
    #[error("report is empty")]
    EmptyReport,
    #[error("report type could not be recognised")]
    ReportTypeUnrecognized,
    #[error("station identifier is missing")]
    StationMissing,
    #[error("report time or validity period is missing")]
    TimeMissing,
    #[error("a time in the report is out of range")]
    TimeOutOfRange,
    #[error("groups found after the end of the report")]
    GroupAfterEnd,
    #[error("groups are out of order")]
    GroupsOutOfOrder,
    #[error("{0} group(s) could not be decoded")]
    UnparseableGroup(usize),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::EmptyReport => ErrorKind::EmptyReport,
            ReportError::ReportTypeUnrecognized => ErrorKind::ReportTypeUnrecognized,
            ReportError::StationMissing => ErrorKind::StationMissing,
            ReportError::TimeMissing => ErrorKind::TimeMissing,
            ReportError::TimeOutOfRange => ErrorKind::TimeOutOfRange,
            ReportError::GroupAfterEnd => ErrorKind::GroupAfterEnd,
            ReportError::GroupsOutOfOrder => ErrorKind::GroupsOutOfOrder,
            ReportError::UnparseableGroup(_) => ErrorKind::UnparseableGroup,
        }
    }
}

/// [`ReportError`] without its payload, as stored in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyReport,
    ReportTypeUnrecognized,
    StationMissing,
    TimeMissing,
    TimeOutOfRange,
    GroupAfterEnd,
    GroupsOutOfOrder,
    UnparseableGroup,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyReport => "empty_report",
            ErrorKind::ReportTypeUnrecognized => "report_type_unrecognized",
            ErrorKind::StationMissing => "station_missing",
            ErrorKind::TimeMissing => "time_missing",
            ErrorKind::TimeOutOfRange => "time_out_of_range",
            ErrorKind::GroupAfterEnd => "group_after_end",
            ErrorKind::GroupsOutOfOrder => "groups_out_of_order",
            ErrorKind::UnparseableGroup => "unparseable_group",
        }
    }

    /// All kinds, highest precedence first.
    pub const fn all() -> &'static [ErrorKind] {
        &[
            ErrorKind::EmptyReport,
            ErrorKind::ReportTypeUnrecognized,
            ErrorKind::StationMissing,
            ErrorKind::TimeMissing,
            ErrorKind::TimeOutOfRange,
            ErrorKind::GroupAfterEnd,
            ErrorKind::GroupsOutOfOrder,
            ErrorKind::UnparseableGroup,
        ]
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ErrorKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase().replace('-', "_");
        ErrorKind::all()
            .iter()
            .find(|k| k.as_str() == lower)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown error kind '{value}'."))
    }
}

/// Ranking of error kinds. When a report has several problems, the one whose
/// kind comes first is reported. Kinds missing from the list rank after all
/// listed kinds, in their default order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPolicy {
    pub precedence: Vec<ErrorKind>,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            precedence: ErrorKind::all().to_vec(),
        }
    }
}

impl ErrorPolicy {
    fn rank(&self, kind: ErrorKind) -> usize {
        match self.precedence.iter().position(|k| *k == kind) {
            Some(i) => i,
            None => {
                let fallback = ErrorKind::all().iter().position(|k| *k == kind).unwrap_or(0);
                self.precedence.len() + fallback
            }
        }
    }

    /// Pick the dominant error among those detected.
    pub fn select(&self, errors: &[ReportError]) -> Option<ReportError> {
        errors.iter().copied().min_by_key(|e| self.rank(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_precedence() {
        let policy = ErrorPolicy::default();
        let found = [
            ReportError::UnparseableGroup(2),
            ReportError::TimeMissing,
            ReportError::StationMissing,
        ];
        assert_eq!(policy.select(&found), Some(ReportError::StationMissing));
        assert_eq!(policy.select(&[]), None);
    }

    #[test]
    fn custom_precedence_with_missing_kinds() {
        let policy = ErrorPolicy {
            precedence: vec![ErrorKind::UnparseableGroup],
        };
        let found = [
            ReportError::GroupsOutOfOrder,
            ReportError::UnparseableGroup(1),
            ReportError::TimeMissing,
        ];
        assert_eq!(policy.select(&found), Some(ReportError::UnparseableGroup(1)));

        let found = [ReportError::GroupsOutOfOrder, ReportError::TimeMissing];
        assert_eq!(policy.select(&found), Some(ReportError::TimeMissing));
    }

    #[test]
    fn error_kind_as_str_roundtrip() {
        for kind in ErrorKind::all() {
            let parsed = ErrorKind::try_from(kind.as_str()).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
        assert_eq!(ErrorKind::try_from("Station-Missing").unwrap(), ErrorKind::StationMissing);
        let err = ErrorKind::try_from("nope").unwrap_err();
        assert!(err.to_string().contains("Unknown error kind"));
    }

    #[test]
    fn display_includes_count() {
        assert_eq!(ReportError::UnparseableGroup(3).to_string(), "3 group(s) could not be decoded");
    }
}
