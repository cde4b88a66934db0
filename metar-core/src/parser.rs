//! Tokenizer and report-part state machine.
//!
//! Tokens are read left to right. Each token is first offered to the group
//! before it, so groups spanning several tokens can grow; otherwise it is
//! classified against the grammars valid in the current report part.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::classify::{ReportMetadata, classify};
use crate::error::ErrorPolicy;
use crate::group::{Group, GroupInfo, Keyword, ReportPart, TrendKind};

/// Everything known about one decoded report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub metadata: ReportMetadata,
    pub groups: Vec<GroupInfo>,
    pub reference_date: NaiveDate,
}

/// Parse a report with the default error precedence.
pub fn parse(text: &str, reference_date: NaiveDate) -> ParseResult {
    parse_with_policy(text, reference_date, &ErrorPolicy::default())
}

#[derive(Debug, Default)]
struct HeaderState {
    location: bool,
    report_time: bool,
    validity: bool,
    taf: bool,
}

impl HeaderState {
    /// Record a group read in the header. Returns `false` when the group
    /// cannot belong to the header, which ends it.
    fn accept(&mut self, group: &Group) -> bool {
        match group {
            Group::Keyword(k) if k.keyword == Keyword::Rmk => false,
            Group::Keyword(k) => {
                if k.keyword == Keyword::Taf {
                    self.taf = true;
                }
                true
            }
            Group::Location(_) if !self.location => {
                self.location = true;
                true
            }
            Group::ReportTime(_) if !self.report_time => {
                self.report_time = true;
                true
            }
            Group::Trend(t) if t.kind == TrendKind::TimeSpan && !self.validity => {
                self.validity = true;
                self.taf = true;
                true
            }
            _ => false,
        }
    }
}

struct Parser {
    groups: Vec<GroupInfo>,
    part: ReportPart,
    header: HeaderState,
    /// Index of the first group after an end marker.
    end_of_report: Option<usize>,
    /// The last group must not be extended: the report ended after it.
    sealed: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            part: ReportPart::Header,
            header: HeaderState::default(),
            end_of_report: None,
            sealed: false,
        }
    }

    fn body_part(&self) -> ReportPart {
        if self.header.taf {
            ReportPart::Taf
        } else {
            ReportPart::Metar
        }
    }

    fn switch_part(&mut self, part: ReportPart, token: &str) {
        if self.part != part {
            debug!(from = %self.part, to = %part, token, "report part changed");
            self.part = part;
        }
    }

    fn try_append(&mut self, token: &str) -> bool {
        if self.sealed {
            return false;
        }
        let part = self.part;
        let Some(last) = self.groups.last_mut() else {
            return false;
        };
        if last.group.append(token, part) {
            last.raw.push(' ');
            last.raw.push_str(token);
            trace!(token, kind = last.group.kind_name(), "token appended");
            return true;
        }
        // Consecutive unrecognised remark tokens read as one free-text remark.
        if part == ReportPart::Rmk
            && last.part == ReportPart::Rmk
            && last.group.is_unknown()
            && Group::parse(token, part).is_unknown()
        {
            last.raw.push(' ');
            last.raw.push_str(token);
            return true;
        }
        false
    }

    fn classify_token(&mut self, token: &str) -> (Group, ReportPart) {
        let mut group = Group::parse(token, self.part);
        if self.part == ReportPart::Header && !self.header.accept(&group) {
            let body = self.body_part();
            self.switch_part(body, token);
            group = Group::parse(token, self.part);
        }
        match &group {
            Group::Keyword(k) if k.keyword == Keyword::Rmk => {
                self.switch_part(ReportPart::Rmk, token)
            }
            Group::Trend(t) if self.part.is_body() && t.starts_section() => {
                self.switch_part(ReportPart::Trend, token)
            }
            _ => {}
        }
        (group, self.part)
    }

    fn demote_incomplete_last(&mut self) {
        if let Some(last) = self.groups.last_mut() {
            if !last.group.is_complete() {
                debug!(raw = %last.raw, kind = last.group.kind_name(), "incomplete group demoted");
                last.group = Group::Unknown;
            }
        }
    }

    fn feed(&mut self, raw_token: &str) {
        let (token, terminates) = match raw_token.strip_suffix('=') {
            Some(t) => (t, true),
            None => (raw_token, false),
        };
        if !token.is_empty() && !self.try_append(token) {
            self.demote_incomplete_last();
            let (group, part) = self.classify_token(token);
            trace!(token, %part, kind = group.kind_name(), "token classified");
            let ends = matches!(&group, Group::Keyword(k) if k.keyword.ends_report());
            self.groups.push(GroupInfo {
                group,
                part,
                raw: token.to_string(),
            });
            self.sealed = false;
            if ends {
                self.end();
            }
        }
        if terminates {
            self.end();
        }
    }

    fn end(&mut self) {
        self.sealed = true;
        if self.end_of_report.is_none() {
            self.end_of_report = Some(self.groups.len());
        }
    }
}

/// Parse a report, choosing among detected problems with `policy`.
pub fn parse_with_policy(
    text: &str,
    reference_date: NaiveDate,
    policy: &ErrorPolicy,
) -> ParseResult {
    let mut parser = Parser::new();
    for token in text.split_whitespace() {
        parser.feed(token);
    }
    parser.demote_incomplete_last();

    let metadata = classify(&parser.groups, parser.end_of_report, policy);
    debug!(
        kind = %metadata.kind,
        station = metadata.station.as_deref().unwrap_or("-"),
        groups = parser.groups.len(),
        "report parsed"
    );
    ParseResult {
        metadata,
        groups: parser.groups,
        reference_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ReportKind;
    use crate::error::{ErrorKind, ReportError};
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    fn kinds(result: &ParseResult) -> Vec<(&'static str, ReportPart)> {
        result.groups.iter().map(|g| (g.group.kind_name(), g.part)).collect()
    }

    #[test]
    fn metar_with_trend_and_remarks() {
        let r = parse(
            "METAR EGLL 121250Z 27010G20KT 240V300 9999 -SHRA BKN030 15/08 Q1013 \
             BECMG BKN020 RMK AO2 SLP132",
            date(),
        );
        assert_eq!(r.metadata.kind, ReportKind::Metar);
        assert_eq!(r.metadata.station.as_deref(), Some("EGLL"));
        assert_eq!(r.metadata.error, None);
        assert_eq!(
            kinds(&r),
            vec![
                ("keyword", ReportPart::Header),
                ("location", ReportPart::Header),
                ("report_time", ReportPart::Header),
                ("wind", ReportPart::Metar),
                ("visibility", ReportPart::Metar),
                ("weather", ReportPart::Metar),
                ("cloud", ReportPart::Metar),
                ("temperature", ReportPart::Metar),
                ("pressure", ReportPart::Metar),
                ("trend", ReportPart::Trend),
                ("cloud", ReportPart::Trend),
                ("keyword", ReportPart::Rmk),
                ("keyword", ReportPart::Rmk),
                ("pressure", ReportPart::Rmk),
            ]
        );
        assert_eq!(r.groups[3].raw, "27010G20KT 240V300");
    }

    #[test]
    fn taf_with_change_groups() {
        let r = parse(
            "TAF KJFK 121130Z 1212/1318 18010KT P6SM SCT040 PROB30 TEMPO 1218/1222 3SM TSRA \
             BKN020CB FM130000 20012KT P6SM",
            date(),
        );
        assert_eq!(r.metadata.kind, ReportKind::Taf);
        assert_eq!(r.metadata.error, None);
        let prob = &r.groups[7];
        assert_eq!(prob.raw, "PROB30 TEMPO 1218/1222");
        assert_eq!(prob.part, ReportPart::Trend);
        assert_eq!(r.groups[4].part, ReportPart::Taf);
    }

    #[test]
    fn split_fractional_visibility() {
        let r = parse("METAR KORD 121651Z 1 1/2SM BR", date());
        assert_eq!(r.groups[3].raw, "1 1/2SM");
        assert_eq!(r.groups[3].group.kind_name(), "visibility");
    }

    #[test]
    fn lone_digit_is_demoted_to_unknown() {
        let r = parse("METAR KORD 121651Z 1 BR", date());
        assert!(r.groups[3].group.is_unknown());
        assert_eq!(r.metadata.error, Some(ReportError::UnparseableGroup(1)));
    }

    #[test]
    fn remark_free_text_is_merged() {
        let r = parse("METAR KORD 121651Z 18005KT RMK AO2 HAIL ON GROUND SLP132", date());
        let raws: Vec<&str> = r.groups.iter().map(|g| g.raw.as_str()).collect();
        assert_eq!(
            raws,
            vec![
                "METAR",
                "KORD",
                "121651Z",
                "18005KT",
                "RMK",
                "AO2",
                "HAIL ON GROUND",
                "SLP132"
            ]
        );
        assert_eq!(r.metadata.error, None);
    }

    #[test]
    fn groups_after_end_marker() {
        let r = parse("METAR KORD 121651Z 18005KT= 9999", date());
        assert_eq!(r.metadata.error, Some(ReportError::GroupAfterEnd));
        assert_eq!(r.groups[3].raw, "18005KT");

        let r = parse("METAR KORD 121651Z NIL=", date());
        assert!(r.metadata.nil);
        assert_eq!(r.metadata.error, None);
    }

    #[test]
    fn policy_changes_selected_error() {
        let policy = ErrorPolicy {
            precedence: vec![ErrorKind::UnparseableGroup],
        };
        let r = parse_with_policy("METAR 18005KT XXXX", date(), &policy);
        assert_eq!(r.metadata.error, Some(ReportError::UnparseableGroup(1)));
        let r = parse("METAR 18005KT XXXX", date());
        assert_eq!(r.metadata.error, Some(ReportError::StationMissing));
    }

    #[test]
    fn empty_and_blank_reports() {
        assert_eq!(parse("", date()).metadata.error, Some(ReportError::EmptyReport));
        assert_eq!(parse(" \t\n ", date()).metadata.error, Some(ReportError::EmptyReport));
        assert_eq!(parse("=", date()).metadata.error, Some(ReportError::EmptyReport));
    }

    #[test]
    fn weather_after_station_leaves_header() {
        let r = parse("KJFK 121651Z VCSH", date());
        assert_eq!(r.groups[2].group.kind_name(), "weather");
        assert_eq!(r.metadata.kind, ReportKind::Metar);
    }

    #[test]
    fn impossible_taf_days_are_reported_not_fatal() {
        let r = parse("TAF KJFK 991130Z 9912/9918 BECMG 0512/0514 18010KT", date());
        assert_eq!(r.metadata.kind, ReportKind::Taf);
        assert_eq!(r.metadata.error, Some(ReportError::TimeOutOfRange));
        assert_eq!(r.groups[4].raw, "BECMG 0512/0514");
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = parse(&s, date());
        }

        #[test]
        fn parse_never_panics_on_report_like_tokens(s in "([A-Z0-9/+-]{1,9}=? ){0,30}") {
            let r = parse(&s, date());
            prop_assert!(r.groups.len() <= s.split_whitespace().count());
        }

        #[test]
        fn parse_never_panics_on_taf_with_arbitrary_days(
            s in "TAF [A-Z]{4} [0-9]{6}Z [0-9]{4}/[0-9]{4}\
                  ( (BECMG|TEMPO|FM[0-9]{6}) [0-9]{4}/[0-9]{4}){0,4}"
        ) {
            let r = parse(&s, date());
            prop_assert_eq!(r.metadata.kind, ReportKind::Taf);
        }
    }
}
