//! Trend and change groups, and time spans.
//!
//! In the header a time span is the TAF validity period. In the body it
//! introduces or qualifies a change: `BECMG 1512/1514`, `PROB30 TEMPO
//! 1518/1522`, `FM151800`, or in METAR trends `BECMG FM1200 TL1300`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{GroupGrammar, ReportPart};
use crate::value::MetafTime;

lazy_static! {
    static ref TIME_SPAN: Regex = Regex::new(r"^(\d{4})/(\d{4})$").expect("valid regex");
    static ref LEGACY_SPAN: Regex = Regex::new(r"^(\d{2})(\d{2})(\d{2})$").expect("valid regex");
    static ref PROBABILITY: Regex = Regex::new(r"^PROB(\d{2})$").expect("valid regex");
    static ref FROM_DAY: Regex = Regex::new(r"^FM(\d{6})$").expect("valid regex");
    static ref TIME_MARK: Regex = Regex::new(r"^(FM|TL|AT)(\d{4})$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    /// A bare time span: validity period in the header.
    TimeSpan,
    Nosig,
    Becmg,
    Tempo,
    Inter,
    /// `FM`: conditions change from this time on.
    From,
    Until,
    At,
    /// `PROBnn` not (yet) followed by `TEMPO` or `INTER`.
    Prob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Probability {
    P30,
    P40,
}

impl Probability {
    pub fn percent(&self) -> u8 {
        match self {
            Probability::P30 => 30,
            Probability::P40 => 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendGroup {
    pub kind: TrendKind,
    pub probability: Option<Probability>,
    pub from: Option<MetafTime>,
    pub until: Option<MetafTime>,
    pub at: Option<MetafTime>,
}

impl TrendGroup {
    fn new(kind: TrendKind) -> Self {
        Self {
            kind,
            probability: None,
            from: None,
            until: None,
            at: None,
        }
    }

    fn has_time(&self) -> bool {
        self.from.is_some() || self.until.is_some() || self.at.is_some()
    }

    /// Whether this group opens a trend or change section.
    pub fn starts_section(&self) -> bool {
        self.kind != TrendKind::TimeSpan
    }

    fn parse_span(token: &str) -> Option<(MetafTime, MetafTime)> {
        let caps = TIME_SPAN.captures(token)?;
        let from = MetafTime::from_digits(&caps[1], true, false)?;
        let until = MetafTime::from_digits(&caps[2], true, false)?;
        Some((from, until))
    }

    fn parse_legacy_span(token: &str) -> Option<(MetafTime, MetafTime)> {
        let caps = LEGACY_SPAN.captures(token)?;
        let num = |i: usize| caps[i].parse::<u8>().ok();
        let (day, from_hour, until_hour) = (num(1)?, num(2)?, num(3)?);
        // DDHHHH: a span ending at or before its start runs into the next day,
        // which this form cannot name.
        let until_day = (until_hour > from_hour).then_some(day);
        Some((MetafTime::new(Some(day), from_hour, 0), MetafTime::new(until_day, until_hour, 0)))
    }
}

impl GroupGrammar for TrendGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        if part == ReportPart::Header {
            let (from, until) = Self::parse_span(token).or_else(|| Self::parse_legacy_span(token))?;
            let mut g = Self::new(TrendKind::TimeSpan);
            g.from = Some(from);
            g.until = Some(until);
            return Some(g);
        }
        if !part.is_body() {
            return None;
        }
        let simple = match token {
            "NOSIG" if part != ReportPart::Taf => Some(TrendKind::Nosig),
            "BECMG" => Some(TrendKind::Becmg),
            "TEMPO" => Some(TrendKind::Tempo),
            "INTER" => Some(TrendKind::Inter),
            _ => None,
        };
        if let Some(kind) = simple {
            return Some(Self::new(kind));
        }
        if let Some(caps) = PROBABILITY.captures(token) {
            let mut g = Self::new(TrendKind::Prob);
            g.probability = match &caps[1] {
                "30" => Some(Probability::P30),
                "40" => Some(Probability::P40),
                _ => return None,
            };
            return Some(g);
        }
        if let Some(caps) = FROM_DAY.captures(token) {
            let mut g = Self::new(TrendKind::From);
            g.from = Some(MetafTime::from_digits(&caps[1], true, true)?);
            return Some(g);
        }
        if let Some(caps) = TIME_MARK.captures(token) {
            let time = MetafTime::from_digits(&caps[2], false, true)?;
            let mut g = match &caps[1] {
                "FM" => Self::new(TrendKind::From),
                "TL" => Self::new(TrendKind::Until),
                _ => Self::new(TrendKind::At),
            };
            match g.kind {
                TrendKind::From => g.from = Some(time),
                TrendKind::Until => g.until = Some(time),
                _ => g.at = Some(time),
            }
            return Some(g);
        }
        if let Some((from, until)) = Self::parse_span(token) {
            let mut g = Self::new(TrendKind::TimeSpan);
            g.from = Some(from);
            g.until = Some(until);
            return Some(g);
        }
        None
    }

    fn append(&mut self, token: &str, part: ReportPart) -> bool {
        if !part.is_body() {
            return false;
        }
        if self.kind == TrendKind::Prob && !self.has_time() {
            match token {
                "TEMPO" => {
                    self.kind = TrendKind::Tempo;
                    return true;
                }
                "INTER" => {
                    self.kind = TrendKind::Inter;
                    return true;
                }
                _ => {}
            }
        }
        let takes_time = matches!(
            self.kind,
            TrendKind::Becmg | TrendKind::Tempo | TrendKind::Inter | TrendKind::Prob
        );
        if takes_time && !self.has_time() {
            if let Some((from, until)) = Self::parse_span(token) {
                self.from = Some(from);
                self.until = Some(until);
                return true;
            }
        }
        let Some(caps) = TIME_MARK.captures(token) else {
            return false;
        };
        let Some(time) = MetafTime::from_digits(&caps[2], false, true) else {
            return false;
        };
        let change = matches!(self.kind, TrendKind::Becmg | TrendKind::Tempo | TrendKind::Inter);
        let open_ended = self.until.is_none() && self.at.is_none();
        match &caps[1] {
            "FM" if change && !self.has_time() => self.from = Some(time),
            "TL" if (change || self.kind == TrendKind::From) && open_ended => {
                self.until = Some(time)
            }
            "AT" if change && !self.has_time() => self.at = Some(time),
            _ => return false,
        }
        true
    }

    fn is_complete(&self) -> bool {
        self.kind != TrendKind::Prob || self.has_time()
    }
}
