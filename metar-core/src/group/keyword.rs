use serde::Serialize;

use super::{GroupGrammar, ReportPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Metar,
    Speci,
    Taf,
    Amd,
    Cor,
    Nil,
    Cnl,
    Auto,
    Cavok,
    Rmk,
    Maintenance,
    Ao1,
    Ao2,
    Nospeci,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Metar => "METAR",
            Keyword::Speci => "SPECI",
            Keyword::Taf => "TAF",
            Keyword::Amd => "AMD",
            Keyword::Cor => "COR",
            Keyword::Nil => "NIL",
            Keyword::Cnl => "CNL",
            Keyword::Auto => "AUTO",
            Keyword::Cavok => "CAVOK",
            Keyword::Rmk => "RMK",
            Keyword::Maintenance => "$",
            Keyword::Ao1 => "AO1",
            Keyword::Ao2 => "AO2",
            Keyword::Nospeci => "NOSPECI",
        }
    }

    /// Keywords that declare the report type.
    pub fn is_report_type(&self) -> bool {
        matches!(self, Keyword::Metar | Keyword::Speci | Keyword::Taf)
    }

    /// Keywords after which a report carries no further groups.
    pub fn ends_report(&self) -> bool {
        matches!(self, Keyword::Nil | Keyword::Cnl)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordGroup {
    pub keyword: Keyword,
}

impl GroupGrammar for KeywordGroup {
    fn parse(token: &str, part: ReportPart) -> Option<Self> {
        use ReportPart::*;

        let keyword = match (token, part) {
            ("METAR", Header) => Keyword::Metar,
            ("SPECI", Header) => Keyword::Speci,
            ("TAF", Header) => Keyword::Taf,
            ("AMD", Header) => Keyword::Amd,
            ("COR" | "CCA", Header | Metar) => Keyword::Cor,
            ("NIL", Header | Metar | Taf) => Keyword::Nil,
            ("CNL", Header | Taf) => Keyword::Cnl,
            ("AUTO", Header | Metar) => Keyword::Auto,
            ("CAVOK", Metar | Taf | Trend) => Keyword::Cavok,
            ("RMK", Header | Metar | Taf | Trend) => Keyword::Rmk,
            ("$", Metar | Trend | Rmk) => Keyword::Maintenance,
            ("AO1", Rmk) => Keyword::Ao1,
            ("AO2", Rmk) => Keyword::Ao2,
            ("NOSPECI", Rmk) => Keyword::Nospeci,
            _ => return None,
        };
        Some(Self { keyword })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_keywords_only_in_header() {
        assert_eq!(
            KeywordGroup::parse("TAF", ReportPart::Header),
            Some(KeywordGroup {
                keyword: Keyword::Taf,
            })
        );
        assert_eq!(KeywordGroup::parse("TAF", ReportPart::Metar), None);
        assert_eq!(KeywordGroup::parse("AO2", ReportPart::Metar), None);
    }

    #[test]
    fn as_str_roundtrip() {
        for kw in [Keyword::Metar, Keyword::Cavok, Keyword::Nil, Keyword::Ao2] {
            let part = if kw == Keyword::Ao2 {
                ReportPart::Rmk
            } else {
                ReportPart::Header
            };
            let part = if kw == Keyword::Cavok {
                ReportPart::Metar
            } else {
                part
            };
            let parsed = KeywordGroup::parse(kw.as_str(), part).expect("roundtrip should succeed");
            assert_eq!(parsed.keyword, kw);
        }
    }
}
