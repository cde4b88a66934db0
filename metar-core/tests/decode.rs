use chrono::NaiveDate;
use metar_core::fields::{decode_clouds, decode_qnh, decode_vis, decode_wind, decode_wx};
use metar_core::{
    ErrorKind, Group, LINE_BREAK, ReportError, ReportKind, Settings, UnitSystem, explain, parse,
    recompute,
};
use proptest::prelude::*;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn full_metar_decodes_without_error() {
    let today = date(2024, 3, 12);
    let decoded = recompute(
        "METAR EGLL 121250Z 27010G20KT 240V300 9999 R27L/1200U -SHRA BKN030 15/10 Q1013 NOSIG=",
        today,
        &Settings::default(),
        today,
    );
    assert!(!decoded.has_parse_error(), "{:?}", decoded.result.metadata.error);
    assert_eq!(decoded.result.metadata.kind, ReportKind::Metar);
    let lines: Vec<&str> = decoded.text.split(LINE_BREAK).collect();
    assert_eq!(lines.len(), decoded.result.groups.len());
    assert!(lines.contains(&"Observed today 12:50 UTC"));
    assert!(lines.contains(&"Light showers of rain"));
}

#[test]
fn recompute_is_stable_across_calls() {
    let today = date(2024, 3, 12);
    let raw = "TAF AMD KJFK 121130Z 1212/1318 18010KT P6SM SCT040 \
               TEMPO 1218/1222 3SM TSRA BKN020CB";
    let settings = Settings {
        units: UnitSystem::Imperial,
        ..Default::default()
    };
    let first = recompute(raw, today, &settings, today);
    for _ in 0..3 {
        assert_eq!(recompute(raw, today, &settings, today), first);
    }
}

#[test]
fn today_only_changes_relative_wording() {
    let raw = "METAR EGLL 121250Z 27010KT 9999";
    let reference = date(2024, 3, 12);
    let same_day = recompute(raw, reference, &Settings::default(), reference);
    let next_day = recompute(raw, reference, &Settings::default(), date(2024, 3, 13));
    assert!(same_day.text.contains("today 12:50 UTC"));
    assert!(next_day.text.contains("yesterday 12:50 UTC"));
    assert_eq!(same_day.result, next_day.result);
}

#[test]
fn military_colour_states_decode_in_body_and_trend() {
    let today = date(2024, 3, 12);
    let result = parse(
        "METAR EGVN 121250Z 27010KT 9999 FEW030 15/10 Q1013 WHT TEMPO BLACKGRN RMK 98///",
        today,
    );
    assert_eq!(result.metadata.error, None);
    let misc: Vec<&str> = result
        .groups
        .iter()
        .filter(|g| matches!(g.group, Group::Misc(_)))
        .map(|g| g.raw.as_str())
        .collect();
    assert_eq!(misc, vec!["WHT", "BLACKGRN", "98///"]);

    let text = explain(&result, &Settings::default(), today);
    assert!(text.contains("Colour state WHITE: visibility 5 km or more"));
    assert!(text.contains("Airfield closed for reasons other than weather; colour state GREEN"));
    assert!(text.contains("Sunshine duration on the previous day: not reported"));
}

#[test]
fn legacy_field_conversions() {
    assert_eq!(decode_vis("10"), "16 km");
    assert_eq!(decode_qnh("29.92"), "1013 hPa");
    assert_eq!(decode_wind("0", "0", "0"), "calm");
    assert_eq!(decode_wind("0", "5", "0"), "variable at 5 kt");
    assert_eq!(decode_wind("270", "10", "20"), "from 270° at 10 kt, gusty 20 kt");
    assert_eq!(decode_wx("-SHRA"), "light showers of rain");
    assert_eq!(
        decode_clouds(&["FEW,1200,CU", "BKN,3000"]),
        "Broken clouds at 3000 ft AGL<br>Few Cumulus at 1200 ft AGL"
    );
}

#[test]
fn day_before_reference_rolls_into_next_month() {
    let reference = date(2024, 3, 28);
    let result = parse("METAR EGLL 031250Z 27010KT", reference);
    let time = result.metadata.issue_time.expect("issue time");
    let resolved = time.resolve(reference).expect("resolvable");
    assert_eq!(resolved.date(), date(2024, 4, 3));

    let text = explain(&result, &Settings::default(), reference);
    assert!(text.contains("Observed 3 April 2024 12:50 UTC"), "{text}");
}

#[test]
fn day_rollover_at_year_end() {
    let reference = date(2024, 12, 30);
    let result = parse("TAF EGLL 020500Z 0206/0312 27010KT", reference);
    let resolved = result.metadata.valid_from.and_then(|t| t.resolve(reference));
    assert_eq!(resolved.map(|t| t.date()), Some(date(2025, 1, 2)));
}

#[test]
fn missing_station_and_time_still_decodes_the_rest() {
    let today = date(2024, 3, 12);
    let decoded = recompute("METAR 27010KT 9999 BKN030", today, &Settings::default(), today);
    assert_eq!(decoded.result.metadata.error, Some(ReportError::StationMissing));
    assert!(decoded.has_parse_error());
    assert!(decoded.text.contains("Wind from 270° at 10 kt"));
    assert!(decoded.text.contains("Broken clouds at 3000 ft AGL"));
}

#[test]
fn configured_precedence_is_used_by_recompute() {
    let today = date(2024, 3, 12);
    let mut settings = Settings::default();
    settings.prioritize_error(ErrorKind::UnparseableGroup);
    let decoded = recompute("METAR 27010KT XYZZY", today, &settings, today);
    assert_eq!(decoded.result.metadata.error, Some(ReportError::UnparseableGroup(1)));
}

#[test]
fn parse_result_serializes_to_json() {
    let result = parse("METAR EGLL 121250Z 27010KT 9999 Q1013", date(2024, 3, 12));
    let json = serde_json::to_value(&result).expect("serializable");
    assert_eq!(json["metadata"]["station"], "EGLL");
    assert_eq!(json["groups"][3]["group"]["type"], "wind");
    assert!(matches!(result.groups[3].group, Group::Wind(_)));
}

proptest! {
    #[test]
    fn parse_and_explain_never_panic(s in "\\PC*") {
        let reference = date(2024, 3, 12);
        let result = parse(&s, reference);
        let _ = explain(&result, &Settings::default(), reference);
    }

    #[test]
    fn taf_with_arbitrary_days_never_panics(
        s in "TAF [A-Z]{4} [0-9]{6}Z [0-9]{4}/[0-9]{4}\
              ( (BECMG|TEMPO|FM[0-9]{6}|PROB[0-9]{2}) [0-9]{4}/[0-9]{4}){0,4}"
    ) {
        let reference = date(2024, 1, 31);
        let result = parse(&s, reference);
        let text = explain(&result, &Settings::default(), reference);
        prop_assert!(!text.is_empty());
    }

    #[test]
    fn report_like_input_never_panics(
        s in "(METAR |TAF |SPECI )?([A-Z]{4} )?([0-9]{6}Z )?([A-Z0-9/+-]{2,10}=? ){0,25}"
    ) {
        let reference = date(2024, 2, 29);
        let settings = Settings {
            units: UnitSystem::Imperial,
            true_cardinal_directions: true,
            ..Default::default()
        };
        let decoded = recompute(&s, reference, &settings, reference);
        if decoded.result.groups.is_empty() {
            prop_assert!(decoded.text.is_empty());
        } else {
            prop_assert_eq!(
                decoded.text.matches(LINE_BREAK).count() + 1,
                decoded.result.groups.len()
            );
        }
    }
}
