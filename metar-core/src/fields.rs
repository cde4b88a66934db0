//! Decoders for pre-split report fields, as delivered by data feeds that
//! publish METAR observations as separate values (wind direction, speed,
//! visibility in statute miles, altimeter in inHg, cloud layers as
//! `AMOUNT,HEIGHT[,TYPE]`).

use chrono::DateTime;

use crate::config::Settings;
use crate::explain::LINE_BREAK;
use crate::format;
use crate::group::{CloudAmount, WeatherPhenomena};
use crate::value::{Distance, Pressure, Temperature};

/// `2024-03-12T12:50:00Z` → `Tue March 12 2024 12:50 UTC`.
pub fn decode_time(time: &str) -> String {
    match DateTime::parse_from_rfc3339(time.trim()) {
        Ok(t) => t.naive_utc().format("%a %B %-d %Y %H:%M UTC").to_string(),
        Err(_) => format!("{time}: {}", format::NOT_RECOGNISED),
    }
}

/// Direction `0` with a non-zero speed is variable wind.
pub fn decode_wind(direction: &str, speed: &str, gust: &str) -> String {
    let (direction, speed, gust) = (direction.trim(), speed.trim(), gust.trim());
    let mut text = if direction == "0" {
        if speed == "0" {
            return "calm".to_string();
        }
        "variable".to_string()
    } else {
        format!("from {direction}°")
    };
    text.push_str(&format!(" at {speed} kt"));
    if !gust.is_empty() && gust != "0" {
        text.push_str(&format!(", gusty {gust} kt"));
    }
    text
}

/// Visibility in statute miles, given in whole kilometres.
pub fn decode_vis(miles: &str) -> String {
    let trimmed = miles.trim();
    let (digits, more) = match trimmed.strip_suffix('+') {
        Some(d) => (d, true),
        None => (trimmed, false),
    };
    match digits.parse::<f64>() {
        Ok(m) if m.is_finite() && m >= 0.0 => {
            let km = (Distance::statute_miles(m).to_meters() / 1000.0).round() as i64;
            format!("{}{km} km", if more { "more than " } else { "" })
        }
        _ => format::NOT_RECOGNISED.to_string(),
    }
}

pub fn decode_temp(celsius: &str) -> String {
    match celsius.trim().parse::<f64>() {
        Ok(c) if c.is_finite() => {
            format::temperature(&Temperature::celsius(c), &Settings::default())
        }
        _ => format::NOT_RECOGNISED.to_string(),
    }
}

/// Altimeter setting in inHg, given as QNH in hPa.
pub fn decode_qnh(inhg: &str) -> String {
    match inhg.trim().parse::<f64>() {
        Ok(p) if p.is_finite() => format::pressure(&Pressure::inches_hg(p), &Settings::default()),
        _ => format::NOT_RECOGNISED.to_string(),
    }
}

/// Space-separated weather codes: `-SHRA BR` → `light showers of rain, mist`.
/// Codes that cannot be decoded are kept as they are.
pub fn decode_wx(codes: &str) -> String {
    codes
        .split_whitespace()
        .map(|code| match code {
            "NSW" => "No significant weather".to_string(),
            _ => WeatherPhenomena::parse(code)
                .map(|wp| format::weather_phenomena(&wp))
                .unwrap_or_else(|| code.to_string()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn layer_amount(code: &str) -> String {
    let amount = match code {
        "FEW" => CloudAmount::Few,
        "SCT" => CloudAmount::Scattered,
        "BKN" => CloudAmount::Broken,
        "OVC" => CloudAmount::Overcast,
        "NSC" => CloudAmount::NoSignificantClouds,
        "SKC" => CloudAmount::SkyClear,
        "CLR" => return "Clear".to_string(),
        "CAVOK" => return "Ceiling and visibility OK".to_string(),
        "OVX" | "OVCX" => return "Obscured".to_string(),
        other => return other.to_string(),
    };
    format::cloud_amount(amount).to_string()
}

fn layer_type(code: &str) -> String {
    match code {
        "CB" => "Cumulonimbus".to_string(),
        "TCU" => "Towering cumulus".to_string(),
        "CU" => "Cumulus".to_string(),
        other => other.to_string(),
    }
}

/// Cloud layers stored bottom to top as `AMOUNT,HEIGHT[,TYPE]`, rendered top
/// to bottom: `Broken clouds at 3000 ft AGL<br>Few Cumulus at 1200 ft AGL`.
pub fn decode_clouds<S: AsRef<str>>(layers: &[S]) -> String {
    layers
        .iter()
        .rev()
        .map(|layer| {
            let fields: Vec<&str> = layer.as_ref().split(',').map(str::trim).collect();
            let mut text = layer_amount(fields[0]);
            if let Some(height) = fields.get(1) {
                match fields.get(2) {
                    Some(kind) => text.push_str(&format!(" {}", layer_type(kind))),
                    None => text.push_str(" clouds"),
                }
                text.push_str(&format!(" at {height} ft AGL"));
            }
            text
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}
