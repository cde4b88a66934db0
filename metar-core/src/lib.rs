//! Core library for the `metar` CLI.
//!
//! This crate defines:
//! - A typed model of METAR, SPECI and TAF report groups
//! - The tokenizer and report-part state machine that builds it
//! - Report classification and error selection
//! - Plain-language rendering, with units and wording taken from [`Settings`]
//!
//! It is used by `metar-cli`, but can also be reused by other binaries or services.
//!
//! ```
//! use chrono::NaiveDate;
//! use metar_core::{Settings, recompute};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
//! let report = "METAR EGLL 121250Z 27010KT 9999 Q1013";
//! let decoded = recompute(report, date, &Settings::default(), date);
//! assert!(!decoded.has_parse_error());
//! assert!(decoded.text.contains("QNH 1013 hPa"));
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod explain;
pub mod fields;
pub mod format;
pub mod group;
pub mod parser;
pub mod report;
pub mod value;

pub use classify::{ReportKind, ReportMetadata};
pub use config::{Settings, UnitSystem};
pub use error::{ErrorKind, ErrorPolicy, ReportError};
pub use explain::{LINE_BREAK, explain};
pub use group::{Group, GroupInfo, ReportPart};
pub use parser::{ParseResult, parse, parse_with_policy};
pub use report::{Decoded, FlightCategory, WeatherReport, recompute};
pub use value::Value;
