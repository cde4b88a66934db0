use std::io::{self, IsTerminal};

use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select};
use metar_core::{LINE_BREAK, Settings, UnitSystem, recompute};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metar", version, about = "Decode METAR and TAF reports into plain language")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose units, direction style and error priority, and save them.
    Configure,

    /// Decode a report.
    Decode {
        /// Report text; read from stdin when absent.
        #[arg(trailing_var_arg = true)]
        report: Vec<String>,

        /// Date the report belongs to (YYYY-MM-DD); defaults to the current UTC date.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Date used for "today"/"tomorrow" wording; defaults to the current UTC date.
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Unit system for this run: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,

        /// Give directions as compass points instead of degrees.
        #[arg(long)]
        cardinal: bool,

        /// Print the parse result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Decode {
                report,
                date,
                today,
                units,
                cardinal,
                json,
            } => {
                let mut settings = Settings::load()?;
                if let Some(units) = units {
                    settings.units = UnitSystem::try_from(units.as_str())?;
                }
                if cardinal {
                    settings.true_cardinal_directions = true;
                }

                let raw = if report.is_empty() {
                    read_stdin()?
                } else {
                    report.join(" ")
                };
                let now = Utc::now().date_naive();
                let reference = date.unwrap_or(now);
                let today = today.unwrap_or(now);
                debug!(%reference, %today, units = %settings.units, "decoding report");

                let decoded = recompute(&raw, reference, &settings, today);
                if json {
                    let out = serde_json::to_string_pretty(&decoded)
                        .context("Failed to serialize report to JSON")?;
                    println!("{out}");
                } else {
                    println!("{}", decoded.text.replace(LINE_BREAK, "\n"));
                }
                if let Some(error) = &decoded.result.metadata.error {
                    eprintln!("Warning: {error}");
                }
                Ok(())
            }
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No report given. Pass it as arguments or pipe it to stdin.");
    }
    io::read_to_string(stdin).context("Failed to read report from stdin")
}

fn configure() -> anyhow::Result<()> {
    let mut settings = Settings::load()?;

    let units = UnitSystem::all().to_vec();
    let cursor = units.iter().position(|u| *u == settings.units).unwrap_or(0);
    settings.units = Select::new("Unit system:", units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read unit system")?;

    let prompt = "Give directions as compass points (W) instead of degrees (270°)?";
    settings.true_cardinal_directions = Confirm::new(prompt)
        .with_default(settings.true_cardinal_directions)
        .prompt()
        .context("Failed to read direction style")?;

    let kinds = settings.error_policy.precedence.clone();
    let top = Select::new("Report error to show first when several are found:", kinds)
        .prompt()
        .context("Failed to read error priority")?;
    settings.prioritize_error(top);

    settings.save()?;
    println!("Settings saved to {}", Settings::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use metar_core::ErrorKind;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decode_arguments() {
        let cli = Cli::try_parse_from([
            "metar",
            "decode",
            "--date",
            "2024-03-12",
            "--units",
            "imperial",
            "METAR",
            "EGLL",
            "121250Z",
        ])
        .expect("valid arguments");
        match cli.command {
            Command::Decode {
                report,
                date,
                units,
                cardinal,
                json,
                ..
            } => {
                assert_eq!(report, vec!["METAR", "EGLL", "121250Z"]);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 12));
                assert_eq!(units.as_deref(), Some("imperial"));
                assert!(!cardinal && !json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["metar", "decode", "--date", "12/03/2024", "KJFK"]).is_err());
    }

    #[test]
    fn error_kinds_are_selectable() {
        assert_eq!(ErrorKind::all().len(), Settings::default().error_policy.precedence.len());
    }
}
