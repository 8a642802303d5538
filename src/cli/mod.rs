//! Command-line parsing for the FRED economic dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetch/derive code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::MissingDataPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "econ", version, about = "Economic Data Dashboard (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print CAD-USD and EUR-USD exchange-rate cards.
    Rates(ReportArgs),
    /// Print the RV industry indicator cards.
    Indicators(ReportArgs),
    /// Print the most recent date with published data.
    Latest(LatestArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same fetch/derive pipeline as `econ rates` and
    /// `econ indicators`, but renders cards and charts using Ratatui.
    Tui(TuiArgs),
}

/// Where to send API requests.
#[derive(Debug, Args, Clone)]
pub struct ConnectionArgs {
    /// API root (defaults to FRED_BASE_URL, then https://api.stlouisfed.org/fred).
    ///
    /// Point this at a forwarding proxy (e.g. http://localhost:7071/api/fred)
    /// to keep the API key server-side.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Options shared by the card-printing commands.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Point-in-time anchor (YYYY-MM-DD). Defaults to the latest published date.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Show 0 instead of failing when a window has no data.
    #[arg(long)]
    pub allow_missing: bool,

    /// Render an ASCII plot per chart window.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Export cards (metrics + chart windows) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

impl ReportArgs {
    pub fn policy(&self) -> MissingDataPolicy {
        policy_from_flag(self.allow_missing)
    }
}

/// Options for the latest-date lookup.
#[derive(Debug, Args, Clone)]
pub struct LatestArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Series to inspect.
    #[arg(long, default_value = crate::data::catalog::LATEST_DATE_SERIES)]
    pub series: String,
}

/// Options for the TUI.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Initial point-in-time anchor (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Show 0 instead of failing when a window has no data.
    #[arg(long)]
    pub allow_missing: bool,

    /// Tab to open on.
    #[arg(long, value_enum, default_value_t = Tab::Currency)]
    pub tab: Tab,
}

impl TuiArgs {
    pub fn policy(&self) -> MissingDataPolicy {
        policy_from_flag(self.allow_missing)
    }
}

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    /// Currency exchange rates.
    Currency,
    /// RV industry indicators.
    Rv,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Currency => "Currency Exchange Rates",
            Tab::Rv => "RV Industry Indicators",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Currency => Tab::Rv,
            Tab::Rv => Tab::Currency,
        }
    }
}

fn policy_from_flag(allow_missing: bool) -> MissingDataPolicy {
    if allow_missing {
        MissingDataPolicy::ZeroDefault
    } else {
        MissingDataPolicy::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_parse() {
        let cli = Cli::parse_from([
            "econ",
            "rates",
            "--as-of",
            "2024-01-02",
            "--allow-missing",
            "--plot",
            "--base-url",
            "http://localhost:7071/api/fred",
        ]);
        let Command::Rates(args) = cli.command else {
            panic!("expected rates");
        };
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(args.policy(), MissingDataPolicy::ZeroDefault);
        assert!(args.plot);
        assert_eq!(args.connection.base_url.as_deref(), Some("http://localhost:7071/api/fred"));
    }

    #[test]
    fn bad_dates_are_rejected() {
        assert!(Cli::try_parse_from(["econ", "indicators", "--as-of", "01/02/2024"]).is_err());
    }

    #[test]
    fn latest_defaults_to_cad_series() {
        let cli = Cli::parse_from(["econ", "latest"]);
        let Command::Latest(args) = cli.command else {
            panic!("expected latest");
        };
        assert_eq!(args.series, "DEXCAUS");
    }

    #[test]
    fn tabs_cycle() {
        assert_eq!(Tab::Currency.next(), Tab::Rv);
        assert_eq!(Tab::Rv.next(), Tab::Currency);
    }
}
