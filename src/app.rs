//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - resolves the point-in-time anchor
//! - runs the fetch/derive pipeline for a tab's series
//! - prints cards/plots
//! - writes optional exports

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Command, LatestArgs, ReportArgs, Tab};
use crate::data::catalog::{EXCHANGE_RATES, LATEST_DATE_SERIES, RV_INDICATORS, find_series};
use crate::data::{FredClient, ObservationSource};
use crate::domain::{SeriesConfig, format_date_for_api, format_display_date};
use crate::error::AppError;
use crate::report::PlotSize;

pub mod pipeline;
pub mod session;

/// Entry point for the `econ` binary.
pub fn run() -> Result<(), AppError> {
    // We want `econ` and `econ --as-of 2024-01-02` to behave like `econ tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Rates(args) => {
            init_tracing("warn");
            handle_report(args, Tab::Currency)
        }
        Command::Indicators(args) => {
            init_tracing("warn");
            handle_report(args, Tab::Rv)
        }
        Command::Latest(args) => {
            init_tracing("warn");
            handle_latest(args)
        }
        Command::Tui(args) => {
            // Anything written to stderr would tear the alternate screen.
            init_tracing("off");
            crate::tui::run(args)
        }
    }
}

/// Install the global subscriber; `RUST_LOG` overrides `default_directive`.
fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Series shown on a tab.
pub fn tab_series(tab: Tab) -> &'static [SeriesConfig] {
    match tab {
        Tab::Currency => &EXCHANGE_RATES,
        Tab::Rv => &RV_INDICATORS,
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Pick the anchor: the requested date if it is not past the newest published
/// date, otherwise the newest published date itself.
pub fn resolve_anchor(requested: Option<NaiveDate>, latest: NaiveDate) -> Result<NaiveDate, AppError> {
    match requested {
        Some(date) if date > latest => Err(AppError::new(
            2,
            format!(
                "Requested date {} is after the latest available data ({}).",
                format_date_for_api(date),
                format_date_for_api(latest)
            ),
        )),
        Some(date) => Ok(date),
        None => Ok(latest),
    }
}

fn handle_report(args: ReportArgs, tab: Tab) -> Result<(), AppError> {
    let client = FredClient::from_env(args.connection.base_url.as_deref())?;
    let today = today();
    let latest = pipeline::latest_date_or_today(&client, LATEST_DATE_SERIES, today);
    let anchor = resolve_anchor(args.as_of, latest)?;
    info!(tab = tab.title(), anchor = %anchor, "building cards");

    let outcomes = pipeline::run_catalog(&client, tab_series(tab), anchor, args.policy(), today);

    let plot = args.plot.then_some(PlotSize {
        width: args.width,
        height: args.height,
    });
    println!("{}", crate::report::format_tab_header(tab.title(), anchor, Some(latest)));
    for outcome in &outcomes {
        println!("{}", crate::report::format_card(outcome, plot));
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_cards_json(path, anchor, &outcomes)?;
        info!(path = %path.display(), "wrote export");
    }

    if !outcomes.is_empty() && outcomes.iter().all(|o| o.result.is_err()) {
        return Err(AppError::new(4, "No series could be loaded."));
    }
    Ok(())
}

fn handle_latest(args: LatestArgs) -> Result<(), AppError> {
    if find_series(&args.series).is_none() {
        warn!(series_id = %args.series, "series is not part of the dashboard catalog");
    }
    let client = FredClient::from_env(args.connection.base_url.as_deref())?;
    print_latest(&client, &args.series, today())
}

fn print_latest(source: &dyn ObservationSource, series_id: &str, today: NaiveDate) -> Result<(), AppError> {
    match pipeline::resolve_latest_date(source, series_id, today) {
        Ok(date) => {
            println!("{series_id}: {} ({})", format_date_for_api(date), format_display_date(date));
            Ok(())
        }
        Err(err) if err.is_no_data() => {
            warn!(series_id, error = %err, "no recent data");
            println!(
                "{series_id}: no data in the last 30 days; using today {}",
                format_date_for_api(today)
            );
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Rewrite argv so `econ` defaults to `econ tui`.
///
/// Rules:
/// - `econ`                       -> `econ tui`
/// - `econ --as-of 2024-01-02`    -> `econ tui --as-of 2024-01-02`
/// - `econ --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "rates" | "indicators" | "latest" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["econ"])), argv(&["econ", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["econ", "--tab", "rv"])),
            argv(&["econ", "tui", "--tab", "rv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["econ", "rates"])), argv(&["econ", "rates"]));
        assert_eq!(rewrite_args(argv(&["econ", "--help"])), argv(&["econ", "--help"]));
    }

    #[test]
    fn anchor_cannot_pass_latest_data() {
        let latest = d(2024, 3, 12);
        assert_eq!(resolve_anchor(None, latest).unwrap(), latest);
        assert_eq!(resolve_anchor(Some(d(2024, 1, 2)), latest).unwrap(), d(2024, 1, 2));
        assert_eq!(resolve_anchor(Some(d(2024, 3, 13)), latest).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn tabs_map_to_catalogs() {
        assert_eq!(tab_series(Tab::Currency).len(), 2);
        assert_eq!(tab_series(Tab::Rv).len(), 6);
    }
}
