//! Static series catalog.
//!
//! Exchange rates back the currency tab; the indicator list backs the RV
//! industry tab (consumer confidence, financing costs, fuel, jobs, vehicle demand).

use crate::domain::{SeriesConfig, SeriesKind};

/// Canada / U.S. foreign exchange rate (CAD per USD).
pub const SERIES_CAD_USD: &str = "DEXCAUS";
/// U.S. / Euro foreign exchange rate (USD per EUR).
pub const SERIES_EUR_USD: &str = "DEXUSEU";

/// Series used to resolve the newest published date.
pub const LATEST_DATE_SERIES: &str = SERIES_CAD_USD;

pub const EXCHANGE_RATES: [SeriesConfig; 2] = [
    SeriesConfig {
        series_id: SERIES_CAD_USD,
        name: "CAD - USD Exchange Rates",
        short_name: "CAD-USD",
        description: "Canadian dollars to one U.S. dollar, noon buying rates in New York.",
        unit: "CAD per USD",
        decimals: 4,
        source_name: "Exchange Rates.org",
        source_url: "https://exchange-rates.org",
        invert: false,
        kind: SeriesKind::ExchangeRate,
    },
    SeriesConfig {
        series_id: SERIES_EUR_USD,
        name: "EUR - USD Exchange Rate",
        short_name: "EUR-USD",
        description: "U.S. dollars to one euro, noon buying rates in New York.",
        unit: "USD per EUR",
        decimals: 4,
        source_name: "European Central Bank (ECB)",
        source_url: "https://data.ecb.europa.eu/main-figures/ecb-interest-rates-and-exchange-rates/exchange-rates",
        invert: false,
        kind: SeriesKind::ExchangeRate,
    },
];

pub const RV_INDICATORS: [SeriesConfig; 6] = [
    SeriesConfig {
        series_id: "UMCSENT",
        name: "Consumer Sentiment",
        short_name: "Consumer Sentiment",
        description: "University of Michigan index of consumer sentiment; discretionary purchases track it closely.",
        unit: "Index",
        decimals: 1,
        source_name: "University of Michigan",
        source_url: "https://fred.stlouisfed.org/series/UMCSENT",
        invert: false,
        kind: SeriesKind::Indicator,
    },
    SeriesConfig {
        series_id: "MORTGAGE30US",
        name: "30-Year Fixed Mortgage Rate",
        short_name: "Mortgage Rate",
        description: "Average 30-year fixed mortgage rate; a proxy for long-term consumer financing costs.",
        unit: "%",
        decimals: 2,
        source_name: "Freddie Mac",
        source_url: "https://fred.stlouisfed.org/series/MORTGAGE30US",
        invert: true,
        kind: SeriesKind::Indicator,
    },
    SeriesConfig {
        series_id: "DPRIME",
        name: "Bank Prime Loan Rate",
        short_name: "Prime Rate",
        description: "Prime rate charged by banks; RV loans and dealer floor plans are priced off it.",
        unit: "%",
        decimals: 2,
        source_name: "Board of Governors of the Federal Reserve System",
        source_url: "https://fred.stlouisfed.org/series/DPRIME",
        invert: true,
        kind: SeriesKind::Indicator,
    },
    SeriesConfig {
        series_id: "GASREGW",
        name: "Regular Gasoline Price",
        short_name: "Gas Price",
        description: "U.S. regular all formulations retail gas price; fuel cost weighs on RV usage.",
        unit: "$/gal",
        decimals: 3,
        source_name: "U.S. Energy Information Administration",
        source_url: "https://fred.stlouisfed.org/series/GASREGW",
        invert: true,
        kind: SeriesKind::Indicator,
    },
    SeriesConfig {
        series_id: "UNRATE",
        name: "Unemployment Rate",
        short_name: "Unemployment",
        description: "Civilian unemployment rate; household income security drives big-ticket purchases.",
        unit: "%",
        decimals: 1,
        source_name: "U.S. Bureau of Labor Statistics",
        source_url: "https://fred.stlouisfed.org/series/UNRATE",
        invert: true,
        kind: SeriesKind::Indicator,
    },
    SeriesConfig {
        series_id: "TOTALSA",
        name: "Total Vehicle Sales",
        short_name: "Vehicle Sales",
        description: "Seasonally adjusted annual rate of light vehicle sales; a read on motor-vehicle demand.",
        unit: "M units",
        decimals: 2,
        source_name: "U.S. Bureau of Economic Analysis",
        source_url: "https://fred.stlouisfed.org/series/TOTALSA",
        invert: false,
        kind: SeriesKind::Indicator,
    },
];

/// Look up a catalog entry by FRED series id.
pub fn find_series(series_id: &str) -> Option<&'static SeriesConfig> {
    EXCHANGE_RATES
        .iter()
        .chain(RV_INDICATORS.iter())
        .find(|c| c.series_id.eq_ignore_ascii_case(series_id))
}
