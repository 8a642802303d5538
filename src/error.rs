use thiserror::Error;

/// Process-level error carrying the exit code `main` should return.
///
/// Exit codes:
/// - `2`: configuration / usage problems (bad flags, missing env, bad paths)
/// - `4`: data or runtime failures (FRED errors, terminal errors)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        let code = match err {
            SeriesError::InvalidRange { .. } => 2,
            _ => 4,
        };
        AppError::new(code, err.to_string())
    }
}

/// Failure of a single series computation.
///
/// These never escape a fan-out: each series carries its own `Result`, so one
/// failing indicator cannot take its siblings down with it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// Transport failure or a non-success HTTP status. `status` is `None` when
    /// no response was received at all.
    #[error("FRED request for {series_id} failed{}: {message}", fmt_status(.status))]
    Fetch {
        series_id: String,
        status: Option<u16>,
        message: String,
    },

    /// The request succeeded but nothing usable survived filtering.
    #[error("No data available for {series_id}: {detail}")]
    NoData { series_id: String, detail: String },

    /// A non-sentinel observation that is not a valid date/number.
    #[error("Malformed FRED observation: {detail}")]
    Parse { detail: String },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },
}

impl SeriesError {
    pub fn fetch(series_id: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        SeriesError::Fetch {
            series_id: series_id.to_string(),
            status,
            message: message.into(),
        }
    }

    pub fn no_data(series_id: &str, detail: impl Into<String>) -> Self {
        SeriesError::NoData {
            series_id: series_id.to_string(),
            detail: detail.into(),
        }
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        SeriesError::Parse {
            detail: detail.into(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, SeriesError::NoData { .. })
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {code}"),
        None => String::new(),
    }
}
