//! Error types for fetchplan

use thiserror::Error;

/// Main error type for directive resolution
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("option {option}: is unknown")]
    UnknownOption { option: String },

    #[error("option {option}: is ambiguous (could be {})", .candidates.join(", "))]
    AmbiguousOption {
        option: String,
        candidates: Vec<String>,
    },

    #[error("option {option}: requires parameter")]
    RequiresArgument { option: String },

    #[error("option {option}: {reason} (got '{value}')")]
    BadArgument {
        option: String,
        value: String,
        reason: String,
    },

    #[error("option {option}: cannot be combined with --{conflicts_with}")]
    ConflictingOption {
        option: String,
        conflicts_with: String,
    },

    #[error("unmatched brace at position {position} in URL pattern '{pattern}'")]
    UnmatchedBrace { pattern: String, position: usize },

    #[error("unmatched bracket at position {position} in URL pattern '{pattern}'")]
    UnmatchedBracket { pattern: String, position: usize },

    #[error("bad range '[{range}]' in URL pattern '{pattern}'")]
    InvalidRangeFormat { pattern: String, range: String },

    #[error("bad numeric range {low}-{high} in URL pattern '{pattern}': start is larger than end")]
    InvalidNumericRange {
        pattern: String,
        low: i64,
        high: i64,
    },

    #[error("bad character range {low}-{high} in URL pattern '{pattern}': start is larger than end")]
    InvalidCharRange {
        pattern: String,
        low: char,
        high: char,
    },

    #[error("URL pattern '{pattern}' expands to {count} URLs, more than the limit of {limit}")]
    TooManyUrls {
        pattern: String,
        count: usize,
        limit: usize,
    },

    #[error("error reading config from {path}: {cause}")]
    MalformedConfigRead {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("config file {path}: nested more than {limit} levels deep")]
    ConfigNesting { path: String, limit: usize },

    #[error("{source_name}:{line}: {inner}")]
    InDirective {
        source_name: String,
        line: usize,
        #[source]
        inner: Box<PlanError>,
    },

    #[error("option table defines '{name}' more than once")]
    DuplicateOption { name: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    /// The error with any directive-location wrappers peeled off
    pub fn root(&self) -> &PlanError {
        match self {
            PlanError::InDirective { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Whether the error comes from the directives themselves rather than
    /// from the environment the tool runs in
    pub fn is_directive_error(&self) -> bool {
        !matches!(
            self.root(),
            PlanError::Config(_)
                | PlanError::Io(_)
                | PlanError::Json(_)
                | PlanError::MalformedConfigRead { .. }
                | PlanError::DuplicateOption { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
