//! CLI argument definitions using clap
//!
//! fetchplan's own options come first; every token after them is handed to
//! the directive resolver untouched.

use clap::{ArgAction, Parser, ValueEnum};

/// fetchplan - resolve curl-style flags, config files and URL globs into a fetch plan
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fetchplan",
    version,
    about,
    after_help = "Directives use curl's flag syntax, e.g.\n  fetchplan -L -o 'page_#1.html' 'https://example.com/[1-3]'"
)]
#[command(disable_help_flag = true, disable_version_flag = true)] // -h and -V are directives
pub struct Args {
    /// Print help information
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Print version information
    #[arg(long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// How to print the resolved plan
    #[arg(long = "plan-format", value_name = "FORMAT", value_enum, default_value_t = PlanFormat::Text)]
    pub plan_format: PlanFormat,

    /// Output format for diagnostic logs on stderr: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Do not read the default directive file (.curlrc)
    #[arg(long = "no-rc", action = ArgAction::SetTrue)]
    pub no_rc: bool,

    /// curl-style flags, URLs and URL patterns
    #[arg(
        value_name = "DIRECTIVE",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub directives: Vec<String>,
}

/// Plan rendering
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    /// One block per operation (default)
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Log format for structured output (CI/CD)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

impl Args {
    /// Whether the directives start with `-q`/`--disable`, which skips the
    /// default directive file the way curl does
    pub fn rc_disabled(&self) -> bool {
        self.no_rc
            || matches!(
                self.directives.first().map(String::as_str),
                Some("-q") | Some("--disable")
            )
    }
}
