//! Environment snapshot

use std::env;
use std::path::PathBuf;

/// The parts of the process environment fetchplan consults, read once at
/// startup so everything downstream can be exercised with a fixed value
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// `CURL_HOME`
    pub curl_home: Option<PathBuf>,
    /// `XDG_CONFIG_HOME`
    pub xdg_config_home: Option<PathBuf>,
    /// Platform config directory, used when `XDG_CONFIG_HOME` is unset
    pub config_dir: Option<PathBuf>,
    /// `HOME`, or the platform's notion of it
    pub home: Option<PathBuf>,
    /// `USERPROFILE`
    pub userprofile: Option<PathBuf>,
    /// `FETCHPLAN_CONFIG_DIR`
    pub tool_config_dir: Option<PathBuf>,
    /// Terminal width from `COLUMNS`
    pub columns: Option<usize>,
    /// `FETCHPLAN_DEBUG` is set
    pub debug: bool,
    pub stdout_isatty: bool,
    pub program_name: String,
}

impl Environment {
    /// Snapshot the current process environment
    pub fn init() -> Self {
        Self {
            curl_home: path_var("CURL_HOME"),
            xdg_config_home: path_var("XDG_CONFIG_HOME"),
            config_dir: dirs::config_dir(),
            home: path_var("HOME").or_else(home::home_dir),
            userprofile: path_var("USERPROFILE"),
            tool_config_dir: path_var("FETCHPLAN_CONFIG_DIR"),
            columns: env::var("COLUMNS").ok().and_then(|c| c.trim().parse().ok()),
            debug: env::var_os("FETCHPLAN_DEBUG").is_some(),
            stdout_isatty: atty::is(atty::Stream::Stdout),
            program_name: "fetchplan".to_string(),
        }
    }

    /// Directory holding `config.toml`
    pub fn tool_config_dir(&self) -> PathBuf {
        self.tool_config_dir.clone().unwrap_or_else(|| {
            self.config_dir
                .as_ref()
                .map(|p| p.join("fetchplan"))
                .unwrap_or_else(|| PathBuf::from(".fetchplan"))
        })
    }
}

/// A non-empty environment variable as a path
fn path_var(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
