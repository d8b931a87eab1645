//! Directive files
//!
//! A directive file (`.curlrc` and friends) holds one option per line:
//!
//! ```text
//! # comment
//! --location
//! user-agent = "fetchplan/1.0"
//! output: page.html
//! ```
//!
//! Parsing never fails on content; unknown options and bad arguments are
//! only discovered when the directives are applied by the resolver.

mod parser;

pub use parser::unslash_quote;

/// One option line read from a directive file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Option as written, with or without leading dashes
    pub option: String,
    pub parameter: Option<String>,
    /// 1-based line number in the source
    pub line: usize,
}

impl Directive {
    /// The option in flag form: bare names gain a `--` prefix
    pub fn flag(&self) -> String {
        if self.option.starts_with('-') {
            self.option.clone()
        } else {
            format!("--{}", self.option)
        }
    }
}

/// Parse directive text
pub fn parse_directives(text: &str) -> Vec<Directive> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(parser::parse_line(line, index + 1))
        })
        .collect()
}
