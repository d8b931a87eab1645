//! fetchplan library interface
//!
//! Resolves curl-style command lines, directive files and URL globs into a
//! plan of fetch operations without performing any transfer.
//!
//! # Module Organization
//!
//! - [`options`] - Option table and argument value parsers
//! - [`resolver`] - Applies flags and directives to the plan
//! - [`directives`] - Directive-file (`.curlrc`, `-K`) parsing
//! - [`glob`] - URL pattern expansion
//! - [`operation`] - The plan model (GlobalConfig, OperationConfig)
//! - [`output`] - Text and JSON rendering of a plan
//! - [`errors`] - Error types (PlanError, Result)
//! - [`status`] - Exit status codes (ExitStatus)

pub mod cli;
pub mod config;
pub mod context;
pub mod directives;
pub mod errors;
pub mod fs;
pub mod glob;
pub mod http;
pub mod logging;
pub mod operation;
pub mod options;
pub mod output;
pub mod resolver;
pub mod status;

pub use errors::{PlanError, Result};
pub use operation::{GlobalConfig, OperationConfig};
pub use resolver::Resolver;
