//! CLI argument parsing and processing

pub mod args;
pub mod process;

pub use args::{Args, LogFormat, PlanFormat};
pub use process::{build_plan, run};
