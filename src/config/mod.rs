//! Tool configuration and default directive files

mod config;
pub mod rcfile;

pub use config::{merge_default_options, Config};
pub use rcfile::find_rc_file;
