use clap::error::ErrorKind;
use clap::Parser;

use fetchplan::cli::{self, Args};
use fetchplan::context::Environment;
use fetchplan::logging;
use fetchplan::status::ExitStatus;

/// Entry point
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    let env = Environment::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitStatus::Success,
                _ => ExitStatus::Error,
            };
        }
    };

    logging::init(args.log_format.unwrap_or_default(), env.debug);
    cli::run(args, &env)
}
