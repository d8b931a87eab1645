//! Turning parsed CLI arguments into a resolved plan
//!
//! Order of application: the default directive file (unless disabled), then
//! the flags configured in `config.toml`, then the command line.

use tracing::debug;

use crate::cli::args::Args;
use crate::config::{find_rc_file, merge_default_options, Config};
use crate::context::Environment;
use crate::errors::{PlanError, Result};
use crate::fs::FsLoader;
use crate::operation::GlobalConfig;
use crate::options::Registry;
use crate::output::{render, RenderOptions};
use crate::resolver::{DirectiveLoader, Resolver};
use crate::status::ExitStatus;

/// Resolve everything the invocation names into a [`GlobalConfig`]
pub fn build_plan(
    args: &Args,
    env: &Environment,
    loader: &dyn DirectiveLoader,
) -> Result<GlobalConfig> {
    let config = Config::load(env)?;
    let registry = Registry::builtin();
    let mut resolver = Resolver::new(&registry, loader).with_url_limit(config.max_urls);

    if args.rc_disabled() {
        debug!("default directive file disabled");
    } else if let Some(path) = find_rc_file(env) {
        let name = path.display().to_string();
        debug!(path = %name, "reading default directive file");
        let text = loader
            .load(&path.to_string_lossy())
            .map_err(|cause| PlanError::MalformedConfigRead {
                path: name.clone(),
                cause,
            })?;
        resolver.apply_text(&text, &name)?;
    }

    let merged = merge_default_options(args.directives.clone(), &config);
    resolver.resolve(&merged)?;

    let global = resolver.finish();
    debug!(operations = global.len(), "plan resolved");
    Ok(global)
}

/// Build and print the plan, reporting failures on stderr
pub fn run(args: Args, env: &Environment) -> ExitStatus {
    let plan = build_plan(&args, env, &FsLoader).and_then(|global| {
        render(
            &global,
            RenderOptions {
                format: args.plan_format,
                color: env.stdout_isatty,
                width: env.columns,
            },
        )
    });

    match plan {
        Ok(text) => {
            print!("{text}");
            ExitStatus::Success
        }
        Err(err) => {
            eprintln!("{}: {err}", env.program_name);
            ExitStatus::from_error(&err)
        }
    }
}
