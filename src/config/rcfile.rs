//! Default directive file discovery

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::context::Environment;

/// Directories searched for a default directive file, in priority order
pub fn candidate_dirs(env: &Environment) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(curl_home) = &env.curl_home {
        dirs.push(curl_home.clone());
    }
    if let Some(config_home) = env.xdg_config_home.as_ref().or(env.config_dir.as_ref()) {
        dirs.push(config_home.join("curl"));
    }
    if let Some(home) = &env.home {
        dirs.push(home.clone());
    }
    if let Some(profile) = &env.userprofile {
        if !dirs.contains(profile) {
            dirs.push(profile.clone());
        }
    }

    dirs
}

/// File names a default directive file may have on this platform
pub fn rc_names() -> &'static [&'static str] {
    if cfg!(windows) {
        &[".curlrc", "_curlrc"]
    } else {
        &[".curlrc"]
    }
}

/// First existing default directive file, if any
pub fn find_rc_file(env: &Environment) -> Option<PathBuf> {
    candidate_dirs(env)
        .iter()
        .find_map(|dir| find_in_dir(dir))
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    rc_names().iter().map(|name| dir.join(name)).find(|path| {
        let found = path.is_file();
        debug!(path = %path.display(), found, "checked for directive file");
        found
    })
}
