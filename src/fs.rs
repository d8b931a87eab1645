//! Filesystem collaborators
//!
//! Reading directive files happens here, outside the resolver, which only
//! sees the [`DirectiveLoader`] seam.

use std::io::{self, Read};

use crate::resolver::DirectiveLoader;

/// Loads `-K/--config` files from disk, `-` meaning standard input
///
/// Bytes that are not UTF-8 are replaced rather than failing the read, so a
/// Latin-1 comment does not make the whole file unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DirectiveLoader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        let bytes = if path == "-" {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            bytes
        } else {
            std::fs::read(path)?
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Last component of a path, split on either slash flavour
pub fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// File name a `--remote-name` transfer of `url` would write to
pub fn remote_file_name(url: &str) -> Option<String> {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);
    // Only the part after the host names a file
    let path = path.find('/').map(|pos| &path[pos..])?;
    let name = basename(path);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
