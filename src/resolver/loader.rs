//! Where `--config` files come from

use std::collections::HashMap;
use std::io;

/// Supplies the text of directive files named by `-K/--config`
pub trait DirectiveLoader {
    fn load(&self, path: &str) -> io::Result<String>;
}

/// Serves directive files from memory, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl DirectiveLoader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}
