//! The operation arena shared by every directive source

use serde::Serialize;
use tracing::{debug, trace};

use super::config::{OperationConfig, UrlConfig};
use crate::errors::{PlanError, Result};
use crate::glob::{self, GlobMatch};

/// Owns every operation of a resolution pass.
///
/// Operations live in an index-addressed arena. The last one is the
/// current operation; earlier ones are closed and only reachable through
/// shared references.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalConfig {
    pub verbose: bool,
    pub silent: bool,
    pub show_error: bool,
    operations: Vec<OperationConfig>,
    #[serde(skip)]
    current: usize,
    #[serde(skip)]
    max_urls: Option<usize>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            silent: false,
            show_error: false,
            operations: vec![OperationConfig::new()],
            current: 0,
            max_urls: None,
        }
    }
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of URLs a single operation may hold
    pub fn with_url_limit(mut self, limit: Option<usize>) -> Self {
        self.max_urls = limit;
        self
    }

    pub fn url_limit(&self) -> Option<usize> {
        self.max_urls
    }

    pub fn head(&self) -> &OperationConfig {
        &self.operations[0]
    }

    /// The operation directives currently apply to
    pub fn current(&self) -> &OperationConfig {
        &self.operations[self.current]
    }

    pub fn current_mut(&mut self) -> &mut OperationConfig {
        &mut self.operations[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn operations(&self) -> &[OperationConfig] {
        &self.operations
    }

    pub fn get(&self, index: usize) -> Option<&OperationConfig> {
        self.operations.get(index)
    }

    /// The operation before `index`, if any
    pub fn previous(&self, index: usize) -> Option<&OperationConfig> {
        index.checked_sub(1).and_then(|i| self.operations.get(i))
    }

    /// The operation after `index`, if any
    pub fn following(&self, index: usize) -> Option<&OperationConfig> {
        self.operations.get(index + 1)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Close the current operation and start a fresh one
    pub fn next_operation(&mut self) -> usize {
        self.operations.push(OperationConfig::new());
        self.current = self.operations.len() - 1;
        debug!(operation = self.current, "started next operation");
        self.current
    }

    /// Append the URLs a token stands for to the current operation.
    ///
    /// The first pending placeholder (an entry created by an output flag
    /// before any URL) is replaced by the expansion, passing its routing on
    /// to every expanded entry. Returns the number of entries added.
    pub fn add_url(&mut self, token: &str) -> Result<usize> {
        let limit = self.max_urls;
        let op = &mut self.operations[self.current];
        let no_glob = op.glob_off;

        let segments = if no_glob {
            None
        } else {
            Some(glob::parse_pattern(token)?)
        };

        if let Some(limit) = limit {
            let added = segments.as_deref().map_or(1, glob::segment_count);
            let count = op.targets().count().saturating_add(added);
            if count > limit {
                return Err(PlanError::TooManyUrls {
                    pattern: token.to_string(),
                    count,
                    limit,
                });
            }
        }

        let found = match &segments {
            Some(segments) => glob::expand_segments(segments),
            None => vec![GlobMatch::verbatim(token)],
        };

        let slot = op.urls.iter().position(|u| !u.is_set());
        let placeholder = slot.map(|i| op.urls[i].clone());
        let entries: Vec<UrlConfig> = found
            .into_iter()
            .map(|m| UrlConfig::resolved(m, placeholder.as_ref(), no_glob, op.remote_name_all))
            .collect();
        let added = entries.len();

        match slot {
            Some(i) => {
                op.urls.splice(i..=i, entries);
            }
            None => op.urls.extend(entries),
        }

        trace!(pattern = token, added, operation = self.current, "added URL entries");
        Ok(added)
    }

    /// Route output of the most recent entry to `name`
    pub fn bind_output(&mut self, name: &str) {
        let op = self.current_mut();
        match op.urls.last_mut() {
            Some(last) if !last.has_output() => {
                last.outfile = Some(glob::fill_template(name, &last.captures));
                last.use_remote_name = false;
                last.explicit_output = true;
            }
            _ => op.urls.push(UrlConfig {
                outfile: Some(name.to_string()),
                explicit_output: true,
                ..Default::default()
            }),
        }
    }

    /// Name the output of the most recent entry after the remote file
    pub fn bind_remote_name(&mut self, enabled: bool) {
        let op = self.current_mut();
        if !enabled {
            if let Some(last) = op.urls.last_mut() {
                last.use_remote_name = false;
            }
            return;
        }
        match op.urls.last_mut() {
            Some(last) if !last.has_output() => {
                last.use_remote_name = true;
                last.explicit_output = true;
            }
            _ => op.urls.push(UrlConfig {
                use_remote_name: true,
                explicit_output: true,
                ..Default::default()
            }),
        }
    }

    /// Upload `path` to the most recent entry
    pub fn bind_upload(&mut self, path: &str) {
        let op = self.current_mut();
        match op.urls.last_mut() {
            Some(last) if last.infile.is_none() => last.infile = Some(path.to_string()),
            _ => op.urls.push(UrlConfig {
                infile: Some(path.to_string()),
                ..Default::default()
            }),
        }
    }

    /// Entries created by output flags that never received a URL, as
    /// (operation index, entry index) pairs
    pub fn pending_placeholders(&self) -> Vec<(usize, usize)> {
        self.operations
            .iter()
            .enumerate()
            .flat_map(|(op_index, op)| {
                op.urls
                    .iter()
                    .enumerate()
                    .filter(|(_, u)| !u.is_set())
                    .map(move |(entry, _)| (op_index, entry))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(op: &OperationConfig) -> Vec<&str> {
        op.urls.iter().filter_map(|u| u.url.as_deref()).collect()
    }

    #[test]
    fn test_starts_with_single_operation() {
        let global = GlobalConfig::new();
        assert_eq!(global.len(), 1);
        assert_eq!(global.current_index(), 0);
        assert!(std::ptr::eq(global.head(), global.current()));
    }

    #[test]
    fn test_next_operation_moves_cursor() {
        let mut global = GlobalConfig::new();
        global.add_url("http://one").unwrap();
        assert_eq!(global.next_operation(), 1);
        global.add_url("http://two").unwrap();

        assert_eq!(urls(global.head()), vec!["http://one"]);
        assert_eq!(urls(global.current()), vec!["http://two"]);
        assert!(global.previous(0).is_none());
        assert_eq!(urls(global.previous(1).unwrap()), vec!["http://one"]);
        assert_eq!(urls(global.following(0).unwrap()), vec!["http://two"]);
    }

    #[test]
    fn test_add_url_expands_in_order() {
        let mut global = GlobalConfig::new();
        assert_eq!(global.add_url("http://h/{a,b}/[1-2]").unwrap(), 4);
        assert_eq!(
            urls(global.current()),
            vec!["http://h/a/1", "http://h/a/2", "http://h/b/1", "http://h/b/2"]
        );
    }

    #[test]
    fn test_glob_off_keeps_token_verbatim() {
        let mut global = GlobalConfig::new();
        global.current_mut().glob_off = true;
        global.add_url("http://h/{a,b}").unwrap();
        let entry = &global.current().urls[0];
        assert_eq!(entry.url.as_deref(), Some("http://h/{a,b}"));
        assert!(entry.no_glob);
    }

    #[test]
    fn test_output_binds_to_most_recent_url() {
        let mut global = GlobalConfig::new();
        global.add_url("http://one").unwrap();
        global.add_url("http://two").unwrap();
        global.bind_output("two.html");

        let op = global.current();
        assert_eq!(op.urls[0].outfile, None);
        assert_eq!(op.urls[1].outfile.as_deref(), Some("two.html"));
    }

    #[test]
    fn test_placeholder_completed_by_url() {
        let mut global = GlobalConfig::new();
        global.bind_output("out.html");
        assert_eq!(global.pending_placeholders(), vec![(0, 0)]);

        global.add_url("http://example.com").unwrap();
        let op = global.current();
        assert_eq!(op.urls.len(), 1);
        assert_eq!(op.urls[0].url.as_deref(), Some("http://example.com"));
        assert_eq!(op.urls[0].outfile.as_deref(), Some("out.html"));
        assert!(global.pending_placeholders().is_empty());
    }

    #[test]
    fn test_placeholders_pair_in_order() {
        let mut global = GlobalConfig::new();
        global.bind_output("a.html");
        global.bind_output("b.html");
        global.add_url("http://a").unwrap();
        global.add_url("http://b").unwrap();

        let op = global.current();
        assert_eq!(op.urls[0].outfile.as_deref(), Some("a.html"));
        assert_eq!(op.urls[1].outfile.as_deref(), Some("b.html"));
    }

    #[test]
    fn test_placeholder_template_applied_to_each_expansion() {
        let mut global = GlobalConfig::new();
        global.bind_output("file_#1_#2.txt");
        global.add_url("http://h/{x,y}/[1-2]").unwrap();

        let names: Vec<&str> = global
            .current()
            .urls
            .iter()
            .filter_map(|u| u.outfile.as_deref())
            .collect();
        assert_eq!(names, vec!["file_x_1.txt", "file_x_2.txt", "file_y_1.txt", "file_y_2.txt"]);
    }

    #[test]
    fn test_remote_name_and_upload_share_entry() {
        let mut global = GlobalConfig::new();
        global.add_url("ftp://h/dir/").unwrap();
        global.bind_upload("local.bin");
        global.bind_remote_name(true);

        let entry = &global.current().urls[0];
        assert_eq!(entry.infile.as_deref(), Some("local.bin"));
        assert!(entry.use_remote_name);
    }

    #[test]
    fn test_url_limit() {
        let mut global = GlobalConfig::new().with_url_limit(Some(3));
        global.add_url("http://h/[1-2]").unwrap();
        let err = global.add_url("http://h/{a,b}").unwrap_err();
        assert!(matches!(err, PlanError::TooManyUrls { count: 4, limit: 3, .. }));
        assert_eq!(global.current().urls.len(), 2);
    }

    #[test]
    fn test_url_limit_counts_before_expanding() {
        let mut global = GlobalConfig::new().with_url_limit(Some(3));
        let err = global.add_url("http://h/[1-1000000000000]").unwrap_err();
        assert!(matches!(
            err,
            PlanError::TooManyUrls { count: 1_000_000_000_000, limit: 3, .. }
        ));
        assert!(global.current().urls.is_empty());
    }

    #[test]
    fn test_url_limit_with_glob_off() {
        let mut global = GlobalConfig::new().with_url_limit(Some(1));
        global.current_mut().glob_off = true;
        global.add_url("http://a/").unwrap();
        let err = global.add_url("http://b/").unwrap_err();
        assert!(matches!(err, PlanError::TooManyUrls { count: 2, limit: 1, .. }));
        assert_eq!(global.current().urls.len(), 1);
    }

    #[test]
    fn test_output_overrides_remote_name_all() {
        let mut global = GlobalConfig::new();
        global.current_mut().remote_name_all = true;
        global.add_url("http://a/x").unwrap();
        global.bind_output("a.html");

        let op = global.current();
        assert_eq!(op.urls.len(), 1);
        assert_eq!(op.urls[0].outfile.as_deref(), Some("a.html"));
        assert!(!op.urls[0].use_remote_name);
        assert!(global.pending_placeholders().is_empty());
    }

    #[test]
    fn test_remote_name_binds_under_remote_name_all() {
        let mut global = GlobalConfig::new();
        global.current_mut().remote_name_all = true;
        global.add_url("http://a/x").unwrap();
        global.bind_remote_name(true);
        assert_eq!(global.current().urls.len(), 1);

        // a second -O has nothing left to bind to
        global.bind_remote_name(true);
        assert_eq!(global.pending_placeholders(), vec![(0, 1)]);
    }

    #[test]
    fn test_glob_error_leaves_operation_untouched() {
        let mut global = GlobalConfig::new();
        assert!(global.add_url("http://h/{a,b").is_err());
        assert!(global.current().urls.is_empty());
    }
}
