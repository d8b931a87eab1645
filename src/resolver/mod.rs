//! Flag resolution
//!
//! The [`Resolver`] turns command-line tokens and directive-file lines into
//! changes on a [`GlobalConfig`]. Both sources go through [`resolve_one`],
//! so a directive behaves exactly like the flag it spells.
//!
//! [`resolve_one`]: Resolver::resolve_one

mod loader;

pub use loader::{DirectiveLoader, MemoryLoader};

use tracing::{debug, trace, warn};

use crate::directives::{self, Directive};
use crate::errors::{PlanError, Result};
use crate::operation::{GlobalConfig, OperationConfig};
use crate::options::{Handler, OptionDescriptor, Registry, Value};

/// How deep `--config` files may include one another
pub const MAX_CONFIG_DEPTH: usize = 10;

/// Applies flags and directives to one [`GlobalConfig`]
pub struct Resolver<'r> {
    registry: &'r Registry,
    loader: &'r dyn DirectiveLoader,
    global: GlobalConfig,
    config_depth: usize,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry, loader: &'r dyn DirectiveLoader) -> Self {
        Self {
            registry,
            loader,
            global: GlobalConfig::new(),
            config_depth: 0,
        }
    }

    /// Reject URL tokens that would give one operation more than `limit` URLs
    pub fn with_url_limit(mut self, limit: Option<usize>) -> Self {
        self.global = self.global.with_url_limit(limit);
        self
    }

    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut GlobalConfig {
        &mut self.global
    }

    /// The operation handlers apply to
    pub fn current_mut(&mut self) -> &mut OperationConfig {
        self.global.current_mut()
    }

    /// Apply a single flag.
    ///
    /// `next_arg` is the token after `flag`, offered to options that need an
    /// argument. Returns whether it was used, so the caller can skip it.
    pub fn resolve_one(&mut self, flag: &str, next_arg: Option<&str>) -> Result<bool> {
        let registry = self.registry;

        if let Some(name) = flag.strip_prefix("--") {
            let found = registry.long(name)?;
            let descriptor = *found.descriptor;
            if descriptor.shape.takes_argument() {
                let arg = next_arg.ok_or_else(|| requires_argument(&descriptor))?;
                self.apply(&descriptor, Value::Text(arg))?;
                return Ok(true);
            }
            self.apply(&descriptor, Value::Switch(!found.negated))?;
            return Ok(false);
        }

        let Some(cluster) = flag.strip_prefix('-').filter(|c| !c.is_empty()) else {
            return Err(PlanError::UnknownOption {
                option: flag.to_string(),
            });
        };

        // -vkL applies each flag; the first option that takes an argument
        // swallows the rest of the cluster, or the next token
        for (pos, c) in cluster.char_indices() {
            let descriptor = *registry
                .short(c)
                .ok_or_else(|| PlanError::UnknownOption {
                    option: format!("-{c}"),
                })?;

            if descriptor.shape.takes_argument() {
                let rest = &cluster[pos + c.len_utf8()..];
                if !rest.is_empty() {
                    self.apply(&descriptor, Value::Text(rest))?;
                    return Ok(false);
                }
                let arg = next_arg.ok_or_else(|| requires_argument(&descriptor))?;
                self.apply(&descriptor, Value::Text(arg))?;
                return Ok(true);
            }
            self.apply(&descriptor, Value::Switch(true))?;
        }

        Ok(false)
    }

    /// Apply a whole argument vector.
    ///
    /// Tokens not starting with `-` are URLs. After `--` every token is a
    /// URL, whatever it looks like.
    pub fn resolve<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let mut after_double_dash = false;
        let mut index = 0;

        while let Some(arg) = args.get(index).map(AsRef::as_ref) {
            index += 1;

            if after_double_dash || !arg.starts_with('-') {
                self.resolve_one("--url", Some(arg))?;
                continue;
            }
            if arg == "--" {
                after_double_dash = true;
                continue;
            }

            let next = args.get(index).map(AsRef::as_ref);
            if self.resolve_one(arg, next)? {
                index += 1;
            }
        }

        Ok(())
    }

    /// Apply parsed directives; errors carry `source` and the line number
    pub fn apply_directives(&mut self, directives: &[Directive], source: &str) -> Result<()> {
        for directive in directives {
            let flag = directive.flag();
            let parameter = directive.parameter.as_deref();

            let consumed = self
                .resolve_one(&flag, parameter)
                .map_err(|inner| PlanError::InDirective {
                    source_name: source.to_string(),
                    line: directive.line,
                    inner: Box::new(inner),
                })?;

            if !consumed && parameter.is_some() {
                warn!(
                    source,
                    line = directive.line,
                    option = %flag,
                    "option takes no parameter, ignoring it"
                );
            }
        }
        Ok(())
    }

    /// Parse and apply directive text
    pub fn apply_text(&mut self, text: &str, source: &str) -> Result<()> {
        let directives = directives::parse_directives(text);
        debug!(source, count = directives.len(), "applying directives");
        self.apply_directives(&directives, source)
    }

    /// Read a `--config` file through the loader and apply it
    pub fn include(&mut self, path: &str) -> Result<()> {
        if self.config_depth >= MAX_CONFIG_DEPTH {
            return Err(PlanError::ConfigNesting {
                path: path.to_string(),
                limit: MAX_CONFIG_DEPTH,
            });
        }

        let text = self
            .loader
            .load(path)
            .map_err(|cause| PlanError::MalformedConfigRead {
                path: path.to_string(),
                cause,
            })?;

        self.config_depth += 1;
        let result = self.apply_text(&text, path);
        self.config_depth -= 1;
        result
    }

    /// End the pass and hand over the operations
    pub fn finish(self) -> GlobalConfig {
        for (operation, entry) in self.global.pending_placeholders() {
            warn!(operation, entry, "output option given without a URL to apply it to");
        }
        self.global
    }

    fn apply(&mut self, descriptor: &OptionDescriptor, value: Value<'_>) -> Result<()> {
        trace!(option = descriptor.name, ?value, "applying option");
        match descriptor.handler {
            Handler::SetString(field) => {
                *field(self.global.current_mut()) = Some(value.text().to_string());
            }
            Handler::SetBool(field) => {
                *field(self.global.current_mut()) = value.enabled();
            }
            Handler::AppendList(field) => {
                field(self.global.current_mut()).push(value.text().to_string());
            }
            Handler::AppendUrl => {
                self.global.add_url(value.text())?;
            }
            Handler::Custom(handler) => handler(self, descriptor.name, value)?,
        }
        Ok(())
    }
}

fn requires_argument(descriptor: &OptionDescriptor) -> PlanError {
    PlanError::RequiresArgument {
        option: format!("--{}", descriptor.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{AuthMask, ClobberMode, DataKind, DataSource, HttpVersion, Resume};
    use std::time::Duration;

    fn resolved(args: &[&str]) -> Result<GlobalConfig> {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);
        resolver.resolve(args)?;
        Ok(resolver.finish())
    }

    fn urls(op: &OperationConfig) -> Vec<&str> {
        op.urls.iter().filter_map(|u| u.url.as_deref()).collect()
    }

    #[test]
    fn test_long_option_consumes_next_token() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);

        assert!(resolver.resolve_one("--user-agent", Some("agent/1")).unwrap());
        assert!(!resolver.resolve_one("--verbose", Some("http://x")).unwrap());

        let global = resolver.finish();
        assert_eq!(global.current().user_agent.as_deref(), Some("agent/1"));
        assert!(global.verbose);
        assert!(global.current().urls.is_empty());
    }

    #[test]
    fn test_missing_argument() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);

        let err = resolver.resolve_one("--output", None).unwrap_err();
        assert!(matches!(err, PlanError::RequiresArgument { ref option } if option == "--output"));

        let err = resolver.resolve_one("-o", None).unwrap_err();
        assert!(matches!(err, PlanError::RequiresArgument { .. }));
    }

    #[test]
    fn test_bundled_argument_is_not_consumed() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);

        assert!(!resolver.resolve_one("-ofoo", Some("next")).unwrap());
        let global = resolver.finish();
        assert_eq!(global.current().urls[0].outfile.as_deref(), Some("foo"));
    }

    #[test]
    fn test_short_cluster() {
        let global = resolved(&["-vkL", "http://x/"]).unwrap();
        assert!(global.verbose);
        assert!(global.current().insecure_ok);
        assert!(global.current().follow_location);
        assert_eq!(urls(global.current()), vec!["http://x/"]);
    }

    #[test]
    fn test_cluster_with_argument_option() {
        let global = resolved(&["-vo", "out.html", "http://x/"]).unwrap();
        assert!(global.verbose);
        assert_eq!(global.current().urls[0].outfile.as_deref(), Some("out.html"));

        let global = resolved(&["-sXPUT", "http://x/"]).unwrap();
        assert!(global.silent);
        assert_eq!(global.current().custom_request.as_deref(), Some("PUT"));
    }

    #[test]
    fn test_unknown_options() {
        assert!(matches!(resolved(&["--bogus"]), Err(PlanError::UnknownOption { .. })));
        assert!(matches!(resolved(&["-Z"]), Err(PlanError::UnknownOption { ref option }) if option == "-Z"));
        assert!(matches!(resolved(&["-vZ"]), Err(PlanError::UnknownOption { .. })));
        assert!(matches!(resolved(&["-"]), Err(PlanError::UnknownOption { ref option }) if option == "-"));
    }

    #[test]
    fn test_prefix_and_negation() {
        let global = resolved(&["--verb", "--location", "--no-location"]).unwrap();
        assert!(global.verbose);
        assert!(!global.current().follow_location);

        assert!(matches!(resolved(&["--u", "x"]), Err(PlanError::AmbiguousOption { .. })));
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let global = resolved(&["-v", "--", "-not-a-flag", "--silent"]).unwrap();
        assert!(global.verbose);
        assert!(!global.silent);
        assert_eq!(urls(global.current()), vec!["-not-a-flag", "--silent"]);
    }

    #[test]
    fn test_positional_urls_expand() {
        let global = resolved(&["http://h/[1-3]"]).unwrap();
        assert_eq!(urls(global.current()), vec!["http://h/1", "http://h/2", "http://h/3"]);

        let err = resolved(&["http://h/[3-1]"]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidNumericRange { .. }));
    }

    #[test]
    fn test_globoff_keeps_brackets() {
        let global = resolved(&["-g", "http://h/[1-3]"]).unwrap();
        let entry = &global.current().urls[0];
        assert_eq!(entry.url.as_deref(), Some("http://h/[1-3]"));
        assert!(entry.no_glob);
    }

    #[test]
    fn test_range_and_resume_conflict_both_orders() {
        let err = resolved(&["--range", "0-99", "-C", "100"]).unwrap_err();
        assert!(matches!(err, PlanError::ConflictingOption { ref conflicts_with, .. } if conflicts_with == "range"));

        let err = resolved(&["-C", "-", "-r", "0-99"]).unwrap_err();
        assert!(matches!(err, PlanError::ConflictingOption { ref conflicts_with, .. } if conflicts_with == "continue-at"));
    }

    #[test]
    fn test_range_and_resume_in_separate_operations() {
        let global = resolved(&["-r", "0-99", "http://a/", "--next", "-C", "-", "http://b/"]).unwrap();
        assert_eq!(global.head().range.as_deref(), Some("0-99"));
        assert_eq!(global.current().resume, Some(Resume::Auto));
    }

    #[test]
    fn test_range_needs_dash() {
        let err = resolved(&["-r", "100"]).unwrap_err();
        assert!(matches!(err, PlanError::BadArgument { .. }));
    }

    #[test]
    fn test_auth_flags() {
        let global = resolved(&["--basic", "--anyauth", "--digest"]).unwrap();
        assert_eq!(global.current().auth, AuthMask::ANY);

        let global = resolved(&["--basic", "--ntlm", "--no-basic"]).unwrap();
        assert_eq!(global.current().auth, AuthMask::NTLM);
    }

    #[test]
    fn test_head_turns_get_off() {
        let global = resolved(&["-G", "-I"]).unwrap();
        let op = global.current();
        assert!(op.no_body);
        assert!(op.show_headers);
        assert!(!op.use_http_get);
        assert_eq!(op.method(), "HEAD");
    }

    #[test]
    fn test_data_kinds() {
        let global = resolved(&[
            "-d", "a=1",
            "--data-raw", "@raw",
            "--data-binary", "@payload.bin",
            "--data-urlencode", "q=a b",
        ])
        .unwrap();
        let kinds: Vec<DataKind> = global.current().data.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![DataKind::Ascii, DataKind::Raw, DataKind::Binary, DataKind::UrlEncode]
        );
        assert_eq!(global.current().data[1].source, DataSource::Inline("@raw".to_string()));
        assert_eq!(global.current().method(), "POST");
    }

    #[test]
    fn test_scalar_arguments() {
        let global = resolved(&[
            "--connect-timeout", "1.5",
            "-m", "30",
            "--max-filesize", "2M",
            "--max-redirs", "-1",
            "--ftp-method", "singlecwd",
            "--delegation", "always",
            "-E", "client.pem:hunter2",
            "--http2",
            "--no-clobber",
        ])
        .unwrap();
        let op = global.current();
        assert_eq!(op.connect_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(op.max_time, Some(Duration::from_secs(30)));
        assert_eq!(op.max_filesize, Some(2 * 1024 * 1024));
        assert_eq!(op.max_redirs, Some(-1));
        assert_eq!(op.cert.as_deref(), Some("client.pem"));
        assert_eq!(op.cert_passphrase.as_ref().map(|s| s.as_str()), Some("hunter2"));
        assert_eq!(op.http_version, Some(HttpVersion::Http2));
        assert_eq!(op.clobber, ClobberMode::Never);
    }

    #[test]
    fn test_bad_scalar_arguments() {
        assert!(matches!(resolved(&["-m", "-3"]), Err(PlanError::BadArgument { .. })));
        assert!(matches!(resolved(&["--ftp-method", "up"]), Err(PlanError::BadArgument { .. })));
        assert!(matches!(resolved(&["--max-redirs", "lots"]), Err(PlanError::BadArgument { .. })));
    }

    #[test]
    fn test_next_separates_operations() {
        let global = resolved(&["-H", "A: 1", "http://one/", "--next", "http://two/"]).unwrap();
        assert_eq!(global.len(), 2);
        assert_eq!(urls(global.head()), vec!["http://one/"]);
        assert_eq!(global.head().headers, vec!["A: 1"]);
        assert_eq!(urls(global.current()), vec!["http://two/"]);
        assert!(global.current().headers.is_empty());
    }

    #[test]
    fn test_output_before_url_fills_template() {
        let global = resolved(&["-o", "f_#1", "x/{a,b}"]).unwrap();
        let outfiles: Vec<_> = global
            .current()
            .urls
            .iter()
            .map(|u| u.outfile.as_deref())
            .collect();
        assert_eq!(outfiles, vec![Some("f_a"), Some("f_b")]);
    }

    #[test]
    fn test_output_after_url_binds_to_it() {
        let global = resolved(&["http://a/", "-o", "a.html", "http://b/", "-O"]).unwrap();
        let op = global.current();
        assert_eq!(op.urls.len(), 2);
        assert_eq!(op.urls[0].outfile.as_deref(), Some("a.html"));
        assert!(op.urls[1].use_remote_name);
    }

    #[test]
    fn test_unused_placeholder_survives_finish() {
        let global = resolved(&["http://a/", "-o", "a.html", "-o", "b.html"]).unwrap();
        assert_eq!(global.pending_placeholders(), vec![(0, 1)]);
    }

    #[test]
    fn test_directives_apply_like_flags() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);
        resolver
            .apply_text("# comment\n\nuser-agent = \"A B\"\n-L\nurl http://x/\n", "test.rc")
            .unwrap();

        let global = resolver.finish();
        assert_eq!(global.current().user_agent.as_deref(), Some("A B"));
        assert!(global.current().follow_location);
        assert_eq!(urls(global.current()), vec!["http://x/"]);
    }

    #[test]
    fn test_directive_parameter_never_taken_from_next_line() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);

        let err = resolver.apply_text("verbose\noutput\nhttp://x/\n", "test.rc").unwrap_err();
        match err {
            PlanError::InDirective { source_name, line, inner } => {
                assert_eq!(source_name, "test.rc");
                assert_eq!(line, 2);
                assert!(matches!(*inner, PlanError::RequiresArgument { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directive_parameter_on_flag_is_ignored() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);
        resolver.apply_text("verbose = yes\n", "test.rc").unwrap();
        assert!(resolver.global().verbose);
    }

    #[test]
    fn test_config_includes_file() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new().with_file("extra.rc", "--insecure\nurl = http://inc/\n");
        let mut resolver = Resolver::new(&registry, &loader);
        resolver.resolve(&["-K", "extra.rc", "-L"]).unwrap();

        let global = resolver.finish();
        assert!(global.current().insecure_ok);
        assert!(global.current().follow_location);
        assert_eq!(urls(global.current()), vec!["http://inc/"]);
    }

    #[test]
    fn test_config_missing_file() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader);
        let err = resolver.resolve(&["--config", "nope.rc"]).unwrap_err();
        assert!(matches!(err, PlanError::MalformedConfigRead { ref path, .. } if path == "nope.rc"));
    }

    #[test]
    fn test_config_nesting_limit() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new().with_file("loop.rc", "config = loop.rc\n");
        let mut resolver = Resolver::new(&registry, &loader);
        let err = resolver.resolve(&["-K", "loop.rc"]).unwrap_err();
        assert!(matches!(err.root(), PlanError::ConfigNesting { limit: MAX_CONFIG_DEPTH, .. }));
    }

    #[test]
    fn test_nested_error_reports_innermost_location() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new()
            .with_file("outer.rc", "-v\nconfig = inner.rc\n")
            .with_file("inner.rc", "\n--frobnicate\n");
        let mut resolver = Resolver::new(&registry, &loader);
        let err = resolver.apply_text("config = outer.rc\n", "main.rc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "main.rc:1: outer.rc:2: inner.rc:2: option --frobnicate: is unknown"
        );
    }

    #[test]
    fn test_url_limit() {
        let registry = Registry::builtin();
        let loader = MemoryLoader::new();
        let mut resolver = Resolver::new(&registry, &loader).with_url_limit(Some(3));
        resolver.resolve(&["http://h/[1-2]"]).unwrap();
        let err = resolver.resolve(&["http://h/{a,b}"]).unwrap_err();
        assert!(matches!(err, PlanError::TooManyUrls { count: 4, limit: 3, .. }));
    }
}
