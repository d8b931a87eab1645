//! Per-operation settings and URL entries

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

use super::secret::SecretString;
use crate::fs::remote_file_name;
use crate::glob::{self, GlobMatch};
use crate::http;

bitflags! {
    /// Authentication methods the operation may use
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AuthMask: u32 {
        const BASIC     = 1 << 0;
        const DIGEST    = 1 << 1;
        const NEGOTIATE = 1 << 2;
        const NTLM      = 1 << 3;

        /// Every method, including ones added later
        const ANY = !0;
    }
}

impl Default for AuthMask {
    fn default() -> Self {
        Self::empty()
    }
}

impl AuthMask {
    pub fn is_any(&self) -> bool {
        self.contains(Self::ANY)
    }
}

impl Serialize for AuthMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_any() {
            return serializer.serialize_str("any");
        }
        let names: Vec<String> = self
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        names.serialize(serializer)
    }
}

/// Where a transfer should resume from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resume {
    /// Work out the offset from the size of the local file
    Auto,
    Offset(u64),
}

/// What to do when the output file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClobberMode {
    /// Overwrite, except for names taken from Content-Disposition
    #[default]
    Default,
    Always,
    /// Never overwrite; the engine appends numeric suffixes instead
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FtpMethod {
    MultiCwd,
    NoCwd,
    SingleCwd,
}

/// GSS-API credential delegation level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delegation {
    None,
    Policy,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpVersion {
    #[serde(rename = "1.0")]
    Http10,
    #[serde(rename = "1.1")]
    Http11,
    #[serde(rename = "2")]
    Http2,
}

/// How a request body part is to be encoded by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Ascii,
    Raw,
    Binary,
    UrlEncode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Inline(String),
    File(PathBuf),
}

/// One `--data*` argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPart {
    pub kind: DataKind,
    pub source: DataSource,
}

impl DataPart {
    /// Build a body part, treating `@path` as a file reference for every
    /// kind except raw data
    pub fn new(kind: DataKind, arg: &str) -> Self {
        let source = match arg.strip_prefix('@') {
            Some(path) if kind != DataKind::Raw => DataSource::File(PathBuf::from(path)),
            _ => DataSource::Inline(arg.to_string()),
        };
        Self { kind, source }
    }
}

/// Where a form part's content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// `name=value`
    Literal,
    /// `name=@path`, sent as an attached file
    File,
    /// `name=<path`, the file's content sent as the value
    DataFile,
}

/// One `-F/--form` part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPart {
    pub name: String,
    pub kind: FormKind,
    /// Literal text or a path, depending on `kind`
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Overrides the file name sent for the part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
}

impl FormPart {
    pub fn new(name: &str, kind: FormKind, value: String) -> Self {
        Self {
            name: name.to_string(),
            kind,
            value,
            content_type: None,
            filename: None,
            encoder: None,
            headers: Vec::new(),
        }
    }
}

/// One resolved target of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlConfig {
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outfile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infile: Option<String>,
    pub use_remote_name: bool,
    /// Routing came from `-o`/`-O` rather than `--remote-name-all`
    #[serde(skip)]
    pub explicit_output: bool,
    pub no_glob: bool,
    /// Alternatives picked from each glob set/range, for `#N` references
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<String>,
}

impl UrlConfig {
    /// Entry for one expansion of a URL token, inheriting the routing of
    /// the placeholder it completes
    pub(crate) fn resolved(
        found: GlobMatch,
        placeholder: Option<&UrlConfig>,
        no_glob: bool,
        remote_name_all: bool,
    ) -> Self {
        let mut entry = UrlConfig {
            url: Some(found.url),
            use_remote_name: remote_name_all,
            no_glob,
            captures: found.captures,
            ..Default::default()
        };
        if let Some(placeholder) = placeholder {
            entry.outfile = placeholder
                .outfile
                .as_deref()
                .map(|template| glob::fill_template(template, &entry.captures));
            entry.infile = placeholder.infile.clone();
            entry.use_remote_name |= placeholder.use_remote_name;
            entry.explicit_output = placeholder.explicit_output;
        }
        entry
    }

    /// Whether a URL has been bound to this entry
    pub fn is_set(&self) -> bool {
        self.url.is_some()
    }

    /// Whether an output flag (`-o`/`-O`) already targets this entry.
    ///
    /// A remote name inherited from `--remote-name-all` does not count.
    pub fn has_output(&self) -> bool {
        self.outfile.is_some() || (self.use_remote_name && self.explicit_output)
    }

    /// The local file name the transfer writes to, if any
    pub fn output_name(&self) -> Option<String> {
        if let Some(outfile) = &self.outfile {
            return Some(outfile.clone());
        }
        if self.use_remote_name {
            return self.url.as_deref().and_then(remote_file_name);
        }
        None
    }
}

fn serialize_secs<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_f64(duration.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}

/// Settings for one fetch operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationConfig {
    // Request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_jar: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<FormPart>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_version: Option<HttpVersion>,

    // Authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_user: Option<SecretString>,
    pub auth: AuthMask,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<Delegation>,

    // Transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    pub insecure_ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_passphrase: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cacert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ftp_method: Option<FtpMethod>,
    pub compressed: bool,

    // Behaviour
    pub follow_location: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_redirs: Option<i64>,
    pub fail_on_error: bool,
    pub show_headers: bool,
    pub no_body: bool,
    pub use_http_get: bool,
    pub content_disposition: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<Resume>,
    #[serde(serialize_with = "serialize_secs", skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<Duration>,
    #[serde(serialize_with = "serialize_secs", skip_serializing_if = "Option::is_none")]
    pub max_time: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_filesize: Option<i64>,
    pub glob_off: bool,
    pub remote_name_all: bool,
    pub clobber: ClobberMode,
    pub create_dirs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_out: Option<String>,

    pub urls: Vec<UrlConfig>,
}

impl OperationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_data(&self) -> bool {
        !self.data.is_empty() || !self.form.is_empty()
    }

    /// The request method the engine will use
    pub fn method(&self) -> &str {
        if let Some(method) = &self.custom_request {
            return method;
        }
        if self.no_body {
            return http::HEAD;
        }
        if self.use_http_get {
            return http::GET;
        }
        http::infer(self.has_data())
    }

    /// URL entries that already have a URL bound
    pub fn targets(&self) -> impl Iterator<Item = &UrlConfig> {
        self.urls.iter().filter(|u| u.is_set())
    }
}
