//! Operation model
//!
//! The records every directive source mutates: one [`OperationConfig`] per
//! fetch operation, each owning its [`UrlConfig`] entries, all held by a
//! [`GlobalConfig`] arena whose last operation is the current one.

pub mod config;
pub mod global;
pub mod secret;

pub use config::{
    AuthMask, ClobberMode, DataKind, DataPart, DataSource, Delegation, FormKind, FormPart, FtpMethod,
    HttpVersion, OperationConfig, Resume, UrlConfig,
};
pub use global::GlobalConfig;
pub use secret::SecretString;
