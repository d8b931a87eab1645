//! HTTP method names used when describing a resolved operation

mod method;

pub use method::*;
