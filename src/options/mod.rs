//! Option registry
//!
//! Maps long and short option names to the argument they take and the
//! handler that applies them. The registry is built once and passed to each
//! [`Resolver`](crate::resolver::Resolver) by reference.

pub mod form;
pub mod params;
pub mod registry;
pub mod table;

pub use registry::{ArgShape, CustomHandler, Handler, LongMatch, OptionDescriptor, Registry, Value};
