//! Option descriptors and the name lookup tables

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

use crate::errors::{PlanError, Result};
use crate::operation::OperationConfig;
use crate::resolver::Resolver;

/// What an option expects after its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// Takes nothing
    None,
    /// Takes nothing; `--no-<name>` turns it off
    Bool,
    String,
    /// A path; resolved exactly like `String`
    File,
}

impl ArgShape {
    pub fn takes_argument(self) -> bool {
        matches!(self, ArgShape::String | ArgShape::File)
    }
}

/// The argument an option was invoked with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Flag options: `true` unless spelled `--no-<name>`
    Switch(bool),
    Text(&'a str),
}

impl<'a> Value<'a> {
    pub fn enabled(&self) -> bool {
        match self {
            Value::Switch(on) => *on,
            Value::Text(_) => true,
        }
    }

    pub fn text(&self) -> &'a str {
        match *self {
            Value::Text(text) => text,
            Value::Switch(_) => "",
        }
    }
}

pub type CustomHandler = fn(&mut Resolver<'_>, &'static str, Value<'_>) -> Result<()>;

/// How an option changes the operation it is applied to
#[derive(Clone, Copy)]
pub enum Handler {
    SetString(fn(&mut OperationConfig) -> &mut Option<String>),
    SetBool(fn(&mut OperationConfig) -> &mut bool),
    AppendList(fn(&mut OperationConfig) -> &mut Vec<String>),
    /// Add a (possibly globbed) URL token
    AppendUrl,
    Custom(CustomHandler),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Handler::SetString(_) => "SetString",
            Handler::SetBool(_) => "SetBool",
            Handler::AppendList(_) => "AppendList",
            Handler::AppendUrl => "AppendUrl",
            Handler::Custom(_) => "Custom",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub short: Option<char>,
    pub shape: ArgShape,
    pub handler: Handler,
}

impl OptionDescriptor {
    pub fn new(
        name: &'static str,
        short: Option<char>,
        shape: ArgShape,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            short,
            shape,
            handler,
        }
    }
}

/// A long-name lookup hit
#[derive(Debug, Clone, Copy)]
pub struct LongMatch<'r> {
    pub descriptor: &'r OptionDescriptor,
    /// Spelled `--no-<name>`
    pub negated: bool,
}

/// Immutable option tables, built once and shared by every resolver
#[derive(Debug, Clone)]
pub struct Registry {
    long: IndexMap<&'static str, OptionDescriptor>,
    short: HashMap<char, &'static str>,
}

impl Registry {
    /// Build the tables, rejecting repeated long or short names
    pub fn from_descriptors(descriptors: Vec<OptionDescriptor>) -> Result<Self> {
        let mut long = IndexMap::with_capacity(descriptors.len());
        let mut short = HashMap::new();

        for descriptor in descriptors {
            if let Some(c) = descriptor.short {
                if short.insert(c, descriptor.name).is_some() {
                    return Err(PlanError::DuplicateOption {
                        name: format!("-{c}"),
                    });
                }
            }
            if long.insert(descriptor.name, descriptor).is_some() {
                return Err(PlanError::DuplicateOption {
                    name: format!("--{}", descriptor.name),
                });
            }
        }

        Ok(Self { long, short })
    }

    /// The options this tool understands
    pub fn builtin() -> Self {
        Self::from_descriptors(super::table::builtin_options())
            .expect("builtin option table has unique names")
    }

    pub fn len(&self) -> usize {
        self.long.len()
    }

    pub fn is_empty(&self) -> bool {
        self.long.is_empty()
    }

    /// Descriptors in table order
    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.long.values()
    }

    /// Look up a long name (without the leading `--`).
    ///
    /// Exact names win; otherwise a prefix naming exactly one option selects
    /// it. Failing both, `no-<name>` is tried against flag options.
    pub fn long(&self, name: &str) -> Result<LongMatch<'_>> {
        match self.match_name(name) {
            Err(PlanError::UnknownOption { .. }) => {}
            found => {
                return found.map(|descriptor| LongMatch {
                    descriptor,
                    negated: false,
                })
            }
        }

        if let Some(positive) = name.strip_prefix("no-") {
            if let Ok(descriptor) = self.match_name(positive) {
                if descriptor.shape == ArgShape::Bool {
                    return Ok(LongMatch {
                        descriptor,
                        negated: true,
                    });
                }
            }
        }

        Err(PlanError::UnknownOption {
            option: format!("--{name}"),
        })
    }

    pub fn short(&self, c: char) -> Option<&OptionDescriptor> {
        self.short.get(&c).and_then(|name| self.long.get(name))
    }

    fn match_name(&self, name: &str) -> Result<&OptionDescriptor> {
        if let Some(descriptor) = self.long.get(name) {
            return Ok(descriptor);
        }

        let mut candidates = self.long.values().filter(|d| d.name.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) if !name.is_empty() => Ok(only),
            (Some(first), Some(second)) if !name.is_empty() => {
                let mut names = vec![format!("--{}", first.name), format!("--{}", second.name)];
                names.extend(candidates.map(|d| format!("--{}", d.name)));
                Err(PlanError::AmbiguousOption {
                    option: format!("--{name}"),
                    candidates: names,
                })
            }
            _ => Err(PlanError::UnknownOption {
                option: format!("--{name}"),
            }),
        }
    }
}
