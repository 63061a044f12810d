// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InvalidFunctionName;
use smol_str::SmolStr;
use std::{collections::BTreeSet, fmt};

/// The name of the function under test.
///
/// Validated to be non-empty, to start with an ASCII letter, and to contain
/// only ASCII letters and digits thereafter.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionName(SmolStr);

impl FunctionName {
    /// Validates and creates a new function name.
    pub fn new(name: SmolStr) -> Result<Self, InvalidFunctionName> {
        let mut chars = name.chars();
        match chars.next() {
            None => return Err(InvalidFunctionName::Empty),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(InvalidFunctionName::InvalidFormat(name));
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidFunctionName::InvalidFormat(name));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed domain tree describing one parameter of the function under test.
///
/// Each node carries an *exhaustive* domain (used for complete enumeration)
/// and a *random* domain (used for sampling). For scalars the domains hold
/// the values themselves; for containers they hold sizes, and for strings
/// they hold lengths. Container sizes for `list`/`tuple`/`set` are integral;
/// dict sizes and string lengths are kept as floating-point values, matching
/// the asymmetry of the configuration format.
///
/// Composite nodes exclusively own their children, so trees are finite and
/// acyclic by construction.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DomainNode {
    /// A scalar integer.
    Int {
        exhaustive: Vec<i64>,
        random: Vec<i64>,
    },
    /// A scalar boolean. Domains are conventionally restricted to {0, 1},
    /// but only integrality is enforced.
    Bool {
        exhaustive: Vec<i64>,
        random: Vec<i64>,
    },
    /// A scalar float.
    Float {
        exhaustive: Vec<f64>,
        random: Vec<f64>,
    },
    /// A string over the given character set; domains are string lengths.
    Str {
        charset: BTreeSet<char>,
        exhaustive: Vec<f64>,
        random: Vec<f64>,
    },
    /// A homogeneous list; domains are container sizes.
    List {
        exhaustive: Vec<i64>,
        random: Vec<i64>,
        element: Box<DomainNode>,
    },
    /// A homogeneous tuple; domains are container sizes.
    Tuple {
        exhaustive: Vec<i64>,
        random: Vec<i64>,
        element: Box<DomainNode>,
    },
    /// A homogeneous set; domains are container sizes.
    Set {
        exhaustive: Vec<i64>,
        random: Vec<i64>,
        element: Box<DomainNode>,
    },
    /// A mapping; domains are dict sizes.
    Dict {
        exhaustive: Vec<f64>,
        random: Vec<f64>,
        key: Box<DomainNode>,
        value: Box<DomainNode>,
    },
}

impl DomainNode {
    /// Returns the type keyword for this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int { .. } => "int",
            Self::Bool { .. } => "bool",
            Self::Float { .. } => "float",
            Self::Str { .. } => "str",
            Self::List { .. } => "list",
            Self::Tuple { .. } => "tuple",
            Self::Set { .. } => "set",
            Self::Dict { .. } => "dict",
        }
    }

    /// Returns the number of values (or sizes/lengths) in this node's own
    /// exhaustive domain.
    pub fn exhaustive_len(&self) -> usize {
        match self {
            Self::Int { exhaustive, .. } | Self::Bool { exhaustive, .. } => exhaustive.len(),
            Self::Float { exhaustive, .. }
            | Self::Str { exhaustive, .. }
            | Self::Dict { exhaustive, .. } => exhaustive.len(),
            Self::List { exhaustive, .. }
            | Self::Tuple { exhaustive, .. }
            | Self::Set { exhaustive, .. } => exhaustive.len(),
        }
    }

    /// Returns the number of values (or sizes/lengths) in this node's own
    /// random domain.
    pub fn random_len(&self) -> usize {
        match self {
            Self::Int { random, .. } | Self::Bool { random, .. } => random.len(),
            Self::Float { random, .. } | Self::Str { random, .. } | Self::Dict { random, .. } => {
                random.len()
            }
            Self::List { random, .. } | Self::Tuple { random, .. } | Self::Set { random, .. } => {
                random.len()
            }
        }
    }
}

impl fmt::Display for DomainNode {
    /// Renders the canonical type signature for this tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { .. } => f.write_str("int"),
            Self::Bool { .. } => f.write_str("bool"),
            Self::Float { .. } => f.write_str("float"),
            Self::Str { charset, .. } => {
                f.write_str("str(")?;
                for c in charset {
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
            Self::List { element, .. } => write!(f, "list({element})"),
            Self::Tuple { element, .. } => write!(f, "tuple({element})"),
            Self::Set { element, .. } => write!(f, "set({element})"),
            Self::Dict { key, value, .. } => write!(f, "dict({key}:{value})"),
        }
    }
}
