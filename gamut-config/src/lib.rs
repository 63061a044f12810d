// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing for gamut test-plan configurations.
//!
//! A test plan names a function under test and describes, for each of its
//! parameters, the domains from which exhaustive and random test inputs are
//! drawn. The textual format carries three parallel signatures per parameter
//! (a type, an exhaustive domain and a random domain) which must nest in
//! lockstep; [`TestPlan::parse`] compiles them into one [`DomainNode`] tree
//! per parameter, failing with a diagnostic on any divergence.

mod config;
mod domain;
pub mod errors;
mod parsing;

pub use config::{TestPlan, read_config};
pub use domain::{DomainNode, FunctionName};
