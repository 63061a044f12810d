// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while reading and parsing test-plan configurations.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use smol_str::SmolStr;
use std::{cell::RefCell, fmt};
use thiserror::Error;

/// A single failure encountered while parsing a test-plan configuration.
///
/// Parsing is fail-fast: the first failure aborts the parse, so exactly one
/// of these is ever reported per invocation. Spans index into the raw
/// configuration text.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq)]
#[non_exhaustive]
pub enum ParseSingleError {
    #[error("missing required key `{key}`")]
    MissingKey { key: &'static str },

    #[error("invalid function name")]
    InvalidFunctionName(#[label("expected a quoted identifier")] SourceSpan),

    #[error("`{key}` is not a bracketed list")]
    ExpectedBracketedList {
        key: &'static str,
        #[label("expected a `[`-delimited list")]
        span: SourceSpan,
    },

    #[error("invalid random sample count")]
    InvalidSampleCount(#[label("expected a non-negative integer")] SourceSpan),

    #[error(
        "parameter count mismatch: {types} types, {exhaustive} exhaustive domains, \
         {random} random domains"
    )]
    ArityMismatch {
        types: usize,
        exhaustive: usize,
        random: usize,
        #[label("types declared here")]
        span: SourceSpan,
    },

    #[error("parenthesis mismatch between type and domain signatures")]
    ParenthesisMismatch(#[label("expected `(` here to mirror the type signature")] SourceSpan),

    #[error("colon mismatch between type and domain signatures")]
    ColonMismatch(#[label("expected `:` separating key and value domains")] SourceSpan),

    #[error("invalid type signature")]
    InvalidTypeSignature(#[label("unrecognized type")] SourceSpan),

    #[error("invalid interval")]
    InvalidInterval(#[label("expected `a~b` or `[v1, v2, ...]`")] SourceSpan),

    #[error("invalid interval: reversed bounds")]
    ReversedRange(#[label("lower bound is greater than upper bound")] SourceSpan),

    #[error("interval too large")]
    RangeTooLarge(#[label("this range expands to too many values")] SourceSpan),

    #[error("decimal value where an integer is required")]
    NonIntegralValue {
        value: f64,
        #[label("{} has a fractional part", value)]
        span: SourceSpan,
    },

    #[error("unknown parsing error")]
    Unknown,
}

/// The error returned when a test-plan configuration fails to parse.
///
/// Carries the raw input so that the inner [`ParseSingleError`]'s labels
/// render directly against the configuration text.
#[derive(Clone, Debug, Error)]
#[error("failed to parse test-plan config")]
pub struct InvalidConfigError {
    input: String,
    #[source]
    error: ParseSingleError,
}

impl InvalidConfigError {
    pub(crate) fn new(input: impl Into<String>, error: ParseSingleError) -> Self {
        Self {
            input: input.into(),
            error,
        }
    }

    /// Returns the configuration text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the underlying parse failure.
    pub fn error(&self) -> &ParseSingleError {
        &self.error
    }
}

impl Diagnostic for InvalidConfigError {
    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.input)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.error.labels()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.help()
    }
}

/// An error that occurred while reading a test-plan configuration from disk.
#[derive(Debug, Error, Diagnostic)]
#[error("failed to read test-plan config at `{path}`")]
pub struct ConfigReadError {
    path: Utf8PathBuf,
    #[source]
    error: std::io::Error,
}

impl ConfigReadError {
    pub(crate) fn new(path: Utf8PathBuf, error: std::io::Error) -> Self {
        Self { path, error }
    }

    /// Returns the path that could not be read.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// An error returned by [`TestPlan::from_path`](crate::TestPlan::from_path):
/// either the file could not be read, or its contents failed to parse.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum ConfigFileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Read(#[from] ConfigReadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] InvalidConfigError),
}

/// The error returned when a function name fails validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidFunctionName {
    #[error("function name is empty")]
    Empty,
    #[error(
        "invalid function name `{0}`: must start with an ASCII letter \
         and contain only ASCII letters and digits"
    )]
    InvalidFormat(SmolStr),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct State<'a> {
    // A `RefCell` is required here because the state must be `Clone` to work
    // with winnow, and the three lockstep cursors share one error slot.
    error: &'a RefCell<Option<ParseSingleError>>,
    base: usize,
}

impl<'a> State<'a> {
    pub(crate) fn new(error: &'a RefCell<Option<ParseSingleError>>, base: usize) -> Self {
        Self { error, base }
    }

    /// Returns a copy of this state rebased onto another fragment of the
    /// configuration text.
    pub(crate) fn with_base(self, base: usize) -> Self {
        Self { base, ..self }
    }

    /// Records an error. The parse is fail-fast, so only the first report is
    /// kept.
    pub(crate) fn report_error(&self, error: ParseSingleError) {
        let mut slot = self.error.borrow_mut();
        if slot.is_none() {
            *slot = Some(error);
        }
    }

    /// Converts a fragment-local offset and length into a span over the raw
    /// configuration text.
    pub(crate) fn span(&self, start: usize, len: usize) -> SourceSpan {
        (self.base + start, len).into()
    }
}
