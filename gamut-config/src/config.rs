// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test-plan configuration loading and assembly.
//!
//! The configuration format is line-oriented and JSON-adjacent, not JSON:
//! each key and its value must share one physical line, and values are
//! recovered by splitting on the first colon rather than by structural
//! parsing. Lines without a colon are dropped, so a list value spanning
//! multiple lines silently loses its continuation lines.

use crate::{
    domain::{DomainNode, FunctionName},
    errors::{ConfigFileError, ConfigReadError, InvalidConfigError, ParseSingleError},
    parsing::{self, Fragment},
};
use camino::Utf8Path;
use miette::SourceSpan;
use std::{collections::HashMap, fs};
use tracing::debug;

/// The separator between quoted elements of a signature list, as it appears
/// after the outer brackets and quotes are stripped.
const SIGNATURE_SEPARATOR: &str = "\", \"";

/// Reads a test-plan configuration file into a string.
///
/// The file is opened, fully read and released before any parsing begins.
pub fn read_config(path: &Utf8Path) -> Result<String, ConfigReadError> {
    fs::read_to_string(path).map_err(|error| ConfigReadError::new(path.to_owned(), error))
}

/// A parsed test plan: the function under test, one domain tree per
/// parameter, and the number of random test inputs to generate.
///
/// A `TestPlan` is immutable once parsed, owns all of its data, and is safe
/// to share across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct TestPlan {
    function_name: FunctionName,
    params: Vec<DomainNode>,
    num_random: usize,
}

impl TestPlan {
    /// Parses a test plan from configuration text.
    pub fn parse(input: &str) -> Result<Self, InvalidConfigError> {
        Self::parse_impl(input).map_err(|error| InvalidConfigError::new(input, error))
    }

    /// Reads and parses a test plan from a file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigFileError> {
        let input = read_config(path)?;
        Ok(Self::parse(&input)?)
    }

    fn parse_impl(input: &str) -> Result<Self, ParseSingleError> {
        let map = extract_key_values(input);

        // Validation order is fixed: fname, types, exhaustive domain,
        // random domain, num random. The first failing check wins.
        let function_name = validate_function_name(require_key(&map, "fname")?)?;
        let types = require_bracketed(&map, "types")?;
        let exhaustive = require_bracketed(&map, "exhaustive domain")?;
        let random = require_bracketed(&map, "random domain")?;
        let num_random = validate_sample_count(require_key(&map, "num random")?)?;

        let type_sigs = split_signatures(types);
        let ex_sigs = split_signatures(exhaustive);
        let ran_sigs = split_signatures(random);
        if type_sigs.len() != ex_sigs.len() || type_sigs.len() != ran_sigs.len() {
            return Err(ParseSingleError::ArityMismatch {
                types: type_sigs.len(),
                exhaustive: ex_sigs.len(),
                random: ran_sigs.len(),
                span: types.span(),
            });
        }

        let params = type_sigs
            .into_iter()
            .zip(ex_sigs)
            .zip(ran_sigs)
            .map(|((ty, ex), ran)| parsing::parse_param(ty, ex, ran))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            function_name,
            params,
            num_random,
        })
    }

    /// Returns the name of the function under test.
    pub fn function_name(&self) -> &FunctionName {
        &self.function_name
    }

    /// Returns the per-parameter domain trees, in declaration order.
    pub fn params(&self) -> &[DomainNode] {
        &self.params
    }

    /// Returns the number of random test inputs to generate.
    pub fn num_random(&self) -> usize {
        self.num_random
    }
}

/// A raw value extracted from the configuration text, with its byte offset
/// into that text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RawValue<'a> {
    text: &'a str,
    offset: usize,
}

impl RawValue<'_> {
    fn span(&self) -> SourceSpan {
        (self.offset, self.text.len()).into()
    }
}

/// Splits the configuration text into a key-value map.
///
/// Each non-blank line containing a colon is split at the first colon; keys
/// have quotes removed, values have surrounding whitespace and trailing
/// commas stripped. No errors are raised here: malformed content is left for
/// validation, and duplicate keys resolve to the last occurrence.
fn extract_key_values(input: &str) -> HashMap<String, RawValue<'_>> {
    let mut map = HashMap::new();
    let mut line_offset = 0;
    for line in input.split('\n') {
        let next_offset = line_offset + line.len() + 1;
        if !line.trim().is_empty() {
            if let Some(colon) = line.find(':') {
                let key = line[..colon].replace('"', "").trim().to_owned();
                let rest = &line[colon + 1..];
                let trimmed = rest.trim_start();
                let value_offset = line_offset + colon + 1 + (rest.len() - trimmed.len());
                let mut value = trimmed.trim_end();
                while let Some(stripped) = value.strip_suffix(',') {
                    value = stripped.trim_end();
                }
                map.insert(
                    key,
                    RawValue {
                        text: value,
                        offset: value_offset,
                    },
                );
            } else {
                debug!(line, "dropping config line without a key-value separator");
            }
        }
        line_offset = next_offset;
    }
    map
}

fn require_key<'a>(
    map: &HashMap<String, RawValue<'a>>,
    key: &'static str,
) -> Result<RawValue<'a>, ParseSingleError> {
    map.get(key)
        .copied()
        .ok_or(ParseSingleError::MissingKey { key })
}

fn validate_function_name(value: RawValue<'_>) -> Result<FunctionName, ParseSingleError> {
    let invalid = ParseSingleError::InvalidFunctionName(value.span());
    let inner = value
        .text
        .strip_prefix('"')
        .and_then(|text| text.strip_suffix('"'))
        .ok_or(invalid.clone())?;
    FunctionName::new(inner.into()).map_err(|_| invalid)
}

fn require_bracketed<'a>(
    map: &HashMap<String, RawValue<'a>>,
    key: &'static str,
) -> Result<RawValue<'a>, ParseSingleError> {
    let value = require_key(map, key)?;
    let bracketed = value.text.len() >= 2
        && value.text.starts_with('[')
        && value.text.ends_with(']');
    if !bracketed {
        return Err(ParseSingleError::ExpectedBracketedList {
            key,
            span: value.span(),
        });
    }
    Ok(value)
}

fn validate_sample_count(value: RawValue<'_>) -> Result<usize, ParseSingleError> {
    let digits = !value.text.is_empty() && value.text.bytes().all(|b| b.is_ascii_digit());
    digits
        .then(|| value.text.parse::<usize>().ok())
        .flatten()
        .ok_or(ParseSingleError::InvalidSampleCount(value.span()))
}

/// Splits a bracketed list value into its quoted elements.
///
/// The outer brackets and the outermost pair of quotes are stripped, then
/// the remainder is split on the literal `", "` separator. An empty list
/// yields no elements.
fn split_signatures(value: RawValue<'_>) -> Vec<Fragment<'_>> {
    let inner = &value.text[1..value.text.len() - 1];
    let trimmed = inner.trim_start();
    let mut offset = value.offset + 1 + (inner.len() - trimmed.len());
    let mut inner = trimmed.trim_end();
    if inner.is_empty() {
        return Vec::new();
    }
    if let Some(stripped) = inner.strip_prefix('"') {
        inner = stripped;
        offset += 1;
    }
    if let Some(stripped) = inner.strip_suffix('"') {
        inner = stripped;
    }
    let mut elements = Vec::new();
    for piece in inner.split(SIGNATURE_SEPARATOR) {
        elements.push(Fragment {
            text: piece,
            offset,
        });
        offset += piece.len() + SIGNATURE_SEPARATOR.len();
    }
    elements
}
