// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lockstep recursive descent over the three parameter signatures.
//!
//! Each parameter is described by three strings: a type signature, an
//! exhaustive-domain signature and a random-domain signature. The grammar is
//! directed by the type string; every nesting step it takes must be mirrored
//! by both domain strings, so all three are parsed through cursors that
//! advance together. Any structural divergence between the cursors is a
//! configuration error.
//!
//! Errors are fail-fast: every failure site records one
//! [`ParseSingleError`] in the shared state and aborts the parse with
//! [`ErrMode::Cut`].

use crate::{
    domain::DomainNode,
    errors::{ParseSingleError, State},
};
use miette::SourceSpan;
use std::cell::RefCell;
use winnow::{
    LocatingSlice, ModalParser, Parser,
    ascii::digit1,
    combinator::{alt, eof, opt, peek, repeat},
    error::ErrMode,
    stream::{Location, SliceLen, Stream},
    token::{none_of, take_till, take_while},
};

pub(crate) type Span<'a> = winnow::Stateful<LocatingSlice<&'a str>, State<'a>>;
type Error = ();
type PResult<T> = winnow::ModalResult<T, Error>;

/// A slice of one signature string, together with its byte offset into the
/// raw configuration text.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fragment<'a> {
    pub(crate) text: &'a str,
    pub(crate) offset: usize,
}

/// Hard cap on eager tilde-range expansion.
const MAX_RANGE_VALUES: i128 = 1 << 20;

/// Parses one parameter's signature triple into a domain tree.
///
/// This is the only entry point; on failure it returns the first error
/// reported by the cursors.
pub(crate) fn parse_param(
    ty: Fragment<'_>,
    ex: Fragment<'_>,
    ran: Fragment<'_>,
) -> Result<DomainNode, ParseSingleError> {
    let error = RefCell::new(None);
    let state = State::new(&error, 0);
    match parse_fragments(state, ty, ex, ran) {
        Ok(node) => Ok(node),
        Err(_) => Err(error.into_inner().unwrap_or(ParseSingleError::Unknown)),
    }
}

/// Runs a full parse over three fragments, requiring all of them to be
/// consumed. Used at the top level and for the key side of a dict.
fn parse_fragments<'i>(
    state: State<'i>,
    ty: Fragment<'i>,
    ex: Fragment<'i>,
    ran: Fragment<'i>,
) -> PResult<DomainNode> {
    let mut ty = new_span(ty, state);
    let mut ex = new_span(ex, state);
    let mut ran = new_span(ran, state);
    let node = parse_node(&mut ty, &mut ex, &mut ran)?;
    expect_consumed(&mut ty, ParseSingleError::InvalidTypeSignature)?;
    expect_consumed(&mut ex, ParseSingleError::InvalidInterval)?;
    expect_consumed(&mut ran, ParseSingleError::InvalidInterval)?;
    Ok(node)
}

fn new_span<'a>(fragment: Fragment<'a>, state: State<'a>) -> Span<'a> {
    Span {
        input: LocatingSlice::new(fragment.text),
        state: state.with_base(fragment.offset),
    }
}

/// Skips leading spaces before the inner parser, resetting on failure.
fn ws<'a, T, P: ModalParser<Span<'a>, T, Error>>(
    mut inner: P,
) -> impl ModalParser<Span<'a>, T, Error> {
    move |input: &mut Span<'a>| {
        let start = input.checkpoint();
        () = repeat(0.., ' '.void()).parse_next(input)?;
        match inner.parse_next(input) {
            Ok(res) => Ok(res),
            Err(ErrMode::Backtrack(err)) => {
                input.reset(&start);
                Err(ErrMode::Backtrack(err))
            }
            Err(ErrMode::Cut(err)) => {
                input.reset(&start);
                Err(ErrMode::Cut(err))
            }
            Err(err) => Err(err),
        }
    }
}

fn ident<'i>(input: &mut Span<'i>) -> PResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

/// Parses one domain node, advancing all three cursors in lockstep.
fn parse_node(ty: &mut Span<'_>, ex: &mut Span<'_>, ran: &mut Span<'_>) -> PResult<DomainNode> {
    let (head, head_range) = match ws(ident.with_span()).parse_next(ty) {
        Ok(res) => res,
        Err(_) => return fail_type(ty),
    };

    if opt(ws('(')).parse_next(ty)?.is_none() {
        // Bare keyword: a primitive type.
        return match head {
            "int" => {
                let exhaustive = int_interval(ex)?;
                let random = int_interval(ran)?;
                Ok(DomainNode::Int { exhaustive, random })
            }
            "bool" => {
                let exhaustive = int_interval(ex)?;
                let random = int_interval(ran)?;
                Ok(DomainNode::Bool { exhaustive, random })
            }
            "float" => {
                let exhaustive = parse_interval(ex)?.float_values();
                let random = parse_interval(ran)?.float_values();
                Ok(DomainNode::Float { exhaustive, random })
            }
            _ => fail_type_at(ty, head_range),
        };
    }

    match head {
        "str" => {
            // The text up to the closing parenthesis is a literal character
            // set, not a nested signature. The domain strings carry plain
            // length intervals with no parenthesis of their own.
            let charset: &str = take_till(0.., ')').parse_next(ty)?;
            skip_close_paren(ty)?;
            let exhaustive = parse_interval(ex)?.float_values();
            let random = parse_interval(ran)?.float_values();
            Ok(DomainNode::Str {
                charset: charset.trim().chars().collect(),
                exhaustive,
                random,
            })
        }
        "list" | "tuple" | "set" => {
            let ex_sizes = parse_interval(ex)?;
            let ran_sizes = parse_interval(ran)?;
            expect_open_paren(ex)?;
            expect_open_paren(ran)?;
            let element = Box::new(parse_node(ty, ex, ran)?);
            skip_close_paren(ty)?;
            skip_close_paren(ex)?;
            skip_close_paren(ran)?;
            // Sizes are coerced after the element parse, so a bad element
            // signature is reported ahead of a fractional size.
            let exhaustive = int_domain(&ex.state, ex_sizes)?;
            let random = int_domain(&ran.state, ran_sizes)?;
            Ok(match head {
                "list" => DomainNode::List {
                    exhaustive,
                    random,
                    element,
                },
                "tuple" => DomainNode::Tuple {
                    exhaustive,
                    random,
                    element,
                },
                _ => DomainNode::Set {
                    exhaustive,
                    random,
                    element,
                },
            })
        }
        "dict" => {
            // Dict sizes are deliberately not coerced to integers.
            let exhaustive = parse_interval(ex)?.float_values();
            let random = parse_interval(ran)?.float_values();
            expect_open_paren(ex)?;
            expect_open_paren(ran)?;
            // Key and value signatures are separated by the first colon in
            // each cursor's remaining text. A colon nested inside the key
            // side therefore mis-splits; such configs fail to parse.
            let key_ty = split_at_colon(ty, ParseSingleError::InvalidTypeSignature)?;
            let key_ex = split_at_colon(ex, ParseSingleError::ColonMismatch)?;
            let key_ran = split_at_colon(ran, ParseSingleError::ColonMismatch)?;
            let key = parse_fragments(ty.state, key_ty, key_ex, key_ran)?;
            let value = parse_node(ty, ex, ran)?;
            skip_close_paren(ty)?;
            skip_close_paren(ex)?;
            skip_close_paren(ran)?;
            Ok(DomainNode::Dict {
                exhaustive,
                random,
                key: Box::new(key),
                value: Box::new(value),
            })
        }
        _ => fail_type_at(ty, head_range),
    }
}

/// Reports an invalid type signature covering the rest of the type cursor.
fn fail_type<T>(ty: &mut Span<'_>) -> PResult<T> {
    let start = ty.current_token_start();
    let len = ty.slice_len();
    fail_type_at(ty, start..start + len)
}

fn fail_type_at<T>(ty: &mut Span<'_>, range: std::ops::Range<usize>) -> PResult<T> {
    ty.state.report_error(ParseSingleError::InvalidTypeSignature(
        ty.state.span(range.start, range.len()),
    ));
    Err(ErrMode::Cut(()))
}

/// Requires a cursor to be exhausted (modulo trailing spaces).
fn expect_consumed(
    input: &mut Span<'_>,
    make_err: fn(SourceSpan) -> ParseSingleError,
) -> PResult<()> {
    if ws(eof).parse_next(input).is_err() {
        let start = input.current_token_start();
        let len = input.slice_len();
        input.state.report_error(make_err(input.state.span(start, len)));
        return Err(ErrMode::Cut(()));
    }
    Ok(())
}

/// Requires an opening parenthesis on a domain cursor, mirroring the one
/// consumed from the type cursor.
fn expect_open_paren(input: &mut Span<'_>) -> PResult<()> {
    if opt(ws('(')).parse_next(input)?.is_some() {
        return Ok(());
    }
    if peek(opt(ws(none_of(('(', ')', ':')))))
        .parse_next(input)?
        .is_some()
    {
        // Junk glued to the size interval, e.g. `0~2x(...)`.
        return fail_interval(input);
    }
    let start = input.current_token_start();
    input
        .state
        .report_error(ParseSingleError::ParenthesisMismatch(
            input.state.span(start, 0),
        ));
    Err(ErrMode::Cut(()))
}

/// Consumes at most one closing parenthesis. The closing parenthesis is
/// optional: domain signatures frequently omit it, relying on the nesting
/// structure alone.
fn skip_close_paren(input: &mut Span<'_>) -> PResult<()> {
    let _ = opt(ws(')')).parse_next(input)?;
    Ok(())
}

/// Splits a cursor at its first colon, returning the prefix as a fragment
/// and leaving the cursor just past the colon.
fn split_at_colon<'i>(
    input: &mut Span<'i>,
    make_err: fn(SourceSpan) -> ParseSingleError,
) -> PResult<Fragment<'i>> {
    let start = input.current_token_start();
    let text: &str = take_till(0.., ':').parse_next(input)?;
    if opt(':').parse_next(input)?.is_none() {
        input
            .state
            .report_error(make_err(input.state.span(start, text.len())));
        return Err(ErrMode::Cut(()));
    }
    Ok(Fragment {
        text,
        offset: input.state.span(start, 0).offset(),
    })
}

/// A parsed domain interval, before any integer coercion.
#[derive(Clone, Debug)]
enum Interval {
    /// An inclusive `lo~hi` range; always integral.
    Range { lo: i64, hi: i64 },
    /// A bracketed literal list, with the span of each value.
    Values(Vec<(f64, SourceSpan)>),
}

impl Interval {
    fn float_values(&self) -> Vec<f64> {
        match self {
            Self::Range { lo, hi } => (*lo..=*hi).map(|v| v as f64).collect(),
            Self::Values(values) => values.iter().map(|(v, _)| *v).collect(),
        }
    }

    /// Narrows to integers, failing on the first fractional value.
    fn into_ints(self) -> Result<Vec<i64>, (f64, SourceSpan)> {
        match self {
            Self::Range { lo, hi } => Ok((lo..=hi).collect()),
            Self::Values(values) => values
                .into_iter()
                .map(|(value, span)| {
                    if value.fract() == 0.0 {
                        Ok(value as i64)
                    } else {
                        Err((value, span))
                    }
                })
                .collect(),
        }
    }
}

fn signed_int(input: &mut Span<'_>) -> PResult<i64> {
    (opt('-'), digit1).take().parse_to().parse_next(input)
}

fn decimal_literal(input: &mut Span<'_>) -> PResult<f64> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .parse_to()
        .parse_next(input)
}

fn tilde_interval(input: &mut Span<'_>) -> PResult<Interval> {
    let start = input.current_token_start();
    let (lo, _, hi) = (signed_int, '~', signed_int).parse_next(input)?;
    let len = input.current_token_start() - start;
    if lo > hi {
        input.state.report_error(ParseSingleError::ReversedRange(
            input.state.span(start, len),
        ));
        return Err(ErrMode::Cut(()));
    }
    if i128::from(hi) - i128::from(lo) + 1 > MAX_RANGE_VALUES {
        input.state.report_error(ParseSingleError::RangeTooLarge(
            input.state.span(start, len),
        ));
        return Err(ErrMode::Cut(()));
    }
    Ok(Interval::Range { lo, hi })
}

fn bracket_interval(input: &mut Span<'_>) -> PResult<Interval> {
    '['.parse_next(input)?;
    let mut values = Vec::new();
    loop {
        let start = input.current_token_start();
        let value = decimal_literal.parse_next(input)?;
        let len = input.current_token_start() - start;
        values.push((value, input.state.span(start, len)));
        if opt(", ").parse_next(input)?.is_none() {
            break;
        }
    }
    ']'.parse_next(input)?;
    Ok(Interval::Values(values))
}

/// Parses a single domain interval: either `a~b` or `[v1, v2, ...]`.
fn parse_interval(input: &mut Span<'_>) -> PResult<Interval> {
    match ws(alt((tilde_interval, bracket_interval))).parse_next(input) {
        Ok(interval) => Ok(interval),
        Err(ErrMode::Cut(err)) => Err(ErrMode::Cut(err)),
        Err(_) => fail_interval(input),
    }
}

/// Reports an invalid interval covering the text up to the next structural
/// delimiter.
fn fail_interval<T>(input: &mut Span<'_>) -> PResult<T> {
    let start = input.current_token_start();
    let text: &str = take_till(0.., ('(', ')', ':')).parse_next(input)?;
    input.state.report_error(ParseSingleError::InvalidInterval(
        input.state.span(start, text.trim_end().len()),
    ));
    Err(ErrMode::Cut(()))
}

/// Parses an interval and coerces it to integers. Used for `int`, `bool`
/// and the size domains of `list`/`tuple`/`set` — not for dict sizes or
/// string lengths.
fn int_interval(input: &mut Span<'_>) -> PResult<Vec<i64>> {
    let interval = parse_interval(input)?;
    let state = input.state;
    int_domain(&state, interval)
}

fn int_domain(state: &State<'_>, interval: Interval) -> PResult<Vec<i64>> {
    interval.into_ints().map_err(|(value, span)| {
        state.report_error(ParseSingleError::NonIntegralValue { value, span });
        ErrMode::Cut(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn frag(text: &str) -> Fragment<'_> {
        Fragment { text, offset: 0 }
    }

    #[track_caller]
    fn parse(ty: &str, ex: &str, ran: &str) -> DomainNode {
        parse_param(frag(ty), frag(ex), frag(ran)).unwrap_or_else(|error| {
            panic!("for ({ty:?}, {ex:?}, {ran:?}), parse_param reported: {error:?}")
        })
    }

    #[track_caller]
    fn parse_err(ty: &str, ex: &str, ran: &str) -> ParseSingleError {
        match parse_param(frag(ty), frag(ex), frag(ran)) {
            Ok(node) => panic!("for ({ty:?}, {ex:?}, {ran:?}), expected an error, got {node:?}"),
            Err(error) => error,
        }
    }

    fn int_node(exhaustive: &[i64], random: &[i64]) -> DomainNode {
        DomainNode::Int {
            exhaustive: exhaustive.to_vec(),
            random: random.to_vec(),
        }
    }

    macro_rules! assert_error {
        ($error:expr, $name:ident, $start:literal, $len:literal) => {{
            let expected = ParseSingleError::$name(($start, $len).into());
            assert_eq!($error, expected);
        }};
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse("int", "1~3", "[0, 5]"), int_node(&[1, 2, 3], &[0, 5]));
        assert_eq!(parse(" int ", "-2~1", "[-5]"), int_node(&[-2, -1, 0, 1], &[-5]));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(
            parse("bool", "0~1", "[1]"),
            DomainNode::Bool {
                exhaustive: vec![0, 1],
                random: vec![1],
            }
        );
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(
            parse("float", "[1.5, -0.25, 2]", "0~2"),
            DomainNode::Float {
                exhaustive: vec![1.5, -0.25, 2.0],
                random: vec![0.0, 1.0, 2.0],
            }
        );
    }

    #[test]
    fn test_parse_str() {
        assert_eq!(
            parse("str(abc)", "1~2", "[2]"),
            DomainNode::Str {
                charset: ['a', 'b', 'c'].into_iter().collect(),
                exhaustive: vec![1.0, 2.0],
                random: vec![2.0],
            }
        );
        // Duplicate characters collapse; lengths stay uncoerced floats.
        assert_eq!(
            parse("str(aab)", "[1.5]", "[2]"),
            DomainNode::Str {
                charset: ['a', 'b'].into_iter().collect(),
                exhaustive: vec![1.5],
                random: vec![2.0],
            }
        );
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse("list(int)", "0~2(1~3)", "[1](2~4)"),
            DomainNode::List {
                exhaustive: vec![0, 1, 2],
                random: vec![1],
                element: Box::new(int_node(&[1, 2, 3], &[2, 3, 4])),
            }
        );
    }

    #[test_case("tuple" ; "tuple keyword")]
    #[test_case("set" ; "set keyword")]
    fn test_parse_sized_containers(keyword: &str) {
        let node = parse(&format!("{keyword}(int)"), "0~1(1~2)", "[2](3~4)");
        assert_eq!(node.kind(), keyword);
        assert_eq!(node.exhaustive_len(), 2);
        assert_eq!(node.random_len(), 1);
    }

    #[test]
    fn test_parse_nested_list() {
        assert_eq!(
            parse("list(list(int))", "0~1(1~2(3~4))", "[2]([1](5~6))"),
            DomainNode::List {
                exhaustive: vec![0, 1],
                random: vec![2],
                element: Box::new(DomainNode::List {
                    exhaustive: vec![1, 2],
                    random: vec![1],
                    element: Box::new(int_node(&[3, 4], &[5, 6])),
                }),
            }
        );
    }

    #[test]
    fn test_parse_str_nested_in_list() {
        assert_eq!(
            parse("list(str(ab))", "0~1(1~2)", "[1]([2])"),
            DomainNode::List {
                exhaustive: vec![0, 1],
                random: vec![1],
                element: Box::new(DomainNode::Str {
                    charset: ['a', 'b'].into_iter().collect(),
                    exhaustive: vec![1.0, 2.0],
                    random: vec![2.0],
                }),
            }
        );
    }

    #[test]
    fn test_parse_dict() {
        // Dict sizes are not coerced: 1.5 is accepted as a size here.
        assert_eq!(
            parse("dict(int:float)", "[1.5](1~3:[0.5, 1.5])", "[2](0~1:[1.0])"),
            DomainNode::Dict {
                exhaustive: vec![1.5],
                random: vec![2.0],
                key: Box::new(int_node(&[1, 2, 3], &[0, 1])),
                value: Box::new(DomainNode::Float {
                    exhaustive: vec![0.5, 1.5],
                    random: vec![1.0],
                }),
            }
        );
    }

    #[test]
    fn test_parse_dict_nested_value() {
        // A colon nested on the value side is past the split point, so this
        // parses; a dict-typed key would mis-split and fail.
        assert_eq!(
            parse(
                "dict(int:dict(int:int))",
                "1~1(0~1:2~2(3~3:4~4))",
                "[1]([0]:[2]([3]:[4]))",
            ),
            DomainNode::Dict {
                exhaustive: vec![1.0],
                random: vec![1.0],
                key: Box::new(int_node(&[0, 1], &[0])),
                value: Box::new(DomainNode::Dict {
                    exhaustive: vec![2.0],
                    random: vec![2.0],
                    key: Box::new(int_node(&[3], &[3])),
                    value: Box::new(int_node(&[4], &[4])),
                }),
            }
        );
    }

    #[test]
    fn test_whitespace_tolerance() {
        assert_eq!(
            parse(" list ( int ) ", " 0~2 ( 1~3 ) ", " [1] ( 2~4 ) "),
            DomainNode::List {
                exhaustive: vec![0, 1, 2],
                random: vec![1],
                element: Box::new(int_node(&[1, 2, 3], &[2, 3, 4])),
            }
        );
    }

    #[test_case("foo" ; "unknown keyword")]
    #[test_case("intx" ; "unknown keyword with known prefix")]
    #[test_case("(int)" ; "leading parenthesis")]
    #[test_case("" ; "empty")]
    #[test_case("int int" ; "trailing text")]
    #[test_case("str" ; "str without charset")]
    #[test_case("list" ; "container without element")]
    #[test_case("int(int)" ; "primitive with element")]
    #[test_case("dict(int)" ; "dict without colon")]
    fn test_invalid_type_signature(ty: &str) {
        assert!(matches!(
            parse_err(ty, "1~2(1~2:1~2)", "1~2(1~2:1~2)"),
            ParseSingleError::InvalidTypeSignature(_)
        ));
    }

    #[test_case("foo" ; "not an interval")]
    #[test_case("1~" ; "missing upper bound")]
    #[test_case("~2" ; "missing lower bound")]
    #[test_case("1.5~2" ; "fractional bound")]
    #[test_case("[]" ; "empty bracket list")]
    #[test_case("[1,2]" ; "missing separator space")]
    #[test_case("[1, 2" ; "unclosed bracket list")]
    #[test_case("[1.]" ; "trailing dot")]
    #[test_case("5" ; "bare scalar")]
    #[test_case("1~3 x" ; "trailing junk")]
    fn test_invalid_interval(ex: &str) {
        assert!(matches!(
            parse_err("int", ex, "1~2"),
            ParseSingleError::InvalidInterval(_)
        ));
    }

    #[test]
    fn test_reversed_range() {
        let error = parse_err("int", "3~1", "1~2");
        assert_error!(error, ReversedRange, 0, 3);
    }

    #[test]
    fn test_range_too_large() {
        assert!(matches!(
            parse_err("int", "0~1048576", "1~2"),
            ParseSingleError::RangeTooLarge(_)
        ));
        // One value under the cap is fine.
        parse("int", "0~1048575", "1~2");
    }

    #[test]
    fn test_non_integral_value() {
        let error = parse_err("int", "[1, 2.5]", "1~2");
        assert_eq!(
            error,
            ParseSingleError::NonIntegralValue {
                value: 2.5,
                span: (4, 3).into(),
            }
        );

        // Also applies to list/tuple/set sizes.
        assert!(matches!(
            parse_err("list(int)", "[0.5](1~2)", "[1](1~2)"),
            ParseSingleError::NonIntegralValue { .. }
        ));
    }

    #[test]
    fn test_element_error_reported_before_size_coercion() {
        // Sizes are coerced after the element parse, so the element's
        // interval error wins over the fractional size.
        assert!(matches!(
            parse_err("list(int)", "[0.5](oops)", "[1](1~2)"),
            ParseSingleError::InvalidInterval(_)
        ));
    }

    #[test]
    fn test_parenthesis_mismatch() {
        let error = parse_err("list(int)", "0~2", "[1](2~4)");
        assert_error!(error, ParenthesisMismatch, 3, 0);

        // Junk between the size interval and where `(` should be reads as a
        // bad interval instead.
        assert!(matches!(
            parse_err("list(int)", "0~2x(1~3)", "[1](2~4)"),
            ParseSingleError::InvalidInterval(_)
        ));
    }

    #[test]
    fn test_colon_mismatch() {
        assert!(matches!(
            parse_err("dict(int:int)", "1~2(1~3)", "1~2(1~3:1~3)"),
            ParseSingleError::ColonMismatch(_)
        ));
        assert!(matches!(
            parse_err("dict(int:int)", "1~2(1~3:1~3)", "1~2(1~3)"),
            ParseSingleError::ColonMismatch(_)
        ));
    }

    #[test]
    fn test_dict_key_with_colon_fails() {
        // The first-colon split puts the second colon out of reach for a
        // dict-typed key.
        assert!(
            parse_param(
                frag("dict(dict(int:int):int)"),
                frag("1~1(1~1(1~1:1~1):1~1)"),
                frag("1~1(1~1(1~1:1~1):1~1)"),
            )
            .is_err()
        );
    }

    #[test]
    fn test_error_spans_are_offset() {
        // Fragment offsets place error spans into the raw config text.
        let error = parse_param(
            Fragment { text: "int", offset: 100 },
            Fragment { text: "3~1", offset: 200 },
            Fragment { text: "1~2", offset: 300 },
        )
        .unwrap_err();
        assert_error!(error, ReversedRange, 200, 3);
    }

    #[test_strategy::proptest]
    fn proptest_tilde_range(
        #[strategy(-500i64..=500)] a: i64,
        #[strategy(-500i64..=500)] b: i64,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let node = parse("int", &format!("{lo}~{hi}"), "[0]");
        let DomainNode::Int { exhaustive, .. } = node else {
            panic!("expected an int node");
        };
        assert_eq!(exhaustive.len() as i64, hi - lo + 1);
        assert_eq!(exhaustive.first(), Some(&lo));
        assert_eq!(exhaustive.last(), Some(&hi));
        for pair in exhaustive.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test_strategy::proptest]
    fn proptest_reversed_tilde_range_fails(
        #[strategy(-500i64..=500)] a: i64,
        #[strategy(-500i64..=500)] b: i64,
    ) {
        proptest::prop_assume!(a > b);
        let error = parse_err("int", &format!("{a}~{b}"), "[0]");
        assert!(matches!(error, ParseSingleError::ReversedRange(_)));
    }

    #[test_strategy::proptest]
    fn proptest_bracket_list_preserves_order(
        #[strategy(proptest::collection::vec(-1000i64..=1000, 1..8))] values: Vec<i64>,
    ) {
        let rendered = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        // All-integral bracket lists coerce to the same sequence, order and
        // duplicates preserved.
        let node = parse("int", &format!("[{rendered}]"), "[0]");
        let DomainNode::Int { exhaustive, .. } = node else {
            panic!("expected an int node");
        };
        assert_eq!(exhaustive, values);
    }

    #[test_strategy::proptest]
    fn proptest_fractional_value_fails_anywhere(
        #[strategy(proptest::collection::vec(-1000i64..=1000, 1..8))] values: Vec<i64>,
        #[strategy(0usize..8)] position: usize,
    ) {
        let position = position % values.len();
        let rendered = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == position {
                    format!("{v}.5")
                } else {
                    v.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let error = parse_err("int", &format!("[{rendered}]"), "[0]");
        assert!(matches!(error, ParseSingleError::NonIntegralValue { .. }));
    }
}
