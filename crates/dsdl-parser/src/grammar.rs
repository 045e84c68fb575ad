//! Syntax of field type expressions.
//!
//! This module turns a normalized field type expression into a
//! [`TypeSyntax`]: the type name plus an optional bracketed parameter list.
//! It knows nothing about which types exist or which parameters they accept;
//! that is decided in [`field_type`](super::field_type).
//!
//! ```text
//! type   := name ( '[' ( param ( ',' param )* )? ']' )?
//! param  := ( name '=' )? value
//! value  := ( quoted | '[' nested* ']' | plain )+
//! ```
//!
//! Parameter values are kept as raw text. Brackets and quotes inside a value
//! are balanced, so the commas in `List[etype=List[etype=Int,ordered=true]]`
//! or `Date["%Y,%m"]` do not split parameters.

use std::ops::Range;

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, delimited, opt, repeat, separated, terminated},
    error::ModalResult,
    stream::LocatingSlice,
    token::{take_till, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::{Span, Spanned},
};

type Input<'src> = LocatingSlice<&'src str>;

/// Deepest bracket nesting accepted in one expression.
pub(crate) const MAX_NESTING: usize = 32;

/// A parsed but uninterpreted type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeSyntax<'src> {
    /// The type name, e.g. `List`.
    pub name: Spanned<&'src str>,
    /// The parameter list with the span of its brackets, if brackets were written.
    pub params: Option<Spanned<Vec<ParamSyntax<'src>>>>,
    /// Span of the whole expression.
    pub span: Span,
}

/// One `name=value` or bare `value` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParamSyntax<'src> {
    pub key: Option<Spanned<&'src str>>,
    pub value: Spanned<&'src str>,
    pub span: Span,
}

fn spanned<T>((value, range): (T, Range<usize>)) -> Spanned<T> {
    Spanned::new(value, Span::new(range))
}

/// Parse a type or parameter name
fn name<'src>(input: &mut Input<'src>) -> ModalResult<Spanned<&'src str>> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .with_span()
        .map(spanned)
        .parse_next(input)
}

/// Parse a single- or double-quoted run, quotes included
fn quoted(input: &mut Input<'_>) -> ModalResult<()> {
    alt((
        ('"', cut_err((take_till(0.., '"'), '"'))).void(),
        ('\'', cut_err((take_till(0.., '\''), '\''))).void(),
    ))
    .parse_next(input)
}

/// Parse a bracketed group; commas inside it belong to the group
fn bracketed(input: &mut Input<'_>) -> ModalResult<()> {
    (
        '[',
        repeat(0.., alt((quoted, bracketed, nested_plain))).map(|()| ()),
        cut_err(']'),
    )
        .void()
        .parse_next(input)
}

/// Plain text inside a bracketed group
fn nested_plain(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(1.., |c: char| !matches!(c, '[' | ']' | '"' | '\''))
        .void()
        .parse_next(input)
}

/// Plain text at parameter level, stopping at a separator
fn plain(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(1.., |c: char| !matches!(c, ',' | '[' | ']' | '"' | '\''))
        .void()
        .parse_next(input)
}

/// Parse a parameter value, returning its raw text
fn value<'src>(input: &mut Input<'src>) -> ModalResult<Spanned<&'src str>> {
    repeat(1.., alt((quoted, bracketed, plain)))
        .map(|()| ())
        .take()
        .with_span()
        .map(spanned)
        .parse_next(input)
}

/// Parse `name=value` or `value`
fn param<'src>(input: &mut Input<'src>) -> ModalResult<ParamSyntax<'src>> {
    (opt(terminated(name, '=')), value)
        .with_span()
        .map(|((key, value), range)| ParamSyntax {
            key,
            value,
            span: Span::new(range),
        })
        .parse_next(input)
}

/// Parse a bracketed parameter list: `[a, b=c]`
fn params<'src>(input: &mut Input<'src>) -> ModalResult<Spanned<Vec<ParamSyntax<'src>>>> {
    delimited('[', separated(0.., param, ','), cut_err(']'))
        .with_span()
        .map(|(params, range): (Vec<ParamSyntax<'src>>, Range<usize>)| {
            Spanned::new(params, Span::new(range))
        })
        .parse_next(input)
}

fn type_expression<'src>(input: &mut Input<'src>) -> ModalResult<TypeSyntax<'src>> {
    (name, opt(params))
        .with_span()
        .map(|((name, params), range)| TypeSyntax {
            name,
            params,
            span: Span::new(range),
        })
        .parse_next(input)
}

/// Parse a normalized field type expression into its syntax tree.
///
/// The whole input must be consumed.
///
/// # Errors
///
/// Returns an `E107` diagnostic pointing at the first character that could
/// not be parsed, or at the first bracket nested deeper than [`MAX_NESTING`].
pub(crate) fn parse_type(source: &str) -> Result<TypeSyntax<'_>> {
    check_nesting(source)?;
    type_expression
        .parse(LocatingSlice::new(source))
        .map_err(|err| malformed(source, err.offset()))
}

/// Reject nesting deep enough to exhaust the stack while parsing.
///
/// Brackets inside quoted runs do not nest.
fn check_nesting(source: &str) -> Result<()> {
    let mut depth = 0usize;
    let mut quote = None;
    for (offset, c) in source.char_indices() {
        match (quote, c) {
            (Some(open), _) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(Diagnostic::error(format!(
                        "field type nests deeper than {MAX_NESTING} levels"
                    ))
                    .with_code(ErrorCode::E107)
                    .with_label(Span::new(offset..offset + 1), "nested too deeply")
                    .with_help("split the type into fewer nested lists"));
                }
            }
            (None, ']') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn malformed(source: &str, offset: usize) -> Diagnostic {
    let rest = &source[offset..];
    let (span, label) = match rest.chars().next() {
        Some(c) => (
            Span::new(offset..offset + c.len_utf8()),
            format!("unexpected `{c}`"),
        ),
        None => (Span::new(offset..offset), "unexpected end of expression".to_string()),
    };

    let help = if source.is_empty() {
        "a field type cannot be empty"
    } else if source.matches('[').count() != source.matches(']').count() {
        "check that every `[` has a matching `]`"
    } else {
        "expected `Type` or `Type[param, name=value]`"
    };

    Diagnostic::error(format!("malformed field type `{source}`"))
        .with_code(ErrorCode::E107)
        .with_label(span, label)
        .with_help(help)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(syntax: &'a TypeSyntax<'_>) -> Vec<(Option<&'a str>, &'a str)> {
        syntax
            .params
            .as_ref()
            .map(|params| {
                params
                    .inner()
                    .iter()
                    .map(|param| (param.key.map(|k| *k.inner()), *param.value.inner()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_bare_name() {
        let syntax = parse_type("Coord3D").expect("should parse");

        assert_eq!(*syntax.name.inner(), "Coord3D");
        assert!(syntax.params.is_none());
        assert_eq!(syntax.span, Span::new(0..7));
    }

    #[test]
    fn test_named_and_bare_params() {
        let syntax = parse_type("List[Int,ordered=true]").expect("should parse");

        assert_eq!(values(&syntax), vec![(None, "Int"), (Some("ordered"), "true")]);
        let params = syntax.params.expect("params");
        assert_eq!(params.span(), Span::new(4..22));
        assert_eq!(params.inner()[1].value.span(), Span::new(17..21));
    }

    #[test]
    fn test_nested_commas_stay_in_value() {
        let syntax =
            parse_type("List[etype=List[etype=Int,ordered=true],ordered=false]").expect("should parse");

        assert_eq!(
            values(&syntax),
            vec![
                (Some("etype"), "List[etype=Int,ordered=true]"),
                (Some("ordered"), "false"),
            ]
        );
    }

    #[test]
    fn test_quoted_commas_stay_in_value() {
        let syntax = parse_type(r#"Date[fmt="%Y,%m"]"#).expect("should parse");

        assert_eq!(values(&syntax), vec![(Some("fmt"), r#""%Y,%m""#)]);
    }

    #[test]
    fn test_empty_brackets() {
        let syntax = parse_type("Label[]").expect("should parse");

        assert_eq!(syntax.params.map(|p| p.inner().len()), Some(0));
    }

    #[test]
    fn test_value_may_contain_spaces() {
        let syntax = parse_type("Label[not an identifier]").expect("should parse");

        assert_eq!(values(&syntax), vec![(None, "not an identifier")]);
    }

    #[test]
    fn test_malformed_expressions() {
        for source in ["", "[Int]", "List[Int", "List[Int]]", "List[Int]x", "Date[\"%Y]", "List[,]"] {
            let diag = parse_type(source).expect_err(source);
            assert_eq!(diag.code(), Some(ErrorCode::E107), "{source}");
            assert_eq!(diag.labels().len(), 1, "{source}");
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}Int{}", "List[".repeat(depth), "]".repeat(depth));

        assert!(parse_type(&nested(MAX_NESTING)).is_ok());

        let source = nested(10_000);
        let diag = parse_type(&source).expect_err("too deep");
        let offset = MAX_NESTING * 5 + 4;
        assert_eq!(diag.code(), Some(ErrorCode::E107));
        assert_eq!(diag.labels()[0].span(), Span::new(offset..offset + 1));
    }

    #[test]
    fn test_quoted_brackets_do_not_nest() {
        let source = format!("Date[fmt=\"{}\"]", "[".repeat(MAX_NESTING * 2));

        assert!(parse_type(&source).is_ok());
    }

    #[test]
    fn test_malformed_points_at_trailing_text() {
        let diag = parse_type("List[Int]x").expect_err("trailing text");

        assert_eq!(diag.labels()[0].span(), Span::new(9..10));
        assert_eq!(diag.labels()[0].message(), "unexpected `x`");
    }
}
