//! Interpretation of field type expressions.
//!
//! [`parse_field_type`] resolves the type name of a [`TypeSyntax`] to a
//! [`FieldKind`] once and hands the parameters to the rule for that kind's
//! [`Arity`]: parameterless, scalar (`Label`, `Date`, `Time`), or the `List`
//! container, whose element type is parsed recursively.

use dsdl_core::{
    field_type::{Arity, FieldKind, FieldType},
    identifier::{Id, is_identifier},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    grammar::{self, ParamSyntax, TypeSyntax},
    span::{Span, Spanned},
};

/// Strip all whitespace from a raw field type expression.
///
/// Schema authors may write `List[etype = Int, ordered = true]`; the grammar
/// works on the normalized form `List[etype=Int,ordered=true]`.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse a normalized field type expression.
///
/// Label spans of a returned diagnostic point into `expression`, which is
/// also attached as the diagnostic's source text.
///
/// # Examples
///
/// ```
/// # use dsdl_parser::parse_field_type;
/// let field_type = parse_field_type("List[etype=Label[dom=Animals],ordered=TRUE]").unwrap();
/// assert_eq!(field_type.to_string(), "List[etype=Label[dom=Animals],ordered=true]");
/// ```
///
/// # Errors
///
/// Returns an `E100` diagnostic for unknown types and an `E101`-`E108`
/// diagnostic for malformed parameter lists.
pub fn parse_field_type(expression: &str) -> Result<FieldType> {
    parse_expression(expression).map_err(|diag| diag.with_source_text(expression))
}

fn parse_expression(expression: &str) -> Result<FieldType> {
    let syntax = grammar::parse_type(expression)?;
    elaborate(&syntax)
}

fn elaborate(syntax: &TypeSyntax<'_>) -> Result<FieldType> {
    let name = *syntax.name.inner();
    let Some(kind) = FieldKind::from_name(name) else {
        return Err(Diagnostic::error(format!("unknown type `{name}`"))
            .with_code(ErrorCode::E100)
            .with_label(syntax.name.span(), "not a field type")
            .with_help(format!("expected one of {}", known_types())));
    };

    match kind.arity() {
        Arity::Parameterless => plain(kind, syntax),
        Arity::Scalar { default_param } => scalar(kind, default_param, syntax),
        Arity::Container => list(syntax),
    }
}

fn known_types() -> String {
    FieldKind::ALL
        .iter()
        .map(|kind| format!("`{kind}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn plain(kind: FieldKind, syntax: &TypeSyntax<'_>) -> Result<FieldType> {
    match &syntax.params {
        None => Ok(FieldType::Plain(kind)),
        Some(params) => {
            let written = format!("{kind}[...]");
            Err(Diagnostic::error(format!("unknown type `{written}`"))
                .with_code(ErrorCode::E100)
                .with_label(params.span(), "unexpected parameters")
                .with_help(format!("`{kind}` does not take parameters; write `{kind}`")))
        }
    }
}

/// Parameters of `Label`, `Date`, and `Time`: exactly one, named
/// `default_param` or given bare.
fn scalar(kind: FieldKind, default_param: &'static str, syntax: &TypeSyntax<'_>) -> Result<FieldType> {
    let params = required_params(kind, syntax, &format!("`{default_param}`"))?;

    let mut value: Option<&ParamSyntax<'_>> = None;
    for param in params.inner() {
        let key = param.key.map_or(default_param, |key| *key.inner());
        if key != default_param {
            return Err(unknown_param(kind, param, &format!("only `{default_param}`")));
        }
        if let Some(first) = value {
            return Err(Diagnostic::error(format!("duplicate parameter `{key}` in `{kind}`"))
                .with_code(ErrorCode::E104)
                .with_label(param.span, "given again here")
                .with_secondary_label(first.span, "first given here"));
        }
        value = Some(param);
    }

    let Some(param) = value else {
        return Err(missing_params(kind, params.span(), &format!("`{default_param}`")));
    };

    match kind {
        FieldKind::Label => Ok(FieldType::Label {
            dom: domain(&param.value)?,
        }),
        FieldKind::Date => Ok(FieldType::Date {
            fmt: format_string(kind, &param.value)?,
        }),
        FieldKind::Time => Ok(FieldType::Time {
            fmt: format_string(kind, &param.value)?,
        }),
        _ => unreachable!("only Label, Date, and Time are scalar kinds"),
    }
}

fn domain(value: &Spanned<&str>) -> Result<Id> {
    let dom = *value.inner();
    if !is_identifier(dom) {
        return Err(Diagnostic::error(format!("invalid dom: `{dom}` is not an identifier"))
            .with_code(ErrorCode::E106)
            .with_label(value.span(), "expected a class domain name")
            .with_help("`dom` names a class_domain definition, e.g. `Label[dom=MyClassDom]`"));
    }
    Ok(Id::new(dom))
}

/// The format with one enclosing pair of matching quotes removed.
fn format_string(kind: FieldKind, value: &Spanned<&str>) -> Result<String> {
    let raw = *value.inner();
    let fmt = ['"', '\'']
        .into_iter()
        .find_map(|quote| raw.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(raw);

    if fmt.contains('"') && fmt.contains('\'') {
        return Err(
            Diagnostic::error(format!("format of `{kind}` contains both `\"` and `'`"))
                .with_code(ErrorCode::E108)
                .with_label(value.span(), "cannot be quoted")
                .with_help("a format may contain one kind of quote when wrapped in the other, e.g. `Time['%H\"%M']`"),
        );
    }
    Ok(fmt.to_string())
}

/// Parameters of `List`: the element type first, then an optional `ordered`.
fn list(syntax: &TypeSyntax<'_>) -> Result<FieldType> {
    let kind = FieldKind::List;
    let params = required_params(kind, syntax, "an element type")?;

    let (etype, ordered) = match params.inner().as_slice() {
        [] => return Err(missing_params(kind, params.span(), "an element type")),
        [etype] => (etype, None),
        [etype, ordered] => (etype, Some(ordered)),
        [_, _, extra, ..] => {
            return Err(Diagnostic::error(format!(
                "too many parameters in List ({} given)",
                params.inner().len()
            ))
            .with_code(ErrorCode::E102)
            .with_label(extra.span, "unexpected parameter")
            .with_help("`List` takes `etype` and an optional `ordered`"));
        }
    };

    if let Some(key) = etype.key.filter(|key| *key.inner() != "etype") {
        return Err(Diagnostic::error("List types must contain parameter `etype`")
            .with_code(ErrorCode::E103)
            .with_label(key.span(), "expected `etype`")
            .with_help("write the element type first, e.g. `List[etype=Int]` or `List[Int]`"));
    }

    let element = parse_expression(etype.value.inner())
        .map_err(|diag| diag.shift_labels(etype.value.span().start()))?;

    let ordered = ordered.map(ordered_flag).transpose()?;

    Ok(FieldType::List {
        element: Box::new(element),
        ordered,
    })
}

fn ordered_flag(param: &ParamSyntax<'_>) -> Result<bool> {
    match param.key.map(|key| *key.inner()) {
        None | Some("ordered") => {}
        Some("etype") => {
            return Err(Diagnostic::error("duplicate parameter `etype` in `List`")
                .with_code(ErrorCode::E104)
                .with_label(param.span, "given again here"));
        }
        Some(_) => return Err(unknown_param(FieldKind::List, param, "`etype` and `ordered`")),
    }

    let value = *param.value.inner();
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(
            Diagnostic::error(format!("invalid value `{value}` for `ordered` of List"))
                .with_code(ErrorCode::E105)
                .with_label(param.value.span(), "expected `true` or `false`")
                .with_help("`ordered` accepts `true` or `false` in any letter case"),
        ),
    }
}

fn required_params<'a, 'src>(
    kind: FieldKind,
    syntax: &'a TypeSyntax<'src>,
    expected: &str,
) -> Result<&'a Spanned<Vec<ParamSyntax<'src>>>> {
    match &syntax.params {
        Some(params) if !params.inner().is_empty() => Ok(params),
        Some(params) => Err(missing_params(kind, params.span(), expected)),
        None => Err(missing_params(kind, syntax.name.span(), expected)),
    }
}

fn missing_params(kind: FieldKind, span: Span, expected: &str) -> Diagnostic {
    Diagnostic::error(format!("`{kind}` requires {expected}"))
        .with_code(ErrorCode::E101)
        .with_label(span, "parameters missing")
        .with_help(match kind {
            FieldKind::List => "e.g. `List[etype=Int]` or `List[Int,ordered=true]`",
            FieldKind::Label => "e.g. `Label[dom=MyClassDom]` or `Label[MyClassDom]`",
            _ => "e.g. `Date[fmt=\"%Y-%m-%d\"]`",
        })
}

fn unknown_param(kind: FieldKind, param: &ParamSyntax<'_>, accepted: &str) -> Diagnostic {
    let (name, span) = param
        .key
        .map_or(("<bare>", param.span), |key| (*key.inner(), key.span()));
    Diagnostic::error(format!("unknown parameter `{name}` for `{kind}`"))
        .with_code(ErrorCode::E103)
        .with_label(span, "not accepted here")
        .with_help(format!("`{kind}` accepts {accepted}"))
}
