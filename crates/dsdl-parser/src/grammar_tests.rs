//! Scenario tests for the field type grammar
//!
//! These tests exercise the grammar end to end, from a normalized expression
//! to a [`FieldType`], including the equivalences schema authors rely on.

use dsdl_core::{
    field_type::{FieldKind, FieldType},
    identifier::Id,
};

use crate::{
    error::{ErrorCode, ErrorKind},
    field_type::{normalize, parse_field_type},
};

fn parse_ok(source: &str) -> FieldType {
    match parse_field_type(source) {
        Ok(field_type) => field_type,
        Err(err) => panic!("Expected `{source}` to parse, but got error: {err}"),
    }
}

fn assert_kind(source: &str, kind: ErrorKind) {
    match parse_field_type(source) {
        Ok(field_type) => panic!("Expected `{source}` to fail, but it parsed as {field_type:?}"),
        Err(err) => assert_eq!(err.kind(), Some(kind), "`{source}`: {err}"),
    }
}

fn int() -> FieldType {
    FieldType::Plain(FieldKind::Int)
}

#[cfg(test)]
mod list_tests {
    use super::*;

    #[test]
    fn test_bare_and_named_etype_are_equivalent() {
        assert_eq!(parse_ok("List[etype=Int]"), parse_ok("List[Int]"));
        assert_eq!(
            parse_ok("List[Int]"),
            FieldType::List {
                element: Box::new(int()),
                ordered: None,
            }
        );
    }

    #[test]
    fn test_ordered_is_case_insensitive() {
        let expected = parse_ok("List[etype=Int,ordered=true]");

        assert_eq!(parse_ok("List[etype=Int,ordered=TRUE]"), expected);
        assert_eq!(parse_ok("List[etype=Int,ordered=True]"), expected);
        assert_ne!(parse_ok("List[etype=Int,ordered=false]"), expected);
    }

    #[test]
    fn test_missing_etype() {
        assert_kind("List[ordered=true]", ErrorKind::GrammarSyntax);

        let err = parse_field_type("List[ordered=true]").expect_err("missing etype");
        assert_eq!(err.message(), "List types must contain parameter `etype`");
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            parse_ok("List[etype=List[etype=Int]]"),
            FieldType::List {
                element: Box::new(FieldType::List {
                    element: Box::new(int()),
                    ordered: None,
                }),
                ordered: None,
            }
        );
    }

    #[test]
    fn test_nested_list_with_inner_ordered() {
        let parsed = parse_ok("List[etype=List[etype=Int,ordered=true],ordered=false]");

        assert_eq!(
            parsed,
            FieldType::List {
                element: Box::new(FieldType::List {
                    element: Box::new(int()),
                    ordered: Some(true),
                }),
                ordered: Some(false),
            }
        );
    }

    #[test]
    fn test_list_of_labels_references_domain() {
        let parsed = parse_ok("List[etype=Label[dom=MyClassDom]]");

        assert_eq!(parsed.references(), vec![Id::new("MyClassDom")]);
    }

    #[test]
    fn test_parameter_count() {
        assert_kind("List[]", ErrorKind::GrammarSyntax);
        assert_kind("List[Int,ordered=true,ordered=false]", ErrorKind::GrammarSyntax);
    }

    #[test]
    fn test_invalid_boolean() {
        let err = parse_field_type("List[Int,ordered=1]").expect_err("invalid bool");

        assert_eq!(err.code(), Some(ErrorCode::E105));
        assert_eq!(err.kind(), Some(ErrorKind::GrammarSyntax));
    }
}

#[cfg(test)]
mod scalar_tests {
    use super::*;

    #[test]
    fn test_label_bare_and_named_are_equivalent() {
        assert_eq!(parse_ok("Label[MyDom]"), parse_ok("Label[dom=MyDom]"));
        assert_eq!(
            parse_ok("Label[MyDom]"),
            FieldType::Label {
                dom: Id::new("MyDom")
            }
        );
    }

    #[test]
    fn test_label_requires_identifier() {
        assert_kind("Label[not an identifier]", ErrorKind::GrammarSyntax);
        assert_kind("Label[dom=my-dom]", ErrorKind::GrammarSyntax);
    }

    #[test]
    fn test_date_and_time_formats_are_requoted() {
        assert_eq!(
            parse_ok(r#"Date[fmt="%Y-%m-%d"]"#),
            FieldType::Date {
                fmt: "%Y-%m-%d".to_string()
            }
        );
        assert_eq!(parse_ok("Date[fmt=%Y-%m-%d]"), parse_ok(r#"Date["%Y-%m-%d"]"#));
        assert_eq!(
            parse_ok("Time['%H:%M:%S']"),
            FieldType::Time {
                fmt: "%H:%M:%S".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_parameter_name() {
        assert_kind("Date[format=%Y]", ErrorKind::GrammarSyntax);
        assert_kind("Label[domain=MyDom]", ErrorKind::GrammarSyntax);
    }
}

#[cfg(test)]
mod unknown_type_tests {
    use super::*;

    #[test]
    fn test_unknown_names() {
        for source in ["Float", "int", "ListField", "Labels[dom=A]", "Struct"] {
            assert_kind(source, ErrorKind::UnknownType);
        }
    }

    #[test]
    fn test_unknown_type_names_the_token() {
        let err = parse_field_type("List[etype=Tensor]").expect_err("unknown element");

        assert_eq!(err.message(), "unknown type `Tensor`");
    }

    #[test]
    fn test_parameterless_type_with_parameters() {
        assert_kind("Image[png]", ErrorKind::UnknownType);
    }
}

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn test_whitespace_is_insignificant_after_normalizing() {
        let spaced = normalize("List[ etype = Label[ dom = MyDom ] , ordered = true ]");

        assert_eq!(parse_ok(&spaced), parse_ok("List[etype=Label[dom=MyDom],ordered=true]"));
    }

    #[test]
    fn test_display_output_parses_to_same_value() {
        let sources = [
            "Bool",
            "Coord3D",
            "Label[MyDom]",
            "Time['%H:%M']",
            "List[Int]",
            "List[etype=List[etype=Label[dom=A]],ordered=FALSE]",
        ];
        for source in sources {
            let parsed = parse_ok(source);
            assert_eq!(parse_ok(&parsed.to_string()), parsed, "{source}");
        }
    }

    #[test]
    fn test_malformed_input() {
        for source in ["", "List[Int", "List[Int]]", "Label[dom=A]B"] {
            assert_kind(source, ErrorKind::GrammarSyntax);
        }
    }
}
