//! Field type expressions.
//!
//! A struct field is declared with one of a fixed set of type forms. The set is
//! closed, so it is modelled as the [`FieldKind`] tag plus the [`FieldType`]
//! tagged union carrying each form's parameters:
//!
//! - *Parameterless* types such as `Int` or `BBox`.
//! - *Parameterized scalars*: `Label[dom=...]`, `Date[fmt=...]`, `Time[fmt=...]`.
//! - The *container* `List[etype=..., ordered=...]`, whose element type is
//!   itself a [`FieldType`].
//!
//! The [`fmt::Display`] implementation renders the canonical grammar form, so
//! printing a parsed type and parsing the result again yields the same value.
//! Format strings are quoted with `"`, or with `'` when they contain `"`; a
//! format containing both quote characters has no grammar form.

use std::fmt;

use crate::identifier::Id;

/// How a [`FieldKind`] takes parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No parameters, the type is written as its bare name.
    Parameterless,
    /// A single primary parameter; `default_param` is assumed when a value is
    /// given without a `name=` prefix.
    Scalar { default_param: &'static str },
    /// The `List` container, with `etype` and optional `ordered`.
    Container,
}

/// The recognized field type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Num,
    Int,
    Str,
    Coord,
    Coord3D,
    Interval,
    BBox,
    Polygon,
    Image,
    Label,
    Date,
    Time,
    List,
}

impl FieldKind {
    /// Every kind, in the order they are documented.
    pub const ALL: [FieldKind; 14] = [
        FieldKind::Bool,
        FieldKind::Num,
        FieldKind::Int,
        FieldKind::Str,
        FieldKind::Coord,
        FieldKind::Coord3D,
        FieldKind::Interval,
        FieldKind::BBox,
        FieldKind::Polygon,
        FieldKind::Image,
        FieldKind::Label,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::List,
    ];

    /// Looks up a kind by its exact type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsdl_core::field_type::FieldKind;
    ///
    /// assert_eq!(FieldKind::from_name("Coord3D"), Some(FieldKind::Coord3D));
    /// assert_eq!(FieldKind::from_name("int"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The type name as written in a schema.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Bool => "Bool",
            FieldKind::Num => "Num",
            FieldKind::Int => "Int",
            FieldKind::Str => "Str",
            FieldKind::Coord => "Coord",
            FieldKind::Coord3D => "Coord3D",
            FieldKind::Interval => "Interval",
            FieldKind::BBox => "BBox",
            FieldKind::Polygon => "Polygon",
            FieldKind::Image => "Image",
            FieldKind::Label => "Label",
            FieldKind::Date => "Date",
            FieldKind::Time => "Time",
            FieldKind::List => "List",
        }
    }

    /// Returns how this kind takes parameters.
    pub fn arity(&self) -> Arity {
        match self {
            FieldKind::Label => Arity::Scalar {
                default_param: "dom",
            },
            FieldKind::Date | FieldKind::Time => Arity::Scalar {
                default_param: "fmt",
            },
            FieldKind::List => Arity::Container,
            _ => Arity::Parameterless,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized field type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A parameterless type. Only kinds with [`Arity::Parameterless`] appear here.
    Plain(FieldKind),
    /// A label drawn from the class domain `dom`.
    Label { dom: Id },
    /// A date with the given format string (without surrounding quotes).
    Date { fmt: String },
    /// A time with the given format string (without surrounding quotes).
    Time { fmt: String },
    /// A list of `element`; `ordered` is `None` when the schema leaves it to
    /// the runtime default.
    List {
        element: Box<FieldType>,
        ordered: Option<bool>,
    },
}

impl FieldType {
    /// Returns the kind tag of this type.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Plain(kind) => *kind,
            FieldType::Label { .. } => FieldKind::Label,
            FieldType::Date { .. } => FieldKind::Date,
            FieldType::Time { .. } => FieldKind::Time,
            FieldType::List { .. } => FieldKind::List,
        }
    }

    /// Returns the definition names this type refers to, outermost first.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsdl_core::{field_type::{FieldKind, FieldType}, identifier::Id};
    ///
    /// let labels = FieldType::List {
    ///     element: Box::new(FieldType::Label { dom: Id::new("Animals") }),
    ///     ordered: None,
    /// };
    /// assert_eq!(labels.references(), vec![Id::new("Animals")]);
    /// assert!(FieldType::Plain(FieldKind::Int).references().is_empty());
    /// ```
    pub fn references(&self) -> Vec<Id> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, refs: &mut Vec<Id>) {
        match self {
            FieldType::Label { dom } => refs.push(*dom),
            FieldType::List { element, .. } => element.collect_references(refs),
            FieldType::Plain(_) | FieldType::Date { .. } | FieldType::Time { .. } => {}
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Plain(kind) => write!(f, "{kind}"),
            FieldType::Label { dom } => write!(f, "Label[dom={dom}]"),
            FieldType::Date { fmt } => write_format(f, FieldKind::Date, fmt),
            FieldType::Time { fmt } => write_format(f, FieldKind::Time, fmt),
            FieldType::List { element, ordered } => {
                write!(f, "List[etype={element}")?;
                if let Some(ordered) = ordered {
                    write!(f, ",ordered={ordered}")?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_format(f: &mut fmt::Formatter<'_>, kind: FieldKind, fmt: &str) -> fmt::Result {
    let quote = if fmt.contains('"') { '\'' } else { '"' };
    write!(f, "{kind}[fmt={quote}{fmt}{quote}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup_roundtrips_names() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(FieldKind::from_name("ListField"), None);
        assert_eq!(FieldKind::from_name(""), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(FieldKind::Int.arity(), Arity::Parameterless);
        assert_eq!(FieldKind::Image.arity(), Arity::Parameterless);
        assert_eq!(FieldKind::List.arity(), Arity::Container);
        assert_eq!(
            FieldKind::Label.arity(),
            Arity::Scalar {
                default_param: "dom"
            }
        );
        assert_eq!(
            FieldKind::Time.arity(),
            Arity::Scalar {
                default_param: "fmt"
            }
        );
    }

    #[test]
    fn test_display_canonical_form() {
        let nested = FieldType::List {
            element: Box::new(FieldType::List {
                element: Box::new(FieldType::Plain(FieldKind::Int)),
                ordered: None,
            }),
            ordered: Some(true),
        };
        assert_eq!(
            nested.to_string(),
            "List[etype=List[etype=Int],ordered=true]"
        );

        let date = FieldType::Date {
            fmt: "%Y-%m-%d".to_string(),
        };
        assert_eq!(date.to_string(), "Date[fmt=\"%Y-%m-%d\"]");
    }

    #[test]
    fn test_display_quotes_format_with_the_other_quote() {
        let time = FieldType::Time {
            fmt: r#"%H"%M"#.to_string(),
        };
        assert_eq!(time.to_string(), r#"Time[fmt='%H"%M']"#);

        let date = FieldType::Date {
            fmt: "%d'%m".to_string(),
        };
        assert_eq!(date.to_string(), r#"Date[fmt="%d'%m"]"#);
    }

    #[test]
    fn test_references_through_nested_lists() {
        let field = FieldType::List {
            element: Box::new(FieldType::List {
                element: Box::new(FieldType::Label {
                    dom: Id::new("Vehicles"),
                }),
                ordered: Some(false),
            }),
            ordered: None,
        };

        assert_eq!(field.kind(), FieldKind::List);
        assert_eq!(field.references(), vec![Id::new("Vehicles")]);
    }
}
