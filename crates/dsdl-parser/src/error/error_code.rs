//! Error codes for the DSDL diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Field type grammar errors
//! - `E2xx` - Schema document and definition errors
//! - `E3xx` - Dependency graph errors

use std::fmt;

/// The categories of failure a compilation can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field type token matches none of the recognized forms.
    UnknownType,
    /// A malformed parameter list for `List`, `Label`, `Date`, or `Time`.
    GrammarSyntax,
    /// A definition name registered more than once.
    DuplicateDefinition,
    /// The definitions reference each other in a cycle.
    CircularDefinition,
    /// The schema document itself is malformed.
    Document,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnknownType => "unknown type",
            ErrorKind::GrammarSyntax => "grammar syntax error",
            ErrorKind::DuplicateDefinition => "duplicate definition",
            ErrorKind::CircularDefinition => "circular definition",
            ErrorKind::Document => "malformed document",
        };
        f.write_str(name)
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Grammar Errors (E1xx)
    // =========================================================================
    /// Unknown field type.
    ///
    /// The type name is not one of the recognized field types, or a
    /// parameterless type was written with parameters.
    E100,

    /// Missing parameters.
    ///
    /// `Label`, `Date`, `Time`, and `List` need at least one parameter.
    E101,

    /// Too many parameters.
    ///
    /// `List` takes at most `etype` and `ordered`; scalar types take one.
    E102,

    /// Unknown parameter name.
    ///
    /// The parameter is not accepted by this type, e.g. a `List` whose first
    /// parameter is not `etype`.
    E103,

    /// Duplicate parameter.
    ///
    /// The same parameter was given more than once.
    E104,

    /// Invalid boolean literal.
    ///
    /// `ordered` accepts `true` or `false`, in any letter case.
    E105,

    /// Invalid identifier.
    ///
    /// A parameter that names a definition (such as `dom`) is not an identifier.
    E106,

    /// Malformed type expression.
    ///
    /// Brackets or quotes are unbalanced, text follows the closing bracket, or
    /// brackets nest too deeply.
    E107,

    /// Invalid format string.
    ///
    /// A `Date` or `Time` format contains both `"` and `'`, so it cannot be
    /// written back as a quoted value.
    E108,

    // =========================================================================
    // Document Errors (E2xx)
    // =========================================================================
    /// Malformed schema document.
    ///
    /// The YAML is invalid or a value has the wrong shape.
    E200,

    /// Duplicate definition.
    ///
    /// A definition with this name has already been registered.
    E201,

    /// Unsupported definition kind.
    ///
    /// `$def` is neither `struct` nor `class_domain`.
    E202,

    /// Invalid name.
    ///
    /// A definition, field, or class name is not an identifier, or a definition
    /// or field name is a Python keyword, and strict identifier checking is
    /// enabled.
    E203,

    /// Missing section.
    ///
    /// A required key such as `defs`, `$def`, `$fields`, or `classes` is absent.
    E204,

    /// Duplicate member.
    ///
    /// A field or class name appears twice within one definition.
    E205,

    // =========================================================================
    // Graph Errors (E3xx)
    // =========================================================================
    /// Circular definition.
    ///
    /// Definitions depend on each other, so no emission order exists.
    E300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Grammar errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",
            ErrorCode::E108 => "E108",
            // Document errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            // Graph errors
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Grammar errors
            ErrorCode::E100 => "unknown field type",
            ErrorCode::E101 => "missing parameters",
            ErrorCode::E102 => "too many parameters",
            ErrorCode::E103 => "unknown parameter",
            ErrorCode::E104 => "duplicate parameter",
            ErrorCode::E105 => "invalid boolean literal",
            ErrorCode::E106 => "invalid identifier",
            ErrorCode::E107 => "malformed type expression",
            ErrorCode::E108 => "invalid format string",
            // Document errors
            ErrorCode::E200 => "malformed schema document",
            ErrorCode::E201 => "duplicate definition",
            ErrorCode::E202 => "unsupported definition kind",
            ErrorCode::E203 => "invalid name",
            ErrorCode::E204 => "missing section",
            ErrorCode::E205 => "duplicate member",
            // Graph errors
            ErrorCode::E300 => "circular definition",
        }
    }

    /// Returns the error kind this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E100 => ErrorKind::UnknownType,
            ErrorCode::E101
            | ErrorCode::E102
            | ErrorCode::E103
            | ErrorCode::E104
            | ErrorCode::E105
            | ErrorCode::E106
            | ErrorCode::E107
            | ErrorCode::E108 => ErrorKind::GrammarSyntax,
            ErrorCode::E201 => ErrorKind::DuplicateDefinition,
            ErrorCode::E300 => ErrorKind::CircularDefinition,
            ErrorCode::E200
            | ErrorCode::E202
            | ErrorCode::E203
            | ErrorCode::E204
            | ErrorCode::E205 => ErrorKind::Document,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
