//! Identifier management using string interning.
//!
//! Definition, field, and class names are compared and hashed many times while
//! a schema is loaded and its dependency graph is built. The [`Id`] type keeps
//! them as interned symbols so those operations are cheap and `Copy`.
//!
//! The module also owns the notion of a *valid identifier* used throughout the
//! compiler, see [`is_identifier`], and the Python keywords generated code
//! cannot bind, see [`is_python_keyword`].

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier for schema names.
///
/// # Examples
///
/// ```
/// use dsdl_core::identifier::Id;
///
/// let dom = Id::new("MyClassDom");
/// assert_eq!(dom, "MyClassDom");
/// assert_eq!(dom, Id::new("MyClassDom"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// The name is interned as given; callers decide whether it has to be a
    /// valid identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns an owned copy of the interned name.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default();
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Returns `true` if `name` is a valid identifier.
///
/// A valid identifier is non-empty, starts with an alphabetic character or
/// `_`, and continues with alphanumeric characters or `_`. Unicode letters
/// and digits are accepted.
///
/// # Examples
///
/// ```
/// use dsdl_core::identifier::is_identifier;
///
/// assert!(is_identifier("label_list"));
/// assert!(is_identifier("_private"));
/// assert!(!is_identifier("2d_point"));
/// assert!(!is_identifier("not an identifier"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Python keywords, which generated code cannot use as class or attribute names.
const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Returns `true` if `name` is a Python keyword.
///
/// Soft keywords such as `match` or `type` are valid names and return `false`.
///
/// # Examples
///
/// ```
/// use dsdl_core::identifier::is_python_keyword;
///
/// assert!(is_python_keyword("class"));
/// assert!(is_python_keyword("None"));
/// assert!(!is_python_keyword("none"));
/// assert!(!is_python_keyword("match"));
/// ```
pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}
