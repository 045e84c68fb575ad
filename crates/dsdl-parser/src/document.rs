//! Raw schema document as read from YAML.
//!
//! The document keeps mappings as ordered lists of entries instead of maps:
//! declaration order decides tie-breaking during emission, and a name that
//! appears twice has to reach the loader so it can be reported.
//!
//! ```yaml
//! defs:
//!   MyClassDom:
//!     $def: class_domain
//!     classes: [dog, cat]
//!   Sample:
//!     $def: struct
//!     $fields:
//!       label: Label[dom=MyClassDom]
//!       count: Int
//! ```

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use serde_yaml::Value;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// Top level of a schema document. Keys other than `defs` are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub defs: Option<Entries<RawDefinition>>,
}

/// One entry under `defs`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDefinition {
    #[serde(rename = "$def", default)]
    pub def: Option<String>,
    #[serde(rename = "$fields", default)]
    pub fields: Option<Entries<Value>>,
    #[serde(default)]
    pub classes: Option<Vec<Value>>,
}

/// Mapping entries in document order, duplicates included.
#[derive(Debug)]
pub(crate) struct Entries<V>(pub Vec<(String, V)>);

impl<'de, V> Deserialize<'de> for Entries<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for EntriesVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Read a schema document from YAML source.
///
/// # Errors
///
/// Returns an `E200` diagnostic if the YAML is invalid or does not have the
/// shape of a schema document.
pub(crate) fn from_yaml(source: &str) -> Result<RawDocument> {
    serde_yaml::from_str(source).map_err(|err| {
        let diag = Diagnostic::error(format!("invalid schema document: {err}"))
            .with_code(ErrorCode::E200)
            .with_help("a schema document is a YAML mapping with a top-level `defs` mapping");
        match err.location() {
            Some(location) => {
                let start = location.index().min(source.len());
                let end = source[start..]
                    .chars()
                    .next()
                    .map_or(start, |c| start + c.len_utf8());
                diag.with_label(Span::new(start..end), "here")
            }
            None => diag,
        }
    })
}

/// Text of a scalar YAML value; `None` for null, sequences, and mappings.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
