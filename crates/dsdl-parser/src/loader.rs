//! Definition loader.
//!
//! Turns a [`RawDocument`] into a [`Schema`]: every definition is checked for
//! a unique identifier name and a supported `$def` kind, struct field types
//! go through the field type grammar, and class-domain entries become
//! class names. Loading stops at the first error.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use log::{debug, warn};

use dsdl_core::{
    identifier::{Id, is_identifier, is_python_keyword},
    schema::{ClassDomainDef, Definition, DefinitionKind, Field, Schema, StructDef},
};
use serde_yaml::Value;

use crate::{
    document::{Entries, RawDefinition, RawDocument, scalar_text},
    error::{Diagnostic, ErrorCode, Result},
    field_type::{normalize, parse_field_type},
};

/// Configuration for loading definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadConfig {
    strict_identifiers: bool,
}

impl LoadConfig {
    /// Creates a new [`LoadConfig`].
    ///
    /// # Arguments
    ///
    /// * `strict_identifiers` - Reject definition, field, and class names that
    ///   are not identifiers instead of skipping them.
    pub fn new(strict_identifiers: bool) -> Self {
        Self { strict_identifiers }
    }

    /// Returns whether non-identifier names are rejected.
    pub fn strict_identifiers(&self) -> bool {
        self.strict_identifiers
    }
}

/// Load all definitions of `document`, in document order.
pub(crate) fn load(document: RawDocument, config: LoadConfig) -> Result<Schema> {
    let Some(defs) = document.defs else {
        return Err(Diagnostic::error("schema document has no `defs` section")
            .with_code(ErrorCode::E204)
            .with_help("put struct and class_domain definitions under a top-level `defs` mapping"));
    };

    let mut loader = Loader {
        config,
        schema: Schema::new(),
    };
    for (name, raw) in defs.0 {
        loader.load_definition(&name, raw)?;
    }

    Ok(loader.schema)
}

struct Loader {
    config: LoadConfig,
    schema: Schema,
}

impl Loader {
    fn load_definition(&mut self, name: &str, raw: RawDefinition) -> Result<()> {
        if !self.accept_name(name, NameRole::Definition, None)? {
            return Ok(());
        }

        let location = format!("definition `{name}`");
        let Some(tag) = raw.def.as_deref() else {
            return Err(missing_section("$def", &location));
        };
        let Some(kind) = DefinitionKind::from_tag(tag) else {
            return Err(
                Diagnostic::error(format!("unsupported definition kind `{tag}`"))
                    .with_code(ErrorCode::E202)
                    .with_location(location)
                    .with_help("`$def` must be `struct` or `class_domain`"),
            );
        };

        let definition = match kind {
            DefinitionKind::Struct => {
                let Some(fields) = raw.fields else {
                    return Err(missing_section("$fields", &location));
                };
                Definition::Struct(self.load_struct(name, fields)?)
            }
            DefinitionKind::ClassDomain => {
                let Some(classes) = raw.classes else {
                    return Err(missing_section("classes", &location));
                };
                Definition::ClassDomain(self.load_class_domain(name, classes)?)
            }
        };

        self.schema.try_insert(Id::new(name), definition).map_err(|_| {
            Diagnostic::error(format!("`{name}` has already been defined"))
                .with_code(ErrorCode::E201)
                .with_help("definition names must be unique across the whole document")
        })?;

        debug!(definition = name, kind:% = kind; "Loaded definition");
        Ok(())
    }

    fn load_struct(&self, name: &str, raw_fields: Entries<Value>) -> Result<StructDef> {
        let location = format!("definition `{name}`");
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(raw_fields.0.len());

        for (field_name, raw_type) in raw_fields.0 {
            if !self.accept_name(&field_name, NameRole::Field, Some(location.as_str()))? {
                continue;
            }
            let field_location = format!("field `{field_name}` of `{name}`");

            let id = Id::new(&field_name);
            if !seen.insert(id) {
                return Err(duplicate_member(NameRole::Field, &field_name, &location));
            }

            let Some(raw_type) = scalar_text(&raw_type) else {
                return Err(
                    Diagnostic::error("field type must be a string")
                        .with_code(ErrorCode::E200)
                        .with_location(field_location)
                        .with_help("write the type as text, e.g. `count: Int`"),
                );
            };

            let expression = normalize(&raw_type);
            let field_type = parse_field_type(&expression)
                .map_err(|diag| diag.with_location(field_location))?;

            fields.push(Field::new(id, field_type));
        }

        Ok(StructDef::new(fields))
    }

    fn load_class_domain(&self, name: &str, raw_classes: Vec<Value>) -> Result<ClassDomainDef> {
        let location = format!("definition `{name}`");
        // Member name to the class spelling that claimed it.
        let mut members: HashMap<String, String> = HashMap::with_capacity(raw_classes.len());
        let mut classes = Vec::with_capacity(raw_classes.len());

        for raw_class in raw_classes {
            let Some(class_name) = scalar_text(&raw_class) else {
                return Err(Diagnostic::error("class name must be a string")
                    .with_code(ErrorCode::E200)
                    .with_location(location));
            };
            if !self.accept_name(&class_name, NameRole::Class, Some(location.as_str()))? {
                continue;
            }

            let ident = ClassDomainDef::member_ident(&class_name);
            if let Some(first) = members.get(&ident) {
                if *first == class_name {
                    return Err(duplicate_member(NameRole::Class, &class_name, &location));
                }
                return Err(Diagnostic::error(format!(
                    "classes `{first}` and `{class_name}` both become enum member `{ident}`"
                ))
                .with_code(ErrorCode::E205)
                .with_location(location)
                .with_help("class names must differ in more than letter case"));
            }
            members.insert(ident, class_name.clone());
            classes.push(Id::new(&class_name));
        }

        Ok(ClassDomainDef::new(classes))
    }

    /// Decide whether `name` is kept.
    ///
    /// Names that are not identifiers, and definition or field names that are
    /// Python keywords, are skipped with a warning, or rejected when strict
    /// identifiers are configured.
    fn accept_name(&self, name: &str, role: NameRole, location: Option<&str>) -> Result<bool> {
        let (problem, help) = if !is_identifier(name) {
            (
                "is not an identifier",
                "names start with a letter or `_` and contain only letters, digits, and `_`",
            )
        } else if role.binds_python_name() && is_python_keyword(name) {
            (
                "is a Python keyword",
                "the generated module cannot bind a keyword; rename it",
            )
        } else {
            return Ok(true);
        };

        if self.config.strict_identifiers() {
            let diag = Diagnostic::error(format!("{role} name `{name}` {problem}"))
                .with_code(ErrorCode::E203)
                .with_help(help);
            return Err(match location {
                Some(location) => diag.with_location(location),
                None => diag,
            });
        }

        warn!(name, kind:% = role, location = location.unwrap_or("defs"), problem; "Skipping unusable name");
        Ok(false)
    }
}

/// What a checked name is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameRole {
    Definition,
    Field,
    Class,
}

impl NameRole {
    /// Definitions and fields become Python class and attribute names; classes
    /// only appear upper-cased and as string values.
    fn binds_python_name(self) -> bool {
        !matches!(self, NameRole::Class)
    }
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameRole::Definition => "definition",
            NameRole::Field => "field",
            NameRole::Class => "class",
        })
    }
}

fn missing_section(section: &str, location: &str) -> Diagnostic {
    Diagnostic::error(format!("missing `{section}`"))
        .with_code(ErrorCode::E204)
        .with_location(location)
}

fn duplicate_member(role: NameRole, name: &str, location: &str) -> Diagnostic {
    Diagnostic::error(format!("{role} `{name}` is declared more than once"))
        .with_code(ErrorCode::E205)
        .with_location(location)
}
