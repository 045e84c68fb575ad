//! Schema model: struct and class-domain definitions.
//!
//! A [`Schema`] is the result of loading a schema document. It maps each
//! definition name to its [`Definition`] and remembers declaration order,
//! which later breaks ties when ordering definitions for emission.

use std::fmt;

use indexmap::IndexMap;

use crate::{field_type::FieldType, identifier::Id};

/// The kind of a definition, as named by the `$def` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Struct,
    ClassDomain,
}

impl DefinitionKind {
    /// Looks up a kind from its `$def` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "struct" => Some(DefinitionKind::Struct),
            "class_domain" => Some(DefinitionKind::ClassDomain),
            _ => None,
        }
    }

    /// The `$def` tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            DefinitionKind::Struct => "struct",
            DefinitionKind::ClassDomain => "class_domain",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named, typed struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: Id,
    field_type: FieldType,
}

impl Field {
    pub fn new(name: Id, field_type: FieldType) -> Self {
        Self { name, field_type }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }
}

/// A struct definition: fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructDef {
    fields: Vec<Field>,
}

impl StructDef {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Definition names referenced by any field, in field order.
    pub fn references(&self) -> impl Iterator<Item = Id> + '_ {
        self.fields
            .iter()
            .flat_map(|field| field.field_type().references())
    }
}

/// A class-domain definition: an enumerated set of label names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDomainDef {
    classes: Vec<Id>,
}

impl ClassDomainDef {
    pub fn new(classes: Vec<Id>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[Id] {
        &self.classes
    }

    /// The enum member name `class` is emitted under.
    ///
    /// Distinct classes such as `dog` and `Dog` share a member name, so a
    /// domain may hold only one of them.
    ///
    /// ```
    /// use dsdl_core::schema::ClassDomainDef;
    ///
    /// assert_eq!(ClassDomainDef::member_ident("traffic_light"), "TRAFFIC_LIGHT");
    /// ```
    pub fn member_ident(class: &str) -> String {
        class.to_uppercase()
    }
}

/// A single named entry of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Struct(StructDef),
    ClassDomain(ClassDomainDef),
}

impl Definition {
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Struct(_) => DefinitionKind::Struct,
            Definition::ClassDomain(_) => DefinitionKind::ClassDomain,
        }
    }
}

/// Definitions keyed by name, in declaration order.
///
/// Names are unique; [`Schema::try_insert`] refuses a second definition with
/// an existing name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    definitions: IndexMap<Id, Definition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` under `name`.
    ///
    /// # Errors
    ///
    /// Returns the definition back if `name` is already registered; the
    /// existing entry is left untouched.
    pub fn try_insert(&mut self, name: Id, definition: Definition) -> Result<(), Definition> {
        if self.definitions.contains_key(&name) {
            return Err(definition);
        }
        self.definitions.insert(name, definition);
        Ok(())
    }

    pub fn get(&self, name: Id) -> Option<&Definition> {
        self.definitions.get(&name)
    }

    pub fn contains(&self, name: Id) -> bool {
        self.definitions.contains_key(&name)
    }

    /// Declaration index of `name`, if defined.
    pub fn position(&self, name: Id) -> Option<usize> {
        self.definitions.get_index_of(&name)
    }

    /// Iterates definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &Definition)> {
        self.definitions.iter().map(|(name, def)| (*name, def))
    }

    pub fn names(&self) -> impl Iterator<Item = Id> + '_ {
        self.definitions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
