//! Code generation from a loaded schema.
//!
//! Generation runs in two steps. [`lower`] turns the definitions, in emission
//! order, into a [`Module`] of declarations. An [`Emitter`] then renders the
//! module as source text for one target language.

pub mod ir;
pub mod python;

use std::fmt;

use log::debug;

use dsdl_core::{
    field_type::FieldType,
    identifier::Id,
    schema::{ClassDomainDef, Definition, Schema},
};

use ir::{Arg, Constructor, Declaration, FieldDecl, Import, Member, Module};

pub use python::PythonEmitter;

/// Renders a [`Module`] as source text.
pub trait Emitter {
    fn emit(&self, module: &Module) -> Result<String, fmt::Error>;
}

const HEADER: &str = "Generated by the dsdl parser. DO NOT EDIT!";

/// Lower the definitions of `schema` named in `order` to a [`Module`].
///
/// Names in `order` that the schema does not define are skipped.
pub fn lower(schema: &Schema, order: &[Id]) -> Module {
    let declarations = order
        .iter()
        .filter_map(|&name| {
            let definition = schema.get(name)?;
            debug!(definition:% = name, kind:% = definition.kind(); "Lowering definition");
            Some(lower_definition(name, definition))
        })
        .collect();

    Module {
        header: HEADER.to_string(),
        imports: vec![
            Import::new("dsdl.types", &["*"]),
            Import::new("enum", &["Enum"]),
        ],
        declarations,
    }
}

fn lower_definition(name: Id, definition: &Definition) -> Declaration {
    match definition {
        Definition::Struct(def) => Declaration::Struct {
            name: name.to_string(),
            fields: def
                .fields()
                .iter()
                .map(|field| FieldDecl {
                    name: field.name().to_string(),
                    value: lower_field_type(field.field_type()),
                })
                .collect(),
        },
        Definition::ClassDomain(def) => Declaration::Enum {
            name: name.to_string(),
            members: def
                .classes()
                .iter()
                .map(|class| {
                    let value = class.to_string();
                    Member {
                        ident: ClassDomainDef::member_ident(&value),
                        value,
                    }
                })
                .collect(),
        },
    }
}

/// The runtime constructor for a field type, e.g. `LabelField(dom=Animals)`.
pub fn lower_field_type(field_type: &FieldType) -> Constructor {
    let constructor = Constructor::new(format!("{}Field", field_type.kind()));
    match field_type {
        FieldType::Plain(_) => constructor,
        FieldType::Label { dom } => constructor.with_arg("dom", Arg::Name(dom.to_string())),
        FieldType::Date { fmt } | FieldType::Time { fmt } => {
            constructor.with_arg("fmt", Arg::Str(fmt.clone()))
        }
        FieldType::List { element, ordered } => {
            let constructor =
                constructor.with_arg("ele_type", Arg::Constructor(Box::new(lower_field_type(element))));
            match ordered {
                Some(ordered) => constructor.with_arg("ordered", Arg::Bool(*ordered)),
                None => constructor,
            }
        }
    }
}
