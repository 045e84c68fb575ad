//! DSDL Core Types and Definitions
//!
//! This crate provides the foundational types shared by the DSDL schema
//! compiler. It includes:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`])
//! - **Field types**: The closed set of field type forms ([`field_type`] module)
//! - **Schema**: Struct and class-domain definitions ([`schema`] module)

pub mod field_type;
pub mod identifier;
pub mod schema;
