//! Target-independent representation of generated code.
//!
//! One [`Declaration`] per emitted definition. Field types are lowered to
//! [`Constructor`] calls of the structured-type runtime, such as
//! `ListField(ele_type=IntField(), ordered=True)`.

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub header: String,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
}

/// `from <module> import <names>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub module: String,
    pub names: Vec<String>,
}

impl Import {
    pub fn new(module: &str, names: &[&str]) -> Self {
        Self {
            module: module.to_string(),
            names: names.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A struct type with one attribute per field.
    Struct { name: String, fields: Vec<FieldDecl> },
    /// An enumeration with one member per class.
    Enum { name: String, members: Vec<Member> },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Struct { name, .. } | Declaration::Enum { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub value: Constructor,
}

/// An enumeration member: `IDENT = "value"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub ident: String,
    pub value: String,
}

/// A call of a runtime field constructor with keyword arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub callee: String,
    pub args: Vec<(String, Arg)>,
}

impl Constructor {
    pub fn new(callee: impl Into<String>) -> Self {
        Self {
            callee: callee.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: Arg) -> Self {
        self.args.push((name.into(), value));
        self
    }
}

/// A keyword argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Constructor(Box<Constructor>),
    /// A reference to another declaration.
    Name(String),
    Str(String),
    Bool(bool),
}
