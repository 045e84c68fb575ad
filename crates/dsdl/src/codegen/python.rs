//! Python rendering of the generated code.

use std::fmt::{self, Write};

use crate::{
    codegen::{
        Emitter,
        ir::{Arg, Constructor, Declaration, Import, Module},
    },
    config::OutputConfig,
};

/// Renders a [`Module`] as Python source for the structured-type runtime.
#[derive(Debug, Clone)]
pub struct PythonEmitter {
    indent: String,
    blank_lines: usize,
}

impl PythonEmitter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            indent: " ".repeat(config.indent_width()),
            blank_lines: config.blank_lines(),
        }
    }

    fn write_import(&self, out: &mut String, import: &Import) -> fmt::Result {
        writeln!(out, "from {} import {}", import.module, import.names.join(", "))
    }

    fn write_declaration(&self, out: &mut String, declaration: &Declaration) -> fmt::Result {
        match declaration {
            Declaration::Struct { name, fields } => {
                writeln!(out, "class {name}(Struct):")?;
                if fields.is_empty() {
                    writeln!(out, "{}pass", self.indent)?;
                }
                for field in fields {
                    write!(out, "{}{} = ", self.indent, field.name)?;
                    write_constructor(out, &field.value)?;
                    out.push('\n');
                }
            }
            Declaration::Enum { name, members } => {
                writeln!(out, "class {name}(Enum):")?;
                if members.is_empty() {
                    writeln!(out, "{}pass", self.indent)?;
                }
                for member in members {
                    write!(out, "{}{} = ", self.indent, member.ident)?;
                    write_str_literal(out, &member.value)?;
                    out.push('\n');
                }
            }
        }
        Ok(())
    }
}

impl Emitter for PythonEmitter {
    fn emit(&self, module: &Module) -> Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, "# {}", module.header)?;
        out.push('\n');
        for import in &module.imports {
            self.write_import(&mut out, import)?;
        }

        for (idx, declaration) in module.declarations.iter().enumerate() {
            // Two blank lines after the imports, `blank_lines` between declarations.
            let separator = if idx == 0 { 2 } else { self.blank_lines };
            out.push_str(&"\n".repeat(separator));
            self.write_declaration(&mut out, declaration)?;
        }

        Ok(out)
    }
}

fn write_constructor(out: &mut String, constructor: &Constructor) -> fmt::Result {
    write!(out, "{}(", constructor.callee)?;
    for (idx, (name, arg)) in constructor.args.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write!(out, "{name}=")?;
        match arg {
            Arg::Constructor(inner) => write_constructor(out, inner)?,
            Arg::Name(name) => out.push_str(name),
            Arg::Str(value) => write_str_literal(out, value)?,
            Arg::Bool(true) => out.push_str("True"),
            Arg::Bool(false) => out.push_str("False"),
        }
    }
    out.push(')');
    Ok(())
}

fn write_str_literal(out: &mut String, value: &str) -> fmt::Result {
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::ir::{FieldDecl, Member};

    fn module(declarations: Vec<Declaration>) -> Module {
        Module {
            header: "Generated by the dsdl parser. DO NOT EDIT!".to_string(),
            imports: vec![
                Import::new("dsdl.types", &["*"]),
                Import::new("enum", &["Enum"]),
            ],
            declarations,
        }
    }

    fn animals() -> Declaration {
        Declaration::Enum {
            name: "Animals".to_string(),
            members: vec![
                Member {
                    ident: "DOG".to_string(),
                    value: "dog".to_string(),
                },
                Member {
                    ident: "CAT".to_string(),
                    value: "cat".to_string(),
                },
            ],
        }
    }

    fn sample() -> Declaration {
        let list = Constructor::new("ListField")
            .with_arg("ele_type", Arg::Constructor(Box::new(Constructor::new("IntField"))))
            .with_arg("ordered", Arg::Bool(true));
        Declaration::Struct {
            name: "Sample".to_string(),
            fields: vec![
                FieldDecl {
                    name: "label".to_string(),
                    value: Constructor::new("LabelField").with_arg("dom", Arg::Name("Animals".to_string())),
                },
                FieldDecl {
                    name: "counts".to_string(),
                    value: list,
                },
            ],
        }
    }

    #[test]
    fn test_emit_module() {
        let emitter = PythonEmitter::new(&OutputConfig::default());
        let output = emitter.emit(&module(vec![animals(), sample()])).expect("emit");

        let expected = "\
# Generated by the dsdl parser. DO NOT EDIT!

from dsdl.types import *
from enum import Enum


class Animals(Enum):
    DOG = \"dog\"
    CAT = \"cat\"

class Sample(Struct):
    label = LabelField(dom=Animals)
    counts = ListField(ele_type=IntField(), ordered=True)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_layout_follows_config() {
        let emitter = PythonEmitter::new(&OutputConfig::new(2, 2));
        let output = emitter.emit(&module(vec![animals(), animals()])).expect("emit");

        assert!(output.contains("class Animals(Enum):\n  DOG = \"dog\"\n"));
        assert!(output.contains("  CAT = \"cat\"\n\n\nclass Animals(Enum):"));
        assert!(output.ends_with("\"cat\"\n"));
    }

    #[test]
    fn test_empty_bodies_render_pass() {
        let emitter = PythonEmitter::new(&OutputConfig::default());
        let output = emitter
            .emit(&module(vec![Declaration::Struct {
                name: "Empty".to_string(),
                fields: Vec::new(),
            }]))
            .expect("emit");

        assert!(output.ends_with("class Empty(Struct):\n    pass\n"));
    }

    #[test]
    fn test_empty_module_ends_with_imports() {
        let emitter = PythonEmitter::new(&OutputConfig::default());
        let output = emitter.emit(&module(Vec::new())).expect("emit");

        assert!(output.ends_with("from enum import Enum\n"));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_string_literals_are_escaped() {
        let mut out = String::new();
        let date = Constructor::new("DateField").with_arg("fmt", Arg::Str(r#"%Y"\%m"#.to_string()));

        write_constructor(&mut out, &date).expect("write");

        assert_eq!(out, r#"DateField(fmt="%Y\"\\%m")"#);
    }
}
