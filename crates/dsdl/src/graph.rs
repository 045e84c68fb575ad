//! Dependency graph over schema definitions.
//!
//! Every definition becomes a node, added in declaration order so that a
//! node's index is its declaration index. An edge `D -> S` means struct `S`
//! refers to definition `D` in one of its field types, so `D` has to be
//! emitted first.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use log::{debug, trace, warn};
use petgraph::{
    Direction,
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
};

use dsdl_core::{
    identifier::Id,
    schema::{Definition, Schema},
};
use dsdl_parser::error::{Diagnostic, DiagnosticError, ErrorCode};

/// Dependency graph of a [`Schema`].
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<Id, ()>,
    node_map: HashMap<Id, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph from the structured field types of `schema`.
    ///
    /// A reference to a name the schema does not define adds no edge; it is
    /// reported with a warning since the generated code will not resolve it.
    pub fn build(schema: &Schema) -> Self {
        let mut graph = DiGraph::with_capacity(schema.len(), 0);
        let mut node_map = HashMap::with_capacity(schema.len());

        for name in schema.names() {
            let idx = graph.add_node(name);
            node_map.insert(name, idx);
        }

        for (name, definition) in schema.iter() {
            let Definition::Struct(def) = definition else {
                continue;
            };
            let dependent = node_map[&name];

            for reference in def.references() {
                match node_map.get(&reference) {
                    Some(&dependency) => {
                        graph.update_edge(dependency, dependent, ());
                        trace!(from:% = reference, to:% = name; "Added dependency edge");
                    }
                    None => {
                        warn!(
                            definition:% = name, reference:% = reference;
                            "Reference to an undefined definition"
                        );
                    }
                }
            }
        }

        debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Dependency graph built");

        Self { graph, node_map }
    }

    /// Names `name` depends on, in declaration order.
    pub fn dependencies(&self, name: Id) -> Vec<Id> {
        let Some(&idx) = self.node_map.get(&name) else {
            return Vec::new();
        };
        let mut deps: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect();
        deps.sort_unstable();
        deps.into_iter().map(|dep| self.graph[dep]).collect()
    }

    /// Check that the graph has no cycles.
    ///
    /// # Errors
    ///
    /// Returns one `E300` diagnostic per cycle. Each strongly connected
    /// component with more than one member, and each definition referring to
    /// itself, is a cycle; members are listed in declaration order.
    pub fn check_acyclic(&self) -> Result<(), DiagnosticError> {
        let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|mut component| {
                component.sort_unstable();
                component
            })
            .collect();

        if cycles.is_empty() {
            return Ok(());
        }

        cycles.sort_unstable();
        let diagnostics: Vec<Diagnostic> = cycles
            .iter()
            .map(|component| self.cycle_diagnostic(component))
            .collect();
        Err(DiagnosticError::new(diagnostics))
    }

    /// Order definitions so that every definition follows its dependencies.
    ///
    /// Definitions that do not depend on each other keep their declaration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the diagnostics of [`check_acyclic`](Self::check_acyclic) if
    /// the graph has a cycle.
    pub fn emission_order(&self) -> Result<Vec<Id>, DiagnosticError> {
        self.check_acyclic()?;

        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(self.graph[idx]);
            for dependent in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                let degree = &mut in_degree[dependent.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        debug!(definitions = order.len(); "Emission order computed");
        Ok(order)
    }

    fn cycle_diagnostic(&self, component: &[NodeIndex]) -> Diagnostic {
        let members: Vec<String> = component
            .iter()
            .map(|&idx| format!("`{}`", self.graph[idx]))
            .collect();

        let message = match members.as_slice() {
            [single] => format!("circular definition: {single} refers to itself"),
            _ => format!("circular definition between {}", members.join(", ")),
        };

        Diagnostic::error(message)
            .with_code(ErrorCode::E300)
            .with_help("definitions must not depend on each other in a cycle; no emission order exists")
    }
}

#[cfg(test)]
mod tests {
    use dsdl_core::{
        field_type::{FieldKind, FieldType},
        schema::{ClassDomainDef, Field, StructDef},
    };
    use dsdl_parser::error::ErrorKind;

    use super::*;

    fn label(dom: &str) -> FieldType {
        FieldType::Label { dom: Id::new(dom) }
    }

    fn domain(classes: &[&str]) -> Definition {
        Definition::ClassDomain(ClassDomainDef::new(classes.iter().map(|c| Id::new(c)).collect()))
    }

    fn structure(fields: Vec<(&str, FieldType)>) -> Definition {
        Definition::Struct(StructDef::new(
            fields
                .into_iter()
                .map(|(name, field_type)| Field::new(Id::new(name), field_type))
                .collect(),
        ))
    }

    fn schema(definitions: Vec<(&str, Definition)>) -> Schema {
        let mut schema = Schema::new();
        for (name, definition) in definitions {
            schema
                .try_insert(Id::new(name), definition)
                .expect("unique test names");
        }
        schema
    }

    fn names(order: &[Id]) -> Vec<String> {
        order.iter().map(Id::to_string).collect()
    }

    #[test]
    fn test_dependency_is_emitted_first() {
        let schema = schema(vec![
            ("B", structure(vec![("x", label("A"))])),
            ("A", domain(&["a"])),
        ]);

        let graph = DependencyGraph::build(&schema);
        let order = graph.emission_order().expect("acyclic");

        assert_eq!(names(&order), vec!["A", "B"]);
        assert_eq!(graph.dependencies(Id::new("B")), vec![Id::new("A")]);
    }

    #[test]
    fn test_independent_definitions_keep_declaration_order() {
        let schema = schema(vec![
            ("Zeta", domain(&["z"])),
            ("Alpha", structure(vec![("n", FieldType::Plain(FieldKind::Int))])),
            ("Mid", domain(&["m"])),
        ]);

        let order = DependencyGraph::build(&schema)
            .emission_order()
            .expect("acyclic");

        assert_eq!(names(&order), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_nested_list_references_create_edges() {
        let nested = FieldType::List {
            element: Box::new(FieldType::List {
                element: Box::new(label("Dom")),
                ordered: None,
            }),
            ordered: Some(true),
        };
        let schema = schema(vec![("S", structure(vec![("tags", nested)])), ("Dom", domain(&["x"]))]);

        let order = DependencyGraph::build(&schema)
            .emission_order()
            .expect("acyclic");

        assert_eq!(names(&order), vec!["Dom", "S"]);
    }

    #[test]
    fn test_substring_names_do_not_create_edges() {
        let schema = schema(vec![
            ("Sample", structure(vec![("label", label("MyDom"))])),
            ("My", domain(&["x"])),
            ("MyDom", domain(&["y"])),
        ]);

        let graph = DependencyGraph::build(&schema);

        assert_eq!(graph.dependencies(Id::new("Sample")), vec![Id::new("MyDom")]);
        let order = graph.emission_order().expect("acyclic");
        assert_eq!(names(&order), vec!["My", "MyDom", "Sample"]);
    }

    #[test]
    fn test_undefined_reference_adds_no_edge() {
        let schema = schema(vec![("S", structure(vec![("label", label("Missing"))]))]);

        let graph = DependencyGraph::build(&schema);

        assert!(graph.dependencies(Id::new("S")).is_empty());
        assert_eq!(names(&graph.emission_order().expect("acyclic")), vec!["S"]);
    }

    #[test]
    fn test_two_definition_cycle() {
        let schema = schema(vec![
            ("A", structure(vec![("b", label("B"))])),
            ("B", structure(vec![("a", label("A"))])),
        ]);

        let err = DependencyGraph::build(&schema)
            .emission_order()
            .expect_err("cycle");

        assert_eq!(err.kind(), Some(ErrorKind::CircularDefinition));
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(
            err.diagnostics()[0].message(),
            "circular definition between `A`, `B`"
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let schema = schema(vec![("Node", structure(vec![("next", label("Node"))]))]);

        let err = DependencyGraph::build(&schema)
            .check_acyclic()
            .expect_err("self cycle");

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E300));
        assert_eq!(
            err.diagnostics()[0].message(),
            "circular definition: `Node` refers to itself"
        );
    }

    #[test]
    fn test_each_cycle_is_reported() {
        let schema = schema(vec![
            ("A", structure(vec![("b", label("B"))])),
            ("B", structure(vec![("a", label("A"))])),
            ("Ok", domain(&["x"])),
            ("C", structure(vec![("c", label("C"))])),
        ]);

        let err = DependencyGraph::build(&schema)
            .check_acyclic()
            .expect_err("two cycles");

        assert_eq!(err.diagnostics().len(), 2);
        assert!(err.diagnostics()[1].message().contains("`C`"));
    }

    #[test]
    fn test_empty_schema() {
        let order = DependencyGraph::build(&Schema::new())
            .emission_order()
            .expect("acyclic");

        assert!(order.is_empty());
    }
}
