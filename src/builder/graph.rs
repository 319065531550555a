//! The component graph.
//!
//! Once built, a ComponentGraph is read-only and known to be valid: every
//! edge resolves to a local component or a declared requirement, and the
//! local edges form no cycle.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::component::{Component, ComponentRef};
use crate::core::requirement::Requirement;
use crate::resolver::errors::RecipeError;

/// A validated graph of a package's components.
#[derive(Debug, Clone)]
pub struct ComponentGraph {
    /// Local edges; `a -> b` means `a` requires `b`
    graph: DiGraph<String, ()>,

    /// Map from component name to node index
    name_to_node: HashMap<String, NodeIndex>,

    /// Components in declaration order
    components: Vec<Component>,
}

impl ComponentGraph {
    /// Build and validate a graph.
    ///
    /// `requirements` is the declarator's output for the same
    /// configuration; external edges must name one of those packages.
    pub fn build(
        components: Vec<Component>,
        requirements: &[Requirement],
    ) -> Result<Self, RecipeError> {
        let mut graph = DiGraph::new();
        let mut name_to_node = HashMap::new();

        for component in &components {
            if name_to_node.contains_key(&component.name) {
                return Err(RecipeError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
            let node = graph.add_node(component.name.clone());
            name_to_node.insert(component.name.clone(), node);
        }

        for component in &components {
            let from = name_to_node[&component.name];
            for edge in &component.requires {
                match edge {
                    ComponentRef::Local { name } => {
                        let Some(&to) = name_to_node.get(name) else {
                            return Err(RecipeError::UnresolvedComponentEdge {
                                component: component.name.clone(),
                                target: edge.to_string(),
                            });
                        };
                        if !graph.contains_edge(from, to) {
                            graph.add_edge(from, to, ());
                        }
                    }
                    ComponentRef::External { package, .. } => {
                        if !requirements.iter().any(|r| r.name() == package) {
                            return Err(RecipeError::UnresolvedComponentEdge {
                                component: component.name.clone(),
                                target: edge.to_string(),
                            });
                        }
                    }
                }
            }
        }

        if toposort(&graph, None).is_err() {
            return Err(RecipeError::ComponentCycle {
                components: find_cycle(&graph),
            });
        }

        Ok(ComponentGraph {
            graph,
            name_to_node,
            components,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Components in declaration order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components that no other component requires.
    pub fn roots(&self) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| {
                let node = self.name_to_node[&c.name];
                self.graph
                    .neighbors_directed(node, petgraph::Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// Components in topological order (dependencies before dependents).
    ///
    /// Ties are broken by declaration order so the result is stable.
    pub fn topological_order(&self) -> Vec<&Component> {
        let mut remaining: Vec<usize> = self
            .components
            .iter()
            .map(|c| self.local_deps(&c.name).len())
            .collect();
        let mut order = Vec::with_capacity(self.components.len());
        let mut done = vec![false; self.components.len()];

        while order.len() < self.components.len() {
            let Some(next) = (0..self.components.len()).find(|&i| !done[i] && remaining[i] == 0)
            else {
                // Unreachable for a validated graph
                break;
            };
            done[next] = true;
            let name = &self.components[next].name;
            order.push(&self.components[next]);

            for (i, component) in self.components.iter().enumerate() {
                if !done[i] && component.local_requires().any(|dep| dep == name) {
                    remaining[i] -= 1;
                }
            }
        }

        order
    }

    /// Direct local dependencies of a component.
    pub fn local_deps(&self, name: &str) -> Vec<&str> {
        let Some(&node) = self.name_to_node.get(name) else {
            return Vec::new();
        };
        let mut deps: Vec<&str> = self
            .graph
            .neighbors(node)
            .map(|n| self.graph[n].as_str())
            .collect();
        deps.sort_unstable();
        deps
    }
}

/// Names of the components on one cycle, closed back to the first.
fn find_cycle(graph: &DiGraph<String, ()>) -> Vec<String> {
    for scc in tarjan_scc(graph) {
        let is_cycle = scc.len() > 1
            || scc
                .first()
                .is_some_and(|&n| graph.contains_edge(n, n));
        if is_cycle {
            let mut names: Vec<String> = scc.iter().rev().map(|&n| graph[n].clone()).collect();
            if let Some(first) = names.first().cloned() {
                names.push(first);
            }
            return names;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(refs: &[&str]) -> Vec<Requirement> {
        refs.iter().map(|r| Requirement::parse(r).unwrap()).collect()
    }

    #[test]
    fn test_valid_graph() {
        let components = vec![
            Component::new("Main").requires(["zlib::zlib"]),
            Component::new("Overlay").requires(["Main"]),
            Component::new("Bites").requires(["Main", "Overlay"]),
        ];
        let graph = ComponentGraph::build(components, &reqs(&["zlib/1.2.12"])).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.local_deps("Bites"), vec!["Main", "Overlay"]);
        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.roots()[0].name, "Bites");
    }

    #[test]
    fn test_topological_order_puts_dependencies_first() {
        let components = vec![
            Component::new("Bites").requires(["Main", "Overlay"]),
            Component::new("Overlay").requires(["Main"]),
            Component::new("Main"),
        ];
        let graph = ComponentGraph::build(components, &[]).unwrap();

        let order: Vec<_> = graph
            .topological_order()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(order, vec!["Main", "Overlay", "Bites"]);
    }

    #[test]
    fn test_unresolved_local_edge() {
        let components = vec![Component::new("Bites").requires(["Overlay"])];
        let err = ComponentGraph::build(components, &[]).unwrap_err();

        match err {
            RecipeError::UnresolvedComponentEdge { component, target } => {
                assert_eq!(component, "Bites");
                assert_eq!(target, "Overlay");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unresolved_external_edge() {
        let components = vec![Component::new("Main").requires(["boost::boost"])];
        let err = ComponentGraph::build(components, &reqs(&["zlib/1.2.12"])).unwrap_err();
        assert!(matches!(err, RecipeError::UnresolvedComponentEdge { .. }));
    }

    #[test]
    fn test_cycle_detected() {
        let components = vec![
            Component::new("A").requires(["B"]),
            Component::new("B").requires(["C"]),
            Component::new("C").requires(["A"]),
        ];
        let err = ComponentGraph::build(components, &[]).unwrap_err();

        match err {
            RecipeError::ComponentCycle { components } => {
                assert_eq!(components.len(), 4);
                assert_eq!(components.first(), components.last());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_edge_is_a_cycle() {
        let components = vec![Component::new("A").requires(["A"])];
        let err = ComponentGraph::build(components, &[]).unwrap_err();
        assert!(matches!(err, RecipeError::ComponentCycle { .. }));
    }

    #[test]
    fn test_duplicate_component() {
        let components = vec![Component::new("A"), Component::new("A")];
        let err = ComponentGraph::build(components, &[]).unwrap_err();
        assert!(matches!(err, RecipeError::DuplicateComponent { .. }));
    }
}
