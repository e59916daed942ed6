use std::collections::HashSet;

use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use storymate_flowchart::rules::check_connection;
use storymate_flowchart::{Graph, Node};

/// Edges must point at nodes that exist
pub struct DanglingEdgeRule;

impl LintRule for DanglingEdgeRule {
    fn name(&self) -> &'static str {
        "dangling-edge"
    }

    fn description(&self) -> &'static str {
        "Disallow connections to missing nodes"
    }

    fn check_node(&self, node: &Node, graph: &Graph) -> Vec<Diagnostic> {
        node.outgoing
            .iter()
            .filter(|target| !graph.contains(target))
            .map(|target| {
                Diagnostic::error(
                    self.name(),
                    format!("'{}' connects to missing node '{}'", node.id, target),
                )
                .with_node(node.id.clone())
                .with_suggestion("Disconnect the edge")
            })
            .collect()
    }
}

/// Edges must be ones the editor would allow
pub struct IllegalEdgeRule;

impl LintRule for IllegalEdgeRule {
    fn name(&self) -> &'static str {
        "illegal-edge"
    }

    fn description(&self) -> &'static str {
        "Disallow connections between incompatible node kinds"
    }

    fn check_node(&self, node: &Node, graph: &Graph) -> Vec<Diagnostic> {
        node.outgoing
            .iter()
            .filter_map(|target| graph.find_node(target))
            .filter_map(|target| {
                let reason = check_connection(node, target).err()?;
                Some(
                    Diagnostic::error(
                        self.name(),
                        format!("Illegal edge '{}' -> '{}': {}", node.id, target.id, reason),
                    )
                    .with_node(node.id.clone()),
                )
            })
            .collect()
    }
}

/// The same target listed twice in one node
pub struct DuplicateEdgeRule;

impl LintRule for DuplicateEdgeRule {
    fn name(&self) -> &'static str {
        "duplicate-edge"
    }

    fn description(&self) -> &'static str {
        "Warn when a node lists the same connection more than once"
    }

    fn check_node(&self, node: &Node, _graph: &Graph) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        node.outgoing
            .iter()
            .filter(|target| !seen.insert(target.as_str()) && reported.insert(target.as_str()))
            .map(|target| {
                Diagnostic::warning(
                    self.name(),
                    format!("'{}' connects to '{}' more than once", node.id, target),
                )
                .with_node(node.id.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storymate_flowchart::{NodeKind, Point};

    fn node(id: &str, kind: NodeKind, outgoing: &[&str]) -> Node {
        let mut node = Node::new(id, kind, "", Point::ZERO);
        node.outgoing = outgoing.iter().map(|id| id.to_string()).collect();
        node
    }

    #[test]
    fn test_dangling_edge() {
        let graph = Graph::from_nodes([node("s", NodeKind::Start, &["ghost"])]).unwrap();
        let diagnostics = DanglingEdgeRule.check_node(graph.find_node("s").unwrap(), &graph);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].node_id.as_deref(), Some("s"));
    }

    #[test]
    fn test_illegal_edges() {
        let graph = Graph::from_nodes([
            node("s", NodeKind::Start, &["e", "a"]),
            node("a", NodeKind::Story, &["a"]),
            node("e", NodeKind::End, &["s"]),
        ])
        .unwrap();

        let count = |id: &str| {
            IllegalEdgeRule
                .check_node(graph.find_node(id).unwrap(), &graph)
                .len()
        };
        assert_eq!(count("s"), 1);
        assert_eq!(count("a"), 1);
        assert_eq!(count("e"), 1);
    }

    #[test]
    fn test_duplicate_edge_reported_once() {
        let graph = Graph::from_nodes([
            node("d", NodeKind::Decision, &["a", "a", "a", "b"]),
            node("a", NodeKind::Story, &[]),
            node("b", NodeKind::Story, &[]),
        ])
        .unwrap();

        let diagnostics = DuplicateEdgeRule.check_node(graph.find_node("d").unwrap(), &graph);
        assert_eq!(diagnostics.len(), 1);
    }
}
