use std::collections::{HashSet, VecDeque};

use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use storymate_flowchart::{Graph, Node, NodeKind};

/// Non-End nodes should lead somewhere
pub struct DeadEndRule;

impl LintRule for DeadEndRule {
    fn name(&self) -> &'static str {
        "dead-end"
    }

    fn description(&self) -> &'static str {
        "Warn when a reader would get stuck on a node"
    }

    fn check_node(&self, node: &Node, graph: &Graph) -> Vec<Diagnostic> {
        if node.kind == NodeKind::End || !graph.successors(&node.id).is_empty() {
            return Vec::new();
        }

        let message = match node.kind {
            NodeKind::Decision => "No choices connected",
            _ => "No follow-up connected",
        };
        vec![Diagnostic::warning(self.name(), format!("'{}': {}", node.id, message))
            .with_node(node.id.clone())]
    }
}

/// Every node should be reachable from Start
pub struct UnreachableRule;

impl LintRule for UnreachableRule {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    fn description(&self) -> &'static str {
        "Warn about nodes a reader can never visit"
    }

    fn check_graph(&self, graph: &Graph) -> Vec<Diagnostic> {
        // Without a Start, single-start already reports the real problem
        let Some(start) = graph.start_node() else {
            return Vec::new();
        };

        let mut visited = HashSet::from([start.id.as_str()]);
        let mut queue = VecDeque::from([start.id.as_str()]);
        while let Some(id) = queue.pop_front() {
            for next in graph.successors(id) {
                if visited.insert(next.id.as_str()) {
                    queue.push_back(next.id.as_str());
                }
            }
        }

        graph
            .nodes()
            .filter(|node| !visited.contains(node.id.as_str()))
            .map(|node| {
                Diagnostic::warning(
                    self.name(),
                    format!("'{}' cannot be reached from the start", node.id),
                )
                .with_node(node.id.clone())
            })
            .collect()
    }
}

/// A Story node continues to at most one non-Decision node
pub struct StoryFanOutRule;

impl LintRule for StoryFanOutRule {
    fn name(&self) -> &'static str {
        "story-fan-out"
    }

    fn description(&self) -> &'static str {
        "Warn when a Story node has several plain continuations"
    }

    fn check_node(&self, node: &Node, graph: &Graph) -> Vec<Diagnostic> {
        if node.kind != NodeKind::Story {
            return Vec::new();
        }

        let plain = graph
            .successors(&node.id)
            .into_iter()
            .filter(|target| target.kind != NodeKind::Decision)
            .count();
        if plain <= 1 {
            return Vec::new();
        }

        vec![Diagnostic::warning(
            self.name(),
            format!("'{}' continues to {} nodes; only the first is used", node.id, plain),
        )
        .with_node(node.id.clone())
        .with_suggestion("Insert a Decision node to offer a choice")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storymate_flowchart::Point;

    fn node(id: &str, kind: NodeKind, outgoing: &[&str]) -> Node {
        let mut node = Node::new(id, kind, "", Point::ZERO);
        node.outgoing = outgoing.iter().map(|id| id.to_string()).collect();
        node
    }

    #[test]
    fn test_dead_end_messages() {
        let graph = Graph::from_nodes([
            node("d", NodeKind::Decision, &[]),
            node("a", NodeKind::Story, &["ghost"]),
            node("e", NodeKind::End, &[]),
        ])
        .unwrap();

        let check = |id: &str| DeadEndRule.check_node(graph.find_node(id).unwrap(), &graph);
        assert!(check("d")[0].message.ends_with("No choices connected"));
        assert!(check("a")[0].message.ends_with("No follow-up connected"));
        assert!(check("e").is_empty());
    }

    #[test]
    fn test_unreachable() {
        let graph = Graph::from_nodes([
            node("s", NodeKind::Start, &["a"]),
            node("a", NodeKind::Story, &["e"]),
            node("e", NodeKind::End, &[]),
            node("orphan", NodeKind::Story, &["e"]),
        ])
        .unwrap();

        let diagnostics = UnreachableRule.check_graph(&graph);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].node_id.as_deref(), Some("orphan"));
    }

    #[test]
    fn test_story_fan_out() {
        let graph = Graph::from_nodes([
            node("a", NodeKind::Story, &["b", "e", "d"]),
            node("b", NodeKind::Story, &[]),
            node("d", NodeKind::Decision, &[]),
            node("e", NodeKind::End, &[]),
        ])
        .unwrap();

        let diagnostics = StoryFanOutRule.check_node(graph.find_node("a").unwrap(), &graph);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("2 nodes"));
    }
}
