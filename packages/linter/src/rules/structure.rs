use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use storymate_flowchart::{Graph, NodeKind};

/// Exactly one Start node
pub struct SingleStartRule;

impl LintRule for SingleStartRule {
    fn name(&self) -> &'static str {
        "single-start"
    }

    fn description(&self) -> &'static str {
        "A flowchart must have exactly one Start node"
    }

    fn check_graph(&self, graph: &Graph) -> Vec<Diagnostic> {
        let starts: Vec<_> = graph.nodes_of_kind(NodeKind::Start).collect();

        match starts.as_slice() {
            [] => vec![Diagnostic::error(self.name(), "No starting node found")
                .with_suggestion("Add a Start node; the preview begins there")],
            [_] => Vec::new(),
            [_, extra @ ..] => extra
                .iter()
                .map(|node| {
                    Diagnostic::error(
                        self.name(),
                        format!("Extra Start node '{}'; only the first is used", node.id),
                    )
                    .with_node(node.id.clone())
                })
                .collect(),
        }
    }
}

/// At least one End node
pub struct HasEndRule;

impl LintRule for HasEndRule {
    fn name(&self) -> &'static str {
        "has-end"
    }

    fn description(&self) -> &'static str {
        "A flowchart must have an End node"
    }

    fn check_graph(&self, graph: &Graph) -> Vec<Diagnostic> {
        if graph.nodes_of_kind(NodeKind::End).next().is_some() {
            return Vec::new();
        }
        vec![Diagnostic::error(self.name(), "No End node; the story can never finish")]
    }
}
