//! Reader-side traversal of a flowchart.
//!
//! The walker holds nothing but the path it has taken. Every query reads
//! the graph it is handed, so a host can keep editing and pass a fresh
//! snapshot on the next step.

use serde::{Deserialize, Serialize};
use storymate_flowchart::{Graph, Node, NodeKind};
use tracing::debug;

use crate::error::{PreviewError, PreviewResult};

pub const NO_FOLLOW_UP: &str = "No follow-up connected";
pub const NO_CHOICES: &str = "No choices connected";

/// What the reader can do at the current node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Pick one of these nodes
    Choices(Vec<Node>),

    /// Only one way forward
    Continue(Node),

    /// Nothing connected; only back or restart
    DeadEnd(String),

    /// Story finished; only restart
    End,
}

impl Step {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::DeadEnd(_) | Step::End)
    }

    /// Nodes the reader may advance to
    pub fn targets(&self) -> Vec<&Node> {
        match self {
            Step::Choices(nodes) => nodes.iter().collect(),
            Step::Continue(node) => vec![node],
            Step::DeadEnd(_) | Step::End => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryWalker {
    path: Vec<String>,
}

impl StoryWalker {
    /// Begin at the graph's Start node
    pub fn start(graph: &Graph) -> PreviewResult<Self> {
        let start = start_id(graph)?;
        debug!(node_id = %start, "Preview started");
        Ok(Self { path: vec![start] })
    }

    /// Jump back to the Start node and forget the path.
    ///
    /// On failure the walker keeps its current position.
    pub fn restart(&mut self, graph: &Graph) -> PreviewResult<()> {
        let start = start_id(graph)?;
        self.path = vec![start];
        Ok(())
    }

    pub fn current(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn current_node<'g>(&self, graph: &'g Graph) -> PreviewResult<&'g Node> {
        graph
            .find_node(self.current())
            .ok_or_else(|| PreviewError::UnknownNode(self.current().to_string()))
    }

    /// Node ids visited since the last (re)start, current last
    pub fn history(&self) -> &[String] {
        &self.path
    }

    pub fn available_choices<'g>(&self, graph: &'g Graph) -> Vec<&'g Node> {
        available_choices(graph, self.current())
    }

    pub fn step(&self, graph: &Graph) -> PreviewResult<Step> {
        let node = self.current_node(graph)?;
        let targets = available_choices(graph, &node.id);

        let step = match node.kind {
            NodeKind::End => Step::End,
            NodeKind::Decision if targets.is_empty() => Step::DeadEnd(NO_CHOICES.to_string()),
            NodeKind::Decision => Step::Choices(targets.into_iter().cloned().collect()),
            NodeKind::Start | NodeKind::Story => match targets.as_slice() {
                [] => Step::DeadEnd(NO_FOLLOW_UP.to_string()),
                [next] if next.kind != NodeKind::Decision => Step::Continue((*next).clone()),
                _ => Step::Choices(targets.iter().map(|target| (*target).clone()).collect()),
            },
        };
        Ok(step)
    }

    /// Move to `node_id` without checking that it is reachable
    pub fn advance(&mut self, node_id: impl Into<String>) {
        let node_id = node_id.into();
        debug!(from = %self.current(), to = %node_id, "Preview advanced");
        self.path.push(node_id);
    }

    /// Return to the previous node. False when already at the start.
    pub fn back(&mut self) -> bool {
        if self.path.len() > 1 {
            self.path.pop();
            true
        } else {
            false
        }
    }
}

/// Nodes offered to the reader at `node_id`.
///
/// From Start or Story, connected Decisions are offered if there are any;
/// otherwise the first successor is the single way to continue. A Decision
/// offers every successor in edge order. End offers nothing. Edges to
/// missing nodes are ignored.
pub fn available_choices<'g>(graph: &'g Graph, node_id: &str) -> Vec<&'g Node> {
    let Some(node) = graph.find_node(node_id) else {
        return Vec::new();
    };
    let targets = graph.successors(node_id);

    match node.kind {
        NodeKind::End => Vec::new(),
        NodeKind::Decision => targets,
        NodeKind::Start | NodeKind::Story => {
            let decisions: Vec<&Node> = targets
                .iter()
                .copied()
                .filter(|target| target.kind == NodeKind::Decision)
                .collect();
            if decisions.is_empty() {
                targets.into_iter().take(1).collect()
            } else {
                decisions
            }
        }
    }
}

/// Heading shown above a node's text
pub fn node_title(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Start => "START",
        NodeKind::Story => "STORY",
        NodeKind::Decision => "CHOICE",
        NodeKind::End => "END",
    }
}

/// Button text for a choice, falling back when the node has no text
pub fn choice_label(node: &Node) -> &str {
    if !node.text.is_empty() {
        return &node.text;
    }
    match node.kind {
        NodeKind::Decision => "Choice",
        _ => "Option",
    }
}

fn start_id(graph: &Graph) -> PreviewResult<String> {
    graph
        .start_node()
        .map(|node| node.id.clone())
        .ok_or(PreviewError::NoStartNode)
}
