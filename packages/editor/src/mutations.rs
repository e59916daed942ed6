//! # Graph Mutations
//!
//! Semantic edit operations on a flowchart graph.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one editor action
//! 2. **Validated**: Mutations check their targets before touching the graph
//! 3. **Lenient where harmless**: Removing something already gone is a no-op
//!
//! ## Mutation Semantics
//!
//! ### RemoveNode
//! - Removes the node and every edge into or out of it
//! - Start and End nodes are protected
//! - Unknown ids are no-ops
//!
//! ### Connect
//! - Illegal or duplicate edges are no-ops, never errors
//! - May sever existing edges (story fan-out and predecessor replacement)
//!
//! ### MoveNode / SetText / SetImage
//! - Atomic replacement, last write wins
//! - Fail if the node does not exist

use serde::{Deserialize, Serialize};
use storymate_flowchart::{ConnectOutcome, Edge, Graph, Node, NodeKind, Point};
use thiserror::Error;

use crate::events::EditorEvent;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a fully formed node
    AddNode { node: Node },

    /// Remove a node and its edges
    RemoveNode { node_id: String },

    /// Set a node's world position
    MoveNode { node_id: String, position: Point },

    /// Replace a node's narrative text
    SetText { node_id: String, text: String },

    /// Replace or clear a node's image payload
    SetImage {
        node_id: String,
        image_data: Option<String>,
    },

    /// Add an edge, subject to the connection rules
    Connect { from_id: String, to_id: String },

    /// Remove an edge
    Disconnect { from_id: String, to_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("{kind} node {node_id} cannot be removed")]
    ProtectedNode { node_id: String, kind: NodeKind },
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// The graph changed; `events` describe how
    Applied { events: Vec<EditorEvent> },

    /// Nothing changed
    Noop { reason: String },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }

    pub fn events(&self) -> &[EditorEvent] {
        match self {
            MutationResult::Applied { events } => events,
            MutationResult::Noop { .. } => &[],
        }
    }

    fn noop(reason: impl Into<String>) -> Self {
        MutationResult::Noop {
            reason: reason.into(),
        }
    }
}

impl Mutation {
    /// Apply mutation to the graph with validation
    pub fn apply(&self, graph: &mut Graph) -> Result<MutationResult, MutationError> {
        self.validate(graph)?;

        match self {
            Mutation::AddNode { node } => Ok(Self::apply_add(graph, node)),

            Mutation::RemoveNode { node_id } => Ok(Self::apply_remove(graph, node_id)),

            Mutation::MoveNode { node_id, position } => {
                Self::apply_move(graph, node_id, *position)
            }

            Mutation::SetText { node_id, text } => Self::apply_set_text(graph, node_id, text),

            Mutation::SetImage {
                node_id,
                image_data,
            } => Self::apply_set_image(graph, node_id, image_data.as_deref()),

            Mutation::Connect { from_id, to_id } => Ok(Self::apply_connect(graph, from_id, to_id)),

            Mutation::Disconnect { from_id, to_id } => {
                if graph.disconnect(from_id, to_id) {
                    Ok(MutationResult::Applied {
                        events: vec![EditorEvent::EdgeRemoved(Edge::new(from_id, to_id))],
                    })
                } else {
                    Ok(MutationResult::noop("Edge does not exist"))
                }
            }
        }
    }

    fn apply_add(graph: &mut Graph, node: &Node) -> MutationResult {
        let node_id = node.id.clone();
        // Duplicate ids were rejected by validate()
        if graph.add_node(node.clone()).is_err() {
            return MutationResult::noop("Node already exists");
        }
        MutationResult::Applied {
            events: vec![EditorEvent::NodeAdded { node_id }],
        }
    }

    fn apply_remove(graph: &mut Graph, node_id: &str) -> MutationResult {
        let Some(node) = graph.find_node(node_id) else {
            return MutationResult::noop("Node does not exist");
        };

        let mut events: Vec<EditorEvent> = graph
            .predecessors(node_id)
            .into_iter()
            .map(|pred| EditorEvent::EdgeRemoved(Edge::new(pred.id.clone(), node_id)))
            .collect();
        events.extend(
            node.outgoing
                .iter()
                .map(|target| EditorEvent::EdgeRemoved(Edge::new(node_id, target.clone()))),
        );

        graph.remove_node(node_id);
        events.push(EditorEvent::NodeRemoved {
            node_id: node_id.to_string(),
        });

        MutationResult::Applied { events }
    }

    fn apply_move(
        graph: &mut Graph,
        node_id: &str,
        position: Point,
    ) -> Result<MutationResult, MutationError> {
        let node = Self::node_mut(graph, node_id)?;
        if node.position == position {
            return Ok(MutationResult::noop("Node already at position"));
        }
        node.position = position;

        Ok(MutationResult::Applied {
            events: vec![EditorEvent::NodeMoved {
                node_id: node_id.to_string(),
                position,
            }],
        })
    }

    fn apply_set_text(
        graph: &mut Graph,
        node_id: &str,
        text: &str,
    ) -> Result<MutationResult, MutationError> {
        let node = Self::node_mut(graph, node_id)?;
        node.text = text.to_string();

        Ok(MutationResult::Applied {
            events: vec![EditorEvent::NodeUpdated {
                node_id: node_id.to_string(),
            }],
        })
    }

    fn apply_set_image(
        graph: &mut Graph,
        node_id: &str,
        image_data: Option<&str>,
    ) -> Result<MutationResult, MutationError> {
        let node = Self::node_mut(graph, node_id)?;
        node.image_data = image_data
            .filter(|data| !data.is_empty())
            .map(str::to_string);

        Ok(MutationResult::Applied {
            events: vec![EditorEvent::NodeUpdated {
                node_id: node_id.to_string(),
            }],
        })
    }

    fn apply_connect(graph: &mut Graph, from_id: &str, to_id: &str) -> MutationResult {
        match graph.connect(from_id, to_id) {
            ConnectOutcome::Connected { severed } => {
                let mut events: Vec<EditorEvent> =
                    severed.into_iter().map(EditorEvent::EdgeRemoved).collect();
                events.push(EditorEvent::EdgeAdded(Edge::new(from_id, to_id)));
                MutationResult::Applied { events }
            }
            ConnectOutcome::AlreadyConnected => MutationResult::noop("Edge already exists"),
            ConnectOutcome::Rejected(reason) => MutationResult::noop(reason.to_string()),
        }
    }

    fn node_mut<'a>(graph: &'a mut Graph, node_id: &str) -> Result<&'a mut Node, MutationError> {
        graph
            .find_node_mut(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
    }

    /// Validate without applying
    pub fn validate(&self, graph: &Graph) -> Result<(), MutationError> {
        match self {
            Mutation::AddNode { node } => {
                if graph.contains(&node.id) {
                    return Err(MutationError::DuplicateNode(node.id.clone()));
                }
                Ok(())
            }

            Mutation::RemoveNode { node_id } => match graph.find_node(node_id) {
                Some(node) if !node.kind.is_deletable() => Err(MutationError::ProtectedNode {
                    node_id: node_id.clone(),
                    kind: node.kind,
                }),
                _ => Ok(()),
            },

            Mutation::MoveNode { node_id, .. }
            | Mutation::SetText { node_id, .. }
            | Mutation::SetImage { node_id, .. } => {
                if !graph.contains(node_id) {
                    return Err(MutationError::NodeNotFound(node_id.clone()));
                }
                Ok(())
            }

            Mutation::Connect { .. } | Mutation::Disconnect { .. } => Ok(()),
        }
    }
}
