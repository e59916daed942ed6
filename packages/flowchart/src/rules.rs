//! # Connection Rules
//!
//! Decides which directed edges may exist between typed nodes, and which
//! existing edges a new connection replaces.
//!
//! ## Legality table (from → to)
//!
//! ```text
//!              Start  Story  Decision  End
//! Start          ✗      ✓       ✓       ✗
//! Story          ✗      ✓       ✓       ✓
//! Decision       ✗      ✓       ✗       ✓
//! End            ✗      ✗       ✗       ✗
//! ```
//!
//! Self-loops are never legal.
//!
//! ## Replacement policy
//!
//! 1. A Story node keeps at most one non-Decision successor: connecting it to
//!    a Story or End target severs its other non-Decision edges. Edges into
//!    Decision nodes accumulate.
//! 2. A Story target keeps at most one Story predecessor: connecting a Story
//!    node into a Story target severs the edge from any other Story node.
//! 3. Connecting an existing pair changes nothing.

use thiserror::Error;

use crate::model::{Edge, Graph, Node, NodeKind};

/// Why a connection was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("Node not found: {0}")]
    UnknownNode(String),

    #[error("A node cannot connect to itself")]
    SelfLoop,

    #[error("Nothing may connect into a Start node")]
    IntoStart,

    #[error("End nodes have no outgoing connections")]
    FromEnd,

    #[error("{from} nodes cannot connect to {to} nodes")]
    KindMismatch { from: NodeKind, to: NodeKind },
}

/// Kind-level legality, ignoring node identity
pub fn kinds_can_connect(from: NodeKind, to: NodeKind) -> bool {
    check_kinds(from, to).is_ok()
}

fn check_kinds(from: NodeKind, to: NodeKind) -> Result<(), RejectReason> {
    if to == NodeKind::Start {
        return Err(RejectReason::IntoStart);
    }
    let allowed = match from {
        NodeKind::End => return Err(RejectReason::FromEnd),
        NodeKind::Start => matches!(to, NodeKind::Story | NodeKind::Decision),
        NodeKind::Story => matches!(to, NodeKind::Story | NodeKind::Decision | NodeKind::End),
        NodeKind::Decision => matches!(to, NodeKind::Story | NodeKind::End),
    };
    if allowed {
        Ok(())
    } else {
        Err(RejectReason::KindMismatch { from, to })
    }
}

/// Check a concrete pair of nodes against the legality table
pub fn check_connection(from: &Node, to: &Node) -> Result<(), RejectReason> {
    if from.id == to.id {
        return Err(RejectReason::SelfLoop);
    }
    check_kinds(from.kind, to.kind)
}

pub fn can_connect(from: &Node, to: &Node) -> bool {
    check_connection(from, to).is_ok()
}

/// Edge to add plus the edges it replaces
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPlan {
    pub edge: Edge,
    pub severed: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectDecision {
    Accept(ConnectionPlan),
    AlreadyConnected,
    Rejected(RejectReason),
}

/// Work out what connecting `from_id` to `to_id` would do, without mutating
pub fn plan_connection(graph: &Graph, from_id: &str, to_id: &str) -> ConnectDecision {
    let Some(from) = graph.find_node(from_id) else {
        return ConnectDecision::Rejected(RejectReason::UnknownNode(from_id.to_string()));
    };
    let Some(to) = graph.find_node(to_id) else {
        return ConnectDecision::Rejected(RejectReason::UnknownNode(to_id.to_string()));
    };
    if let Err(reason) = check_connection(from, to) {
        return ConnectDecision::Rejected(reason);
    }
    if from.has_edge_to(to_id) {
        return ConnectDecision::AlreadyConnected;
    }

    let mut severed = Vec::new();

    if from.kind == NodeKind::Story && to.kind != NodeKind::Decision {
        for target in &from.outgoing {
            let target_is_decision = graph
                .find_node(target)
                .is_some_and(|node| node.kind == NodeKind::Decision);
            if !target_is_decision {
                severed.push(Edge::new(from_id, target.clone()));
            }
        }
    }

    if from.kind == NodeKind::Story && to.kind == NodeKind::Story {
        for other in graph.predecessors(to_id) {
            if other.id != from_id && other.kind == NodeKind::Story {
                severed.push(Edge::new(other.id.clone(), to_id));
            }
        }
    }

    ConnectDecision::Accept(ConnectionPlan {
        edge: Edge::new(from_id, to_id),
        severed,
    })
}
