//! # Flowchart Graph Model
//!
//! Nodes are owned by value inside [`Graph`]; everything outside the graph
//! refers to a node by its id. Edges are never stored on their own: the edge
//! set is exactly the union of every node's `outgoing` list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::{FlowchartError, FlowchartResult};
use crate::rules::{self, ConnectDecision, RejectReason};

/// Narrative role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Start,
    Story,
    Decision,
    End,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Start,
        NodeKind::Story,
        NodeKind::Decision,
        NodeKind::End,
    ];

    /// Wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Story => "Story",
            NodeKind::Decision => "Decision",
            NodeKind::End => "End",
        }
    }

    /// Parse a wire name, falling back to `Story` for anything unrecognized
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "Start" => NodeKind::Start,
            "Story" => NodeKind::Story,
            "Decision" => NodeKind::Decision,
            "End" => NodeKind::End,
            _ => NodeKind::Story,
        }
    }

    /// Whether the editor offers an input (incoming) handle
    pub fn has_input_handle(self) -> bool {
        self != NodeKind::Start
    }

    /// Whether the editor offers an output (outgoing) handle
    pub fn has_output_handle(self) -> bool {
        self != NodeKind::End
    }

    /// Start and End anchor the story and survive ordinary edits
    pub fn is_deletable(self) -> bool {
        matches!(self, NodeKind::Story | NodeKind::Decision)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 2D point, used both for world positions and for screen-space deltas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// A single unit of narrative content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub text: String,
    pub position: Point,
    pub image_data: Option<String>,
    /// Target node ids, in insertion order
    pub outgoing: Vec<String>,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        kind: NodeKind,
        text: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            position,
            image_data: None,
            outgoing: Vec::new(),
        }
    }

    pub fn with_image(mut self, image_data: impl Into<String>) -> Self {
        self.image_data = Some(image_data.into());
        self
    }

    pub fn has_edge_to(&self, target_id: &str) -> bool {
        self.outgoing.iter().any(|id| id == target_id)
    }

    pub fn has_image(&self) -> bool {
        self.image_data.as_deref().is_some_and(|data| !data.is_empty())
    }
}

/// Directed relation between two nodes, identified by the `(from, to)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Result of [`Graph::connect`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    /// Edge added; `severed` lists edges removed to make room for it
    Connected { severed: Vec<Edge> },
    /// The pair already existed; nothing changed
    AlreadyConnected,
    /// The legality table refused the edge; nothing changed
    Rejected(RejectReason),
}

impl ConnectOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectOutcome::Connected { .. })
    }
}

/// Ordered node store keyed by id.
///
/// Insertion order is preserved (removal shifts, it never swaps), so node
/// listing and "rightmost" placement stay deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from nodes in order, rejecting duplicate ids
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> FlowchartResult<Self> {
        let mut graph = Graph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Append a node. The id must not already be present.
    pub fn add_node(&mut self, node: Node) -> FlowchartResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(FlowchartError::duplicate_node(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Remove a node and strip every edge pointing at it.
    ///
    /// Removing an unknown id is a no-op and returns `None`.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let removed = self.nodes.shift_remove(id)?;
        for node in self.nodes.values_mut() {
            node.outgoing.retain(|target| target != id);
        }
        Some(removed)
    }

    /// Replace the stored node carrying the same id. Returns false if absent.
    pub fn update_node(&mut self, node: Node) -> bool {
        match self.nodes.get_mut(&node.id) {
            Some(slot) => {
                *slot = node;
                true
            }
            None => false,
        }
    }

    /// Connect `from_id` to `to_id` if the legality table allows it, applying
    /// the story fan-out and story predecessor replacement policy.
    pub fn connect(&mut self, from_id: &str, to_id: &str) -> ConnectOutcome {
        match rules::plan_connection(self, from_id, to_id) {
            ConnectDecision::Rejected(reason) => ConnectOutcome::Rejected(reason),
            ConnectDecision::AlreadyConnected => ConnectOutcome::AlreadyConnected,
            ConnectDecision::Accept(plan) => {
                for edge in &plan.severed {
                    self.disconnect(&edge.from, &edge.to);
                }
                if let Some(from) = self.nodes.get_mut(&plan.edge.from) {
                    from.outgoing.push(plan.edge.to.clone());
                }
                ConnectOutcome::Connected {
                    severed: plan.severed,
                }
            }
        }
    }

    /// Remove the `(from_id, to_id)` edge. Returns false if it did not exist.
    pub fn disconnect(&mut self, from_id: &str, to_id: &str) -> bool {
        let Some(from) = self.nodes.get_mut(from_id) else {
            return false;
        };
        let before = from.outgoing.len();
        from.outgoing.retain(|target| target != to_id);
        from.outgoing.len() != before
    }

    pub fn has_edge(&self, from_id: &str, to_id: &str) -> bool {
        self.find_node(from_id)
            .is_some_and(|node| node.has_edge_to(to_id))
    }

    /// All edges, in node order then `outgoing` order
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .values()
            .flat_map(|node| {
                node.outgoing
                    .iter()
                    .map(move |target| Edge::new(node.id.clone(), target.clone()))
            })
            .collect()
    }

    /// First Start node in insertion order
    pub fn start_node(&self) -> Option<&Node> {
        self.nodes_of_kind(NodeKind::Start).next()
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |node| node.kind == kind)
    }

    /// Resolved targets of a node's outgoing edges, skipping dangling ids
    pub fn successors(&self, id: &str) -> Vec<&Node> {
        self.find_node(id)
            .map(|node| {
                node.outgoing
                    .iter()
                    .filter_map(|target| self.find_node(target))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nodes with an edge into `id`
    pub fn predecessors(&self, id: &str) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|node| node.has_edge_to(id))
            .collect()
    }

    /// Largest x coordinate across all nodes
    pub fn max_x(&self) -> Option<f64> {
        self.nodes
            .values()
            .map(|node| node.position.x)
            .reduce(f64::max)
    }
}
