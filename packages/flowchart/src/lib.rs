//! # StoryMate Flowchart
//!
//! Graph model for branching stories.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Node / Edge / Graph                  │
//! │  - ordered node store keyed by id           │
//! │  - edges derived from each node's outgoing  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ rules: connection legality + replacement    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ geometry: handles, edge curves, hit-testing │
//! │ dto: wire format for load/save              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use storymate_flowchart::{Graph, Node, NodeKind, Point};
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("start", NodeKind::Start, "You awake", Point::new(100.0, 100.0))).unwrap();
//! graph.add_node(Node::new("end", NodeKind::End, "End of route", Point::new(400.0, 150.0))).unwrap();
//!
//! // Start may not connect straight to End
//! assert!(!graph.connect("start", "end").is_connected());
//! ```

pub mod dto;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod model;
pub mod rules;

pub use dto::{FlowchartDto, NodeDto};
pub use error::{FlowchartError, FlowchartResult};
pub use geometry::{CubicBezier, NodeMetrics, Viewport};
pub use id_generator::IDGenerator;
pub use model::{ConnectOutcome, Edge, Graph, Node, NodeKind, Point};
pub use rules::{can_connect, kinds_can_connect, RejectReason};
