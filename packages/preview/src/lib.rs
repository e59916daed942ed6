//! # StoryMate Preview
//!
//! Plays a flowchart the way a reader would experience it.
//!
//! ```rust
//! use storymate_flowchart::{Graph, Node, NodeKind, Point};
//! use storymate_preview::{Step, StoryWalker};
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("s", NodeKind::Start, "You awake", Point::ZERO)).unwrap();
//! graph.add_node(Node::new("a", NodeKind::Story, "A dark room", Point::ZERO)).unwrap();
//! graph.connect("s", "a");
//!
//! let mut walker = StoryWalker::start(&graph).unwrap();
//! if let Step::Continue(next) = walker.step(&graph).unwrap() {
//!     walker.advance(next.id);
//! }
//! assert_eq!(walker.current(), "a");
//! ```

pub mod error;
pub mod walker;

pub use error::{PreviewError, PreviewResult};
pub use walker::{available_choices, choice_label, node_title, Step, StoryWalker};
