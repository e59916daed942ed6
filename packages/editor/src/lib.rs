//! # StoryMate Editor
//!
//! Interaction engine for the flowchart canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ flowchart: Graph + connection rules         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: gestures → mutations                │
//! │  - Selection, drags, hover, viewport        │
//! │  - Connection drag with handle snapping     │
//! │  - Change events for the host to redraw     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: load/save through a FlowchartStore │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use storymate_editor::{EditSession, EditorConfig, MemoryStore};
//! use storymate_flowchart::Point;
//!
//! let store = MemoryStore::new();
//! let mut session = EditSession::open("demo", &store, EditorConfig::default());
//!
//! let start = session.graph().start_node().unwrap().id.clone();
//! let (graph, editor) = session.parts_mut();
//! let story = editor.add_story_node(graph);
//!
//! editor.begin_connection_drag(start, Point::ZERO);
//! let target = graph.find_node(&story).unwrap().position + Point::new(-58.0, 0.0);
//! editor.update_connection_drag(target, graph);
//! assert!(editor.end_connection_drag(graph));
//!
//! session.save().unwrap();
//! ```

mod config;
mod editor;
mod errors;
mod events;
mod mutations;
mod session;
mod store;

pub use config::{EditorConfig, SeedNode};
pub use editor::{EditorState, InteractionMode, Selection};
pub use errors::{EditorError, StoreError};
pub use events::{EditorEvent, EventBus, Listener};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use session::{EditSession, GraphOrigin};
pub use store::{FileStore, FlowchartStore, MemoryStore};
