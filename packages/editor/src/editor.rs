//! # Editor Interaction State
//!
//! Tracks selection, drags, hover and viewport for one editing session, and
//! turns UI gestures into [`Mutation`]s on a [`Graph`].
//!
//! ## States
//!
//! ```text
//! Idle ⇄ NodeSelected ⇄ EdgeSelected
//!   └──────────┴──────────────┴──→ ConnectingEdge ──→ (previous selection)
//!
//! Editing ⇄ Previewing   (orthogonal; entering preview clears selection)
//! ```
//!
//! Every gesture is three explicit calls: begin, update, end. Drags snapshot
//! the starting position once and apply each update as `start + delta`, so
//! deltas never compound.

use serde::{Deserialize, Serialize};
use storymate_flowchart::geometry::{self, clamp_zoom, CubicBezier, Viewport};
use storymate_flowchart::{Edge, Graph, IDGenerator, Node, NodeKind, Point};
use tracing::debug;

use crate::config::EditorConfig;
use crate::events::{EditorEvent, EventBus};
use crate::mutations::{Mutation, MutationResult};
use crate::EditorError;

/// What the user has selected. Node and edge selection are exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Node(String),
    Edge(Edge),
}

/// Current interaction, derived from the editor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    NodeSelected,
    EdgeSelected,
    ConnectingEdge,
    DraggingNode,
    PanningCanvas,
}

#[derive(Debug, Clone)]
struct NodeDrag {
    node_id: String,
    start: Point,
}

#[derive(Debug, Clone)]
struct ConnectionDrag {
    from_id: String,
    start: Point,
    current: Point,
}

#[derive(Debug)]
pub struct EditorState {
    config: EditorConfig,
    ids: IDGenerator,
    selection: Selection,
    hovered_node_id: Option<String>,
    node_drag: Option<NodeDrag>,
    canvas_drag_start: Option<Point>,
    connection: Option<ConnectionDrag>,
    viewport: Viewport,
    previewing: bool,
    events: EventBus,
}

impl EditorState {
    pub fn new(config: EditorConfig, ids: IDGenerator) -> Self {
        Self {
            config,
            ids,
            selection: Selection::None,
            hovered_node_id: None,
            node_drag: None,
            canvas_drag_start: None,
            connection: None,
            viewport: Viewport::default(),
            previewing: false,
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn ids_mut(&mut self) -> &mut IDGenerator {
        &mut self.ids
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub(crate) fn emit(&mut self, event: EditorEvent) {
        self.events.emit(event);
    }

    /// Apply a mutation and announce its effects
    pub fn apply(
        &mut self,
        graph: &mut Graph,
        mutation: Mutation,
    ) -> Result<MutationResult, EditorError> {
        let result = mutation.apply(graph)?;
        match &result {
            MutationResult::Applied { events } => self.events.emit_all(events.iter().cloned()),
            MutationResult::Noop { reason } => {
                debug!(mutation = ?mutation, reason = %reason, "Mutation had no effect")
            }
        }
        Ok(result)
    }

    /// Drop selection, hover and any gesture in progress
    pub fn reset_interaction(&mut self) {
        self.node_drag = None;
        self.canvas_drag_start = None;
        self.connection = None;
        self.set_hovered(None);
        self.deselect_all();
    }

    pub fn mode(&self) -> InteractionMode {
        if self.connection.is_some() {
            InteractionMode::ConnectingEdge
        } else if self.node_drag.is_some() {
            InteractionMode::DraggingNode
        } else if self.canvas_drag_start.is_some() {
            InteractionMode::PanningCanvas
        } else {
            match self.selection {
                Selection::None => InteractionMode::Idle,
                Selection::Node(_) => InteractionMode::NodeSelected,
                Selection::Edge(_) => InteractionMode::EdgeSelected,
            }
        }
    }

    // ---------------------------------------------------------------
    // Node creation
    // ---------------------------------------------------------------

    pub fn add_story_node(&mut self, graph: &mut Graph) -> String {
        self.add_node(graph, NodeKind::Story)
    }

    pub fn add_decision_node(&mut self, graph: &mut Graph) -> String {
        self.add_node(graph, NodeKind::Decision)
    }

    /// Place a new node right of the rightmost one and select it
    fn add_node(&mut self, graph: &mut Graph, kind: NodeKind) -> String {
        let x = graph.max_x().unwrap_or(0.0) + self.config.placement_offset;
        let id = self.ids.new_unique_id(|id| graph.contains(id));
        let node = Node::new(
            id.clone(),
            kind,
            self.config.placeholder(kind),
            Point::new(x, self.config.placement_y),
        );

        if let Err(err) = self.apply(graph, Mutation::AddNode { node }) {
            debug!(node_id = %id, error = %err, "Failed to add node");
        }
        self.select_node(id.clone());
        id
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        match &self.selection {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_edge(&self) -> Option<&Edge> {
        match &self.selection {
            Selection::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn select_node(&mut self, node_id: impl Into<String>) {
        self.set_selection(Selection::Node(node_id.into()));
    }

    pub fn select_edge(&mut self, edge: Edge) {
        self.set_selection(Selection::Edge(edge));
    }

    pub fn deselect_all(&mut self) {
        self.set_selection(Selection::None);
    }

    fn set_selection(&mut self, selection: Selection) {
        if self.selection != selection {
            self.selection = selection.clone();
            self.events.emit(EditorEvent::SelectionChanged(selection));
        }
    }

    // ---------------------------------------------------------------
    // Deletion and content edits
    // ---------------------------------------------------------------

    /// Delete the selected node and its edges.
    ///
    /// No-op when nothing is selected or the selection is a Start/End node.
    pub fn delete_selected_node(&mut self, graph: &mut Graph) -> bool {
        let Some(node_id) = self.selected_node_id().map(str::to_string) else {
            return false;
        };

        match graph.find_node(&node_id) {
            Some(node) if !node.kind.is_deletable() => {
                debug!(node_id = %node_id, kind = %node.kind, "Refusing to delete anchor node");
                return false;
            }
            Some(_) => {}
            None => {
                self.deselect_all();
                return false;
            }
        }

        let removed = match self.apply(graph, Mutation::RemoveNode { node_id }) {
            Ok(result) => result.is_applied(),
            Err(err) => {
                debug!(error = %err, "Failed to delete node");
                false
            }
        };
        if removed {
            self.deselect_all();
        }
        removed
    }

    /// Delete the selected edge. No-op when no edge is selected.
    pub fn delete_selected_edge(&mut self, graph: &mut Graph) -> bool {
        let Some(edge) = self.selected_edge().cloned() else {
            return false;
        };

        let removed = self
            .apply(
                graph,
                Mutation::Disconnect {
                    from_id: edge.from,
                    to_id: edge.to,
                },
            )
            .map(|result| result.is_applied())
            .unwrap_or(false);
        self.deselect_all();
        removed
    }

    pub fn set_node_text(
        &mut self,
        graph: &mut Graph,
        node_id: &str,
        text: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.apply(
            graph,
            Mutation::SetText {
                node_id: node_id.to_string(),
                text: text.into(),
            },
        )?;
        Ok(())
    }

    /// Attach an image payload; `None` or an empty string removes it
    pub fn set_node_image(
        &mut self,
        graph: &mut Graph,
        node_id: &str,
        image_data: Option<String>,
    ) -> Result<(), EditorError> {
        self.apply(
            graph,
            Mutation::SetImage {
                node_id: node_id.to_string(),
                image_data,
            },
        )?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Node drag
    // ---------------------------------------------------------------

    /// Snapshot the node's position at gesture start
    pub fn begin_node_drag(&mut self, graph: &Graph, node_id: &str) -> bool {
        let Some(node) = graph.find_node(node_id) else {
            return false;
        };
        self.node_drag = Some(NodeDrag {
            node_id: node_id.to_string(),
            start: node.position,
        });
        true
    }

    /// Move the node to `drag start + delta`.
    ///
    /// `delta` is the total screen-space translation since the gesture began.
    /// A drag that was not begun explicitly begins on its first update.
    pub fn drag_node(&mut self, graph: &mut Graph, node_id: &str, delta: Point) {
        let needs_begin = self
            .node_drag
            .as_ref()
            .map_or(true, |drag| drag.node_id != node_id);
        if needs_begin && !self.begin_node_drag(graph, node_id) {
            return;
        }
        let Some(drag) = &self.node_drag else {
            return;
        };

        let position = drag.start + delta * (1.0 / self.viewport.zoom);
        let mutation = Mutation::MoveNode {
            node_id: node_id.to_string(),
            position,
        };
        if let Err(err) = self.apply(graph, mutation) {
            debug!(node_id = %node_id, error = %err, "Dragged node vanished");
            self.node_drag = None;
        }
    }

    pub fn end_node_drag(&mut self) {
        self.node_drag = None;
    }

    // ---------------------------------------------------------------
    // Canvas pan and zoom
    // ---------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn begin_canvas_drag(&mut self) {
        self.canvas_drag_start = Some(self.viewport.pan);
    }

    /// Pan to `pan at gesture start + delta`
    pub fn drag_canvas(&mut self, delta: Point) {
        let start = match self.canvas_drag_start {
            Some(start) => start,
            None => {
                self.begin_canvas_drag();
                self.viewport.pan
            }
        };
        self.viewport.pan = start + delta;
        self.events.emit(EditorEvent::ViewportChanged(self.viewport));
    }

    pub fn end_canvas_drag(&mut self) {
        self.canvas_drag_start = None;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        let zoom = clamp_zoom(zoom);
        if self.viewport.zoom != zoom {
            self.viewport.zoom = zoom;
            self.events.emit(EditorEvent::ViewportChanged(self.viewport));
        }
    }

    // ---------------------------------------------------------------
    // Connection drag
    // ---------------------------------------------------------------

    pub fn is_connecting(&self) -> bool {
        self.connection.is_some()
    }

    pub fn hovered_node_id(&self) -> Option<&str> {
        self.hovered_node_id.as_deref()
    }

    /// Start dragging a new edge out of `from_id`'s output handle
    pub fn begin_connection_drag(&mut self, from_id: impl Into<String>, at: Point) {
        self.connection = Some(ConnectionDrag {
            from_id: from_id.into(),
            start: at,
            current: at,
        });
        self.set_hovered(None);
    }

    /// Track the pointer and snap to the first input handle within reach.
    ///
    /// Start nodes and the drag's own source are never targets.
    pub fn update_connection_drag(&mut self, to: Point, graph: &Graph) {
        let Some(connection) = &mut self.connection else {
            return;
        };
        connection.current = to;
        let from_id = connection.from_id.clone();

        let hovered = graph
            .nodes()
            .filter(|node| node.id != from_id && node.kind.has_input_handle())
            .find(|node| {
                let handle = geometry::input_handle(node, &self.config.metrics, &self.viewport);
                handle.distance_to(to) < self.config.snap_radius()
            })
            .map(|node| node.id.clone());

        self.set_hovered(hovered);
    }

    /// Finish the drag, connecting to the hovered node if the rules allow.
    ///
    /// Connecting state and hover are always cleared. Returns whether an
    /// edge was added.
    pub fn end_connection_drag(&mut self, graph: &mut Graph) -> bool {
        let connection = self.connection.take();
        let hovered = self.hovered_node_id.clone();
        self.set_hovered(None);

        let (Some(connection), Some(to_id)) = (connection, hovered) else {
            return false;
        };

        let mutation = Mutation::Connect {
            from_id: connection.from_id,
            to_id,
        };
        match self.apply(graph, mutation) {
            Ok(result) => result.is_applied(),
            Err(err) => {
                debug!(error = %err, "Connection dropped");
                false
            }
        }
    }

    /// Line from the drag origin to the pointer, while connecting
    pub fn connection_preview(&self) -> Option<(Point, Point)> {
        self.connection
            .as_ref()
            .map(|connection| (connection.start, connection.current))
    }

    fn set_hovered(&mut self, hovered: Option<String>) {
        if self.hovered_node_id != hovered {
            self.hovered_node_id = hovered.clone();
            self.events.emit(EditorEvent::HoverChanged(hovered));
        }
    }

    // ---------------------------------------------------------------
    // Hit-testing
    // ---------------------------------------------------------------

    /// Screen-space curve for an edge, if both endpoints exist
    pub fn edge_curve(&self, graph: &Graph, edge: &Edge) -> Option<CubicBezier> {
        let from = graph.find_node(&edge.from)?;
        let to = graph.find_node(&edge.to)?;
        Some(geometry::edge_path(
            from,
            to,
            &self.config.metrics,
            &self.viewport,
            self.config.control_cap,
        ))
    }

    /// Where the "cut" affordance of an edge is drawn
    pub fn edge_midpoint(&self, graph: &Graph, edge: &Edge) -> Option<Point> {
        self.edge_curve(graph, edge).map(|curve| curve.midpoint())
    }

    /// First edge whose curve passes within tolerance of a screen point
    pub fn edge_at(&self, graph: &Graph, point: Point) -> Option<Edge> {
        graph.edges().into_iter().find(|edge| {
            self.edge_curve(graph, edge)
                .is_some_and(|curve| curve.hit_test(point, self.config.edge_tolerance))
        })
    }

    /// Topmost (last drawn) node whose box contains a screen point
    pub fn node_at(&self, graph: &Graph, point: Point) -> Option<String> {
        let world = self.viewport.to_world(point);
        graph
            .nodes()
            .filter(|node| self.config.metrics.contains(node, world))
            .last()
            .map(|node| node.id.clone())
    }

    /// Tap on empty canvas: select the edge under the pointer, or clear selection
    pub fn tap_canvas(&mut self, graph: &Graph, point: Point) -> Option<Edge> {
        match self.edge_at(graph, point) {
            Some(edge) => {
                self.select_edge(edge.clone());
                Some(edge)
            }
            None => {
                self.deselect_all();
                None
            }
        }
    }

    // ---------------------------------------------------------------
    // Preview mode
    // ---------------------------------------------------------------

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// Flip between editing and previewing; entering preview clears selection
    pub fn toggle_preview(&mut self) -> bool {
        self.previewing = !self.previewing;
        if self.previewing {
            self.deselect_all();
        }
        self.events.emit(EditorEvent::PreviewToggled(self.previewing));
        self.previewing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> EditorState {
        EditorState::new(EditorConfig::default(), IDGenerator::from_seed("t".to_string()))
    }

    #[test]
    fn test_selection_is_exclusive() {
        let mut editor = editor();

        editor.select_node("a");
        assert_eq!(editor.mode(), InteractionMode::NodeSelected);

        editor.select_edge(Edge::new("a", "b"));
        assert_eq!(editor.selected_node_id(), None);
        assert_eq!(editor.selected_edge(), Some(&Edge::new("a", "b")));

        editor.select_node("c");
        assert_eq!(editor.selected_edge(), None);

        editor.deselect_all();
        assert_eq!(editor.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_canvas_drag_does_not_compound() {
        let mut editor = editor();

        editor.begin_canvas_drag();
        editor.drag_canvas(Point::new(10.0, 0.0));
        editor.drag_canvas(Point::new(20.0, 5.0));
        editor.drag_canvas(Point::new(30.0, 10.0));
        editor.end_canvas_drag();
        assert_eq!(editor.viewport().pan, Point::new(30.0, 10.0));

        editor.drag_canvas(Point::new(-5.0, -5.0));
        editor.end_canvas_drag();
        assert_eq!(editor.viewport().pan, Point::new(25.0, 5.0));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut editor = editor();
        editor.set_zoom(10.0);
        assert_eq!(editor.viewport().zoom, geometry::MAX_ZOOM);
    }

    #[test]
    fn test_preview_clears_selection() {
        let mut editor = editor();
        editor.select_node("a");

        assert!(editor.toggle_preview());
        assert_eq!(editor.selection(), &Selection::None);
        assert!(!editor.toggle_preview());
    }

    #[test]
    fn test_connection_preview_tracks_pointer() {
        let mut editor = editor();
        let graph = Graph::new();

        assert_eq!(editor.connection_preview(), None);
        editor.begin_connection_drag("a", Point::new(1.0, 1.0));
        editor.update_connection_drag(Point::new(50.0, 60.0), &graph);

        assert_eq!(editor.mode(), InteractionMode::ConnectingEdge);
        assert_eq!(
            editor.connection_preview(),
            Some((Point::new(1.0, 1.0), Point::new(50.0, 60.0)))
        );
    }
}
