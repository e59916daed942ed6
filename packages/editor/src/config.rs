use serde::{Deserialize, Serialize};
use storymate_flowchart::{Graph, IDGenerator, Node, NodeKind, NodeMetrics, Point};

const SNAP_MARGIN: f64 = 10.0;

/// Node created when a project has no saved flowchart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedNode {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl SeedNode {
    fn new(text: &str, x: f64, y: f64) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
        }
    }
}

/// Editor layout and interaction constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Node box and handle dimensions
    pub metrics: NodeMetrics,

    /// Distance from an input handle within which a connection drag snaps
    /// to it. Unset follows `metrics.handleSize`; see [`Self::snap_radius`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_radius: Option<f64>,

    /// Horizontal gap between the rightmost node and a newly added one
    pub placement_offset: f64,

    /// Vertical position of newly added nodes
    pub placement_y: f64,

    /// Upper bound for the horizontal Bezier control offset
    pub control_cap: f64,

    /// Tap distance from an edge curve that still selects it
    pub edge_tolerance: f64,

    pub story_placeholder: String,
    pub decision_placeholder: String,

    pub start_node: SeedNode,
    pub end_node: SeedNode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            metrics: NodeMetrics::default(),
            snap_radius: None,
            placement_offset: 200.0,
            placement_y: 150.0,
            control_cap: 100.0,
            edge_tolerance: 15.0,
            story_placeholder: "Story".to_string(),
            decision_placeholder: "Choice".to_string(),
            start_node: SeedNode::new("You awake", 100.0, 100.0),
            end_node: SeedNode::new("End of route", 400.0, 150.0),
        }
    }
}

impl EditorConfig {
    /// Effective snap radius: the override, or ten units beyond the handle
    pub fn snap_radius(&self) -> f64 {
        self.snap_radius.unwrap_or(self.metrics.handle_size + SNAP_MARGIN)
    }

    /// Placeholder text for a newly created node of `kind`
    pub fn placeholder(&self, kind: NodeKind) -> &str {
        match kind {
            NodeKind::Decision => &self.decision_placeholder,
            NodeKind::Start => &self.start_node.text,
            NodeKind::End => &self.end_node.text,
            NodeKind::Story => &self.story_placeholder,
        }
    }

    /// Default graph: one Start and one End node, unconnected
    pub fn bootstrap_graph(&self, ids: &mut IDGenerator) -> Graph {
        let start = Node::new(
            ids.new_id(),
            NodeKind::Start,
            self.start_node.text.clone(),
            Point::new(self.start_node.x, self.start_node.y),
        );
        let end = Node::new(
            ids.new_id(),
            NodeKind::End,
            self.end_node.text.clone(),
            Point::new(self.end_node.x, self.end_node.y),
        );
        // Generator ids are distinct, so this never collides
        Graph::from_nodes([start, end]).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.snap_radius(), 34.0);
        assert_eq!(config.metrics.input_x(), -58.0);
        assert_eq!(config.placeholder(NodeKind::Decision), "Choice");
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{ "placementOffset": 250, "metrics": { "width": 120 } }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.placement_offset, 250.0);
        assert_eq!(config.metrics.width, 120.0);
        assert_eq!(config.metrics.height, 55.0);
        assert_eq!(config.story_placeholder, "Story");
    }

    #[test]
    fn test_snap_radius_follows_handle_size() {
        let json = r#"{ "metrics": { "handleSize": 30 } }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.snap_radius, None);
        assert_eq!(config.snap_radius(), 40.0);

        let json = r#"{ "metrics": { "handleSize": 30 }, "snapRadius": 12 }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.snap_radius(), 12.0);

        let saved = serde_json::to_value(EditorConfig::default()).unwrap();
        assert!(saved.get("snapRadius").is_none());
    }

    #[test]
    fn test_bootstrap_graph() {
        let config = EditorConfig::default();
        let graph = config.bootstrap_graph(&mut IDGenerator::new("demo"));

        assert_eq!(graph.len(), 2);
        let start = graph.start_node().unwrap();
        assert_eq!(start.text, "You awake");
        assert_eq!(start.position, Point::new(100.0, 100.0));
        assert_eq!(graph.nodes_of_kind(NodeKind::End).count(), 1);
        assert!(graph.edges().is_empty());
    }
}
