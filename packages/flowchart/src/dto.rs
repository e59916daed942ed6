//! Wire format for persisted flowcharts.
//!
//! ```json
//! {
//!   "projectId": "p-1",
//!   "updatedAt": 1760000000000,
//!   "nodes": [
//!     { "id": "a", "type": "Start", "text": "You awake",
//!       "positionX": 100.0, "positionY": 100.0, "connections": ["b"] }
//!   ]
//! }
//! ```
//!
//! `type` also accepts `kind`, and `connections` also accepts `outgoingIds`.
//! Unknown `type` strings decode as `Story`.

use serde::{Deserialize, Serialize};

use crate::error::FlowchartResult;
use crate::model::{Graph, Node, NodeKind, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    pub id: String,

    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    #[serde(default)]
    pub text: String,

    pub position_x: f64,

    pub position_y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,

    #[serde(rename = "connections", alias = "outgoingIds", default)]
    pub connections: Vec<String>,
}

impl From<&Node> for NodeDto {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind.as_str().to_string(),
            text: node.text.clone(),
            position_x: node.position.x,
            position_y: node.position.y,
            image_data: node.image_data.clone().filter(|data| !data.is_empty()),
            connections: node.outgoing.clone(),
        }
    }
}

impl From<NodeDto> for Node {
    fn from(dto: NodeDto) -> Self {
        Self {
            id: dto.id,
            kind: NodeKind::parse_lenient(&dto.kind),
            text: dto.text,
            position: Point::new(dto.position_x, dto.position_y),
            image_data: dto.image_data.filter(|data| !data.is_empty()),
            outgoing: dto.connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartDto {
    pub project_id: String,
    pub nodes: Vec<NodeDto>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub updated_at: i64,
}

impl FlowchartDto {
    pub fn from_graph(project_id: impl Into<String>, graph: &Graph, updated_at: i64) -> Self {
        Self {
            project_id: project_id.into(),
            nodes: graph.nodes().map(NodeDto::from).collect(),
            updated_at,
        }
    }

    /// Rebuild the graph in node order. Duplicate ids are rejected.
    pub fn into_graph(self) -> FlowchartResult<Graph> {
        Graph::from_nodes(self.nodes.into_iter().map(Node::from))
    }

    pub fn to_json(&self) -> FlowchartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> FlowchartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowchartError;

    #[test]
    fn test_parse_wire_format() {
        let json = r#"{
            "projectId": "p-1",
            "updatedAt": 1700000000000,
            "nodes": [
                { "id": "a", "type": "Start", "text": "You awake",
                  "positionX": 100, "positionY": 100, "connections": ["b"] },
                { "id": "b", "type": "End", "text": "End of route",
                  "positionX": 400, "positionY": 150, "imageData": null, "connections": [] }
            ]
        }"#;

        let dto = FlowchartDto::from_json(json).unwrap();
        assert_eq!(dto.project_id, "p-1");
        assert_eq!(dto.updated_at, 1700000000000);

        let graph = dto.into_graph().unwrap();
        let start = graph.find_node("a").unwrap();
        assert_eq!(start.kind, NodeKind::Start);
        assert_eq!(start.outgoing, vec!["b"]);
        assert_eq!(graph.find_node("b").unwrap().position, Point::new(400.0, 150.0));
    }

    #[test]
    fn test_unknown_kind_decodes_as_story() {
        let json = r#"{ "id": "x", "type": "Cutscene", "text": "",
                        "positionX": 0, "positionY": 0, "connections": [] }"#;
        let dto: NodeDto = serde_json::from_str(json).unwrap();
        assert_eq!(Node::from(dto).kind, NodeKind::Story);
    }

    #[test]
    fn test_aliases_accepted() {
        let json = r#"{ "id": "x", "kind": "Decision",
                        "positionX": 1.5, "positionY": 2.5, "outgoingIds": ["y", "z"] }"#;
        let node = Node::from(serde_json::from_str::<NodeDto>(json).unwrap());
        assert_eq!(node.kind, NodeKind::Decision);
        assert_eq!(node.outgoing, vec!["y", "z"]);
        assert_eq!(node.text, "");
    }

    #[test]
    fn test_empty_image_is_absent() {
        let node = Node::new("x", NodeKind::Story, "", Point::ZERO).with_image("");
        let dto = NodeDto::from(&node);
        assert_eq!(dto.image_data, None);

        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("imageData"));
        assert!(json.contains("\"type\":\"Story\""));
    }

    #[test]
    fn test_duplicate_ids_fail_load() {
        let node = NodeDto::from(&Node::new("x", NodeKind::Story, "", Point::ZERO));
        let dto = FlowchartDto {
            project_id: "p".to_string(),
            nodes: vec![node.clone(), node],
            updated_at: 0,
        };
        assert!(matches!(dto.into_graph(), Err(FlowchartError::DuplicateNode(_))));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            FlowchartDto::from_json("{ nodes: "),
            Err(FlowchartError::Serialization(_))
        ));
    }
}
