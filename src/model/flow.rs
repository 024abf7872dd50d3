// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Flow-diagram wire shapes.
//!
//! These mirror the structured-output schema requested from the generation
//! API. The same types double as the canvas render state: the shell replaces
//! its `FlowResponse` wholesale on every successful generation or replay.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A node's world-coordinate position as produced by the generation API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Node payload; currently only a display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeData {
    pub label: String,
}

/// A single diagram node.
///
/// `id` is expected to be unique within a response; the validator does not
/// reject duplicates (the upstream schema never did), so consumers must be
/// deterministic when duplicates occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeSpec {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub position: Position,
    pub data: NodeData,
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeSpec {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The structured flow-diagram payload: ordered node and edge sequences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FlowResponse {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

impl FlowResponse {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Looks up a node by id, first match wins.
    pub fn node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeSpec, FlowResponse, NodeData, NodeSpec, Position};

    fn node(id: &str, label: &str) -> NodeSpec {
        NodeSpec {
            id: id.to_owned(),
            node_type: None,
            position: Position { x: 0.0, y: 0.0 },
            data: NodeData { label: label.to_owned() },
        }
    }

    #[test]
    fn serializes_without_absent_optionals() {
        let response = FlowResponse {
            nodes: vec![node("1", "Start")],
            edges: vec![EdgeSpec {
                id: "e1".to_owned(),
                source: "1".to_owned(),
                target: "1".to_owned(),
                label: None,
            }],
        };

        let json = serde_json::to_string(&response).expect("serialize");
        assert!(!json.contains("\"type\""));
        assert!(!json.contains("\"label\":null"));
    }

    #[test]
    fn node_type_round_trips_under_its_wire_name() {
        let raw = r#"{"id":"1","type":"input","position":{"x":1.5,"y":-2.0},"data":{"label":"Start"}}"#;
        let spec: NodeSpec = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(spec.node_type.as_deref(), Some("input"));

        let json = serde_json::to_string(&spec).expect("serialize");
        assert!(json.contains("\"type\":\"input\""));
    }

    #[test]
    fn node_lookup_returns_first_match() {
        let response = FlowResponse {
            nodes: vec![node("a", "First"), node("a", "Second")],
            edges: Vec::new(),
        };

        assert_eq!(response.node("a").map(|n| n.data.label.as_str()), Some("First"));
        assert!(response.node("missing").is_none());
    }

    #[test]
    fn empty_response_reports_empty() {
        assert!(FlowResponse::default().is_empty());
        let response = FlowResponse { nodes: vec![node("1", "x")], edges: Vec::new() };
        assert!(!response.is_empty());
    }
}
