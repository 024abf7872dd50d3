// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Schema validation for flow-diagram responses.
//!
//! [`validate`] is the single gate between untrusted response text and the
//! canvas: both live submissions and sidebar replays go through it, so any
//! text it has accepted once must re-validate cleanly. Validation is
//! permissive-by-default: unknown extra fields are tolerated, and edges that
//! reference unknown node ids are accepted (the layout skips them when
//! drawing).

use std::fmt;

use serde_json::{Map, Value};

use crate::model::{EdgeSpec, FlowResponse, NodeData, NodeSpec, Position};

/// JSON value kind observed at a path, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Missing,
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Found {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Missing => "missing",
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The response text is not syntactically valid JSON.
    Parse { detail: String },
    /// The parsed JSON does not match the FlowResponse shape. `path` names
    /// the offending field (e.g. `nodes[2].position.x`).
    Schema { path: String, expected: &'static str, found: Found },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "response is not valid JSON: {detail}"),
            Self::Schema { path, expected, found } => {
                write!(f, "schema mismatch at {path}: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn schema_err(path: impl Into<String>, expected: &'static str, value: Option<&Value>) -> ValidationError {
    ValidationError::Schema {
        path: path.into(),
        expected,
        found: value.map(Found::of).unwrap_or(Found::Missing),
    }
}

fn require_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| schema_err(path, "object", Some(value)))
}

fn require_array<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a [Value], ValidationError> {
    let path = join(parent, key);
    match map.get(key) {
        Some(value) => value.as_array().map(Vec::as_slice).ok_or_else(|| schema_err(path, "array", Some(value))),
        None => Err(schema_err(path, "array", None)),
    }
}

fn require_string(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<String, ValidationError> {
    let path = join(parent, key);
    match map.get(key) {
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| schema_err(path, "string", Some(value))),
        None => Err(schema_err(path, "string", None)),
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<Option<String>, ValidationError> {
    match map.get(key) {
        // Absent and explicit null are both treated as "not provided".
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_owned()))
            .ok_or_else(|| schema_err(join(parent, key), "string", Some(value))),
    }
}

fn require_number(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<f64, ValidationError> {
    let path = join(parent, key);
    match map.get(key) {
        Some(value) => value.as_f64().ok_or_else(|| schema_err(path, "number", Some(value))),
        None => Err(schema_err(path, "number", None)),
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

fn validate_node(value: &Value, path: &str) -> Result<NodeSpec, ValidationError> {
    let map = require_object(value, path)?;

    let id = require_string(map, "id", path)?;
    let node_type = optional_string(map, "type", path)?;

    let position_path = join(path, "position");
    let position = match map.get("position") {
        Some(value) => {
            let position = require_object(value, &position_path)?;
            Position {
                x: require_number(position, "x", &position_path)?,
                y: require_number(position, "y", &position_path)?,
            }
        }
        None => return Err(schema_err(position_path, "object", None)),
    };

    let data_path = join(path, "data");
    let data = match map.get("data") {
        Some(value) => {
            let data = require_object(value, &data_path)?;
            NodeData { label: require_string(data, "label", &data_path)? }
        }
        None => return Err(schema_err(data_path, "object", None)),
    };

    Ok(NodeSpec { id, node_type, position, data })
}

fn validate_edge(value: &Value, path: &str) -> Result<EdgeSpec, ValidationError> {
    let map = require_object(value, path)?;

    Ok(EdgeSpec {
        id: require_string(map, "id", path)?,
        source: require_string(map, "source", path)?,
        target: require_string(map, "target", path)?,
        label: optional_string(map, "label", path)?,
    })
}

/// Validates raw response text against the FlowResponse shape.
///
/// Pure function of its input. On success the returned node/edge sequences
/// preserve the order of the input JSON arrays.
pub fn validate(raw_text: &str) -> Result<FlowResponse, ValidationError> {
    let value: Value = serde_json::from_str(raw_text)
        .map_err(|err| ValidationError::Parse { detail: err.to_string() })?;

    let root = require_object(&value, "$")?;

    let mut nodes = Vec::new();
    for (idx, node) in require_array(root, "nodes", "")?.iter().enumerate() {
        nodes.push(validate_node(node, &format!("nodes[{idx}]"))?);
    }

    let mut edges = Vec::new();
    for (idx, edge) in require_array(root, "edges", "")?.iter().enumerate() {
        edges.push(validate_edge(edge, &format!("edges[{idx}]"))?);
    }

    Ok(FlowResponse { nodes, edges })
}

/// JSON Schema for FlowResponse, sent as the structured-output request schema.
pub fn response_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(FlowResponse))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}
