// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Built-in diagram fixtures used by `--demo` mode and tests.
//!
//! Fixtures are raw response text, not parsed values, so the demo path
//! exercises the same validate-then-render pipeline as a live submission.

pub(crate) const LOGIN_FLOW_JSON: &str = r#"{
  "nodes": [
    {"id": "start", "type": "input", "position": {"x": 0, "y": 0}, "data": {"label": "Visit login page"}},
    {"id": "creds", "position": {"x": 0, "y": 120}, "data": {"label": "Enter credentials"}},
    {"id": "check", "position": {"x": 0, "y": 240}, "data": {"label": "Validate"}},
    {"id": "home", "position": {"x": -160, "y": 360}, "data": {"label": "Dashboard"}},
    {"id": "retry", "position": {"x": 160, "y": 360}, "data": {"label": "Show error"}}
  ],
  "edges": [
    {"id": "e1", "source": "start", "target": "creds"},
    {"id": "e2", "source": "creds", "target": "check", "label": "submit"},
    {"id": "e3", "source": "check", "target": "home", "label": "ok"},
    {"id": "e4", "source": "check", "target": "retry", "label": "fail"}
  ]
}"#;

pub(crate) const ORDER_PIPELINE_JSON: &str = r#"{
  "nodes": [
    {"id": "cart", "position": {"x": 0, "y": 0}, "data": {"label": "Cart"}},
    {"id": "pay", "position": {"x": 200, "y": 0}, "data": {"label": "Payment"}},
    {"id": "ship", "position": {"x": 400, "y": 0}, "data": {"label": "Shipping"}},
    {"id": "done", "position": {"x": 600, "y": 0}, "data": {"label": "Done"}}
  ],
  "edges": [
    {"id": "e1", "source": "cart", "target": "pay", "label": "checkout"},
    {"id": "e2", "source": "pay", "target": "ship"},
    {"id": "e3", "source": "ship", "target": "done"}
  ]
}"#;

/// Raw demo responses, cycled by the demo generator.
pub(crate) fn demo_responses() -> Vec<&'static str> {
    vec![LOGIN_FLOW_JSON, ORDER_PIPELINE_JSON]
}
