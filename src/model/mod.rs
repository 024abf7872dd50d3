// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Core data model.
//!
//! Wire shapes for the generation API's flow-diagram payload plus the
//! session-scoped query cache that drives the sidebar and replay.

pub mod cache;
pub(crate) mod fixtures;
pub mod flow;

pub use cache::{CachedQuery, QueryCache};
pub use flow::{EdgeSpec, FlowResponse, NodeData, NodeSpec, Position};
