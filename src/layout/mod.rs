// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Diagram layout.
//!
//! Maps the generation API's world coordinates onto a bounded character
//! grid suitable for the canvas renderer.

pub mod flowchart;

pub use flowchart::{
    layout_flowchart, layout_flowchart_with_offsets, FlowchartLayout, FlowchartLayoutError,
    NodeBox,
};
