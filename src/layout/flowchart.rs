// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Flowchart layout: world coordinates to character cells.
//!
//! Node positions arrive from the generation API in a continuous coordinate
//! system (the diagram library's world space). Layout scales those onto a
//! bounded integer cell grid, sizes each node box from its label, and clamps
//! everything into the grid. Layout is deterministic for a given input;
//! overlapping world positions produce overlapping boxes rather than being
//! rearranged.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::FlowResponse;

/// World units mapped onto one character cell, horizontally.
const X_UNITS_PER_CELL: f64 = 8.0;
/// World units mapped onto one character cell, vertically (cells are tall).
const Y_UNITS_PER_CELL: f64 = 30.0;

/// Hard grid bounds; node cells are clamped so boxes always fit.
pub const MAX_GRID_WIDTH: usize = 512;
pub const MAX_GRID_HEIGHT: usize = 256;

/// Widest box a single node may occupy; longer labels are truncated at
/// render time.
pub const MAX_NODE_BOX_WIDTH: usize = 40;

const NODE_BOX_HEIGHT: usize = 3;
const LABEL_PADDING: usize = 4; // border + one space, each side

/// A node's box placement on the cell grid. `x`/`y` is the top-left corner;
/// width/height include the border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBox {
    node_index: usize,
    id: String,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl NodeBox {
    pub fn node_index(&self) -> usize {
        self.node_index
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn left(&self) -> usize {
        self.x
    }

    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    pub fn top(&self) -> usize {
        self.y
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    pub fn center_x(&self) -> usize {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> usize {
        self.y + self.height / 2
    }
}

/// Cell placements for every node of a FlowResponse, plus the grid size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowchartLayout {
    boxes: Vec<NodeBox>,
    width: usize,
    height: usize,
}

impl FlowchartLayout {
    pub fn boxes(&self) -> &[NodeBox] {
        &self.boxes
    }

    /// Looks up a box by node id, first match wins (duplicate ids are not
    /// rejected upstream).
    pub fn box_for(&self, node_id: &str) -> Option<&NodeBox> {
        self.boxes.iter().find(|b| b.id == node_id)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowchartLayoutError {
    /// A node position is NaN or infinite. Cannot come from validated JSON
    /// (JSON has no non-finite numbers); guards direct construction.
    NonFinitePosition { node_id: String },
}

impl fmt::Display for FlowchartLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinitePosition { node_id } => {
                write!(f, "node {node_id} has a non-finite position")
            }
        }
    }
}

impl std::error::Error for FlowchartLayoutError {}

fn box_width_for_label(label: &str) -> usize {
    (label.chars().count() + LABEL_PADDING).min(MAX_NODE_BOX_WIDTH).max(LABEL_PADDING + 1)
}

/// Lays out a flowchart with no presentational offsets.
pub fn layout_flowchart(response: &FlowResponse) -> Result<FlowchartLayout, FlowchartLayoutError> {
    layout_flowchart_with_offsets(response, &BTreeMap::new())
}

/// Lays out a flowchart, applying canvas-local per-node cell offsets (the
/// TUI's "drag"). Offsets are keyed by node id and are purely visual; the
/// caller discards them whenever the render state is replaced.
pub fn layout_flowchart_with_offsets(
    response: &FlowResponse,
    offsets: &BTreeMap<String, (i32, i32)>,
) -> Result<FlowchartLayout, FlowchartLayoutError> {
    if response.nodes.is_empty() {
        return Ok(FlowchartLayout { boxes: Vec::new(), width: 0, height: 0 });
    }

    for node in &response.nodes {
        if !node.position.x.is_finite() || !node.position.y.is_finite() {
            return Err(FlowchartLayoutError::NonFinitePosition { node_id: node.id.clone() });
        }
    }

    let min_x = response.nodes.iter().map(|n| n.position.x).fold(f64::INFINITY, f64::min);
    let min_y = response.nodes.iter().map(|n| n.position.y).fold(f64::INFINITY, f64::min);

    // First pass: signed cells (drag offsets may push a box past the origin).
    let mut raw: Vec<(i64, i64, usize)> = Vec::with_capacity(response.nodes.len());
    for node in &response.nodes {
        let mut cx = ((node.position.x - min_x) / X_UNITS_PER_CELL).round() as i64;
        let mut cy = ((node.position.y - min_y) / Y_UNITS_PER_CELL).round() as i64;
        if let Some((dx, dy)) = offsets.get(&node.id) {
            cx += i64::from(*dx);
            cy += i64::from(*dy);
        }
        raw.push((cx, cy, box_width_for_label(&node.data.label)));
    }

    let shift_x = raw.iter().map(|(cx, _, _)| *cx).min().unwrap_or(0).min(0);
    let shift_y = raw.iter().map(|(_, cy, _)| *cy).min().unwrap_or(0).min(0);

    let mut boxes = Vec::with_capacity(response.nodes.len());
    for (node_index, ((cx, cy, box_width), node)) in
        raw.into_iter().zip(&response.nodes).enumerate()
    {
        // Saturate: cx can sit at i64::MAX for extreme world coordinates,
        // and shift is negative whenever a drag pushed a box past the origin.
        let x = (cx.saturating_sub(shift_x) as usize).min(MAX_GRID_WIDTH - box_width);
        let y = (cy.saturating_sub(shift_y) as usize).min(MAX_GRID_HEIGHT - NODE_BOX_HEIGHT);
        boxes.push(NodeBox {
            node_index,
            id: node.id.clone(),
            x,
            y,
            width: box_width,
            height: NODE_BOX_HEIGHT,
        });
    }

    let width = boxes.iter().map(NodeBox::right).max().unwrap_or(0) + 1;
    let height = boxes.iter().map(NodeBox::bottom).max().unwrap_or(0) + 1;

    Ok(FlowchartLayout { boxes, width, height })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::model::{FlowResponse, NodeData, NodeSpec, Position};

    use super::{
        layout_flowchart, layout_flowchart_with_offsets, FlowchartLayoutError, MAX_GRID_HEIGHT,
        MAX_GRID_WIDTH, MAX_NODE_BOX_WIDTH,
    };

    fn node(id: &str, label: &str, x: f64, y: f64) -> NodeSpec {
        NodeSpec {
            id: id.to_owned(),
            node_type: None,
            position: Position { x, y },
            data: NodeData { label: label.to_owned() },
        }
    }

    fn response(nodes: Vec<NodeSpec>) -> FlowResponse {
        FlowResponse { nodes, edges: Vec::new() }
    }

    #[test]
    fn empty_response_lays_out_to_an_empty_grid() {
        let layout = layout_flowchart(&FlowResponse::default()).expect("layout");
        assert!(layout.boxes().is_empty());
        assert_eq!((layout.width(), layout.height()), (0, 0));
    }

    #[test]
    fn origin_is_normalized_to_the_minimum_position() {
        let layout = layout_flowchart(&response(vec![
            node("a", "A", -160.0, 120.0),
            node("b", "B", 0.0, 0.0),
        ]))
        .expect("layout");

        let a = layout.box_for("a").expect("a");
        let b = layout.box_for("b").expect("b");
        assert_eq!((a.x(), a.y()), (0, 4));
        assert_eq!((b.x(), b.y()), (20, 0));
    }

    #[test]
    fn box_width_tracks_label_and_is_capped() {
        let long = "x".repeat(100);
        let layout = layout_flowchart(&response(vec![
            node("short", "Hi", 0.0, 0.0),
            node("long", &long, 0.0, 300.0),
        ]))
        .expect("layout");

        assert_eq!(layout.box_for("short").expect("short").width(), 6);
        assert_eq!(layout.box_for("long").expect("long").width(), MAX_NODE_BOX_WIDTH);
    }

    #[test]
    fn drag_offsets_move_boxes_and_negative_drags_shift_the_grid() {
        let base = response(vec![node("a", "A", 0.0, 0.0), node("b", "B", 80.0, 0.0)]);

        let mut offsets = BTreeMap::new();
        offsets.insert("a".to_owned(), (-3, 2));
        let layout = layout_flowchart_with_offsets(&base, &offsets).expect("layout");

        // "a" was dragged left past the origin; everything shifts right by 3.
        let a = layout.box_for("a").expect("a");
        let b = layout.box_for("b").expect("b");
        assert_eq!((a.x(), a.y()), (0, 2));
        assert_eq!((b.x(), b.y()), (13, 0));
    }

    #[test]
    fn far_positions_clamp_inside_the_grid() {
        let layout = layout_flowchart(&response(vec![
            node("a", "A", 0.0, 0.0),
            node("far", "Far", 1.0e9, 1.0e9),
        ]))
        .expect("layout");

        let far = layout.box_for("far").expect("far");
        assert!(far.right() < MAX_GRID_WIDTH);
        assert!(far.bottom() < MAX_GRID_HEIGHT);
        assert!(layout.width() <= MAX_GRID_WIDTH);
        assert!(layout.height() <= MAX_GRID_HEIGHT);
    }

    #[test]
    fn extreme_coordinates_with_negative_drags_do_not_overflow() {
        let base = response(vec![node("a", "A", 0.0, 0.0), node("far", "Far", 1.0e300, 1.0e300)]);

        let mut offsets = BTreeMap::new();
        offsets.insert("a".to_owned(), (-5, -5));
        let layout = layout_flowchart_with_offsets(&base, &offsets).expect("layout");

        let far = layout.box_for("far").expect("far");
        assert!(far.right() < MAX_GRID_WIDTH);
        assert!(far.bottom() < MAX_GRID_HEIGHT);
        assert_eq!(layout.box_for("a").expect("a").x(), 0);
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let err = layout_flowchart(&response(vec![node("bad", "B", f64::NAN, 0.0)])).unwrap_err();
        assert_eq!(err, FlowchartLayoutError::NonFinitePosition { node_id: "bad".to_owned() });
    }

    #[test]
    fn duplicate_ids_resolve_to_the_first_box() {
        let layout = layout_flowchart(&response(vec![
            node("dup", "First", 0.0, 0.0),
            node("dup", "Second", 200.0, 0.0),
        ]))
        .expect("layout");

        assert_eq!(layout.box_for("dup").expect("dup").node_index(), 0);
    }
}
