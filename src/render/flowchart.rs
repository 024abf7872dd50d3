// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Flowchart renderer.
//!
//! Draws the laid-out node boxes and elbow-routed edges onto a [`Grid`].
//! Renders exactly what it is given: edges whose endpoints are unknown (or
//! whose boxes overlap so no route exists) are skipped, matching the
//! lenient validation contract.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::layout::{layout_flowchart_with_offsets, FlowchartLayout, FlowchartLayoutError, NodeBox};
use crate::model::{EdgeSpec, FlowResponse};

use super::{Grid, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP};

/// A rendered diagram plus the layout it was drawn from (the TUI uses the
/// layout for the minimap and node-nudge targeting).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRender {
    pub text: String,
    pub layout: FlowchartLayout,
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    H { x0: usize, x1: usize, y: usize },
    V { x: usize, y0: usize, y1: usize },
}

type Route = SmallVec<[Segment; 4]>;

/// Lays out and renders a flowchart, applying canvas-local node offsets.
pub fn render_flow(
    response: &FlowResponse,
    offsets: &BTreeMap<String, (i32, i32)>,
) -> Result<FlowRender, FlowchartLayoutError> {
    let layout = layout_flowchart_with_offsets(response, offsets)?;
    let text = draw(response, &layout);
    Ok(FlowRender { text, layout })
}

fn draw(response: &FlowResponse, layout: &FlowchartLayout) -> String {
    if layout.boxes().is_empty() {
        return String::new();
    }

    let mut grid = Grid::new(layout.width(), layout.height());

    for node_box in layout.boxes() {
        draw_node(&mut grid, response, node_box);
    }

    for edge in &response.edges {
        draw_edge(&mut grid, layout, edge);
    }

    grid.to_string()
}

fn draw_node(grid: &mut Grid, response: &FlowResponse, node_box: &NodeBox) {
    grid.rect(node_box.left(), node_box.top(), node_box.right(), node_box.bottom());

    let label = &response.nodes[node_box.node_index()].data.label;
    let inner = node_box.width().saturating_sub(2);
    let fitted = fit_label(label, inner);
    let x = node_box.left() + 1 + (inner.saturating_sub(fitted.chars().count())) / 2;
    grid.put_text(x, node_box.center_y(), &fitted);
}

fn fit_label(label: &str, inner: usize) -> String {
    let len = label.chars().count();
    if len <= inner {
        return label.to_owned();
    }
    if inner == 0 {
        return String::new();
    }

    let mut fitted: String = label.chars().take(inner - 1).collect();
    fitted.push('…');
    fitted
}

fn draw_edge(grid: &mut Grid, layout: &FlowchartLayout, edge: &EdgeSpec) {
    let (Some(from), Some(to)) = (layout.box_for(&edge.source), layout.box_for(&edge.target))
    else {
        // Dangling reference; accepted by validation, skipped when drawing.
        return;
    };

    if from.node_index() == to.node_index() {
        // Self-loops have no elbow route on a character grid.
        return;
    }

    let Some((route, arrow)) = route_edge(from, to) else {
        return;
    };

    for segment in &route {
        match *segment {
            Segment::H { x0, x1, y } => grid.hline(x0, x1, y),
            Segment::V { x, y0, y1 } => grid.vline(x, y0, y1),
        }
    }
    let (ax, ay, arrow_ch) = arrow;
    grid.put_glyph(ax, ay, arrow_ch);

    if let Some(label) = edge.label.as_deref() {
        draw_edge_label(grid, &route, label);
    }
}

/// Picks exit/entry sides from the boxes' relative position and produces the
/// elbow segments plus the arrowhead cell. Returns `None` when the boxes
/// touch or overlap (no room for a route).
fn route_edge(from: &NodeBox, to: &NodeBox) -> Option<(Route, (usize, usize, char))> {
    let mut route = Route::new();

    if to.top() > from.bottom() + 1 {
        // Downward: leave the bottom border, enter the top border.
        let fx = from.center_x();
        let tx = to.center_x();
        let mid = (from.bottom() + to.top()) / 2;
        route.push(Segment::V { x: fx, y0: from.bottom(), y1: mid });
        if fx != tx {
            route.push(Segment::H { x0: fx, x1: tx, y: mid });
        }
        route.push(Segment::V { x: tx, y0: mid, y1: to.top() });
        Some((route, (tx, to.top() - 1, ARROW_DOWN)))
    } else if from.top() > to.bottom() + 1 {
        let fx = from.center_x();
        let tx = to.center_x();
        let mid = (to.bottom() + from.top()) / 2;
        route.push(Segment::V { x: fx, y0: from.top(), y1: mid });
        if fx != tx {
            route.push(Segment::H { x0: fx, x1: tx, y: mid });
        }
        route.push(Segment::V { x: tx, y0: mid, y1: to.bottom() });
        Some((route, (tx, to.bottom() + 1, ARROW_UP)))
    } else if to.left() > from.right() + 1 {
        // Rightward: leave the right border, enter the left border.
        let fy = from.center_y();
        let ty = to.center_y();
        let mid = (from.right() + to.left()) / 2;
        route.push(Segment::H { x0: from.right(), x1: mid, y: fy });
        if fy != ty {
            route.push(Segment::V { x: mid, y0: fy, y1: ty });
        }
        route.push(Segment::H { x0: mid, x1: to.left(), y: ty });
        Some((route, (to.left() - 1, ty, ARROW_RIGHT)))
    } else if from.left() > to.right() + 1 {
        let fy = from.center_y();
        let ty = to.center_y();
        let mid = (to.right() + from.left()) / 2;
        route.push(Segment::H { x0: from.left(), x1: mid, y: fy });
        if fy != ty {
            route.push(Segment::V { x: mid, y0: fy, y1: ty });
        }
        route.push(Segment::H { x0: mid, x1: to.right(), y: ty });
        Some((route, (to.right() + 1, ty, ARROW_LEFT)))
    } else {
        None
    }
}

/// Writes the label over the longest horizontal segment, or beside the
/// longest vertical one when the route has no horizontal run.
fn draw_edge_label(grid: &mut Grid, route: &Route, label: &str) {
    let mut best_h: Option<(usize, usize, usize)> = None;
    for segment in route {
        if let Segment::H { x0, x1, y } = *segment {
            let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
            let longer = best_h.map_or(true, |(lo0, hi0, _)| hi - lo > hi0 - lo0);
            if longer {
                best_h = Some((lo, hi, y));
            }
        }
    }

    if let Some((lo, hi, y)) = best_h {
        let span = hi - lo + 1;
        let len = label.chars().count();
        let x = if len >= span { lo } else { lo + (span - len) / 2 };
        grid.put_text(x, y, label);
        return;
    }

    let mut best_v: Option<(usize, usize, usize)> = None;
    for segment in route {
        if let Segment::V { x, y0, y1 } = *segment {
            let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
            let longer = best_v.map_or(true, |(_, lo0, hi0)| hi - lo > hi0 - lo0);
            if longer {
                best_v = Some((x, lo, hi));
            }
        }
    }

    if let Some((x, lo, hi)) = best_v {
        grid.put_text(x + 1, (lo + hi) / 2, label);
    }
}
