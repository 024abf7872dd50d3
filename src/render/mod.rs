// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Canvas rendering.
//!
//! [`Grid`] is a bounded character grid with deterministic collision
//! behavior: plain glyphs overwrite, box-drawing strokes merge into
//! junctions (`┼`, `├`, `┬`, ...) instead of clobbering each other, and
//! anything outside the grid is clipped. The flowchart renderer draws node
//! boxes and elbow-routed edges on top of it.

use std::fmt;

pub mod flowchart;

pub use flowchart::{render_flow, FlowRender};

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const ARROW_RIGHT: char = '▶';
pub const ARROW_LEFT: char = '◀';
pub const ARROW_DOWN: char = '▼';
pub const ARROW_UP: char = '▲';

// Stroke direction bits for box-drawing cells.
const STROKE_LEFT: u8 = 1 << 0;
const STROKE_RIGHT: u8 = 1 << 1;
const STROKE_UP: u8 = 1 << 2;
const STROKE_DOWN: u8 = 1 << 3;

fn stroke_char(bits: u8) -> char {
    match bits {
        0 => ' ',
        1..=3 => BOX_HORIZONTAL,
        4 | 8 | 12 => BOX_VERTICAL,
        10 => '┌',
        9 => '┐',
        6 => '└',
        5 => '┘',
        14 => '├',
        13 => '┤',
        11 => '┬',
        7 => '┴',
        _ => '┼',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blank,
    Glyph(char),
    Stroke(u8),
}

/// A fixed-size character grid. All drawing operations clip at the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::Blank; width.saturating_mul(height)] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Places a plain glyph; overwrites whatever is in the cell.
    pub fn put_glyph(&mut self, x: usize, y: usize, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::Glyph(ch);
        }
    }

    fn put_stroke(&mut self, x: usize, y: usize, bits: u8) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = match self.cells[idx] {
                Cell::Stroke(existing) => Cell::Stroke(existing | bits),
                _ => Cell::Stroke(bits),
            };
        }
    }

    /// Writes text left-to-right, clipping at the right edge.
    pub fn put_text(&mut self, x: usize, y: usize, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            self.put_glyph(x + offset, y, ch);
        }
    }

    /// Horizontal box-drawing stroke across `x0..=x1` at `y`.
    pub fn hline(&mut self, x0: usize, x1: usize, y: usize) {
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        for x in lo..=hi {
            let mut bits = 0;
            if x > lo {
                bits |= STROKE_LEFT;
            }
            if x < hi {
                bits |= STROKE_RIGHT;
            }
            if bits == 0 {
                bits = STROKE_LEFT | STROKE_RIGHT;
            }
            self.put_stroke(x, y, bits);
        }
    }

    /// Vertical box-drawing stroke across `y0..=y1` at `x`.
    pub fn vline(&mut self, x: usize, y0: usize, y1: usize) {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in lo..=hi {
            let mut bits = 0;
            if y > lo {
                bits |= STROKE_UP;
            }
            if y < hi {
                bits |= STROKE_DOWN;
            }
            if bits == 0 {
                bits = STROKE_UP | STROKE_DOWN;
            }
            self.put_stroke(x, y, bits);
        }
    }

    /// Single-line box with corners at `(x0, y0)` and `(x1, y1)`.
    pub fn rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        let (lx, rx) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (ty, by) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        if lx == rx || ty == by {
            if ty == by {
                self.hline(lx, rx, ty);
            } else {
                self.vline(lx, ty, by);
            }
            return;
        }

        for x in (lx + 1)..rx {
            self.put_stroke(x, ty, STROKE_LEFT | STROKE_RIGHT);
            self.put_stroke(x, by, STROKE_LEFT | STROKE_RIGHT);
        }
        for y in (ty + 1)..by {
            self.put_stroke(lx, y, STROKE_UP | STROKE_DOWN);
            self.put_stroke(rx, y, STROKE_UP | STROKE_DOWN);
        }
        self.put_stroke(lx, ty, STROKE_RIGHT | STROKE_DOWN);
        self.put_stroke(rx, ty, STROKE_LEFT | STROKE_DOWN);
        self.put_stroke(lx, by, STROKE_RIGHT | STROKE_UP);
        self.put_stroke(rx, by, STROKE_LEFT | STROKE_UP);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.cells[y * self.width + x] {
                    Cell::Blank => ' ',
                    Cell::Glyph(ch) => ch,
                    Cell::Stroke(bits) => stroke_char(bits),
                };
                f.write_char(ch)?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}
