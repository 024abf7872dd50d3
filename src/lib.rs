// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Triton — prompt-to-flowchart TUI (LLM structured output + Unicode canvas).
//!
//! This crate is a single-crate layout: a session-scoped query cache, a schema
//! validator for the LLM's flow-diagram responses, and a ratatui shell that
//! renders the validated diagram on an interactive character canvas.

pub mod config;
pub mod layout;
pub mod llm;
pub mod model;
pub mod render;
pub mod schema;
pub mod tui;
pub mod ui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
