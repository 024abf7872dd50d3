// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Shared shell state for cross-component coordination.
//!
//! [`ShellState`] owns the session cache, the current render state, and the
//! prompt-submission machinery. It has no terminal dependency; the TUI maps
//! the returned [`Notice`] values to toasts and redraws off the revision
//! counter.

use crate::llm::GenerateError;
use crate::model::{CachedQuery, FlowResponse, QueryCache};
use crate::schema;

/// Response text shown when a live submission fails, whatever the cause.
pub const GENERIC_FAILURE_TEXT: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

/// Outcome of a shell operation, surfaced to the user as a toast.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Rendered { nodes: usize, edges: usize },
    Replayed { ordinal: usize },
    GenerationFailed { detail: String },
    InvalidResponse { detail: String },
    /// A cached entry no longer validates. The cache is append-only and the
    /// validator is pure, so this indicates a defect, not user error.
    CorruptCacheEntry { ordinal: usize, detail: String },
    UnknownCacheEntry { index: usize },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Rendered { nodes, edges } => {
                format!("rendered {nodes} node(s), {edges} edge(s)")
            }
            Self::Replayed { ordinal } => format!("replayed cached query #{ordinal}"),
            Self::GenerationFailed { detail } => format!("generation failed: {detail}"),
            Self::InvalidResponse { detail } => format!("response rejected: {detail}"),
            Self::CorruptCacheEntry { ordinal, detail } => {
                format!("BUG: cached query #{ordinal} failed re-validation: {detail}")
            }
            Self::UnknownCacheEntry { index } => format!("no cached query at index {index}"),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Rendered { .. } | Self::Replayed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    cache: QueryCache,
    render: FlowResponse,
    render_rev: u64,
    prompt: String,
    response_text: String,
    output_visible: bool,
    phase: SubmissionPhase,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            cache: QueryCache::default(),
            render: FlowResponse::default(),
            render_rev: 0,
            prompt: String::new(),
            response_text: String::new(),
            output_visible: true,
            phase: SubmissionPhase::Idle,
        }
    }
}

impl ShellState {
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn render(&self) -> &FlowResponse {
        &self.render
    }

    /// Bumped whenever the render state is replaced; the TUI re-fits the
    /// viewport and drops node offsets when it observes a change.
    pub fn render_rev(&self) -> u64 {
        self.render_rev
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    pub fn output_visible(&self) -> bool {
        self.output_visible
    }

    pub fn toggle_output(&mut self) -> bool {
        self.output_visible = !self.output_visible;
        self.output_visible
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Marks a submission as in flight. Overlapping submissions are allowed;
    /// whichever completion is applied last wins.
    pub fn begin_submission(&mut self) {
        self.phase = SubmissionPhase::Submitting;
    }

    /// Applies a finished generate call. On success the raw text becomes the
    /// visible response, the prompt/response pair is appended to the cache,
    /// and the canvas state is replaced. On any failure the cache and canvas
    /// stay untouched and the last good diagram remains visible.
    pub fn complete_submission(
        &mut self,
        prompt: &str,
        outcome: Result<String, GenerateError>,
    ) -> Notice {
        self.phase = SubmissionPhase::Idle;

        let raw = match outcome {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("generate call for prompt {prompt:?} failed: {err}");
                self.response_text = GENERIC_FAILURE_TEXT.to_owned();
                return Notice::GenerationFailed { detail: err.to_string() };
            }
        };

        match schema::validate(&raw) {
            Ok(flow) => {
                let notice = Notice::Rendered { nodes: flow.nodes.len(), edges: flow.edges.len() };
                self.response_text = raw.clone();
                self.cache.append(CachedQuery::new(prompt, raw));
                self.replace_render(flow);
                notice
            }
            Err(err) => {
                log::warn!("response for prompt {prompt:?} rejected: {err}");
                self.response_text = GENERIC_FAILURE_TEXT.to_owned();
                Notice::InvalidResponse { detail: err.to_string() }
            }
        }
    }

    /// Replays a cached query by positional index: repopulates the prompt and
    /// response panes from the cached fields and re-validates the cached JSON
    /// onto the canvas. Never touches the network or mutates the cache.
    pub fn replay(&mut self, index: usize) -> Notice {
        let Some(entry) = self.cache.get(index) else {
            return Notice::UnknownCacheEntry { index };
        };
        let (prompt, json) = (entry.prompt().to_owned(), entry.json().to_owned());
        let ordinal = index + 1;

        self.prompt = prompt;
        self.response_text = json.clone();

        match schema::validate(&json) {
            Ok(flow) => {
                self.replace_render(flow);
                Notice::Replayed { ordinal }
            }
            Err(err) => Notice::CorruptCacheEntry { ordinal, detail: err.to_string() },
        }
    }

    fn replace_render(&mut self, flow: FlowResponse) {
        self.render = flow;
        self.render_rev = self.render_rev.wrapping_add(1);
    }
}
