// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Generation clients.
//!
//! [`Generator`] is the seam between the shell and the remote
//! chat-completion API: it takes the user's prompt and returns the raw
//! response text (which is then schema-validated by the caller). The
//! OpenAI-compatible client lives in [`openai`]; [`scripted`] provides a
//! network-free implementation for `--demo` mode and tests.

use std::fmt;

use async_trait::async_trait;

pub mod openai;
pub mod scripted;

pub use openai::OpenAiGenerator;
pub use scripted::ScriptedGenerator;

/// Fixed instruction preamble prepended to every user prompt.
pub const FLOWCHART_INSTRUCTIONS: &str =
    "You are an expert designer. You generate beautiful flowcharts. The client asked for:";

/// A diagram-text generator. Returns the raw response text; validation is
/// the caller's concern so that live and replayed text share one gate.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The request could not complete (connect/timeout/transport).
    Network { detail: String },
    /// The endpoint answered with a non-success status.
    Status { status: u16, body: String },
    /// The response envelope was not the expected chat-completion shape.
    Envelope { detail: String },
    /// The scripted generator ran out of queued responses (test/demo only).
    Exhausted,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { detail } => write!(f, "request failed: {detail}"),
            Self::Status { status, body } => {
                write!(f, "generation API returned status {status}: {body}")
            }
            Self::Envelope { detail } => {
                write!(f, "unexpected chat-completion envelope: {detail}")
            }
            Self::Exhausted => f.write_str("scripted generator has no responses left"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// The single user-role message content: preamble plus the user prompt.
pub(crate) fn full_prompt(prompt: &str) -> String {
    format!("{FLOWCHART_INSTRUCTIONS}\n\n{prompt}")
}
