// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Network-free generator used by `--demo` mode and tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::fixtures;

use super::{GenerateError, Generator};

enum Script {
    /// Responses consumed one per call; exhausted afterwards.
    Queued(Mutex<VecDeque<Result<String, GenerateError>>>),
    /// Responses cycled forever (demo mode).
    Cycling { responses: Vec<String>, next: AtomicUsize },
}

pub struct ScriptedGenerator {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn queued(responses: Vec<Result<String, GenerateError>>) -> Self {
        Self {
            script: Script::Queued(Mutex::new(responses.into_iter().collect())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn cycling(responses: Vec<String>) -> Self {
        Self {
            script: Script::Cycling { responses, next: AtomicUsize::new(0) },
            calls: AtomicUsize::new(0),
        }
    }

    /// Demo generator cycling the built-in fixture diagrams.
    pub fn demo() -> Self {
        Self::cycling(fixtures::demo_responses().into_iter().map(str::to_owned).collect())
    }

    /// Number of generate calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.script {
            Script::Queued(queue) => {
                let mut queue = queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                queue.pop_front().unwrap_or(Err(GenerateError::Exhausted))
            }
            Script::Cycling { responses, next } => {
                if responses.is_empty() {
                    return Err(GenerateError::Exhausted);
                }
                let idx = next.fetch_add(1, Ordering::SeqCst) % responses.len();
                Ok(responses[idx].clone())
            }
        }
    }
}
