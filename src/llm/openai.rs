// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! OpenAI-compatible chat-completion client.
//!
//! Sends one user-role message (instruction preamble + prompt) with a
//! `json_schema` response format so the model answers with FlowResponse
//! text. The bearer credential comes from [`GeneratorConfig`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::schema::response_schema;

use super::{full_prompt, GenerateError, Generator};

const RESPONSE_FORMAT_NAME: &str = "flow-response";

#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client,
    config: GeneratorConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| GenerateError::Network { detail: err.to_string() })?;

        Ok(Self { client, config })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint())
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model(),
            "messages": [{ "role": "user", "content": full_prompt(prompt) }],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": RESPONSE_FORMAT_NAME,
                    "schema": response_schema(),
                }
            }
        })
    }

    fn content_from_envelope(body: &str) -> Result<String, GenerateError> {
        let envelope: ChatCompletion = serde_json::from_str(body)
            .map_err(|err| GenerateError::Envelope { detail: err.to_string() })?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::Envelope {
                detail: "no choices[0].message.content in response".to_owned(),
            })
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = self.request_url();
        let body = self.request_body(prompt);
        log::debug!("chat-completion request to {url} (model={})", self.config.model());

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerateError::Network { detail: err.to_string() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| GenerateError::Network { detail: err.to_string() })?;

        if !status.is_success() {
            log::warn!("chat-completion request failed with status {status}");
            return Err(GenerateError::Status { status: status.as_u16(), body: text });
        }

        Self::content_from_envelope(&text)
    }
}
