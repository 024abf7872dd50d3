// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! The bearer credential is read from the environment only, never from a
//! CLI flag and never hard-coded. Endpoint, model and timeout have defaults
//! matching the upstream generation API and can be overridden per run.

use std::{env, fmt, time::Duration};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variables consulted for the API credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["TRITON_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeneratorConfig {
    /// Builds a config from the environment plus optional overrides.
    pub fn from_env(
        endpoint: Option<String>,
        model: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|var| env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self::new(api_key, endpoint, model, timeout_secs))
    }

    pub fn new(
        api_key: impl Into<String>,
        endpoint: Option<String>,
        model: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        Self {
            endpoint: endpoint
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            api_key: api_key.into(),
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "no API credential found (set one of: {})",
                API_KEY_ENV_VARS.join(", ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
