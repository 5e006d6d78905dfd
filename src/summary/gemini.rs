//! Gemini summarizer: asks Google's Generative Language API for the summary.
//!
//! Uses the `generateContent` REST endpoint with the key in the
//! `x-goog-api-key` header. Any failure becomes a fixed fallback line.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SummarySection;
use crate::model::Tally;

use super::{Summarizer, turnout_prompt};

pub const MISSING_KEY_FALLBACK: &str = "AI services unavailable (Missing API Key).";
pub const EMPTY_FALLBACK: &str = "Couldn't generate summary.";
pub const ERROR_FALLBACK: &str = "The chef is currently on break (API Error).";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
enum SummaryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Summarizer backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiSummarizer {
    /// Builds a summarizer from config, reading the key from the
    /// environment variable the config names.
    #[must_use]
    pub fn from_config(section: &SummarySection) -> Self {
        let api_key = env::var(&section.api_key_env).ok();
        if api_key.as_deref().is_none_or(str::is_empty) {
            warn!(var = %section.api_key_env, "API key is not set; summaries are disabled");
        }
        Self::new(&section.endpoint, &section.model, api_key)
    }

    #[must_use]
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn generate(&self, api_key: &str, prompt: &str) -> Result<Option<String>, SummaryError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response: GenerateResponse = client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.text())
    }
}

impl Summarizer for GeminiSummarizer {
    fn summarize(&self, tally: &Tally) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_FALLBACK.to_string();
        };

        debug!(model = %self.model, voters = tally.total(), "requesting turnout summary");
        match self.generate(api_key, &turnout_prompt(tally)) {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_FALLBACK.to_string(),
            Err(e) => {
                warn!(error = %e, "summary request failed");
                ERROR_FALLBACK.to_string()
            }
        }
    }
}

// ── Wire types ──

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated. `None` when blank.
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
