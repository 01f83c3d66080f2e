//! # vigil-assess
//!
//! Link assessment through an OpenAI-compatible `chat/completions` endpoint.
//!
//! [`ChatAssessor`] sends a fixed security-analyst system prompt (optionally
//! carrying an infrastructure description) plus the fetched page text, and
//! returns the model's free-form reply. Turning that reply into fields is the
//! monitor's job.

pub mod prompt;

mod error;

pub use error::AssessError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_config::AssessorConfig;
use vigil_core::capabilities::Assessor;
use vigil_core::errors::CapabilityError;
use vigil_core::rate_limit::retry_after_secs;

const CAPABILITY: &str = "assess";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Assessor backed by a chat-completion model.
#[derive(Debug, Clone)]
pub struct ChatAssessor {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    system_prompt: String,
}

impl ChatAssessor {
    /// Build an assessor from the `[assessor]` config section.
    ///
    /// The infrastructure context file is read once here. A missing or
    /// unreadable file is logged and the prompt is built without it.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AssessorConfig) -> Result<Self, AssessError> {
        let context = config
            .context_path
            .as_deref()
            .map(|path| {
                std::fs::read_to_string(path).unwrap_or_else(|error| {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "infrastructure context unavailable"
                    );
                    String::new()
                })
            })
            .unwrap_or_default();

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: Some(config.api_key.clone()).filter(|k| !k.is_empty()),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system_prompt: prompt::system_prompt(&context),
        })
    }

    /// The system prompt sent with every request.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Request an assessment of `text`, fetched from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError`] if the request fails, the endpoint answers
    /// with an error status, or the completion has no text.
    pub async fn complete(&self, url: &str, text: &str) -> Result<String, AssessError> {
        let user = prompt::user_prompt(url, text);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let resp = check_response(request.send().await?).await?;

        let data: ChatResponse = resp.json().await?;
        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AssessError::EmptyCompletion)?;

        tracing::debug!(url, model = %self.model, chars = content.len(), "assessment received");
        Ok(content)
    }
}

/// Map 429 and non-success statuses to [`AssessError`].
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AssessError> {
    if resp.status() == 429 {
        let header = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok());
        return Err(AssessError::RateLimited {
            retry_after_secs: retry_after_secs(header),
        });
    }
    if !resp.status().is_success() {
        return Err(AssessError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[async_trait]
impl Assessor for ChatAssessor {
    async fn assess(&self, url: &str, text: &str) -> Result<String, CapabilityError> {
        self.complete(url, text).await.map_err(|e| match e {
            AssessError::EmptyCompletion => CapabilityError::Empty {
                capability: CAPABILITY,
            },
            AssessError::Api { status, message } => {
                CapabilityError::failed(CAPABILITY, format!("HTTP {status}: {message}"))
            }
            other => CapabilityError::Other(other.into()),
        })
    }
}
