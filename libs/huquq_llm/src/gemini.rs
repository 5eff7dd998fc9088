use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::{GenerationRequest, LLMError, LLMService};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

const PROVIDER: &str = "Gemini";

#[derive(Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
        }
    }
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or an empty string when the backend
    /// returned nothing (for instance a blocked prompt).
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|part| !part.thought.unwrap_or(false))
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<&str>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

pub struct GeminiService {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiService {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt().to_string()),
                    thought: None,
                }],
            }],
            generation_config: request.contract().map(|contract| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: to_gemini_schema(&contract.wire_schema()),
            }),
        }
    }
}

/// Gemini's schema dialect spells type names in upper case.
fn to_gemini_schema(schema: &Value) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };

    let converted: Map<String, Value> = map
        .iter()
        .map(|(key, value)| {
            let value = match (key.as_str(), value) {
                ("type", Value::String(type_name)) => Value::String(type_name.to_uppercase()),
                ("properties", Value::Object(properties)) => Value::Object(
                    properties
                        .iter()
                        .map(|(name, property)| (name.clone(), to_gemini_schema(property)))
                        .collect(),
                ),
                ("items", items) => to_gemini_schema(items),
                _ => value.clone(),
            };
            (key.clone(), value)
        })
        .collect();

    Value::Object(converted)
}

#[async_trait]
impl LLMService for GeminiService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError> {
        let body = Self::build_request(request);

        tracing::debug!(
            operation = request.operation(),
            model = %self.settings.model,
            structured = request.contract().is_some(),
            "Sending request to Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| LLMError::Request {
                provider: PROVIDER,
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let result: GenerateContentResponse =
            response.json().await.map_err(|source| LLMError::Request {
                provider: PROVIDER,
                source,
            })?;

        Ok(result.text())
    }
}
