use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use serde_json::{Map, Value};
use std::{fmt, time::Duration};

use crate::{GenerationRequest, LLMError, LLMService};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAISettings {
    pub api_key: String,
    pub org_id: String,
    pub model: String,
    pub api_base: String,
}

impl OpenAISettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            org_id: String::new(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            api_base: OPENAI_API_BASE.to_string(),
        }
    }
}

impl fmt::Debug for OpenAISettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAISettings")
            .field("api_key", &"<redacted>")
            .field("org_id", &self.org_id)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

pub struct OpenAIService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIService {
    pub fn new(settings: OpenAISettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key)
            .with_org_id(settings.org_id)
            .with_api_base(settings.api_base);
        // Retries are owned by `LLMClient`; the SDK must make a single attempt.
        let backoff: ExponentialBackoff = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(config).with_backoff(backoff);
        Self {
            client,
            model: settings.model,
        }
    }
}

/// Rate limiting and server-side failures; everything else is the caller's fault.
fn is_transient(error: &ApiError) -> bool {
    let is_one_of = |field: &Option<String>, values: &[&str]| {
        field.as_deref().is_some_and(|value| values.contains(&value))
    };
    if is_one_of(&error.r#type, &["insufficient_quota"]) {
        return false;
    }
    is_one_of(&error.code, &["rate_limit_exceeded"])
        || is_one_of(&error.r#type, &["requests", "tokens", "server_error"])
}

fn map_openai_error(error: OpenAIError) -> LLMError {
    match error {
        OpenAIError::Reqwest(source) => LLMError::Request {
            provider: "OpenAI",
            source,
        },
        OpenAIError::ApiError(api_error) => LLMError::Api {
            provider: "OpenAI",
            transient: is_transient(&api_error),
            code: api_error.code,
            message: api_error.message,
        },
        // Error bodies that are not JSON come from gateways and proxies.
        OpenAIError::JSONDeserialize(e) => LLMError::Api {
            provider: "OpenAI",
            code: None,
            message: format!("unreadable response body: {e}"),
            transient: true,
        },
        other => LLMError::Provider(other.to_string()),
    }
}

/// Strict mode wants every object closed and every property listed as required.
fn to_strict_schema(schema: &Value) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };

    let mut strict: Map<String, Value> = map
        .iter()
        .map(|(key, value)| {
            let value = match (key.as_str(), value) {
                ("properties", Value::Object(properties)) => Value::Object(
                    properties
                        .iter()
                        .map(|(name, property)| (name.clone(), to_strict_schema(property)))
                        .collect(),
                ),
                ("items", items) => to_strict_schema(items),
                _ => value.clone(),
            };
            (key.clone(), value)
        })
        .collect();

    if strict.get("type").and_then(Value::as_str) == Some("object") {
        strict.insert("additionalProperties".to_string(), Value::Bool(false));
        if let Some(Value::Object(properties)) = strict.get("properties") {
            let required: Vec<Value> = properties
                .keys()
                .map(|name| Value::String(name.clone()))
                .collect();
            strict.insert("required".to_string(), Value::Array(required));
        }
    }

    Value::Object(strict)
}

#[async_trait]
impl LLMService for OpenAIService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError> {
        let mut binding = CreateChatCompletionRequestArgs::default();
        let mut args = binding
            .model(self.model.as_str())
            .messages([ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    content: request.prompt().to_string().into(),
                    name: None,
                },
            )]);

        if let Some(contract) = request.contract() {
            args = args.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: contract.name().to_string(),
                    schema: Some(to_strict_schema(&contract.wire_schema())),
                    description: None,
                    strict: Some(true),
                },
            });
        }

        let chat_request = args
            .build()
            .map_err(|e| LLMError::Provider(format!("Failed to build chat completion request: {e}")))?;

        tracing::debug!(
            operation = request.operation(),
            model = %self.model,
            structured = request.contract().is_some(),
            "Sending request to OpenAI"
        );

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(map_openai_error)?;

        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default())
    }
}
