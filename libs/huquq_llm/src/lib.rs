use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

pub mod contract;
pub mod error;
pub mod gemini;
pub mod openai;

pub use contract::OutputContract;
pub use error::{FailureKind, LLMError};
pub use gemini::GeminiSettings;
pub use openai::OpenAISettings;

#[derive(Debug, Clone)]
pub enum LLMProvider {
    Gemini(GeminiSettings),
    OpenAI(OpenAISettings),
}

impl LLMProvider {
    pub fn name(&self) -> &'static str {
        match self {
            LLMProvider::Gemini(_) => "gemini",
            LLMProvider::OpenAI(_) => "openai",
        }
    }

    pub fn has_credential(&self) -> bool {
        match self {
            LLMProvider::Gemini(settings) => !settings.api_key.is_empty(),
            LLMProvider::OpenAI(settings) => !settings.api_key.is_empty(),
        }
    }
}

/// One call to the backend: the instruction text plus, for structured
/// operations, the contract the answer must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    operation: &'static str,
    prompt: String,
    contract: Option<OutputContract>,
}

impl GenerationRequest {
    pub fn new(operation: &'static str, prompt: impl Into<String>) -> Self {
        Self {
            operation,
            prompt: prompt.into(),
            contract: None,
        }
    }

    pub fn with_contract(mut self, contract: OutputContract) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn contract(&self) -> Option<&OutputContract> {
        self.contract.as_ref()
    }
}

#[async_trait]
pub trait LLMService {
    /// Performs a single round trip and returns the response text, which may
    /// be empty when the backend answered without content.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError>;
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMClientConfig {
    pub timeout: Duration,
    pub retry_config: RetryConfig,
}

impl Default for LLMClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            retry_config: RetryConfig::default(),
        }
    }
}

pub struct LLMClient {
    service: Box<dyn LLMService + Send + Sync>,
    config: LLMClientConfig,
}

impl LLMClient {
    pub fn new(provider: LLMProvider, config: Option<LLMClientConfig>) -> Self {
        let service: Box<dyn LLMService + Send + Sync> = match provider {
            LLMProvider::Gemini(settings) => Box::new(gemini::GeminiService::new(settings)),
            LLMProvider::OpenAI(settings) => Box::new(openai::OpenAIService::new(settings)),
        };

        Self::with_service(service, config)
    }

    pub fn with_service(
        service: Box<dyn LLMService + Send + Sync>,
        config: Option<LLMClientConfig>,
    ) -> Self {
        Self {
            service,
            config: config.unwrap_or_default(),
        }
    }

    fn create_retry_strategy(&self) -> impl Iterator<Item = Duration> {
        let base_millis = self.config.retry_config.base_delay.as_millis() as u64;
        // from_millis(2) doubles each step; the factor scales it to the base delay.
        ExponentialBackoff::from_millis(2)
            .factor((base_millis / 2).max(1))
            .max_delay(Duration::from_secs(30))
            .take(self.config.retry_config.max_retries as usize)
    }

    async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> Result<T, LLMError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LLMError>>,
    {
        let timeout_duration = self.config.timeout;
        let max_attempts = self.config.retry_config.max_retries.saturating_add(1);
        let mut attempt = 0;

        RetryIf::spawn(
            self.create_retry_strategy(),
            || {
                attempt += 1;
                let current_attempt = attempt;
                let fut = operation();
                async move {
                    match timeout(timeout_duration, fut).await {
                        Ok(Ok(value)) => Ok(value),
                        Ok(Err(e)) => {
                            tracing::warn!(
                                "{} failed (attempt {}/{}): {}",
                                operation_name,
                                current_attempt,
                                max_attempts,
                                e
                            );
                            Err(e)
                        }
                        Err(_) => {
                            tracing::warn!(
                                "{} timed out after {:?} (attempt {}/{})",
                                operation_name,
                                timeout_duration,
                                current_attempt,
                                max_attempts
                            );
                            Err(LLMError::Timeout(timeout_duration))
                        }
                    }
                }
            },
            |e: &LLMError| e.is_retryable(),
        )
        .await
    }

    /// Returns the backend's text verbatim; an empty string is a valid answer.
    pub async fn generate_text(&self, request: &GenerationRequest) -> Result<String, LLMError> {
        self.execute_with_retry(request.operation(), || self.service.generate(request))
            .await
    }

    /// Sends a request carrying an output contract and returns the response
    /// validated against it and deserialized into `T`.
    pub async fn generate_structured<T>(&self, request: &GenerationRequest) -> Result<T, LLMError>
    where
        T: DeserializeOwned,
    {
        let contract = request
            .contract()
            .ok_or_else(|| LLMError::MissingContract(request.operation().to_string()))?;

        let text = self.generate_text(request).await?;
        if text.trim().is_empty() {
            return Err(LLMError::EmptyResponse);
        }

        let value = contract.validate(&text)?;
        serde_json::from_value(value).map_err(|e| contract.violation(e))
    }
}
