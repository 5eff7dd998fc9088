use async_trait::async_trait;
use huquq_llm::{GenerationRequest, LLMClient, LLMClientConfig, LLMError, LLMService, RetryConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub enum Reply {
    Text(String),
    Status(u16),
    Stall,
}

/// Answers every request with the same scripted reply and records prompts.
pub struct MockLLM {
    reply: Reply,
    prompts: Arc<Mutex<Vec<GenerationRequest>>>,
}

#[async_trait]
impl LLMService for MockLLM {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError> {
        self.prompts.lock().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status) => Err(LLMError::Status {
                provider: "mock",
                status: *status,
                body: "unavailable".to_string(),
            }),
            Reply::Stall => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(String::new())
            }
        }
    }
}

pub fn client(reply: Reply) -> (LLMClient, Arc<Mutex<Vec<GenerationRequest>>>) {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let service = MockLLM {
        reply,
        prompts: prompts.clone(),
    };
    let config = LLMClientConfig {
        timeout: Duration::from_millis(50),
        retry_config: RetryConfig::default(),
    };
    (
        LLMClient::with_service(Box::new(service), Some(config)),
        prompts,
    )
}

pub fn text(reply: &str) -> LLMClient {
    client(Reply::Text(reply.to_string())).0
}
