use huquq_llm::LLMClient;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::forum::forum_board::ForumBoard;

#[derive(Clone)]
pub struct AppService {
    pub llm_client: Arc<LLMClient>,
}

impl AppService {
    pub fn new(llm_client: LLMClient) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
    pub forum: Arc<RwLock<ForumBoard>>,
}

impl AppState {
    pub fn new(llm_client: LLMClient) -> Self {
        Self {
            service: AppService::new(llm_client),
            forum: Arc::new(RwLock::new(ForumBoard::new())),
        }
    }
}
