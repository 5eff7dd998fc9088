use crate::prompts::discussion_topic_prompt::DiscussionTopicPrompt;
use huquq_llm::LLMClient;
use serde::{Deserialize, Serialize};

use super::generation_outcome::Generated;

/// The two fields the backend fills in; everything else about a forum topic
/// is assigned by the forum board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredTopic {
    pub title: String,
    pub content: String,
}

pub struct DiscussionTopicService;

impl DiscussionTopicService {
    pub const FALLBACK_TITLE: &'static str = "خطأ في إنشاء الموضوع";
    pub const FALLBACK_CONTENT: &'static str =
        "عذرًا، لم نتمكن من إنشاء موضوع جديد في الوقت الحالي. يرجى المحاولة مرة أخرى.";

    pub fn fallback_topic() -> StructuredTopic {
        StructuredTopic {
            title: Self::FALLBACK_TITLE.to_string(),
            content: Self::FALLBACK_CONTENT.to_string(),
        }
    }

    /// Never fails: transport errors, timeouts and answers that do not fit
    /// the contract all resolve to the placeholder topic.
    pub async fn propose(llm_client: &LLMClient) -> Generated<StructuredTopic> {
        let request = DiscussionTopicPrompt::get_request();

        match llm_client.generate_structured::<StructuredTopic>(&request).await {
            Ok(topic) => Generated::generated(topic),
            Err(e) => {
                tracing::error!(error = %e, "Error generating discussion topic");
                Generated::fallback(Self::fallback_topic(), e.failure_kind())
            }
        }
    }
}
