use crate::prompts::research_guidance_prompt::ResearchGuidancePrompt;
use huquq_llm::LLMClient;

use super::generation_outcome::Generated;
use super::interpret_text;

pub struct ResearchGuidanceService;

impl ResearchGuidanceService {
    pub const NO_ANSWER: &'static str = "لم يتم العثور على إجابة.";
    pub const FALLBACK: &'static str = "عذرًا، حدث خطأ أثناء طلب الإرشاد. يرجى المحاولة مرة أخرى.";

    /// `topic` is expected to be trimmed by the caller.
    pub async fn guide(llm_client: &LLMClient, topic: &str) -> Generated<String> {
        let request = ResearchGuidancePrompt::get_request(topic);
        let result = llm_client.generate_text(&request).await;

        interpret_text(
            ResearchGuidancePrompt::OPERATION,
            result,
            Self::NO_ANSWER,
            Self::FALLBACK,
        )
    }
}
