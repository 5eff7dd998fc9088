use crate::prompts::integrity_analysis_prompt::IntegrityAnalysisPrompt;
use huquq_llm::LLMClient;

use super::generation_outcome::Generated;
use super::interpret_text;

pub struct IntegrityAnalysisService;

impl IntegrityAnalysisService {
    pub const NO_ANSWER: &'static str = "لم نتمكن من تحليل النص.";
    pub const FALLBACK: &'static str = "عذرًا، حدث خطأ أثناء تحليل النص. يرجى المحاولة مرة أخرى.";

    pub async fn analyze(llm_client: &LLMClient, text: &str) -> Generated<String> {
        let request = IntegrityAnalysisPrompt::get_request(text);
        let result = llm_client.generate_text(&request).await;

        interpret_text(
            IntegrityAnalysisPrompt::OPERATION,
            result,
            Self::NO_ANSWER,
            Self::FALLBACK,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generation_outcome::Outcome;
    use crate::services::mock_llm::{self, Reply};
    use huquq_llm::FailureKind;

    const PASSAGE: &str = "  إن العقد شريعة المتعاقدين، ولا يجوز نقضه إلا باتفاق الطرفين.  ";

    #[tokio::test]
    async fn passage_is_sent_untouched() {
        let (client, prompts) = mock_llm::client(Reply::Text("ملاحظات".to_string()));
        let result = IntegrityAnalysisService::analyze(&client, PASSAGE).await;

        assert_eq!(result.value, "ملاحظات");
        assert!(prompts.lock()[0].prompt().contains(PASSAGE));
    }

    #[tokio::test]
    async fn empty_answer_yields_no_answer_sentence() {
        let client = mock_llm::text("");
        let result = IntegrityAnalysisService::analyze(&client, PASSAGE).await;

        assert_eq!(result.value, IntegrityAnalysisService::NO_ANSWER);
        assert_eq!(result.outcome, Outcome::Empty);
    }

    #[tokio::test]
    async fn transport_failure_yields_apology() {
        let (client, _) = mock_llm::client(Reply::Status(429));
        let result = IntegrityAnalysisService::analyze(&client, PASSAGE).await;

        assert_eq!(result.value, IntegrityAnalysisService::FALLBACK);
        assert_eq!(result.outcome, Outcome::Fallback(FailureKind::Transport));
    }

    #[tokio::test]
    async fn stalled_backend_yields_apology() {
        let (client, _) = mock_llm::client(Reply::Stall);
        let result = IntegrityAnalysisService::analyze(&client, PASSAGE).await;

        assert_eq!(result.value, IntegrityAnalysisService::FALLBACK);
        assert_eq!(result.outcome, Outcome::Fallback(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let client = mock_llm::text("ملاحظات");
        let first = IntegrityAnalysisService::analyze(&client, PASSAGE).await;
        let second = IntegrityAnalysisService::analyze(&client, PASSAGE).await;
        assert_eq!(first, second);
    }
}
