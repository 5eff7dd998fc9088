pub mod discussion_topic_service;
pub mod generation_outcome;
pub mod integrity_analysis_service;
pub mod research_guidance_service;

#[cfg(test)]
pub(crate) mod mock_llm;

use huquq_llm::LLMError;

use generation_outcome::Generated;

/// Free-text operations return the backend's text untouched, a fixed sentence
/// when the text is empty, and the apology on any failure.
pub(crate) fn interpret_text(
    operation: &str,
    result: Result<String, LLMError>,
    no_answer: &str,
    apology: &str,
) -> Generated<String> {
    match result {
        Ok(text) if text.is_empty() => {
            tracing::info!(operation, "Backend returned no text");
            Generated::empty(no_answer.to_string())
        }
        Ok(text) => Generated::generated(text),
        Err(e) => {
            tracing::error!(operation, error = %e, "Generation failed, returning fallback");
            Generated::fallback(apology.to_string(), e.failure_kind())
        }
    }
}
