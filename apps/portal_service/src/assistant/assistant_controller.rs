use axum::{routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::app_module::AppState;
use crate::core::error::ApiError;
use crate::services::{
    discussion_topic_service::{DiscussionTopicService, StructuredTopic},
    generation_outcome::{Generated, Outcome},
    integrity_analysis_service::IntegrityAnalysisService,
    research_guidance_service::ResearchGuidanceService,
};

#[derive(Debug, Deserialize)]
pub struct ResearchGuidanceRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct IntegrityAnalysisRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
    pub outcome: Outcome,
}

impl From<Generated<String>> for TextResponse {
    fn from(generated: Generated<String>) -> Self {
        Self {
            text: generated.value,
            outcome: generated.outcome,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    #[serde(flatten)]
    pub topic: StructuredTopic,
    pub outcome: Outcome,
}

pub fn assistant_router() -> Router {
    Router::new()
        .route("/research-guidance", post(research_guidance))
        .route("/integrity-analysis", post(integrity_analysis))
        .route("/discussion-topic", post(discussion_topic))
}

pub async fn research_guidance(
    Extension(ctx): Extension<AppState>,
    Json(request): Json<ResearchGuidanceRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err("topic must not be empty".into());
    }

    let guidance = ResearchGuidanceService::guide(&ctx.service.llm_client, topic).await;
    Ok(Json(guidance.into()))
}

pub async fn integrity_analysis(
    Extension(ctx): Extension<AppState>,
    Json(request): Json<IntegrityAnalysisRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err("text must not be empty".into());
    }

    let analysis = IntegrityAnalysisService::analyze(&ctx.service.llm_client, &request.text).await;
    Ok(Json(analysis.into()))
}

pub async fn discussion_topic(Extension(ctx): Extension<AppState>) -> Json<TopicResponse> {
    let generated = DiscussionTopicService::propose(&ctx.service.llm_client).await;
    Json(TopicResponse {
        topic: generated.value,
        outcome: generated.outcome,
    })
}
