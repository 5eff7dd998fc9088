use axum::{
    extract::Path,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::forum_board::{Author, DiscussionTopic};
use crate::app_module::AppState;
use crate::core::error::ApiError;
use crate::services::{
    discussion_topic_service::DiscussionTopicService, generation_outcome::Outcome,
};

#[derive(Debug, Serialize)]
pub struct ForumSnapshot {
    pub topics: Vec<DiscussionTopic>,
    pub active_topic_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PublishedTopic {
    pub topic: DiscussionTopic,
    pub outcome: Outcome,
}

#[derive(Debug, Deserialize)]
pub struct SelectTopicRequest {
    pub topic_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct AddReplyRequest {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

pub fn forum_router() -> Router {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics/generate", post(generate_topic))
        .route("/topics/:topic_id/replies", post(add_reply))
        .route("/active-topic", put(select_topic))
}

pub async fn list_topics(Extension(ctx): Extension<AppState>) -> Json<ForumSnapshot> {
    let board = ctx.forum.read();
    Json(ForumSnapshot {
        topics: board.topics().to_vec(),
        active_topic_id: board.active_topic_id(),
    })
}

pub async fn generate_topic(Extension(ctx): Extension<AppState>) -> Json<PublishedTopic> {
    let generated = DiscussionTopicService::propose(&ctx.service.llm_client).await;
    let is_placeholder = generated.is_fallback();

    let topic = ctx
        .forum
        .write()
        .publish_topic(generated.value, Author::assistant())
        .clone();

    if is_placeholder {
        tracing::warn!(
            topic_id = topic.id,
            outcome = generated.outcome.as_str(),
            "Published placeholder topic"
        );
    } else {
        tracing::info!(topic_id = topic.id, outcome = generated.outcome.as_str(), "Published generated topic");
    }

    Json(PublishedTopic {
        topic,
        outcome: generated.outcome,
    })
}

pub async fn select_topic(
    Extension(ctx): Extension<AppState>,
    Json(request): Json<SelectTopicRequest>,
) -> Result<Json<DiscussionTopic>, ApiError> {
    let mut board = ctx.forum.write();
    let topic = board.select_topic(request.topic_id)?;
    Ok(Json(topic.clone()))
}

pub async fn add_reply(
    Extension(ctx): Extension<AppState>,
    Path(topic_id): Path<u64>,
    Json(request): Json<AddReplyRequest>,
) -> Result<Json<DiscussionTopic>, ApiError> {
    let author = match request.author.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Author::student_named(name),
        _ => Author::student(),
    };

    let mut board = ctx.forum.write();
    let topic = board.add_reply(topic_id, author, &request.content)?;
    Ok(Json(topic.clone()))
}
