use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::services::discussion_topic_service::StructuredTopic;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ForumError {
    #[error("Topic {0} does not exist")]
    TopicNotFound(u64),

    #[error("Reply content is empty")]
    EmptyReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

impl Author {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }

    pub fn assistant() -> Self {
        Self::new("الذكاء الاصطناعي", avatar_url("ai"))
    }

    pub fn student() -> Self {
        Self::student_named("أنت")
    }

    pub fn student_named(name: impl Into<String>) -> Self {
        Self::new(name, avatar_url("you"))
    }
}

fn avatar_url(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/48/48", seed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub id: u64,
    pub author: String,
    pub avatar: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscussionTopic {
    pub id: u64,
    pub author: String,
    pub avatar: String,
    pub title: String,
    pub content: String,
    /// Display order is insertion order.
    pub replies: Vec<Reply>,
    pub timestamp: DateTime<Utc>,
}

/// In-memory topic list plus the currently selected topic.
///
/// The active topic is tracked by id and always resolved against the list,
/// so it can never drift from the stored entry.
#[derive(Debug, Default)]
pub struct ForumBoard {
    topics: Vec<DiscussionTopic>,
    active_topic_id: Option<u64>,
    next_id: u64,
}

impl ForumBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topics(&self) -> &[DiscussionTopic] {
        &self.topics
    }

    pub fn active_topic_id(&self) -> Option<u64> {
        self.active_topic_id
    }

    pub fn active_topic(&self) -> Option<&DiscussionTopic> {
        self.active_topic_id.and_then(|id| self.topic(id))
    }

    pub fn topic(&self, id: u64) -> Option<&DiscussionTopic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Inserts the topic at the head of the list and makes it active.
    pub fn publish_topic(&mut self, draft: StructuredTopic, author: Author) -> &DiscussionTopic {
        let id = self.allocate_id();
        let topic = DiscussionTopic {
            id,
            author: author.name,
            avatar: author.avatar,
            title: draft.title,
            content: draft.content,
            replies: Vec::new(),
            timestamp: Utc::now(),
        };

        self.topics.insert(0, topic);
        self.active_topic_id = Some(id);
        &self.topics[0]
    }

    pub fn select_topic(&mut self, id: u64) -> Result<&DiscussionTopic, ForumError> {
        let index = self.position(id)?;
        self.active_topic_id = Some(id);
        Ok(&self.topics[index])
    }

    /// Appends a reply to one topic; no other topic is touched.
    pub fn add_reply(
        &mut self,
        topic_id: u64,
        author: Author,
        content: &str,
    ) -> Result<&DiscussionTopic, ForumError> {
        if content.trim().is_empty() {
            return Err(ForumError::EmptyReply);
        }
        let index = self.position(topic_id)?;
        let id = self.allocate_id();

        self.topics[index].replies.push(Reply {
            id,
            author: author.name,
            avatar: author.avatar,
            content: content.to_string(),
            timestamp: Utc::now(),
        });
        Ok(&self.topics[index])
    }

    fn position(&self, id: u64) -> Result<usize, ForumError> {
        self.topics
            .iter()
            .position(|topic| topic.id == id)
            .ok_or(ForumError::TopicNotFound(id))
    }
}
