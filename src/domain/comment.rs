use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use crate::domain::feed::Paging;

/// What a root comment thread is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Answer,
    Article,
    Question,
}

impl ContentKind {
    pub fn api_segment(&self) -> &'static str {
        match self {
            ContentKind::Answer => "answers",
            ContentKind::Article => "articles",
            ContentKind::Question => "questions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: u64,
}

impl ContentRef {
    pub fn new(kind: ContentKind, id: u64) -> Self {
        Self { kind, id }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub headline: String,
}

/// One comment as held in the thread synchronizer's ordered list. Content
/// is raw markup, passed through untransformed.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentItem {
    pub id: String,
    pub author: CommentAuthor,
    pub content: String,
    pub created_time: i64,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub child_comment_count: u32,
    #[serde(default)]
    pub reply_comment_id: Option<String>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub top: bool,
    #[serde(default, rename = "is_delete")]
    pub deleted: bool,
}

impl CommentItem {
    /// A child thread exists to open only when the server reports replies.
    pub fn has_replies(&self) -> bool {
        self.child_comment_count > 0
    }

    /// The reply back-reference, with the server's empty-string spelling of
    /// "none" normalized away. Lookup-only; resolution may fail.
    pub fn reply_target(&self) -> Option<&str> {
        self.reply_comment_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.created_time, 0).unwrap_or_default()
    }

    /// Bucketed timestamp: time-of-day within the same day, month-day within
    /// the same year, full date otherwise.
    pub fn display_time(&self, now: DateTime<Utc>) -> String {
        let created = self.created_at();
        if created.date_naive() == now.date_naive() {
            created.format("%H:%M:%S").to_string()
        } else if created.year() == now.year() {
            created.format("%m-%d %H:%M:%S").to_string()
        } else {
            created.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }
}

/// Response envelope shared by the comment list endpoints.
#[derive(Debug, Deserialize)]
pub struct CommentEnvelope {
    pub data: Vec<CommentItem>,
    #[serde(default)]
    pub paging: Paging,
}

impl CommentEnvelope {
    pub fn parse(body: &str) -> crate::app::Result<Self> {
        serde_json::from_str(body).map_err(|e| crate::app::FreshetError::Parse(e.to_string()))
    }
}
