use url::Url;

use crate::app::{FreshetError, Result};
use crate::domain::comment::ContentRef;

/// Page size used by the offset-paginated endpoints.
pub const PAGE_LIMIT: usize = 20;

/// Builds the platform's endpoint URLs from a configured base.
#[derive(Debug, Clone)]
pub struct Routes {
    base: Url,
}

impl Routes {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(FreshetError::Config(format!(
                "base URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self { base })
    }

    fn at(&self, path: &str) -> String {
        let mut url = self.base.clone();
        url.set_path(path);
        url.to_string()
    }

    /// Home recommendation stream, paginated by the local list length.
    pub fn recommend_feed(&self, offset: usize) -> String {
        format!(
            "{}?desktop=true&action=down&end_offset={offset}",
            self.at("/api/v3/feed/recommend")
        )
    }

    /// Answer stream under one question.
    pub fn question_feeds(&self, question_id: u64, offset: usize) -> String {
        format!(
            "{}?limit={PAGE_LIMIT}&offset={offset}",
            self.at(&format!("/api/v4/questions/{question_id}/feeds"))
        )
    }

    /// Read-marking side channel.
    pub fn touch(&self) -> String {
        self.at("/lastread/touch")
    }

    /// Root comments under a piece of content.
    pub fn root_comments(&self, content: &ContentRef, offset: usize) -> String {
        format!(
            "{}?limit={PAGE_LIMIT}&offset={offset}",
            self.at(&format!(
                "/api/v4/comments/{}/{}",
                content.kind.api_segment(),
                content.id
            ))
        )
    }

    /// Replies under one root comment.
    pub fn child_comments(&self, comment_id: &str, offset: usize) -> String {
        format!(
            "{}?limit={PAGE_LIMIT}&offset={offset}",
            self.at(&format!("/api/v4/comments/{comment_id}/child_comments"))
        )
    }

    pub fn comment_like(&self, comment_id: &str) -> String {
        self.at(&format!("/api/v4/comments/{comment_id}/actions/like"))
    }

    /// Comment submission posts to the scope's collection.
    pub fn submit_root_comment(&self, content: &ContentRef) -> String {
        self.at(&format!(
            "/api/v4/comments/{}/{}",
            content.kind.api_segment(),
            content.id
        ))
    }

    pub fn submit_child_comment(&self, root_comment_id: &str) -> String {
        self.at(&format!("/api/v4/comments/{root_comment_id}/child_comments"))
    }
}
