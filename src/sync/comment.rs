use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::app::{FreshetError, Result};
use crate::domain::comment::{CommentEnvelope, CommentItem, ContentRef};
use crate::sync::cursor::PaginationCursor;
use crate::transport::routes::Routes;
use crate::transport::Transport;

/// Which thread this synchronizer is paginating: the root comments of a
/// piece of content, or the replies under one root comment.
#[derive(Debug, Clone)]
pub enum CommentScope {
    Root { content: ContentRef },
    Child { root_comment_id: String },
}

struct CommentState {
    comments: Vec<CommentItem>,
    /// Position by comment id, maintained in lockstep with `comments`.
    index: HashMap<String, usize>,
    cursor: PaginationCursor,
    epoch: u64,
    error: Option<String>,
    closed: bool,
    draft: String,
    sending: bool,
    likes_in_flight: HashSet<String>,
}

/// Synchronizes one comment thread against the remote API.
///
/// Same shape as the feed synchronizer: admission-gated pagination, epoch
/// checks before every commit, state behind a short-lived mutex. On top of
/// that it maintains an id index for reply back-reference resolution and
/// carries the like/submit write paths.
pub struct CommentSynchronizer {
    transport: Arc<dyn Transport>,
    routes: Routes,
    scope: CommentScope,
    state: Mutex<CommentState>,
    changes: watch::Sender<u64>,
}

impl CommentSynchronizer {
    pub fn new(transport: Arc<dyn Transport>, routes: Routes, scope: CommentScope) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            transport,
            routes,
            scope,
            state: Mutex::new(CommentState {
                comments: Vec::new(),
                index: HashMap::new(),
                cursor: PaginationCursor::new(),
                epoch: 0,
                error: None,
                closed: false,
                draft: String::new(),
                sending: false,
                likes_in_flight: HashSet::new(),
            }),
            changes,
        }
    }

    /// Clear the thread and refetch page 0. The compose draft survives.
    pub async fn refresh(&self) {
        {
            let mut state = self.lock_state();
            if state.closed {
                return;
            }
            state.epoch += 1;
            state.cursor.reset();
            state.comments.clear();
            state.index.clear();
            state.likes_in_flight.clear();
            state.error = None;
        }
        self.notify();
        self.fetch_cycle().await;
    }

    /// Append the next page. Silent no-op while a fetch is in flight or the
    /// thread is exhausted.
    pub async fn load_more(&self) {
        self.fetch_cycle().await;
    }

    /// Tear down: any in-flight operation's eventual completion is
    /// discarded.
    pub fn close(&self) {
        let mut state = self.lock_state();
        state.closed = true;
        state.epoch += 1;
    }

    /// Revision counter bumped on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn comments(&self) -> Vec<CommentItem> {
        self.lock_state().comments.clone()
    }

    /// O(1) lookup through the id index. Returns `None` for ids never
    /// merged, which is how dangling reply references degrade.
    pub fn get_comment_by_id(&self, id: &str) -> Option<CommentItem> {
        let state = self.lock_state();
        state
            .index
            .get(id)
            .and_then(|&pos| state.comments.get(pos))
            .cloned()
    }

    /// Resolve a comment's reply back-reference, if it points anywhere.
    pub fn resolve_reply(&self, comment: &CommentItem) -> Option<CommentItem> {
        self.get_comment_by_id(comment.reply_target()?)
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().cursor.is_loading()
    }

    pub fn is_end(&self) -> bool {
        self.lock_state().cursor.is_end()
    }

    pub fn offset(&self) -> usize {
        self.lock_state().cursor.offset()
    }

    pub fn set_draft(&self, text: &str) {
        self.lock_state().draft = text.to_string();
    }

    pub fn draft(&self) -> String {
        self.lock_state().draft.clone()
    }

    /// Flip a comment's like state on the server, then locally. No
    /// optimistic update: the local flag and count change only after the
    /// server confirms. A second toggle while one is in flight for the same
    /// comment is a silent no-op.
    pub async fn toggle_like_comment(&self, comment_id: &str) -> Result<()> {
        let (epoch, set_liked) = {
            let mut state = self.lock_state();
            if state.closed {
                return Ok(());
            }
            let comment = match state
                .index
                .get(comment_id)
                .and_then(|&pos| state.comments.get(pos))
            {
                Some(c) => c,
                None => {
                    return Err(FreshetError::Other(format!(
                        "unknown comment: {comment_id}"
                    )))
                }
            };
            let set_liked = !comment.liked;
            if !state.likes_in_flight.insert(comment_id.to_string()) {
                return Ok(());
            }
            (state.epoch, set_liked)
        };

        let url = self.routes.comment_like(comment_id);
        let action = if set_liked { "like" } else { "unlike" };
        let fields = vec![("action".to_string(), action.to_string())];
        let outcome = self.transport.post_form(&url, &fields).await;

        let mut state = self.lock_state();
        state.likes_in_flight.remove(comment_id);
        match outcome {
            Ok(response) if response.is_success() => {
                if state.closed || state.epoch != epoch {
                    tracing::debug!(%comment_id, "Discarding stale like confirmation");
                    return Ok(());
                }
                if let Some(&pos) = state.index.get(comment_id) {
                    if let Some(comment) = state.comments.get_mut(pos) {
                        comment.liked = set_liked;
                        comment.like_count = if set_liked {
                            comment.like_count.saturating_add(1)
                        } else {
                            comment.like_count.saturating_sub(1)
                        };
                    }
                }
                drop(state);
                self.notify();
                Ok(())
            }
            Ok(response) => {
                let message = format!("Like request failed with status {}", response.status);
                self.set_error(state, epoch, message.clone());
                Err(FreshetError::Api {
                    status: response.status,
                    message,
                })
            }
            Err(e) => {
                self.set_error(state, epoch, format!("Failed to toggle like: {e}"));
                Err(e)
            }
        }
    }

    /// Post the current draft to this thread. Blank drafts and concurrent
    /// submits are silent no-ops. Success clears the draft; failure leaves
    /// it intact so the user can retry.
    pub async fn submit_comment(&self) -> Result<()> {
        let (epoch, text) = {
            let mut state = self.lock_state();
            if state.closed || state.sending || state.draft.trim().is_empty() {
                return Ok(());
            }
            state.sending = true;
            (state.epoch, state.draft.clone())
        };

        let (url, fields) = match &self.scope {
            CommentScope::Root { content } => (
                self.routes.submit_root_comment(content),
                vec![("content".to_string(), text)],
            ),
            CommentScope::Child { root_comment_id } => (
                self.routes.submit_child_comment(root_comment_id),
                vec![
                    ("content".to_string(), text),
                    ("reply_comment_id".to_string(), root_comment_id.clone()),
                ],
            ),
        };

        let outcome = self.transport.post_form(&url, &fields).await;

        let mut state = self.lock_state();
        state.sending = false;
        match outcome {
            Ok(response) if response.is_success() => {
                if state.closed {
                    return Ok(());
                }
                state.draft.clear();
                state.error = None;
                drop(state);
                self.notify();
                Ok(())
            }
            Ok(response) => {
                let message = format!("Comment submission failed with status {}", response.status);
                self.set_error(state, epoch, message.clone());
                Err(FreshetError::Api {
                    status: response.status,
                    message,
                })
            }
            Err(e) => {
                self.set_error(state, epoch, format!("Failed to submit comment: {e}"));
                Err(e)
            }
        }
    }

    async fn fetch_cycle(&self) {
        let (epoch, url) = {
            let mut state = self.lock_state();
            if state.closed || !state.cursor.begin_fetch() {
                return;
            }
            let url = match &self.scope {
                CommentScope::Root { content } => {
                    self.routes.root_comments(content, state.cursor.offset())
                }
                CommentScope::Child { root_comment_id } => self
                    .routes
                    .child_comments(root_comment_id, state.cursor.offset()),
            };
            (state.epoch, url)
        };

        match self.transport.get(&url).await {
            Err(e) => self.fail(epoch, format!("Failed to fetch comments: {e}")),
            Ok(response) if !response.is_success() => self.fail(
                epoch,
                format!("Comment request failed with status {}", response.status),
            ),
            Ok(response) => match CommentEnvelope::parse(&response.body) {
                Ok(envelope) => self.commit(epoch, envelope),
                Err(e) => {
                    tracing::error!(error = %e, payload = %response.body, "Malformed comment response");
                    self.fail(epoch, e.to_string());
                }
            },
        }
    }

    fn commit(&self, epoch: u64, envelope: CommentEnvelope) {
        let page_was_empty = envelope.data.is_empty();
        let server_end = envelope.paging.is_end == Some(true);

        let mut state = self.lock_state();
        if state.closed || state.epoch != epoch {
            tracing::debug!("Discarding stale comment page");
            return;
        }

        let mut appended = 0;
        for comment in envelope.data {
            if state.index.contains_key(&comment.id) {
                continue;
            }
            let pos = state.comments.len();
            state.index.insert(comment.id.clone(), pos);
            state.comments.push(comment);
            appended += 1;
        }
        state
            .cursor
            .complete_fetch(appended, server_end || page_was_empty);
        state.error = None;
        drop(state);
        self.notify();
    }

    /// Failed fetch: release the cursor's in-flight slot and surface the
    /// message. Only the fetch path owns the admission slot.
    fn fail(&self, epoch: u64, message: String) {
        let mut state = self.lock_state();
        if state.closed || state.epoch != epoch {
            tracing::debug!("Discarding stale comment fetch failure");
            return;
        }
        tracing::error!(%message, "Comment fetch failed");
        state.cursor.abort_fetch();
        state.error = Some(message);
        drop(state);
        self.notify();
    }

    /// Failed write (like/submit): surface the message without touching the
    /// cursor, which belongs to whatever fetch may be in flight.
    fn set_error(
        &self,
        mut state: std::sync::MutexGuard<'_, CommentState>,
        epoch: u64,
        message: String,
    ) {
        if state.closed || state.epoch != epoch {
            tracing::debug!("Discarding stale comment failure");
            return;
        }
        tracing::error!(%message, "Comment operation failed");
        state.error = Some(message);
        drop(state);
        self.notify();
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, CommentState> {
        self.state.lock().expect("comment state mutex poisoned")
    }

    fn notify(&self) {
        self.changes.send_modify(|rev| *rev += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::{json, Value};
    use tokio_test::{assert_err, assert_ok};

    use crate::domain::comment::ContentKind;
    use crate::transport::testing::MockTransport;

    fn comment_record(id: &str, author: &str) -> Value {
        json!({
            "id": id,
            "author": {"name": author, "headline": ""},
            "content": format!("<p>comment {id}</p>"),
            "created_time": 1_700_000_000,
            "like_count": 2,
            "liked": false,
            "child_comment_count": 0,
        })
    }

    fn page(records: Vec<Value>, is_end: Option<bool>) -> String {
        let paging = match is_end {
            Some(end) => json!({"is_end": end}),
            None => json!({}),
        };
        json!({"data": records, "paging": paging}).to_string()
    }

    fn root_sync(transport: Arc<MockTransport>) -> Arc<CommentSynchronizer> {
        Arc::new(CommentSynchronizer::new(
            transport,
            Routes::new("https://api.example.com").unwrap(),
            CommentScope::Root {
                content: ContentRef::new(ContentKind::Answer, 99),
            },
        ))
    }

    fn child_sync(transport: Arc<MockTransport>) -> Arc<CommentSynchronizer> {
        Arc::new(CommentSynchronizer::new(
            transport,
            Routes::new("https://api.example.com").unwrap(),
            CommentScope::Child {
                root_comment_id: "c1".to_string(),
            },
        ))
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_refresh_builds_list_and_index() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(
            vec![comment_record("c1", "ada"), comment_record("c2", "brook")],
            Some(false),
        ));
        let sync = root_sync(transport.clone());

        sync.refresh().await;

        assert_eq!(sync.comments().len(), 2);
        assert_eq!(sync.offset(), 2);
        assert_eq!(sync.get_comment_by_id("c2").unwrap().author.name, "brook");
        assert!(sync.get_comment_by_id("never-added").is_none());

        let get = &transport.calls_with_method("GET")[0];
        assert!(get.url.contains("/api/v4/comments/answers/99"));
        assert!(get.url.contains("offset=0"));
    }

    #[tokio::test]
    async fn test_child_scope_targets_child_endpoint() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("r1", "ada")], Some(true)));
        let sync = child_sync(transport.clone());

        sync.refresh().await;

        let get = &transport.calls_with_method("GET")[0];
        assert!(get.url.contains("/api/v4/comments/c1/child_comments"));
        assert!(sync.is_end());
    }

    #[tokio::test]
    async fn test_load_more_appends_and_extends_index() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(false)));
        transport.push_ok(&page(vec![comment_record("c2", "brook")], Some(false)));
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        sync.load_more().await;

        assert_eq!(sync.comments().len(), 2);
        assert!(sync.get_comment_by_id("c1").is_some());
        assert!(sync.get_comment_by_id("c2").is_some());
        assert!(transport.calls_with_method("GET")[1].url.contains("offset=1"));
    }

    #[tokio::test]
    async fn test_duplicate_comment_ids_merged_once() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(
            vec![comment_record("c1", "ada"), comment_record("c2", "ada")],
            Some(false),
        ));
        transport.push_ok(&page(
            vec![comment_record("c2", "ada"), comment_record("c3", "ada")],
            Some(false),
        ));
        let sync = root_sync(transport);

        sync.refresh().await;
        sync.load_more().await;

        let ids: Vec<_> = sync.comments().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(sync.offset(), 3);
    }

    #[tokio::test]
    async fn test_empty_page_ends_thread() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![], None));
        let sync = root_sync(transport.clone());

        sync.refresh().await;

        assert!(sync.is_end());
        sync.load_more().await;
        assert_eq!(transport.calls_with_method("GET").len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_load_more_admits_one_fetch() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(false)));
        let gate = transport.push_gated_ok(&page(vec![comment_record("c2", "ada")], Some(false)));
        let sync = root_sync(transport.clone());

        sync.refresh().await;

        let in_flight = {
            let sync = sync.clone();
            tokio::spawn(async move { sync.load_more().await })
        };
        {
            let transport = transport.clone();
            wait_until(move || transport.calls_with_method("GET").len() == 2).await;
        }

        sync.load_more().await;
        assert_eq!(transport.calls_with_method("GET").len(), 2);

        gate.notify_one();
        in_flight.await.unwrap();
        assert_eq!(sync.comments().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_page_discarded_after_refresh() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(false)));
        let gate = transport.push_gated_ok(&page(vec![comment_record("c2", "ada")], Some(false)));
        transport.push_ok(&page(vec![comment_record("c9", "eve")], Some(false)));
        let sync = root_sync(transport.clone());

        sync.refresh().await;

        let stale = {
            let sync = sync.clone();
            tokio::spawn(async move { sync.load_more().await })
        };
        {
            let transport = transport.clone();
            wait_until(move || transport.calls_with_method("GET").len() == 2).await;
        }

        sync.refresh().await;
        gate.notify_one();
        stale.await.unwrap();

        let ids: Vec<_> = sync.comments().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["c9"]);
        assert!(sync.get_comment_by_id("c2").is_none());
    }

    #[tokio::test]
    async fn test_error_status_rolls_back() {
        let transport = Arc::new(MockTransport::new());
        transport.push_status(500, "boom");
        let sync = root_sync(transport);

        sync.refresh().await;

        assert!(sync.error_message().unwrap().contains("500"));
        assert!(!sync.is_loading());
        assert!(sync.comments().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_like_confirms_before_flipping() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        transport.push_ok("{}");
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        assert_ok!(sync.toggle_like_comment("c1").await);

        let comment = sync.get_comment_by_id("c1").unwrap();
        assert!(comment.liked);
        assert_eq!(comment.like_count, 3);

        let post = &transport.calls_with_method("POST")[0];
        assert!(post.url.ends_with("/api/v4/comments/c1/actions/like"));
        assert_eq!(post.fields, vec![("action".to_string(), "like".to_string())]);
    }

    #[tokio::test]
    async fn test_toggle_like_twice_round_trips() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        transport.push_ok("{}");
        transport.push_ok("{}");
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        assert_ok!(sync.toggle_like_comment("c1").await);
        assert_ok!(sync.toggle_like_comment("c1").await);

        let comment = sync.get_comment_by_id("c1").unwrap();
        assert!(!comment.liked);
        assert_eq!(comment.like_count, 2);
        let posts = transport.calls_with_method("POST");
        assert_eq!(posts[1].fields[0].1, "unlike");
    }

    #[tokio::test]
    async fn test_toggle_like_failure_leaves_state_untouched() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        transport.push_error("connection reset");
        let sync = root_sync(transport);

        sync.refresh().await;
        assert_err!(sync.toggle_like_comment("c1").await);

        let comment = sync.get_comment_by_id("c1").unwrap();
        assert!(!comment.liked);
        assert_eq!(comment.like_count, 2);
        assert!(sync.error_message().is_some());
    }

    #[tokio::test]
    async fn test_double_tap_like_sends_one_request() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        let gate = transport.push_gated_ok("{}");
        let sync = root_sync(transport.clone());

        sync.refresh().await;

        let first = {
            let sync = sync.clone();
            tokio::spawn(async move { sync.toggle_like_comment("c1").await })
        };
        {
            let transport = transport.clone();
            wait_until(move || transport.calls_with_method("POST").len() == 1).await;
        }

        // Second tap while the first is in flight: no second request.
        assert_ok!(sync.toggle_like_comment("c1").await);
        assert_eq!(transport.calls_with_method("POST").len(), 1);

        gate.notify_one();
        assert_ok!(first.await.unwrap());
        assert!(sync.get_comment_by_id("c1").unwrap().liked);
    }

    #[tokio::test]
    async fn test_stale_like_confirmation_discarded() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        let gate = transport.push_gated_ok("{}");
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        let sync = root_sync(transport.clone());

        sync.refresh().await;

        let stale = {
            let sync = sync.clone();
            tokio::spawn(async move { sync.toggle_like_comment("c1").await })
        };
        {
            let transport = transport.clone();
            wait_until(move || transport.calls_with_method("POST").len() == 1).await;
        }

        sync.refresh().await;
        gate.notify_one();
        assert_ok!(stale.await.unwrap());

        // The rebuilt comment keeps its server-reported state.
        let comment = sync.get_comment_by_id("c1").unwrap();
        assert!(!comment.liked);
        assert_eq!(comment.like_count, 2);
    }

    #[tokio::test]
    async fn test_toggle_like_unknown_comment_errors() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![], Some(true)));
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        assert_err!(sync.toggle_like_comment("ghost").await);
        assert!(transport.calls_with_method("POST").is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_clears_draft() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        transport.push_ok("{}");
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        sync.set_draft("nice take");
        assert_ok!(sync.submit_comment().await);

        assert!(sync.draft().is_empty());
        let post = &transport.calls_with_method("POST")[0];
        assert!(post.url.ends_with("/api/v4/comments/answers/99"));
        assert_eq!(
            post.fields,
            vec![("content".to_string(), "nice take".to_string())]
        );
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_draft() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![comment_record("c1", "ada")], Some(true)));
        transport.push_status(403, "forbidden");
        let sync = root_sync(transport);

        sync.refresh().await;
        sync.set_draft("nice take");
        assert_err!(sync.submit_comment().await);

        assert_eq!(sync.draft(), "nice take");
        assert!(sync.error_message().unwrap().contains("403"));
    }

    #[tokio::test]
    async fn test_submit_blank_draft_is_a_noop() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![], Some(true)));
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        sync.set_draft("   ");
        assert_ok!(sync.submit_comment().await);
        assert_eq!(transport.calls_with_method("POST").len(), 0);
    }

    #[tokio::test]
    async fn test_submit_while_sending_is_a_noop() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![], Some(true)));
        let gate = transport.push_gated_ok("{}");
        let sync = root_sync(transport.clone());

        sync.refresh().await;
        sync.set_draft("once");

        let first = {
            let sync = sync.clone();
            tokio::spawn(async move { sync.submit_comment().await })
        };
        {
            let transport = transport.clone();
            wait_until(move || transport.calls_with_method("POST").len() == 1).await;
        }

        assert_ok!(sync.submit_comment().await);
        assert_eq!(transport.calls_with_method("POST").len(), 1);

        gate.notify_one();
        assert_ok!(first.await.unwrap());
    }

    #[tokio::test]
    async fn test_child_submit_carries_reply_reference() {
        let transport = Arc::new(MockTransport::new());
        transport.push_ok(&page(vec![], Some(true)));
        transport.push_ok("{}");
        let sync = child_sync(transport.clone());

        sync.refresh().await;
        sync.set_draft("replying");
        assert_ok!(sync.submit_comment().await);

        let post = &transport.calls_with_method("POST")[0];
        assert!(post.url.ends_with("/api/v4/comments/c1/child_comments"));
        assert!(post
            .fields
            .contains(&("reply_comment_id".to_string(), "c1".to_string())));
    }

    #[tokio::test]
    async fn test_dangling_reply_resolves_to_none() {
        let transport = Arc::new(MockTransport::new());
        let mut dangling = comment_record("c2", "brook");
        dangling["reply_comment_id"] = json!("vanished");
        transport.push_ok(&page(vec![comment_record("c1", "ada"), dangling], Some(true)));
        let sync = root_sync(transport);

        sync.refresh().await;

        let c2 = sync.get_comment_by_id("c2").unwrap();
        assert_eq!(c2.reply_target(), Some("vanished"));
        assert!(sync.resolve_reply(&c2).is_none());

        let mut resolved = sync.get_comment_by_id("c1").unwrap();
        resolved.reply_comment_id = Some("c2".to_string());
        assert_eq!(sync.resolve_reply(&resolved).unwrap().id, "c2");
    }
}
