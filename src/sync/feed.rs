use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::classifier::{classify, Classifier};
use crate::domain::display::{DisplayItem, DisplayMode};
use crate::domain::feed::{FeedEnvelope, FeedItem, FeedRecord, FeedTarget};
use crate::sync::cursor::PaginationCursor;
use crate::transport::routes::Routes;
use crate::transport::Transport;

/// Which stream this synchronizer is paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    Home,
    Question { question_id: u64 },
}

impl FeedMode {
    fn display_mode(self) -> DisplayMode {
        match self {
            FeedMode::Home => DisplayMode::Feed,
            FeedMode::Question { .. } => DisplayMode::Question,
        }
    }
}

struct FeedState {
    feeds: Vec<FeedItem>,
    display: Vec<DisplayItem>,
    cursor: PaginationCursor,
    mode: FeedMode,
    epoch: u64,
    error: Option<String>,
    closed: bool,
    /// Feed ids already merged, so a re-served record is appended once.
    seen: HashSet<String>,
    /// Answer ids already reported to the touch endpoint.
    touched: HashSet<u64>,
}

/// Synchronizes one paginated feed list (home recommendations or a
/// question's answers) against the remote API.
///
/// One instance per screen. All state lives behind a mutex locked only for
/// short critical sections, never across an await; operations take `&self`
/// so the synchronizer can be shared via `Arc` and invoked concurrently.
/// Overlapping `load_more` calls are serialized by the cursor's admission
/// gate; `refresh` supersedes in-flight work through the epoch counter.
pub struct FeedSynchronizer {
    transport: Arc<dyn Transport>,
    routes: Routes,
    classifier: Classifier,
    state: Mutex<FeedState>,
    changes: watch::Sender<u64>,
}

impl FeedSynchronizer {
    pub fn new(transport: Arc<dyn Transport>, routes: Routes, classifier: Classifier) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            transport,
            routes,
            classifier,
            state: Mutex::new(FeedState {
                feeds: Vec::new(),
                display: Vec::new(),
                cursor: PaginationCursor::new(),
                mode: FeedMode::Home,
                epoch: 0,
                error: None,
                closed: false,
                seen: HashSet::new(),
                touched: HashSet::new(),
            }),
            changes,
        }
    }

    /// Clear everything and rebuild the home stream from offset 0.
    pub async fn refresh(&self) {
        self.restart(FeedMode::Home).await;
    }

    /// Same as `refresh`, targeting one question's answer stream.
    pub async fn refresh_question(&self, question_id: u64) {
        self.restart(FeedMode::Question { question_id }).await;
    }

    /// Append the next page. Silent no-op while a fetch is in flight or the
    /// list is exhausted.
    pub async fn load_more(&self) {
        self.fetch_cycle().await;
    }

    /// Tear down: any in-flight fetch's eventual completion is discarded.
    pub fn close(&self) {
        let mut state = self.lock_state();
        state.closed = true;
        state.epoch += 1;
    }

    /// Revision counter bumped on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn items(&self) -> Vec<FeedItem> {
        self.lock_state().feeds.clone()
    }

    pub fn display_items(&self) -> Vec<DisplayItem> {
        self.lock_state().display.clone()
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

    async fn restart(&self, mode: FeedMode) {
        {
            let mut state = self.lock_state();
            if state.closed {
                return;
            }
            state.epoch += 1;
            state.mode = mode;
            state.cursor.reset();
            state.feeds.clear();
            state.display.clear();
            state.seen.clear();
            state.error = None;
        }
        self.notify();
        self.fetch_cycle().await;
    }

    async fn fetch_cycle(&self) {
        // Admission and the pre-fetch snapshot happen under one lock.
        let (epoch, display_mode, url, touch_ids) = {
            let mut state = self.lock_state();
            if state.closed || !state.cursor.begin_fetch() {
                return;
            }
            let url = match state.mode {
                FeedMode::Home => self.routes.recommend_feed(state.cursor.offset()),
                FeedMode::Question { question_id } => self
                    .routes
                    .question_feeds(question_id, state.cursor.offset()),
            };
            let touch_ids = Self::untouched_answer_ids(&mut state);
            (state.epoch, state.mode.display_mode(), url, touch_ids)
        };

        // Read-marking is fire and forget: detached, logged on failure,
        // never joined into the fetch result.
        if !touch_ids.is_empty() {
            let transport = self.transport.clone();
            let touch_url = self.routes.touch();
            tokio::spawn(async move {
                mark_touched(transport, touch_url, touch_ids).await;
            });
        }

        match self.transport.get(&url).await {
            Err(e) => self.fail(epoch, format!("Failed to fetch feed: {e}")),
            Ok(response) if !response.is_success() => self.fail(
                epoch,
                format!("Feed request failed with status {}", response.status),
            ),
            Ok(response) => match FeedEnvelope::parse(&response.body) {
                Ok(envelope) => self.commit(epoch, display_mode, envelope),
                Err(e) => {
                    tracing::error!(error = %e, payload = %response.body, "Malformed feed response");
                    self.fail(epoch, e.to_string());
                }
            },
        }
    }

    fn commit(&self, epoch: u64, display_mode: DisplayMode, envelope: FeedEnvelope) {
        let page_was_empty = envelope.data.is_empty();
        let server_end = envelope.paging.is_end == Some(true);

        // Classification and projection stay outside the lock; a concurrent
        // refresh invalidates the whole batch via the epoch anyway.
        let prepared: Vec<(FeedItem, DisplayItem)> = envelope
            .data
            .into_iter()
            .filter_map(into_feed_item)
            .map(|item| {
                let display = self.classifier.project(&item.target, display_mode);
                (item, display)
            })
            .collect();

        let mut state = self.lock_state();
        if state.closed || state.epoch != epoch {
            tracing::debug!("Discarding stale feed page");
            return;
        }

        let mut appended = 0;
        for (item, display) in prepared {
            if !item.id.is_empty() && !state.seen.insert(item.id.clone()) {
                continue;
            }
            state.feeds.push(item);
            state.display.push(display);
            appended += 1;
        }
        state
            .cursor
            .complete_fetch(appended, server_end || page_was_empty);
        state.error = None;
        drop(state);
        self.notify();
    }

    fn fail(&self, epoch: u64, message: String) {
        let mut state = self.lock_state();
        if state.closed || state.epoch != epoch {
            tracing::debug!("Discarding stale feed fetch failure");
            return;
        }
        tracing::error!(%message, "Feed fetch failed");
        state.cursor.abort_fetch();
        state.error = Some(message);
        drop(state);
        self.notify();
    }

    /// Non-filtered answers currently on display that the server has not
    /// been told about yet. Marks them sent so later cycles skip them.
    fn untouched_answer_ids(state: &mut FeedState) -> Vec<u64> {
        let mut ids = Vec::new();
        for (item, display) in state.feeds.iter().zip(state.display.iter()) {
            if display.filtered {
                continue;
            }
            if let FeedTarget::Answer(answer) = &item.target {
                if !state.touched.contains(&answer.id) {
                    ids.push(answer.id);
                }
            }
        }
        for id in &ids {
            state.touched.insert(*id);
        }
        ids
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FeedState> {
        self.state.lock().expect("feed state mutex poisoned")
    }

    fn notify(&self) {
        self.changes.send_modify(|rev| *rev += 1);
    }
}

/// Classify a raw record, dropping advertisements entirely: they are never
/// stored and never displayed.
fn into_feed_item(record: FeedRecord) -> Option<FeedItem> {
    let target = classify(&record.target);
    if matches!(target, FeedTarget::Advertisement) {
        return None;
    }
    let id = record.id.unwrap_or_else(|| fallback_id(&target));
    Some(FeedItem {
        id,
        target,
        cursor: record.cursor,
    })
}

fn fallback_id(target: &FeedTarget) -> String {
    match target {
        FeedTarget::Answer(a) => format!("answer:{}", a.id),
        FeedTarget::Article(a) => format!("article:{}", a.id),
        // No stable identity; exempt from deduplication.
        FeedTarget::Advertisement | FeedTarget::Unknown { .. } => String::new(),
    }
}

async fn mark_touched(transport: Arc<dyn Transport>, url: String, answer_ids: Vec<u64>) {
    let items: Vec<serde_json::Value> = answer_ids
        .iter()
        .map(|id| serde_json::json!(["answer", id, "touch"]))
        .collect();
    let fields = vec![(
        "items".to_string(),
        serde_json::Value::Array(items).to_string(),
    )];
    match transport.post_multipart(&url, &fields).await {
        Ok(response) if response.is_success() => {
            tracing::debug!(count = answer_ids.len(), "Marked answers as touched");
        }
        Ok(response) => {
            tracing::error!(status = response.status, body = %response.body, "Touch-marking rejected");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to mark answers as touched");
        }
    }
}
