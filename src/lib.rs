//! # Freshet
//!
//! A client-side sync engine for paginated feeds and comment threads.
//!
//! ## Architecture
//!
//! Freshet follows a modular pipeline architecture:
//!
//! ```text
//! Transport → Classifier → Synchronizer → subscribers
//! ```
//!
//! - [`transport`]: HTTP client behind a trait, with an injected
//!   request-signing hook and the platform's route table
//! - [`classifier`]: assigns raw feed records their target variant and
//!   projects them into display items (or filters them, with a reason)
//! - [`sync`]: the feed and comment thread synchronizers plus the
//!   pagination cursor that gates all fetching
//!
//! ## Design
//!
//! Each synchronizer owns one ordered list and its pagination cursor.
//! The cursor's `begin_fetch` admission gate guarantees at most one
//! in-flight fetch per list; an epoch counter bumped on refresh and
//! teardown guarantees stale completions are discarded instead of being
//! merged into a reset list. Read-marking runs as a detached task whose
//! failure is logged and never joined into the fetch result.
//!
//! ## Modules
//!
//! - [`app`]: application context and error types
//! - [`cli`]: command-line interface for the demo binary
//! - [`classifier`]: target classification, filtering and projection
//! - [`config`]: configuration (base URL, filter rules)
//! - [`domain`]: core domain models (FeedItem, DisplayItem, CommentItem)
//! - [`sync`]: the synchronizers and pagination cursor
//! - [`transport`]: HTTP transport trait, reqwest implementation, routes

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together transport,
/// routes and classifier; synchronizers are created from it per screen.
pub mod app;

/// Target classification, display filtering and projection.
pub mod classifier;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/freshet/config.toml`: the platform base URL and
/// the blocked-author/blocked-keyword filter rules.
pub mod config;

/// Core domain models.
///
/// - [`FeedItem`](domain::feed::FeedItem): one feed entry and its target
/// - [`DisplayItem`](domain::display::DisplayItem): derived projection
/// - [`CommentItem`](domain::comment::CommentItem): one thread comment
pub mod domain;

/// The synchronizers.
///
/// - [`PaginationCursor`](sync::cursor::PaginationCursor): offset/end/
///   in-flight state, the single admission gate
/// - [`FeedSynchronizer`](sync::feed::FeedSynchronizer): home and
///   question streams
/// - [`CommentSynchronizer`](sync::comment::CommentSynchronizer): root
///   and child comment threads
pub mod sync;

/// HTTP transport.
///
/// - [`Transport`](transport::Transport): async trait over GET/POST
/// - [`HttpTransport`](transport::http::HttpTransport): reqwest-based
///   implementation applying the [`RequestSigner`](transport::RequestSigner)
/// - [`Routes`](transport::routes::Routes): endpoint URL builders
pub mod transport;
