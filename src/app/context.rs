use std::sync::Arc;

use crate::app::Result;
use crate::classifier::Classifier;
use crate::config::Config;
use crate::domain::comment::ContentRef;
use crate::sync::{CommentScope, CommentSynchronizer, FeedSynchronizer};
use crate::transport::http::HttpTransport;
use crate::transport::routes::Routes;
use crate::transport::{RequestSigner, Transport};

/// Wires the engine together: one transport and route table shared by all
/// synchronizers created from this context.
pub struct AppContext {
    pub transport: Arc<dyn Transport>,
    pub routes: Routes,
    pub classifier: Classifier,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Attach a request signer; signing itself is opaque to the engine.
    pub fn with_signer(config: &Config, signer: Arc<dyn RequestSigner>) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::with_signer(signer)))
    }

    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            transport,
            routes: Routes::new(&config.api.base_url)?,
            classifier: Classifier::new(config.filters.clone()),
        })
    }

    /// A fresh synchronizer for one feed screen. Instances are independent
    /// and never shared across screens.
    pub fn feed_synchronizer(&self) -> FeedSynchronizer {
        FeedSynchronizer::new(
            self.transport.clone(),
            self.routes.clone(),
            self.classifier.clone(),
        )
    }

    /// A fresh synchronizer for a content's root comment thread.
    pub fn root_comments(&self, content: ContentRef) -> CommentSynchronizer {
        CommentSynchronizer::new(
            self.transport.clone(),
            self.routes.clone(),
            CommentScope::Root { content },
        )
    }

    /// A fresh synchronizer for the replies under one root comment.
    pub fn child_comments(&self, root_comment_id: &str) -> CommentSynchronizer {
        CommentSynchronizer::new(
            self.transport.clone(),
            self.routes.clone(),
            CommentScope::Child {
                root_comment_id: root_comment_id.to_string(),
            },
        )
    }
}
