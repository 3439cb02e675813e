//! Shared application state.
//!
//! The store, clock, and RNG seams are constructed once at startup and
//! injected here; nothing in the request path reaches for a global.

use std::sync::{Arc, Mutex};

use talehub_core::blob::BlobStore;
use talehub_core::clock::Clock;
use talehub_core::document::DocumentStore;
use talehub_core::rng::TokenRng;
use talehub_identity::service::IdentityService;
use talehub_stories::repository::StoryRepository;

use crate::config::AppConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The story repository.
    pub stories: StoryRepository,
    /// The identity service.
    pub identity: IdentityService,
    /// Blob store handle, for serving media.
    pub blobs: Arc<dyn BlobStore>,
    /// Server configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the state from the injected seams.
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn TokenRng + Send>>,
        config: AppConfig,
    ) -> Self {
        Self {
            stories: StoryRepository::new(documents.clone(), blobs.clone(), clock.clone()),
            identity: IdentityService::new(documents, clock, rng),
            blobs,
            config: Arc::new(config),
        }
    }
}
