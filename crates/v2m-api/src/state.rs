//! Application state.

use std::sync::Arc;

use v2m_auth::IdentityClient;
use v2m_queue::JobPublisher;
use v2m_storage::BlobClient;

use crate::config::ApiConfig;

/// Shared application state.
///
/// The blob, queue, and identity clients connect once at startup and are
/// shared across requests behind `Arc`; handlers reach them only through
/// this state, never through globals.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub videos: Arc<BlobClient>,
    pub mp3s: Arc<BlobClient>,
    pub queue: Arc<JobPublisher>,
    pub identity: Arc<IdentityClient>,
}

impl AppState {
    /// Create new application state from the environment.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let videos = BlobClient::from_env("VIDEO_STORE")?;
        let mp3s = BlobClient::from_env("MP3_STORE")?;
        let queue = JobPublisher::from_env()?;
        let identity = IdentityClient::from_env()?;

        Ok(Self {
            config,
            videos: Arc::new(videos),
            mp3s: Arc::new(mp3s),
            queue: Arc::new(queue),
            identity: Arc::new(identity),
        })
    }
}
