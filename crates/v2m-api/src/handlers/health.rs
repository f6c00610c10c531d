//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use v2m_queue::JobSink;
use v2m_storage::BlobStore;

use crate::state::AppState;

/// Per-dependency health flags, computed fresh on every request.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub video_store: bool,
    pub mp3_store: bool,
    pub queue: bool,
}

/// Health check endpoint.
///
/// Deliberately unauthenticated, and always a 200: a failed dependency check
/// sets its flag false rather than failing the probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(
        probe(
            state.videos.as_ref(),
            state.mp3s.as_ref(),
            state.queue.as_ref(),
        )
        .await,
    )
}

pub(crate) async fn probe<V, M, Q>(videos: &V, mp3s: &M, queue: &Q) -> HealthResponse
where
    V: BlobStore + ?Sized,
    M: BlobStore + ?Sized,
    Q: JobSink + ?Sized,
{
    let video_store = match videos.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Video store health check failed: {e}");
            false
        }
    };

    let mp3_store = match mp3s.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("MP3 store health check failed: {e}");
            false
        }
    };

    let queue = match queue.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Queue health check failed: {e}");
            false
        }
    };

    HealthResponse {
        video_store,
        mp3_store,
        queue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeQueue, FakeStore};

    #[tokio::test]
    async fn all_dependencies_reachable() {
        let status = probe(
            &FakeStore::default(),
            &FakeStore::default(),
            &FakeQueue::default(),
        )
        .await;

        assert!(status.video_store);
        assert!(status.mp3_store);
        assert!(status.queue);
    }

    #[tokio::test]
    async fn queue_outage_only_flips_the_queue_flag() {
        let status = probe(
            &FakeStore::default(),
            &FakeStore::default(),
            &FakeQueue::failing(),
        )
        .await;

        assert!(status.video_store);
        assert!(status.mp3_store);
        assert!(!status.queue);
    }

    #[tokio::test]
    async fn store_outage_only_flips_that_store_flag() {
        let status = probe(
            &FakeStore::failing_ping(),
            &FakeStore::default(),
            &FakeQueue::default(),
        )
        .await;

        assert!(!status.video_store);
        assert!(status.mp3_store);
        assert!(status.queue);
    }
}
