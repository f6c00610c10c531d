//! Job publisher using Redis Streams.

use async_trait::async_trait;
use tracing::{debug, info};

use v2m_models::TranscodeJob;

use crate::error::QueueResult;

/// Narrow interface the gateway needs from the job queue.
#[async_trait]
pub trait JobSink: Send + Sync {
    /// Publish a job; returns the broker-assigned message ID.
    async fn publish(&self, job: &TranscodeJob) -> QueueResult<String>;

    /// Check connectivity to the broker.
    async fn ping(&self) -> QueueResult<()>;
}

/// Queue configuration.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Redis URL
    pub redis_url: String,
    /// Stream name for transcode jobs
    pub stream_name: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            stream_name: "v2m:transcode".to_string(),
        }
    }
}

impl QueueConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            stream_name: std::env::var("QUEUE_STREAM")
                .unwrap_or_else(|_| "v2m:transcode".to_string()),
        }
    }
}

/// Transcode job publisher.
///
/// The `redis::Client` handle is shared across requests; every publish
/// obtains its own multiplexed async connection, so concurrent publishes
/// never interleave commands on the wire.
pub struct JobPublisher {
    client: redis::Client,
    config: QueueConfig,
}

impl JobPublisher {
    /// Create a new publisher.
    pub fn new(config: QueueConfig) -> QueueResult<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> QueueResult<Self> {
        Self::new(QueueConfig::from_env())
    }

    async fn xadd(&self, job: &TranscodeJob) -> QueueResult<String> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let payload = serde_json::to_string(job)?;

        let message_id: String = redis::cmd("XADD")
            .arg(&self.config.stream_name)
            .arg("*")
            .arg("job")
            .arg(&payload)
            .arg("key")
            .arg(job.object_key.to_string())
            .query_async(&mut conn)
            .await?;

        info!(
            "Enqueued transcode job {} for object {} with message ID {}",
            job.job_id, job.object_key, message_id
        );

        Ok(message_id)
    }

    async fn redis_ping(&self) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Queue ping: {pong}");
        Ok(())
    }
}

#[async_trait]
impl JobSink for JobPublisher {
    async fn publish(&self, job: &TranscodeJob) -> QueueResult<String> {
        self.xadd(job).await
    }

    async fn ping(&self) -> QueueResult<()> {
        self.redis_ping().await
    }
}
