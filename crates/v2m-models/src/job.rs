//! Transcode job descriptors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::object_key::ObjectKey;

/// Unique identifier for a transcode job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message published to the queue to trigger transcoding of a stored video.
///
/// Built by the upload handler from the key the video store assigned and the
/// claim subject; handed to the publisher and not retained afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeJob {
    /// Unique job ID
    pub job_id: JobId,
    /// Key of the uploaded video in the blob store
    pub object_key: ObjectKey,
    /// Subject of the access claim that requested the upload
    pub requested_by: String,
    /// When the job was created
    pub created_at: DateTime<Utc>,
}

impl TranscodeJob {
    /// Create a new transcode job for a stored object.
    pub fn new(object_key: ObjectKey, requested_by: impl Into<String>) -> Self {
        Self {
            job_id: JobId::new(),
            object_key,
            requested_by: requested_by.into(),
            created_at: Utc::now(),
        }
    }
}
