//! Transcode job queue.
//!
//! Publishes [`v2m_models::TranscodeJob`] descriptors to a Redis stream with
//! at-least-once delivery. The gateway only publishes; consuming is the
//! transcode worker's side of the contract.

pub mod error;
pub mod publisher;

pub use error::{QueueError, QueueResult};
pub use publisher::{JobPublisher, JobSink, QueueConfig};
