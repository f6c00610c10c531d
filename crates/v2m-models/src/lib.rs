//! Shared data models for the vid2mp3 gateway.
//!
//! This crate provides Serde-serializable types for:
//! - Stored object keys (blob store identifiers)
//! - Access claims decoded from bearer tokens
//! - Transcode job descriptors published to the queue

pub mod claim;
pub mod job;
pub mod object_key;

// Re-export common types
pub use claim::AccessClaim;
pub use job::{JobId, TranscodeJob};
pub use object_key::{ObjectKey, ParseKeyError};
