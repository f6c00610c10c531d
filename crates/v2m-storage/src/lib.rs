//! S3-compatible blob store client.
//!
//! The gateway talks to two logically separate stores (uploaded videos,
//! transcoded mp3s); each gets its own [`BlobClient`] configured from a
//! distinct env prefix. Handlers depend on the [`BlobStore`] trait so tests
//! can substitute fakes.

pub mod client;
pub mod error;

pub use client::{BlobClient, BlobConfig, BlobStore};
pub use error::{StorageError, StorageResult};
