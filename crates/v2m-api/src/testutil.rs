//! Hand-rolled fakes for the blob store and job queue trait seams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use v2m_models::{ObjectKey, TranscodeJob};
use v2m_queue::{JobSink, QueueError, QueueResult};
use v2m_storage::{BlobStore, StorageError, StorageResult};

/// In-memory blob store with injectable faults.
#[derive(Default)]
pub struct FakeStore {
    pub objects: Mutex<HashMap<ObjectKey, Vec<u8>>>,
    pub fail_put: bool,
    pub fail_get: bool,
    pub fail_ping: bool,
    pub gets: AtomicUsize,
}

impl FakeStore {
    pub fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Self::default()
        }
    }

    pub fn failing_ping() -> Self {
        Self {
            fail_ping: true,
            ..Self::default()
        }
    }

    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for FakeStore {
    async fn put_bytes(&self, data: Vec<u8>, _content_type: &str) -> StorageResult<ObjectKey> {
        if self.fail_put {
            return Err(StorageError::upload_failed("injected put fault"));
        }
        let key = ObjectKey::generate();
        self.objects.lock().unwrap().insert(key, data);
        Ok(key)
    }

    async fn get_bytes(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get {
            return Err(StorageError::DownloadFailed("injected get fault".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key.to_string()))
    }

    async fn ping(&self) -> StorageResult<()> {
        if self.fail_ping {
            return Err(StorageError::AwsSdk("injected ping fault".into()));
        }
        Ok(())
    }
}

/// In-memory job sink with an injectable fault.
#[derive(Default)]
pub struct FakeQueue {
    pub published: Mutex<Vec<TranscodeJob>>,
    pub fail: bool,
}

impl FakeQueue {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published_jobs(&self) -> Vec<TranscodeJob> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSink for FakeQueue {
    async fn publish(&self, job: &TranscodeJob) -> QueueResult<String> {
        if self.fail {
            return Err(QueueError::publish_failed("injected publish fault"));
        }
        let mut published = self.published.lock().unwrap();
        published.push(job.clone());
        Ok(format!("0-{}", published.len()))
    }

    async fn ping(&self) -> QueueResult<()> {
        if self.fail {
            return Err(QueueError::connection_failed("injected ping fault"));
        }
        Ok(())
    }
}
