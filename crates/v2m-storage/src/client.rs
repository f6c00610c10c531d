//! Blob store client implementation.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use v2m_models::ObjectKey;

use crate::error::{StorageError, StorageResult};

/// Narrow interface the gateway needs from a blob store.
///
/// The key returned by `put_bytes` is minted by the store adapter, never by
/// the caller.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write an object and return the key the store assigned to it.
    async fn put_bytes(&self, data: Vec<u8>, content_type: &str) -> StorageResult<ObjectKey>;

    /// Fetch an object by key.
    async fn get_bytes(&self, key: &ObjectKey) -> StorageResult<Vec<u8>>;

    /// Check connectivity to the store.
    async fn ping(&self) -> StorageResult<()>;
}

/// Configuration for one blob store.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// S3 API endpoint URL
    pub endpoint_url: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Bucket name
    pub bucket: String,
    /// Region ("auto" for R2-style endpoints)
    pub region: String,
}

impl BlobConfig {
    /// Create config from environment variables under a prefix, e.g.
    /// `VIDEO_STORE_ENDPOINT_URL` for prefix `VIDEO_STORE`.
    pub fn from_env(prefix: &str) -> StorageResult<Self> {
        Ok(Self {
            endpoint_url: require_var(prefix, "ENDPOINT_URL")?,
            access_key_id: require_var(prefix, "ACCESS_KEY_ID")?,
            secret_access_key: require_var(prefix, "SECRET_ACCESS_KEY")?,
            bucket: require_var(prefix, "BUCKET")?,
            region: std::env::var(format!("{prefix}_REGION"))
                .unwrap_or_else(|_| "auto".to_string()),
        })
    }
}

fn require_var(prefix: &str, name: &str) -> StorageResult<String> {
    let key = format!("{prefix}_{name}");
    std::env::var(&key).map_err(|_| StorageError::config_error(format!("{key} not set")))
}

/// Client for one S3-compatible bucket.
#[derive(Clone)]
pub struct BlobClient {
    client: Client,
    bucket: String,
}

impl BlobClient {
    /// Create a new client from configuration.
    pub fn new(config: BlobConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "v2m",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket,
        }
    }

    /// Create from environment variables under a prefix.
    pub fn from_env(prefix: &str) -> StorageResult<Self> {
        Ok(Self::new(BlobConfig::from_env(prefix)?))
    }

    async fn put_object(&self, data: Vec<u8>, content_type: &str) -> StorageResult<ObjectKey> {
        let key = ObjectKey::generate();
        debug!("Uploading {} bytes to {}/{}", data.len(), self.bucket, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.to_string())
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        info!("Stored object {}/{}", self.bucket, key);
        Ok(key)
    }

    async fn get_object(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        debug!("Downloading {}/{}", self.bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key.to_string())
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") {
                    StorageError::not_found(key.to_string())
                } else {
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    async fn head_bucket(&self) -> StorageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StorageError::AwsSdk(format!("connectivity check failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for BlobClient {
    async fn put_bytes(&self, data: Vec<u8>, content_type: &str) -> StorageResult<ObjectKey> {
        self.put_object(data, content_type).await
    }

    async fn get_bytes(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        self.get_object(key).await
    }

    async fn ping(&self) -> StorageResult<()> {
        self.head_bucket().await
    }
}
