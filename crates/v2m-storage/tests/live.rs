//! Blob store integration tests against a live bucket.

use v2m_storage::{BlobClient, BlobStore};

/// Test store connectivity.
#[tokio::test]
#[ignore = "requires blob store credentials"]
async fn video_store_connectivity() {
    dotenvy::dotenv().ok();

    let client = BlobClient::from_env("VIDEO_STORE").expect("Failed to create blob client");

    client.ping().await.expect("Failed to ping video store");
}

/// Test put/get cycle with a store-assigned key.
#[tokio::test]
#[ignore = "requires blob store credentials"]
async fn put_then_get_roundtrip() {
    dotenvy::dotenv().ok();

    let client = BlobClient::from_env("VIDEO_STORE").expect("Failed to create blob client");

    let key = client
        .put_bytes(b"integration test content".to_vec(), "video/mp4")
        .await
        .expect("Failed to store object");

    println!("Stored object: {key}");

    let bytes = client.get_bytes(&key).await.expect("Failed to fetch object");
    assert_eq!(bytes, b"integration test content");
}
