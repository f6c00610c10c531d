//! Upload ingestion and download retrieval.

use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, info};

use v2m_models::{AccessClaim, ObjectKey, TranscodeJob};
use v2m_queue::JobSink;
use v2m_storage::BlobStore;

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Upload a video for transcoding.
///
/// Requires exactly one multipart file part. On success the video is in the
/// blob store and a transcode job referencing it is on the queue.
pub async fn upload(
    State(state): State<AppState>,
    user: AdminUser,
    multipart: Multipart,
) -> ApiResult<&'static str> {
    let (data, content_type) = read_single_file(multipart).await?;

    let key = ingest(
        state.videos.as_ref(),
        state.queue.as_ref(),
        &user.claim,
        data,
        &content_type,
    )
    .await?;

    info!(%key, user = %user.claim.sub, "Upload accepted");
    Ok("success!")
}

/// Pull the single file part out of the multipart body.
///
/// Zero or more than one part is a client error; nothing has touched the
/// store or the queue at that point.
async fn read_single_file(mut multipart: Multipart) -> ApiResult<(Vec<u8>, String)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
        .ok_or_else(|| ApiError::bad_request("exactly 1 file required"))?;

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
        .to_vec();

    let extra = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?;
    if extra.is_some() {
        return Err(ApiError::bad_request("exactly 1 file required"));
    }

    Ok((data, content_type))
}

/// Store the video, then publish the transcode job.
///
/// Store-write happens-before publish; publish is never attempted when the
/// write fails. A publish failure after a successful write leaves the blob
/// in place (no compensating delete) and surfaces as `StoredNotQueued`.
pub(crate) async fn ingest<S, Q>(
    videos: &S,
    queue: &Q,
    claim: &AccessClaim,
    data: Vec<u8>,
    content_type: &str,
) -> Result<ObjectKey, ApiError>
where
    S: BlobStore + ?Sized,
    Q: JobSink + ?Sized,
{
    let key = videos.put_bytes(data, content_type).await?;

    let job = TranscodeJob::new(key, claim.sub.clone());
    match queue.publish(&job).await {
        Ok(message_id) => {
            metrics::record_job_enqueued();
            info!(%key, %message_id, "Transcode job queued");
            Ok(key)
        }
        Err(source) => {
            metrics::record_orphaned_upload();
            error!(%key, error = %source, "Object stored but transcode job not queued");
            Err(ApiError::StoredNotQueued { key, source })
        }
    }
}

/// Download query params.
#[derive(Deserialize)]
pub struct DownloadQuery {
    pub fid: Option<String>,
}

/// Download a transcoded MP3 by stored object key.
pub async fn download(
    State(state): State<AppState>,
    user: AdminUser,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let key = resolve_fid(query.fid)?;

    let bytes = fetch(state.mp3s.as_ref(), &key).await?;

    info!(%key, user = %user.claim.sub, "Download served");

    let disposition = format!("attachment; filename=\"{key}.mp3\"");
    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Validate the caller-supplied `fid` before any store access.
fn resolve_fid(fid: Option<String>) -> Result<ObjectKey, ApiError> {
    let fid = fid
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("fid is required"))?;
    ObjectKey::parse(&fid).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Fetch the MP3 from the audio store.
///
/// Not-found and transient store faults are deliberately not distinguished;
/// both surface as a generic server error.
pub(crate) async fn fetch<S>(mp3s: &S, key: &ObjectKey) -> Result<Vec<u8>, ApiError>
where
    S: BlobStore + ?Sized,
{
    mp3s.get_bytes(key).await.map_err(ApiError::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeQueue, FakeStore};
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, StatusCode};

    fn admin_claim() -> AccessClaim {
        AccessClaim {
            sub: "ops@example.com".to_string(),
            admin: true,
        }
    }

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[tokio::test]
    async fn published_job_references_the_stored_key() {
        let store = FakeStore::default();
        let queue = FakeQueue::default();

        let key = ingest(
            &store,
            &queue,
            &admin_claim(),
            b"0123456789".to_vec(),
            "video/mp4",
        )
        .await
        .unwrap();

        let jobs = queue.published_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].object_key, key);
        assert_eq!(jobs[0].requested_by, "ops@example.com");
        assert!(store.contains(&key));
    }

    #[tokio::test]
    async fn store_fault_skips_publish() {
        let store = FakeStore::failing_put();
        let queue = FakeQueue::default();

        let err = ingest(&store, &queue, &admin_claim(), b"data".to_vec(), "video/mp4")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Storage(_)));
        assert!(queue.published_jobs().is_empty());
    }

    #[tokio::test]
    async fn publish_fault_leaves_a_retrievable_orphan() {
        let store = FakeStore::default();
        let queue = FakeQueue::failing();

        let err = ingest(
            &store,
            &queue,
            &admin_claim(),
            b"orphan-bytes".to_vec(),
            "video/mp4",
        )
        .await
        .unwrap_err();

        let key = match &err {
            ApiError::StoredNotQueued { key, .. } => *key,
            other => panic!("expected StoredNotQueued, got {other:?}"),
        };
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);

        // Orphaned, not lost: the blob is still retrievable from the store.
        let bytes = store.get_bytes(&key).await.unwrap();
        assert_eq!(bytes, b"orphan-bytes");
    }

    #[tokio::test]
    async fn missing_fid_is_a_client_error() {
        for fid in [None, Some(String::new())] {
            let err = resolve_fid(fid).unwrap_err();
            assert!(err.to_string().contains("fid is required"));
            assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn malformed_fid_is_rejected_without_store_access() {
        let store = FakeStore::default();

        let err = resolve_fid(Some("not-an-object-id".to_string())).unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);

        // resolve_fid failing means fetch never runs.
        assert_eq!(store.get_count(), 0);
    }

    #[tokio::test]
    async fn missing_object_folds_into_server_error() {
        let store = FakeStore::default();

        let err = fetch(&store, &ObjectKey::generate()).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.get_count(), 1);
    }

    fn multipart_request(parts: &[&str]) -> Request<Body> {
        let boundary = "test-boundary";
        let mut body = String::new();
        for (i, content) in parts.iter().enumerate() {
            body.push_str(&format!(
                "--{boundary}\r\n\
                 Content-Disposition: form-data; name=\"file{i}\"; filename=\"clip{i}.mp4\"\r\n\
                 Content-Type: video/mp4\r\n\r\n\
                 {content}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::builder()
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract_multipart(request: Request<Body>) -> Multipart {
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn single_part_upload_is_accepted() {
        let multipart = extract_multipart(multipart_request(&["0123456789"])).await;

        let (data, content_type) = read_single_file(multipart).await.unwrap();
        assert_eq!(data, b"0123456789");
        assert_eq!(content_type, "video/mp4");
    }

    #[tokio::test]
    async fn zero_parts_is_a_client_error() {
        let multipart = extract_multipart(multipart_request(&[])).await;

        let err = read_single_file(multipart).await.unwrap_err();
        assert!(err.to_string().contains("exactly 1 file required"));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn two_parts_is_a_client_error() {
        let multipart = extract_multipart(multipart_request(&["first", "second"])).await;

        let err = read_single_file(multipart).await.unwrap_err();
        assert!(err.to_string().contains("exactly 1 file required"));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
