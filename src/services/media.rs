use bytes::Bytes;
use reqwest::{header::USER_AGENT, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(thiserror::Error, Debug)]
pub enum FetchErrorKind {
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

/// Fetches the whole body into memory
#[instrument(skip_all, fields(%url))]
pub async fn fetch_bytes(client: &Client, url: &str, user_agent: &str, timeout: Duration) -> Result<Bytes, FetchErrorKind> {
    let resp = client.get(url).header(USER_AGENT, user_agent).timeout(timeout).send().await?;
    let status = resp.status();
    if status != StatusCode::OK {
        return Err(FetchErrorKind::Status(status));
    }

    let bytes = resp.bytes().await?;
    debug!(len = bytes.len(), "Media fetched");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stub_server::{serve, Reply};

    #[tokio::test]
    async fn test_whole_body() {
        let (base_url, server) = serve(vec![Reply::bytes(200, &[0xFF, 0xD8, 0xFF, 0xE0])]).await;

        let bytes = fetch_bytes(&Client::new(), &format!("{base_url}/pic.jpg"), "test-agent/1.0", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(&bytes[..], [0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(server.await.unwrap()[0].header("user-agent"), Some("test-agent/1.0"));
    }

    #[tokio::test]
    async fn test_non_ok_status() {
        let (base_url, server) = serve(vec![Reply::bytes(404, b"")]).await;

        let res = fetch_bytes(&Client::new(), &format!("{base_url}/gone.mp4"), "test-agent/1.0", Duration::from_secs(5)).await;

        assert!(matches!(res, Err(FetchErrorKind::Status(StatusCode::NOT_FOUND))));
        server.await.unwrap();
    }
}
