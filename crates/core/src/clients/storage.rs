use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::app_state::StorageInfo;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{error, info};

/// Object storage reached over its REST interface.
#[derive(Clone)]
pub struct StorageClient {
    http: Client,
    base_url: Url,
    service_key: SecretString,
}

impl StorageClient {
    pub fn new(http: Client, config: &StorageInfo) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.storage_url.trim_end_matches('/'))
            .map_err(|_| ApiError::Internal("Invalid storage URL".into()))?;

        Ok(Self {
            http,
            base_url,
            service_key: config.service_key.clone(),
        })
    }

    fn object_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Internal("Invalid storage URL path".into()))?;
            path.pop_if_empty();
            for segment in segments {
                path.extend(segment.split('/').filter(|s| !s.is_empty()));
            }
        }
        Ok(url)
    }

    pub fn public_url(&self, bucket: &str, object_path: &str) -> Result<String, ApiError> {
        Ok(self
            .object_url(&["object", "public", bucket, object_path])?
            .to_string())
    }

    /// Writes the object, replacing any existing one, and returns its public URL.
    pub async fn upload(
        &self,
        bucket: &str,
        object_path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let url = self.object_url(&["object", bucket, object_path])?;
        let size = bytes.len();

        let resp = self
            .http
            .post(url)
            .timeout(Duration::from_secs(30))
            .bearer_auth(self.service_key.expose_secret())
            .header("apikey", self.service_key.expose_secret())
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ApiError::Storage(format!("Storage unreachable: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(bucket, object_path, %status, "Storage upload failed: {}", body);
            return Err(ApiError::Storage(format!(
                "Upload of {}/{} failed with {}",
                bucket, object_path, status
            )));
        }

        info!(bucket, object_path, size, "Stored object");
        self.public_url(bucket, object_path)
    }
}
