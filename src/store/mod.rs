//! Object storage for derived assets (preview images).
//!
//! The store is an external collaborator: the pipeline only needs opaque
//! put/delete of named blobs with a public URL on put. [`HttpBlobStore`]
//! speaks plain path-style HTTP against an S3-compatible gateway; request
//! signing, bucket policy and CDN fronting are deployment concerns.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, StatusCode};

use crate::error::store::StoreError;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under `key` and return its public URL.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Delete the blob under `key`. Deleting a key that does not exist is
    /// not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

pub struct HttpBlobStore {
    http: reqwest::Client,
    endpoint: String,
    bucket: String,
    access_token: Option<String>,
    public_base: String,
}

impl HttpBlobStore {
    pub fn new(
        http: reqwest::Client,
        endpoint: &str,
        bucket: &str,
        access_token: Option<String>,
        public_url: Option<String>,
    ) -> Self {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let public_base = public_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{}/{}", endpoint, bucket));

        Self {
            http,
            endpoint,
            bucket: bucket.to_string(),
            access_token,
            public_base,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let request = self
            .http
            .put(self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            // Preview images are linked from public pages.
            .header("x-amz-acl", "public-read")
            .body(bytes);

        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                key: key.to_string(),
            });
        }

        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let request = self.http.delete(self.object_url(key));
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(StoreError::UnexpectedStatus {
            status: status.as_u16(),
            key: key.to_string(),
        })
    }
}
