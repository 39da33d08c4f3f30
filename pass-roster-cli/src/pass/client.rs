//! Pass2U REST client

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use super::models::{CreatePassResponse, ImageUploadResponse, PassRequest};
use super::service::{ImageSource, PassService};
use crate::config::Config;

const API_KEY_HEADER: &str = "x-api-key";
const JSON: &str = "application/json";
/// Declared type for every uploaded photo
const IMAGE_CONTENT_TYPE: &str = "image/png";

/// HTTP client for the Pass2U v2 API. Also downloads member photos.
#[derive(Debug, Clone)]
pub struct Pass2uClient {
    http: reqwest::Client,
    api_key: String,
    model_id: String,
    api_url: String,
}

impl Pass2uClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model_id: config.model_id.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn passes_endpoint(&self) -> String {
        format!("{}/v2/models/{}/passes", self.api_url, self.model_id)
    }

    pub fn images_endpoint(&self) -> String {
        format!("{}/v2/images", self.api_url)
    }

    /// Turn a non-2xx status into an error carrying the response body,
    /// otherwise decode the JSON body.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Pass2U returned {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse Pass2U response")
    }
}

#[async_trait]
impl PassService for Pass2uClient {
    async fn upload_image(&self, bytes: Vec<u8>) -> Result<String> {
        let url = self.images_endpoint();
        log::debug!("Uploading {} byte image to {}", bytes.len(), url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, IMAGE_CONTENT_TYPE)
            .body(bytes)
            .send()
            .await
            .with_context(|| format!("Failed to send image upload to {}", url))?;

        let uploaded: ImageUploadResponse = Self::parse_response(response).await?;
        Ok(uploaded.hex)
    }

    async fn create_pass(&self, request: &PassRequest) -> Result<String> {
        let url = self.passes_endpoint();
        log::debug!("Creating pass at {}", url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, JSON)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to send create-pass request to {}", url))?;

        let created: CreatePassResponse = Self::parse_response(response).await?;
        Ok(created.pass_id)
    }
}

#[async_trait]
impl ImageSource for Pass2uClient {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download image: {}", url))?
            .error_for_status()
            .with_context(|| format!("Image download failed: {}", url))?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read image body: {}", url))?;
        Ok(bytes.to_vec())
    }
}
