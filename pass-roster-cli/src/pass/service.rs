//! Remote seams of the pass pipeline

use anyhow::Result;
use async_trait::async_trait;

use super::models::PassRequest;

/// The pass-issuance service
#[async_trait]
pub trait PassService: Send + Sync {
    /// Upload raw image bytes, returning the reference token (`hex`)
    async fn upload_image(&self, bytes: Vec<u8>) -> Result<String>;

    /// Issue a pass from the configured template, returning its id
    async fn create_pass(&self, request: &PassRequest) -> Result<String>;
}

/// Where member photos are downloaded from
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}
