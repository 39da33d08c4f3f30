//! Photo download and re-upload to Pass2U

use super::service::{ImageSource, PassService};

/// Download the image at `url` and upload it to the pass service.
///
/// Returns the service's image token, or `None` when either step fails; the
/// caller then issues the pass without an image.
pub async fn upload_from_url(
    source: &dyn ImageSource,
    service: &dyn PassService,
    url: &str,
) -> Option<String> {
    let bytes = match source.fetch_image(url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to fetch image {}: {:#}", url, e);
            return None;
        }
    };

    match service.upload_image(bytes).await {
        Ok(hex) => {
            log::info!("Image uploaded successfully: {}", hex);
            Some(hex)
        }
        Err(e) => {
            log::error!("Failed to upload image {}: {:#}", url, e);
            None
        }
    }
}
