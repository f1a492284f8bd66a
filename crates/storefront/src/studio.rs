//! Typed client for the studio image-processing service.
//!
//! These bindings mirror the service's generated contracts: upload an image,
//! re-run background removal on a stored image, and a health probe. The
//! shipped editor simulates the processing locally, so nothing in the cart
//! or pricing core calls this client; it exists for the upload step of the
//! design flow, which only ever consumes the final resolved [`ImageRef`].

use serde::Deserialize;
use sticker_craft_core::{ImageId, ImageRef};
use thiserror::Error;
use url::Url;

/// Errors that can occur when talking to the studio service.
#[derive(Debug, Error)]
pub enum StudioError {
    /// HTTP transport or response decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An endpoint path did not combine with the configured base URL.
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The service answered with a non-success status.
    #[error("studio API returned {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },
}

/// Service health probe response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response to an image upload: the service stores the original, runs
/// background removal, and hands back both IDs plus a preview.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageProcessingResponse {
    pub processed_image_id: ImageId,
    pub original_image_id: ImageId,
    pub preview_url: String,
}

impl ImageProcessingResponse {
    /// The reference the design session starts editing from.
    #[must_use]
    pub fn into_image_ref(self) -> ImageRef {
        ImageRef::new(self.processed_image_id, self.preview_url)
    }
}

/// Response to a standalone background-removal request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackgroundRemovalResponse {
    pub image_id: ImageId,
    pub preview_url: String,
}

impl BackgroundRemovalResponse {
    /// The processed image as a design-session reference.
    #[must_use]
    pub fn into_image_ref(self) -> ImageRef {
        ImageRef::new(self.image_id, self.preview_url)
    }
}

/// Client for the studio image-processing API.
#[derive(Debug, Clone)]
pub struct StudioClient {
    client: reqwest::Client,
    base_url: Url,
}

impl StudioClient {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    /// Probe the service.
    ///
    /// # Errors
    ///
    /// Returns a [`StudioError`] on transport failure or a non-success
    /// status.
    pub async fn check_health(&self) -> Result<HealthResponse, StudioError> {
        let response = self.client.get(self.endpoint("health")?).send().await?;
        decode(response).await
    }

    /// Upload an image for processing in the sticker designer.
    ///
    /// # Errors
    ///
    /// Returns a [`StudioError`] on transport failure, a rejected upload, or
    /// an undecodable response.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ImageProcessingResponse, StudioError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload")?)
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    /// Re-run background removal on a previously uploaded image.
    ///
    /// # Errors
    ///
    /// Returns a [`StudioError`] on transport failure, an unknown image ID,
    /// or an undecodable response.
    pub async fn remove_background(
        &self,
        image_id: &ImageId,
    ) -> Result<BackgroundRemovalResponse, StudioError> {
        let response = self
            .client
            .post(self.endpoint(&format!("remove-background/{image_id}"))?)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StudioError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(StudioError::UnexpectedStatus {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(response.json().await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> StudioClient {
        StudioClient::new(Url::parse("http://localhost:8000/").unwrap())
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client();
        assert_eq!(
            client.endpoint("health").unwrap().as_str(),
            "http://localhost:8000/health"
        );
        assert_eq!(
            client.endpoint("upload").unwrap().as_str(),
            "http://localhost:8000/upload"
        );
        assert_eq!(
            client
                .endpoint(&format!("remove-background/{}", ImageId::new("upload_1")))
                .unwrap()
                .as_str(),
            "http://localhost:8000/remove-background/upload_1"
        );
    }

    #[test]
    fn test_upload_response_decodes_and_converts() {
        let json = r#"{
            "processed_image_id": "processed_upload_42",
            "original_image_id": "upload_42",
            "preview_url": "data:image/png;base64,AAAA"
        }"#;
        let response: ImageProcessingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.original_image_id, ImageId::new("upload_42"));

        let image = response.into_image_ref();
        assert_eq!(image.id, ImageId::new("processed_upload_42"));
        assert_eq!(image.preview_url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_background_removal_response_decodes() {
        let json = r#"{
            "image_id": "processed_upload_42",
            "preview_url": "data:image/png;base64,BBBB"
        }"#;
        let response: BackgroundRemovalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.into_image_ref().id,
            ImageId::new("processed_upload_42")
        );
    }

    #[test]
    fn test_health_response_decodes() {
        let response: HealthResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(response.status, "ok");
    }
}
