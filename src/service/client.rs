//! HTTP client for the watermarking endpoint

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Response, Url};
use tracing::{debug, info, warn};

use super::error::{Result, ServiceError};
use crate::config::EndpointConfig;
use crate::state::data::{SubmissionRequest, UploadPart};

/// Media type assumed when a successful response carries no content type
const DEFAULT_RESPONSE_TYPE: &str = "image/png";

/// Image returned by the service
#[derive(Clone, PartialEq)]
pub struct ProcessedImage {
    pub bytes: Bytes,
    pub media_type: String,
}

impl std::fmt::Debug for ProcessedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessedImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Client for the single `POST` the service exposes.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct WatermarkClient {
    client: Client,
    url: Url,
    main_field: String,
    watermark_field: String,
}

impl WatermarkClient {
    /// Create a new client for the configured endpoint
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let url = Url::parse(&endpoint.url)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", endpoint.url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("watermarker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            url,
            main_field: endpoint.main_field.clone(),
            watermark_field: endpoint.watermark_field.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send both files and wait for the watermarked image.
    ///
    /// One attempt, no timeout: the service bounds the latency.
    pub async fn add_watermark(self, request: SubmissionRequest) -> Result<ProcessedImage> {
        let form = Form::new()
            .part(self.main_field.clone(), part(&request.main)?)
            .part(self.watermark_field.clone(), part(&request.logo)?);

        info!(
            "🚀 Submitting {} + {} to {}",
            request.main.name, request.logo.name, self.url
        );

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await?;

        read_image(response).await
    }
}

fn part(upload: &UploadPart) -> Result<Part> {
    Part::bytes(upload.bytes.to_vec())
        .file_name(upload.name.clone())
        .mime_str(&upload.media_type)
        .map_err(|e| ServiceError::Configuration(format!("{}: {}", upload.name, e)))
}

/// Turn a response into an image or an error
async fn read_image(response: Response) -> Result<ProcessedImage> {
    let status = response.status();
    if !status.is_success() {
        warn!("Service answered {}", status);
        return Err(ServiceError::Http {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let media_type = match response.headers().get(header::CONTENT_TYPE) {
        Some(value) => value.to_str()?.to_string(),
        None => DEFAULT_RESPONSE_TYPE.to_string(),
    };
    check_media_type(&media_type)?;

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(ServiceError::EmptyBody);
    }

    debug!("Received {} bytes of {}", bytes.len(), media_type);
    Ok(ProcessedImage { bytes, media_type })
}

fn check_media_type(media_type: &str) -> Result<()> {
    if media_type.trim_start().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(ServiceError::UnexpectedContent(media_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            main: UploadPart {
                name: "photo.jpg".into(),
                media_type: "image/jpeg".into(),
                bytes: Bytes::from_static(b"main"),
            },
            logo: UploadPart {
                name: "logo.png".into(),
                media_type: "image/png".into(),
                bytes: Bytes::from_static(b"logo"),
            },
        }
    }

    #[test]
    fn test_invalid_url_rejected() {
        let endpoint = EndpointConfig {
            url: "not a url".into(),
            ..EndpointConfig::default()
        };
        assert!(matches!(
            WatermarkClient::new(&endpoint),
            Err(ServiceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default_endpoint_parses() {
        let client = WatermarkClient::new(&EndpointConfig::default()).unwrap();
        assert_eq!(client.url().path(), "/add_watermark");
        assert_eq!(client.url().port(), Some(5001));
    }

    #[test]
    fn test_check_media_type() {
        assert!(check_media_type("image/png").is_ok());
        assert!(check_media_type("Image/JPEG").is_ok());
        assert_eq!(
            check_media_type("text/html; charset=utf-8"),
            Err(ServiceError::UnexpectedContent("text/html; charset=utf-8".into()))
        );
    }

    #[test]
    fn test_part_rejects_bad_media_type() {
        let mut upload = request().main;
        upload.media_type = "not a mime".into();
        assert!(matches!(part(&upload), Err(ServiceError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        // Nothing listens on the discard port
        let endpoint = EndpointConfig {
            url: "http://127.0.0.1:9/add_watermark".into(),
            ..EndpointConfig::default()
        };
        let client = WatermarkClient::new(&endpoint).unwrap();

        let result = client.add_watermark(request()).await;
        assert!(matches!(result, Err(ServiceError::Connection(_))));
    }
}
