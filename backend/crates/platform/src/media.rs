//! Image Hosting
//!
//! Clients submit images inline as `data:<mime>;base64,<payload>` URIs.
//! [`ImageData`] decodes them; an [`ImageStore`] persists the bytes and
//! returns a public URL plus the host-side id needed to delete it later.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::CloudinaryConfig;
use crate::crypto;

const CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

/// Media errors
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid image data: {0}")]
    InvalidDataUri(&'static str),

    #[error("Image host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// True when `value` is an inline image rather than an already-hosted URL.
pub fn is_data_uri(value: &str) -> bool {
    value.starts_with("data:")
}

/// Decoded inline image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Parse a base64 data URI (`data:image/png;base64,iVBOR...`).
    pub fn from_data_uri(uri: &str) -> Result<Self, MediaError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(MediaError::InvalidDataUri("missing data: prefix"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or(MediaError::InvalidDataUri("missing payload"))?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or(MediaError::InvalidDataUri("payload must be base64"))?;

        if !content_type.starts_with("image/") {
            return Err(MediaError::InvalidDataUri("not an image"));
        }

        let bytes = crypto::from_base64(payload.trim())
            .map_err(|_| MediaError::InvalidDataUri("malformed base64"))?;
        if bytes.is_empty() {
            return Err(MediaError::InvalidDataUri("empty image"));
        }

        Ok(Self {
            content_type: content_type.to_string(),
            bytes,
        })
    }

    fn file_name(&self) -> String {
        let ext = self
            .content_type
            .strip_prefix("image/")
            .unwrap_or("bin")
            .split('+')
            .next()
            .unwrap_or("bin");
        format!("upload.{ext}")
    }
}

/// A hosted image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

/// Image storage port
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Store an image under `folder`
    async fn upload(&self, image: &ImageData, folder: &str) -> Result<StoredImage, MediaError>;

    /// Remove a previously stored image. Deleting a missing image succeeds.
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Cloudinary signature: sorted `k=v` pairs joined by `&`, secret appended, SHA-1 hex.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    crypto::sha1_hex(format!("{joined}{api_secret}").as_bytes())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Cloudinary signed-upload client
#[derive(Clone)]
pub struct CloudinaryImageStore {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{CLOUDINARY_API}/{}/image/{action}", self.config.cloud_name)
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    async fn rejected(response: reqwest::Response) -> MediaError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => "unreadable error body".to_string(),
        };
        MediaError::Rejected { status, message }
    }
}

impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, image: &ImageData, folder: &str) -> Result<StoredImage, MediaError> {
        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", &timestamp)],
            self.config.api_secret.expose_secret(),
        );

        let file = Part::bytes(image.bytes.clone())
            .file_name(image.file_name())
            .mime_str(&image.content_type)?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let body: UploadResponse = response.json().await?;
        tracing::debug!(public_id = %body.public_id, "Image uploaded");

        Ok(StoredImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            self.config.api_secret.expose_secret(),
        );

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => {
                tracing::debug!(public_id = %public_id, result = %body.result, "Image deleted");
                Ok(())
            }
            other => Err(MediaError::Rejected {
                status: 200,
                message: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("data:image/png;base64,AAAA"));
        assert!(!is_data_uri("https://res.cloudinary.com/demo/image/upload/x.png"));
        assert!(!is_data_uri(""));
    }

    #[test]
    fn test_from_data_uri() {
        let image = ImageData::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.file_name(), "upload.png");

        let svg = ImageData::from_data_uri("data:image/svg+xml;base64,PHN2Zy8+").unwrap();
        assert_eq!(svg.file_name(), "upload.svg");
    }

    #[test]
    fn test_from_data_uri_rejects_malformed_input() {
        for uri in [
            "https://example.com/a.png",
            "data:image/png;base64",
            "data:image/png,aGVsbG8=",
            "data:text/plain;base64,aGVsbG8=",
            "data:image/png;base64,***",
            "data:image/png;base64,",
        ] {
            assert!(
                matches!(ImageData::from_data_uri(uri), Err(MediaError::InvalidDataUri(_))),
                "{uri} should be rejected"
            );
        }
    }

    #[test]
    fn test_sign_params_sorts_keys() {
        let expected = "5e4eab588efe92d21d4d62c266eeaebd51bfb6c8";
        assert_eq!(
            sign_params(&[("folder", "products"), ("timestamp", "1700000000")], "abcd"),
            expected
        );
        assert_eq!(
            sign_params(&[("timestamp", "1700000000"), ("folder", "products")], "abcd"),
            expected
        );
        assert_eq!(
            sign_params(
                &[("timestamp", "1700000000"), ("public_id", "products/abc")],
                "abcd"
            ),
            "114f750d325472c51bd0a5540bd35d7b18df7282"
        );
    }
}
