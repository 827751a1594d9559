//! Client for the external media host.
//!
//! Uploads are unauthenticated multipart POSTs carrying `file`,
//! `upload_preset`, and an optional `folder` field. The host answers with a
//! JSON body whose `secure_url` field is the public delivery URL; a response
//! without one is a failed upload regardless of status code. The
//! `resource_type` field, when present, is kept as a video hint for
//! classification.
//!
//! All call sites share one [`MediaConfig`]; there are no per-flow presets or
//! hard-coded account identifiers.

use std::sync::Arc;

use serde::Deserialize;

/// Errors from the media host client.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The upload request could not be sent or its body could not be read.
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("media host returned status {0}")]
    Status(reqwest::StatusCode),

    /// The host answered 2xx but the response carried no `secure_url`.
    #[error("media host response contained no secure_url")]
    MissingSecureUrl,
}

/// Media host configuration, loaded once and injected everywhere.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Account identifier, the first path segment under the API base.
    pub cloud_name: String,
    /// Unsigned upload preset sent with every upload.
    pub upload_preset: String,
    /// Optional folder the host files uploads under.
    pub folder: Option<String>,
    /// API base URL (overridable so tests can point at a local mock).
    pub api_base: String,
}

/// Default media host API base.
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

impl MediaConfig {
    /// Load media host configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                            |
    /// |-----------------------|----------|------------------------------------|
    /// | `MEDIA_CLOUD_NAME`    | **yes**  | --                                 |
    /// | `MEDIA_UPLOAD_PRESET` | **yes**  | --                                 |
    /// | `MEDIA_FOLDER`        | no       | (none)                             |
    /// | `MEDIA_API_BASE`      | no       | `https://api.cloudinary.com/v1_1`  |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing, which is the desired
    /// fail-fast behaviour at startup.
    pub fn from_env() -> Self {
        let cloud_name =
            std::env::var("MEDIA_CLOUD_NAME").expect("MEDIA_CLOUD_NAME must be set");
        let upload_preset =
            std::env::var("MEDIA_UPLOAD_PRESET").expect("MEDIA_UPLOAD_PRESET must be set");
        let folder = std::env::var("MEDIA_FOLDER").ok().filter(|f| !f.is_empty());
        let api_base =
            std::env::var("MEDIA_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Self {
            cloud_name,
            upload_preset,
            folder,
            api_base,
        }
    }
}

/// A successful upload: the public URL plus the host's resource-type hint.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub secure_url: String,
    /// `"image"` or `"video"` when the host reports it.
    pub resource_type: Option<String>,
}

/// JSON body returned by the upload endpoint. Only the fields we use.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    resource_type: Option<String>,
}

/// Media host client. Cheaply cloneable; constructed once at startup and
/// injected through application state.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: Arc<MediaConfig>,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Upload a file, returning its public delivery URL.
    ///
    /// The `auto` resource segment lets the host detect images vs. videos;
    /// the detection result comes back as `resource_type`.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, MediaError> {
        let url = format!(
            "{}/{}/auto/upload",
            self.config.api_base, self.config.cloud_name
        );

        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        if let Some(ct) = content_type {
            part = part.mime_str(ct)?;
        }

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());
        if let Some(folder) = &self.config.folder {
            form = form.text("folder", folder.clone());
        }

        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "media host rejected upload");
            return Err(MediaError::Status(status));
        }

        let body: UploadResponse = response.json().await?;
        let secure_url = body.secure_url.ok_or(MediaError::MissingSecureUrl)?;

        Ok(UploadedMedia {
            secure_url,
            resource_type: body.resource_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_base: &str) -> MediaConfig {
        MediaConfig {
            cloud_name: "testcloud".to_string(),
            upload_preset: "ducki_items".to_string(),
            folder: None,
            api_base: api_base.to_string(),
        }
    }

    #[tokio::test]
    async fn upload_returns_secure_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/testcloud/auto/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.test/img.jpg",
                "resource_type": "image",
            })))
            .mount(&server)
            .await;

        let client = MediaClient::new(test_config(&server.uri()));
        let uploaded = client
            .upload("photo.jpg", Some("image/jpeg"), b"fakebytes".to_vec())
            .await
            .expect("upload should succeed");

        assert_eq!(uploaded.secure_url, "https://res.test/img.jpg");
        assert_eq!(uploaded.resource_type.as_deref(), Some("image"));
    }

    #[tokio::test]
    async fn missing_secure_url_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/testcloud/auto/upload"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "public_id": "x" })),
            )
            .mount(&server)
            .await;

        let client = MediaClient::new(test_config(&server.uri()));
        let result = client.upload("photo.jpg", None, b"fakebytes".to_vec()).await;

        assert!(matches!(result, Err(MediaError::MissingSecureUrl)));
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/testcloud/auto/upload"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = MediaClient::new(test_config(&server.uri()));
        let result = client.upload("photo.jpg", None, b"fakebytes".to_vec()).await;

        assert!(matches!(result, Err(MediaError::Status(_))));
    }
}
