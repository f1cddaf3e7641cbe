//! `reqwest` implementation of the camera API

use crate::config::ResolvedCameraConfig;
use crate::error::{ApiError, ConfigError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{redirect, Client, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::client::{
    fallback_picture_name, filename_from_disposition, CameraApi, DownloadedFile, FileEntry,
};
use super::endpoint::{DeleteIndex, Endpoint, PictureQuery};

/// Archive name used when the server does not name the zip itself
const FALLBACK_ARCHIVE_NAME: &str = "picam_pictures.zip";

/// HTTP client for the camera web service
pub struct HttpCameraApi {
    client: Client,
    base_url: Url,
}

impl HttpCameraApi {
    /// Create a new client from a resolved configuration
    pub fn new(config: &ResolvedCameraConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                ConfigError::InvalidValue {
                    field: "headers".to_string(),
                    value: key.clone(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidValue {
                field: format!("headers.{}", key),
                value: value.clone(),
            })?;
            headers.insert(name, value);
        }

        // The capture route answers with a redirect to the index page; that
        // redirect is the success signal, so it is not followed.
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for an endpoint, relative to the configured base
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url> {
        let relative = endpoint.uri();
        self.base_url
            .join(relative.trim_start_matches('/'))
            .map_err(|e| {
                ApiError::InvalidResponse {
                    message: format!("cannot build URL for {}: {}", endpoint, e),
                }
                .into()
            })
    }

    async fn send(&self, endpoint: Endpoint) -> Result<Response> {
        let url = self.endpoint_url(&endpoint)?;
        debug!("{} {}", endpoint.method(), url);

        let response = self
            .client
            .request(endpoint.method(), url)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() && !accepts_redirect(&endpoint, status) {
            let message = response.text().await.unwrap_or_default();
            warn!("{} failed with {}: {}", endpoint, status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        debug!("{} -> {}", endpoint, status);
        Ok(response)
    }

    async fn download(&self, endpoint: Endpoint, fallback_name: String) -> Result<DownloadedFile> {
        let response = self.send(endpoint).await?;

        let name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or(fallback_name);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| ApiError::Network {
            message: format!("Failed to read body of {}: {}", endpoint, e),
        })?;

        let file = DownloadedFile::new(name, bytes);
        Ok(match content_type {
            Some(content_type) => file.with_content_type(content_type),
            None => file,
        })
    }
}

#[async_trait]
impl CameraApi for HttpCameraApi {
    async fn capture(&self) -> Result<()> {
        self.send(Endpoint::Capture).await?;
        Ok(())
    }

    async fn fetch_picture(&self, query: PictureQuery) -> Result<DownloadedFile> {
        self.download(Endpoint::Picture(query), fallback_picture_name(query.index))
            .await
    }

    async fn delete(&self, index: DeleteIndex) -> Result<()> {
        self.send(Endpoint::Delete(index)).await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.send(Endpoint::DeleteAll).await?;
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>> {
        let response = self.send(Endpoint::Files).await?;
        let body = response.text().await.map_err(|e| ApiError::Network {
            message: format!("Failed to read file listing: {}", e),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse {
                message: format!("file listing is not a list of [index, name] pairs: {}", e),
            }
            .into()
        })
    }

    async fn download_all(&self) -> Result<DownloadedFile> {
        self.download(Endpoint::DownloadAll, FALLBACK_ARCHIVE_NAME.to_string())
            .await
    }

    fn base_url(&self) -> &str {
        self.base_url.as_str()
    }
}

/// Capture answers with a redirect to the index page; any other redirect
/// would hand back a page instead of the requested body.
fn accepts_redirect(endpoint: &Endpoint, status: StatusCode) -> bool {
    status.is_redirection() && matches!(endpoint, Endpoint::Capture)
}

/// Parse the base URL and make sure it ends with a slash so endpoint joins
/// keep any path prefix (e.g. a reverse proxy mounting the camera at `/cam/`).
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|_| ConfigError::InvalidValue {
        field: "base_url".to_string(),
        value: base_url.to_string(),
    })?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoint::PictureIndex;
    use std::path::PathBuf;

    fn api(base_url: &str) -> HttpCameraApi {
        let config = ResolvedCameraConfig::new(base_url.to_string(), PathBuf::from("/tmp"));
        HttpCameraApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_url_from_root() {
        let api = api("http://raspberrypi.local:8000");
        let url = api
            .endpoint_url(&Endpoint::Picture(PictureQuery::latest_download()))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://raspberrypi.local:8000/picture?index=-1&download=true"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_path_prefix() {
        let api = api("http://gateway/cam");
        let url = api.endpoint_url(&Endpoint::Delete(DeleteIndex::Row(4))).unwrap();
        assert_eq!(url.as_str(), "http://gateway/cam/delete?index=4");

        let url = api
            .endpoint_url(&Endpoint::Picture(PictureQuery::new(PictureIndex::At(2), false)))
            .unwrap();
        assert_eq!(url.as_str(), "http://gateway/cam/picture?index=2");
    }

    #[test]
    fn test_only_capture_accepts_redirects() {
        assert!(accepts_redirect(&Endpoint::Capture, StatusCode::FOUND));
        assert!(!accepts_redirect(
            &Endpoint::Picture(PictureQuery::latest_download()),
            StatusCode::FOUND
        ));
        assert!(!accepts_redirect(&Endpoint::DownloadAll, StatusCode::SEE_OTHER));
        assert!(!accepts_redirect(&Endpoint::Capture, StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = ResolvedCameraConfig::new("http://pi".to_string(), PathBuf::from("/tmp"))
            .with_header("bad header".to_string(), "x".to_string());
        assert!(HttpCameraApi::new(&config).is_err());
    }
}
