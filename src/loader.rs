//! Asynchronous image loading.
//!
//! [`SourceLoader`] resolves every [`SourceKind`]: remote images are fetched
//! with an anonymous GET (no cookies, no credentials), inline images are
//! decoded from their base64 or percent-encoded payload and local images are
//! read from disk.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use percent_encoding::percent_decode_str;

use crate::error::LoadError;
use crate::source::{ImageSource, SourceKind};

/// Fetches and decodes the image behind an [`ImageSource`].
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, source: &ImageSource) -> Result<DynamicImage, LoadError>;
}

/// Default loader for files, `http(s)` URLs and `data:` URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceLoader;

impl SourceLoader {
    pub fn new() -> Self {
        Self
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let http_err = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };

        // A fresh client per call carries no cookie store between loads.
        let client = reqwest::Client::builder().build().map_err(http_err)?;
        let response = client.get(url).send().await.map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(http_err)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageLoader for SourceLoader {
    async fn load(&self, source: &ImageSource) -> Result<DynamicImage, LoadError> {
        let bytes = match source.kind() {
            SourceKind::Remote(url) => self.fetch_remote(&url).await?,
            SourceKind::Inline(uri) => decode_data_uri(&uri)?,
            SourceKind::File(path) => {
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
            SourceKind::InvalidFileUrl(url) => return Err(LoadError::InvalidFileUrl(url)),
        };

        tracing::debug!(source = %source, bytes = bytes.len(), "image fetched");

        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Decode the payload of a `data:` URI: base64 when the header says so,
/// percent-encoded bytes otherwise.
pub(crate) fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let rest = uri
        .get("data:".len()..)
        .ok_or_else(|| LoadError::InvalidDataUri("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::InvalidDataUri("missing ',' separator".into()))?;

    if !header.split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
        return Ok(percent_decode_str(payload).collect());
    }

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| LoadError::InvalidDataUri(e.to_string()))
}
