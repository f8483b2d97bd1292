//! Chapter image resolution
//!
//! Chapters record where their illustration is stored. Before it can be put
//! on a page the reference has to become a fetchable URL:
//!
//! - `gs://<bucket>/<object>` becomes a storage download URL
//! - `http://` and `https://` URLs are used as-is

use crate::{Error, Result};
use url::Url;

pub const DEFAULT_DOWNLOAD_BASE: &str = "https://firebasestorage.googleapis.com";

/// Turns a chapter's image reference into a downloadable URL.
#[async_trait::async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self, reference: &str) -> Result<String>;
}

/// Resolver for Cloud Storage bucket references.
#[derive(Debug, Clone)]
pub struct StorageResolver {
    download_base: String,
}

impl StorageResolver {
    pub fn new(download_base: impl Into<String>) -> Self {
        Self {
            download_base: download_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Synchronous form of [`ImageResolver::resolve`]
    pub fn download_url(&self, reference: &str) -> Result<String> {
        let parsed = Url::parse(reference)
            .map_err(|e| Error::InvalidReference(format!("{}: {}", reference, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(reference.to_string()),
            "gs" => {
                let bucket = parsed
                    .host_str()
                    .filter(|h| !h.is_empty())
                    .ok_or_else(|| Error::InvalidReference(format!("missing bucket: {}", reference)))?;
                let object = parsed.path().trim_start_matches('/');
                if object.is_empty() {
                    return Err(Error::InvalidReference(format!("missing object path: {}", reference)));
                }
                // The URL parser keeps percent-escapes; the object name itself is what gets encoded.
                let object = urlencoding::decode(object)
                    .map_err(|e| Error::InvalidReference(format!("{}: {}", reference, e)))?;

                Ok(format!(
                    "{}/v0/b/{}/o/{}?alt=media",
                    self.download_base,
                    bucket,
                    urlencoding::encode(&object)
                ))
            }
            other => Err(Error::InvalidReference(format!("unsupported scheme '{}': {}", other, reference))),
        }
    }
}

impl Default for StorageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DOWNLOAD_BASE)
    }
}

#[async_trait::async_trait]
impl ImageResolver for StorageResolver {
    async fn resolve(&self, reference: &str) -> Result<String> {
        self.download_url(reference)
    }
}
