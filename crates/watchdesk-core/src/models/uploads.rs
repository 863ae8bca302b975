//! Attachment upload wire types and the canonical stored-upload descriptor.
//!
//! The upload endpoint is inconsistent about where it puts the resulting
//! URL (`url`, `fileUrl`, or `location`, depending on deployment).
//! [`StoredUpload::from_raw`] absorbs that ambiguity here so it never
//! leaks into component logic.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A locally selected file that has not been uploaded yet.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl StagedFile {
    /// Build a staged file, falling back to magic-byte detection when the
    /// claimed content type is absent or empty.
    pub fn new(name: impl Into<String>, claimed_type: Option<&str>, bytes: Bytes) -> Self {
        let content_type = match claimed_type {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => infer::get(&bytes)
                .map(|kind| kind.mime_type().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        };
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Raw response of `POST /incidents/upload/attachment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUploadResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Server-confirmed attachment descriptor, normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    pub url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredUpload {
    /// Normalize the backend's differently-named URL and filename fields
    /// into the canonical descriptor, stamped with the upload time.
    pub fn from_raw(raw: RawUploadResponse) -> Self {
        Self {
            url: raw
                .url
                .or(raw.file_url)
                .or(raw.location)
                .unwrap_or_default(),
            id: raw.id,
            file_name: raw.file_name.or(raw.name),
            size: raw.size,
            uploaded_at: Utc::now(),
        }
    }

    /// Descriptor for an already-stored attachment known only by URL
    /// (e.g. when editing an existing incident).
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: None,
            file_name: None,
            size: None,
            uploaded_at: Utc::now(),
        }
    }
}

static IMAGE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpe?g|gif|webp|bmp|svg)$").expect("valid regex"));

/// True when the URL path (query string ignored) ends in an image extension.
pub fn is_image_url(url: &str) -> bool {
    let path = url.split('?').next().unwrap_or("").trim();
    IMAGE_URL_RE.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_prefers_url_field() {
        let raw = RawUploadResponse {
            url: Some("https://cdn/a.png".to_string()),
            file_url: Some("https://cdn/b.png".to_string()),
            location: Some("https://cdn/c.png".to_string()),
            ..Default::default()
        };
        assert_eq!(StoredUpload::from_raw(raw).url, "https://cdn/a.png");
    }

    #[test]
    fn test_from_raw_falls_back_through_aliases() {
        let raw = RawUploadResponse {
            file_url: Some("https://cdn/b.png".to_string()),
            ..Default::default()
        };
        assert_eq!(StoredUpload::from_raw(raw).url, "https://cdn/b.png");

        let raw = RawUploadResponse {
            location: Some("https://cdn/c.png".to_string()),
            name: Some("c.png".to_string()),
            ..Default::default()
        };
        let stored = StoredUpload::from_raw(raw);
        assert_eq!(stored.url, "https://cdn/c.png");
        assert_eq!(stored.file_name.as_deref(), Some("c.png"));
    }

    #[test]
    fn test_from_raw_empty_response_yields_empty_url() {
        assert_eq!(StoredUpload::from_raw(RawUploadResponse::default()).url, "");
    }

    #[test]
    fn test_is_image_url() {
        assert!(is_image_url("https://cdn/x.PNG"));
        assert!(is_image_url("https://cdn/x.jpeg?token=abc"));
        assert!(is_image_url("https://cdn/pic.webp"));
        assert!(!is_image_url("https://cdn/report.pdf"));
        assert!(!is_image_url("https://cdn/x.png/metadata"));
        assert!(!is_image_url(""));
    }

    #[test]
    fn test_staged_file_claimed_type_wins() {
        let file = StagedFile::new("x.bin", Some("image/png"), Bytes::from_static(b"data"));
        assert_eq!(file.content_type, "image/png");
        assert!(file.is_image());
    }

    #[test]
    fn test_staged_file_infers_when_unclaimed() {
        let png_header = Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        let file = StagedFile::new("photo", None, png_header);
        assert_eq!(file.content_type, "image/png");
    }

    #[test]
    fn test_staged_file_unknown_bytes_default_type() {
        let file = StagedFile::new("data", Some("  "), Bytes::from_static(b"plain text"));
        assert_eq!(file.content_type, "application/octet-stream");
        assert!(!file.is_image());
    }
}
