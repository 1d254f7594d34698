//! Scan uploads: validation, analysis and history.

use base64::Engine;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::{self, ScanResult};
use crate::db::{self, DatabaseError};
use crate::models::StoredScan;

/// Largest accepted upload (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Please upload an image file")]
    NotAnImage,

    #[error("File size must be less than 10MB ({0} bytes received)")]
    TooLarge(usize),

    #[error("Invalid image data: {0}")]
    InvalidData(String),
}

/// A decoded upload ready for analysis.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Size and type checks. The declared content type wins; otherwise the
    /// file extension, then the leading magic bytes decide.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge(self.bytes.len()));
        }

        let declared = self
            .content_type
            .as_deref()
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");
        let is_image = match declared {
            Some(ct) => ct.starts_with("image/"),
            None => {
                mime_guess::from_path(&self.file_name)
                    .first()
                    .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE)
                    || sniff_image(&self.bytes).is_some()
            }
        };
        if !is_image {
            return Err(UploadError::NotAnImage);
        }
        Ok(())
    }

    /// Decode a `data:<mime>;base64,<payload>` URL (or bare base64).
    pub fn from_data_url(file_name: &str, data_url: &str) -> Result<Self, UploadError> {
        let (content_type, payload) = match data_url.split_once(',') {
            Some((header, payload)) => {
                let mime = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string);
                (mime, payload)
            }
            None => (None, data_url),
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| UploadError::InvalidData(format!("Base64 decode failed: {e}")))?;

        Ok(Self {
            file_name: file_name.to_string(),
            content_type,
            bytes,
        })
    }
}

/// Image kind from magic bytes.
pub fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpeg")
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("png")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("webp")
    } else if bytes.starts_with(b"GIF8") {
        Some("gif")
    } else if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        match &bytes[8..12] {
            b"heic" | b"heix" | b"mif1" => Some("heic"),
            b"avif" => Some("avif"),
            _ => None,
        }
    } else {
        None
    }
}

/// Validate and analyze an upload.
pub fn analyze_upload(upload: &Upload, reference_base_url: &str) -> Result<ScanResult, UploadError> {
    upload.validate()?;
    Ok(analysis::analyze(
        &upload.bytes,
        &upload.file_name,
        reference_base_url,
    ))
}

/// Persist a scan result to the user's history.
pub fn record_scan(
    conn: &Connection,
    user_id: &str,
    image_url: Option<String>,
    result: ScanResult,
) -> Result<StoredScan, DatabaseError> {
    let scan = StoredScan {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        image_url,
        result,
    };
    db::insert_scan(conn, &scan)?;
    tracing::info!(scan_id = %scan.id, condition = %scan.result.condition, "Scan recorded");
    Ok(scan)
}
