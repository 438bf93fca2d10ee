//! Reading and vetting images before they are sent for tagging.
//!
//! Only JPEG and PNG are accepted. The extension is checked first, then the
//! content is sniffed with `infer` so a renamed file is still rejected.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use sha2::{Digest, Sha256};

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Unsupported file extension '{0}': expected one of jpg, jpeg, png")]
    UnsupportedExtension(String),
    #[error("Unsupported image content: {0}")]
    UnsupportedContent(String),
    #[error("Image is empty")]
    Empty,
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => f.write_str("JPEG"),
            Self::Png => f.write_str("PNG"),
        }
    }
}

/// An image that passed the format checks, ready to be uploaded
#[derive(Debug, Clone)]
pub struct ImageUpload {
    file_name: String,
    format: ImageFormat,
    bytes: Vec<u8>,
    digest: String,
}

impl ImageUpload {
    /// Reads an image from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ImageError::UnsupportedExtension(extension));
        }

        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(file_name, bytes)
    }

    /// Wraps in-memory image bytes, sniffing their format
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let format = match infer::get(&bytes).map(|kind| kind.mime_type()) {
            Some("image/jpeg") => ImageFormat::Jpeg,
            Some("image/png") => ImageFormat::Png,
            Some(other) => return Err(ImageError::UnsupportedContent(other.to_string())),
            None => return Err(ImageError::UnsupportedContent("unknown".to_string())),
        };
        debug!("Content of '{}' detected as {}", file_name, format.mime_type());

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = format!("{:x}", hasher.finalize());

        info!("Loaded {} image '{}' ({} bytes, sha256 {})", format, file_name, bytes.len(), digest);
        Ok(Self {
            file_name,
            format,
            bytes,
            digest,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex SHA-256 of the image bytes
    pub fn digest(&self) -> &str {
        &self.digest
    }
}
