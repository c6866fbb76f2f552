// SPDX-License-Identifier: MPL-2.0
//! Selected and processed images.
//!
//! Desktop files carry no content type, so the declared MIME type of a
//! candidate is derived from its file name. Validation only looks at that
//! declaration; the bytes are sent to the removal service untouched.

use crate::config::FALLBACK_FILE_NAME;
use crate::error::Result;
use crate::removal::RemovedImage;
use iced::widget::image;
use image_rs::{ImageFormat, ImageReader};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Extensions offered by the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff", "ico", "avif",
];

/// A file-like object offered to the session.
#[derive(Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl FileCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Builds a candidate whose MIME type is declared by its extension.
    #[must_use]
    pub fn from_named_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_for_name(&name);
        Self::new(name, mime_type, bytes)
    }

    /// Reads a file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
        Ok(Self::from_named_bytes(name, bytes))
    }

    /// Whether the declared content type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
    }
}

/// Derives a MIME type from a file name's extension.
#[must_use]
pub fn mime_for_name(name: &str) -> Option<String> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    if let Some(format) = ImageFormat::from_extension(&extension) {
        return Some(format.to_mime_type().to_string());
    }
    let mime = match extension.as_str() {
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Reads width and height from the image header, if the format is known.
#[must_use]
pub fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// The image the user picked.
#[derive(Clone)]
pub struct SelectedImage {
    name: String,
    mime_type: String,
    bytes: Arc<Vec<u8>>,
    preview: image::Handle,
    dimensions: Option<(u32, u32)>,
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl SelectedImage {
    pub(crate) fn from_candidate(candidate: FileCandidate, mime_type: String) -> Self {
        let dimensions = read_dimensions(&candidate.bytes);
        let preview = image::Handle::from_bytes(candidate.bytes.clone());
        Self {
            name: candidate.name,
            mime_type,
            bytes: Arc::new(candidate.bytes),
            preview,
            dimensions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    #[must_use]
    pub fn preview(&self) -> &image::Handle {
        &self.preview
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

/// The processed image returned by the removal service.
#[derive(Clone)]
pub struct ResultImage {
    mime_type: String,
    bytes: Arc<Vec<u8>>,
    handle: image::Handle,
    dimensions: Option<(u32, u32)>,
}

impl fmt::Debug for ResultImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl From<RemovedImage> for ResultImage {
    fn from(removed: RemovedImage) -> Self {
        let dimensions = read_dimensions(&removed.bytes);
        let handle = image::Handle::from_bytes(removed.bytes.clone());
        Self {
            mime_type: removed.mime_type,
            bytes: Arc::new(removed.bytes),
            handle,
            dimensions,
        }
    }
}

impl ResultImage {
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    #[must_use]
    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image_rs::RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .expect("encoding a blank png never fails");
        out.into_inner()
    }

    #[test]
    fn mime_for_common_image_extensions() {
        assert_eq!(mime_for_name("photo.png").as_deref(), Some("image/png"));
        assert_eq!(mime_for_name("photo.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(mime_for_name("photo.webp").as_deref(), Some("image/webp"));
    }

    #[test]
    fn mime_for_non_image_extensions() {
        assert_eq!(mime_for_name("notes.txt").as_deref(), Some("text/plain"));
        assert_eq!(mime_for_name("report.pdf").as_deref(), Some("application/pdf"));
        assert!(mime_for_name("archive.unknownext").is_none());
        assert!(mime_for_name("no_extension").is_none());
    }

    #[test]
    fn candidate_is_image_follows_declared_type() {
        assert!(FileCandidate::from_named_bytes("a.png", vec![]).is_image());
        assert!(!FileCandidate::from_named_bytes("a.txt", vec![]).is_image());
        assert!(!FileCandidate::new("a", None, vec![]).is_image());
        assert!(FileCandidate::new("a", Some("image/x-custom".into()), vec![]).is_image());
    }

    #[test]
    fn offered_extensions_all_declare_image_types() {
        for ext in IMAGE_EXTENSIONS {
            let mime = mime_for_name(&format!("file.{ext}"));
            assert!(
                mime.as_deref().is_some_and(|m| m.starts_with("image/")),
                "{ext} should map to an image type, got {mime:?}"
            );
        }
    }

    #[test]
    fn read_dimensions_reads_header() {
        assert_eq!(read_dimensions(&png_bytes(12, 7)), Some((12, 7)));
        assert_eq!(read_dimensions(b"not an image"), None);
    }

    #[test]
    fn selected_image_keeps_metadata() {
        let candidate = FileCandidate::from_named_bytes("photo.png", png_bytes(4, 3));
        let selected = SelectedImage::from_candidate(candidate, "image/png".to_string());
        assert_eq!(selected.name(), "photo.png");
        assert_eq!(selected.mime_type(), "image/png");
        assert_eq!(selected.dimensions(), Some((4, 3)));
    }

    #[test]
    fn result_image_from_removed_image() {
        let result = ResultImage::from(RemovedImage {
            bytes: png_bytes(8, 8),
            mime_type: "image/png".to_string(),
        });
        assert_eq!(result.mime_type(), "image/png");
        assert_eq!(result.dimensions(), Some((8, 8)));
    }

    #[tokio::test]
    async fn read_uses_file_name_and_extension() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("holiday.jpeg");
        std::fs::write(&path, b"jpeg-bytes").expect("failed to write file");

        let candidate = FileCandidate::read(&path).await.expect("read should succeed");
        assert_eq!(candidate.name, "holiday.jpeg");
        assert_eq!(candidate.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(candidate.bytes, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn read_missing_file_is_an_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = FileCandidate::read(dir.path().join("missing.png")).await;
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
