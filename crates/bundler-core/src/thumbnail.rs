//! Renderable image payloads for the table's `path` column.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use crate::config::ThumbnailConfig;

/// 1x1 transparent PNG shown when an image cannot be read.
const PLACEHOLDER_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mP8/wYAAtMBwVI8FXgAAAAASUVORK5CYII=";

/// What the table shows for one row's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Remote image, referenced directly
    Url(String),
    /// Local image re-encoded inline (`data:image/jpeg;base64,...`)
    DataUri(String),
    /// The source could not be read
    Placeholder,
}

impl ImagePayload {
    /// Value for an `<img src=...>` attribute.
    pub fn src(&self) -> Cow<'_, str> {
        match self {
            ImagePayload::Url(url) | ImagePayload::DataUri(url) => Cow::Borrowed(url),
            ImagePayload::Placeholder => Cow::Owned(format!("data:image/png;base64,{PLACEHOLDER_PNG}")),
        }
    }

    /// HTML image tag scaled to fit its cell.
    pub fn to_html(&self) -> String {
        format!(
            r#"<img style="object-fit: scale-down;" width="100%" height="100%" src="{}">"#,
            self.src()
        )
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImagePayload::Placeholder)
    }
}

/// Turns image paths into inline thumbnails.
pub struct ThumbnailEncoder {
    config: ThumbnailConfig,
}

impl ThumbnailEncoder {
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Build the payload for a `path` cell.
    ///
    /// `http(s)` sources pass through. Local files are encoded unless
    /// encoding is disabled, in which case the path itself is used as the
    /// source. Unreadable files are logged and become a placeholder.
    pub fn payload_for(&self, source: &str) -> ImagePayload {
        if source.starts_with("http") || !self.config.enabled {
            return ImagePayload::Url(source.to_string());
        }

        let image = match image::open(Path::new(source)) {
            Ok(image) => image,
            Err(e) => {
                tracing::error!("Could not read image {source}: {e}");
                return ImagePayload::Placeholder;
            }
        };

        match self.encode(&image) {
            Some(encoded) => ImagePayload::DataUri(format!("data:image/jpeg;base64,{encoded}")),
            None => {
                tracing::error!("Could not encode image {source}");
                ImagePayload::Placeholder
            }
        }
    }

    /// Resize to the configured size and encode as base64 JPEG.
    pub fn encode(&self, image: &DynamicImage) -> Option<String> {
        let thumbnail = image.thumbnail(self.config.size, self.config.size).to_rgb8();

        let mut buffer = Cursor::new(Vec::new());
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.config.quality);
        encoder.encode_image(&thumbnail).ok()?;

        Some(BASE64.encode(buffer.into_inner()))
    }
}
