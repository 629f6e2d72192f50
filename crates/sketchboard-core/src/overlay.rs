//! Image overlay: a single raster image placed on the canvas.
//!
//! The overlay lives outside the shape registry. It has its own selection
//! flag and can be moved, resized and rotated like a shape.

use crate::config::CanvasConfig;
use crate::selection::{Corner, Handle, frame_handles, resize_rotated_frame, rotation_towards};
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Affine, Point, Rect, Vec2};
use std::io::Cursor;
use thiserror::Error;

/// Image upload errors.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Image '{name}' is {size} bytes, limit is {limit}")]
    TooLarge {
        name: String,
        size: usize,
        limit: usize,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Image format for uploaded image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name, for diagnostics.
    pub name: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// An image placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayImage {
    /// `data:` URI used as the preview source.
    preview_uri: String,
    /// Raw file payload.
    data: Vec<u8>,
    /// Detected format.
    pub format: ImageFormat,
    /// Original image width in pixels.
    pub source_width: u32,
    /// Original image height in pixels.
    pub source_height: u32,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Rotation angle in radians (around center).
    pub rotation: f64,
}

impl OverlayImage {
    /// Validate and decode an uploaded file.
    ///
    /// Only PNG, JPEG and WebP payloads are accepted. The image is placed at
    /// the origin at its natural size, scaled down to fit the configured box.
    pub fn from_file(file: &ImageFile, config: &CanvasConfig) -> Result<Self, OverlayError> {
        if file.data.len() > config.max_image_bytes {
            return Err(OverlayError::TooLarge {
                name: file.name.clone(),
                size: file.data.len(),
                limit: config.max_image_bytes,
            });
        }
        let format = ImageFormat::from_magic_bytes(&file.data)
            .ok_or_else(|| OverlayError::UnsupportedFormat(file.name.clone()))?;

        let (source_width, source_height) = image::ImageReader::new(Cursor::new(&file.data))
            .with_guessed_format()?
            .into_dimensions()?;

        let preview_uri = format!(
            "data:{};base64,{}",
            format.mime_type(),
            STANDARD.encode(&file.data)
        );

        let image = Self {
            preview_uri,
            data: file.data.clone(),
            format,
            source_width,
            source_height,
            position: Point::ZERO,
            width: source_width as f64,
            height: source_height as f64,
            rotation: 0.0,
        };
        Ok(image.fit_within(config.max_image_width, config.max_image_height))
    }

    /// Scale down to fit within max dimensions while preserving aspect ratio.
    /// Images that already fit keep their size.
    pub fn fit_within(mut self, max_width: f64, max_height: f64) -> Self {
        if self.width <= max_width && self.height <= max_height {
            return self;
        }
        let aspect = self.source_width as f64 / (self.source_height as f64).max(1.0);
        if aspect > max_width / max_height {
            self.width = max_width;
            self.height = max_width / aspect;
        } else {
            self.height = max_height;
            self.width = max_height * aspect;
        }
        self
    }

    /// Preview source for rendering.
    pub fn preview_uri(&self) -> &str {
        &self.preview_uri
    }

    /// Raw file payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Unrotated frame.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Transform from the unrotated frame to world coordinates.
    pub fn rotation_affine(&self) -> Affine {
        Affine::rotate_about(self.rotation, self.bounds().center())
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.rotation_affine().inverse() * point;
        self.bounds().inflate(tolerance, tolerance).contains(local)
    }

    /// Corner and rotation handles.
    pub fn handles(&self) -> Vec<Handle> {
        frame_handles(self.bounds(), self.rotation, true)
    }
}

/// Holds zero or one image plus its selection flag.
#[derive(Debug, Clone, Default)]
pub struct ImageOverlay {
    image: Option<OverlayImage>,
    selected: bool,
}

impl ImageOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a file-input change.
    ///
    /// An empty selection is a no-op and returns `Ok(false)`. Otherwise the
    /// first file replaces the current image and the overlay becomes selected.
    pub fn load_files(&mut self, files: &[ImageFile], config: &CanvasConfig) -> Result<bool, OverlayError> {
        let Some(file) = files.first() else {
            log::debug!("File input changed with no files selected");
            return Ok(false);
        };
        let image = match OverlayImage::from_file(file, config) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Rejected image upload '{}': {}", file.name, e);
                return Err(e);
            }
        };
        log::debug!(
            "Loaded overlay image '{}' ({}x{}, {})",
            file.name,
            image.source_width,
            image.source_height,
            image.format.mime_type()
        );
        self.set_image(image);
        Ok(true)
    }

    /// Replace the current image (releasing the previous one) and select it.
    pub fn set_image(&mut self, image: OverlayImage) {
        if let Some(previous) = self.image.replace(image) {
            log::debug!("Released previous overlay image ({} bytes)", previous.data.len());
        }
        self.selected = true;
    }

    /// Remove the image.
    pub fn clear(&mut self) {
        if self.image.take().is_some() {
            log::debug!("Overlay image cleared");
        }
        self.selected = false;
    }

    pub fn image(&self) -> Option<&OverlayImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Select the image for transforming. Returns false when there is no image.
    pub fn select(&mut self) -> bool {
        self.selected = self.image.is_some();
        self.selected
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.image
            .as_ref()
            .is_some_and(|image| image.hit_test(point, tolerance))
    }

    /// Handles of the image while it is selected.
    pub fn handles(&self) -> Vec<Handle> {
        match &self.image {
            Some(image) if self.selected => image.handles(),
            _ => Vec::new(),
        }
    }

    /// Move the image's top-left corner. Returns false when there is no image.
    pub fn move_to(&mut self, position: Point) -> bool {
        match &mut self.image {
            Some(image) => {
                image.position = position;
                true
            }
            None => false,
        }
    }

    /// Resize by dragging a corner. Returns false when there is no image.
    pub fn resize(&mut self, corner: Corner, delta: Vec2, keep_aspect_ratio: bool) -> bool {
        match &mut self.image {
            Some(image) => {
                let frame = resize_rotated_frame(image.bounds(), image.rotation, corner, delta, keep_aspect_ratio);
                image.position = Point::new(frame.x0, frame.y0);
                image.width = frame.width();
                image.height = frame.height();
                true
            }
            None => false,
        }
    }

    /// Rotate toward the cursor. Returns the new angle, or None when there is no image.
    pub fn rotate(&mut self, cursor: Point, snap_to_15deg: bool) -> Option<f64> {
        let image = self.image.as_mut()?;
        image.rotation = rotation_towards(image.bounds().center(), cursor, snap_to_15deg);
        Some(image.rotation)
    }
}
