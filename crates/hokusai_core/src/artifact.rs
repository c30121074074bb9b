//! The composed comic page.

use crate::{Quality, Style};
use chrono::{DateTime, Utc};
use hokusai_error::{ComposeError, ComposeErrorKind, ComposeStage};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use uuid::Uuid;

/// Axis-aligned pixel rectangle on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Where one panel and its caption landed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelPlacement {
    /// Position of the panel in the composed sequence
    pub slot: usize,
    /// Image area (inside the border)
    pub image: Rect,
    /// Caption box
    pub caption: Rect,
}

/// A composed comic page, ready for persistence.
///
/// The image is always RGB8. The filename combines a millisecond timestamp
/// with a random UUID so concurrent requests never collide.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct CompositeArtifact {
    /// Unique artifact id
    id: Uuid,
    /// File name used by artifact stores
    filename: String,
    /// Page image
    image: RgbImage,
    /// Panel placements in slot order
    placements: Vec<PanelPlacement>,
    /// Style the page was composed with
    style: Style,
    /// Quality tier the page was composed with
    quality: Quality,
    /// Creation time
    created_at: DateTime<Utc>,
}

impl CompositeArtifact {
    /// Wrap a finished page, assigning it a fresh id and filename.
    pub fn new(
        image: RgbImage,
        placements: Vec<PanelPlacement>,
        style: Style,
        quality: Quality,
    ) -> Self {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let filename = format!("comic_{}_{}.png", created_at.timestamp_millis(), id.simple());
        Self {
            id,
            filename,
            image,
            placements,
            style,
            quality,
            created_at,
        }
    }

    /// Page width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Page height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// MIME type of [`CompositeArtifact::encode_png`] output.
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }

    /// Encode the page as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeErrorKind::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, ComposeError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| {
                ComposeError::new(
                    ComposeErrorKind::Encode(e.to_string()),
                    ComposeStage::Composed,
                )
            })?;
        Ok(bytes)
    }
}
