// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::Arc;

/// A decoded image handle.
///
/// The pixel/encoded buffer is shared, so cloning a bitmap (and therefore a region) does not
/// copy image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            bytes: bytes.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A fully loaded image ready for submission.
///
/// `data` carries the original encoded bytes when they must survive untouched (animated GIFs);
/// `content_type` is the MIME type of `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRegion {
    bitmap: Bitmap,
    data: Option<Arc<[u8]>>,
    content_type: Option<String>,
}

impl ImageRegion {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            data: None,
            content_type: None,
        }
    }

    pub fn with_data(
        bitmap: Bitmap,
        data: impl Into<Arc<[u8]>>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bitmap,
            data: Some(data.into()),
            content_type: Some(content_type.into()),
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn set_data(&mut self, data: Option<Arc<[u8]>>, content_type: Option<String>) {
        self.data = data;
        self.content_type = content_type;
    }
}

/// One block of composed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Text(String),
    Image(ImageRegion),
    /// An image whose bytes are still being fetched (editing an existing post).
    ImageUrl(String),
    /// Layout separator; only appears in derived display sequences.
    Spacer,
    /// Fetching the `ImageUrl` with this url failed.
    Error(String),
}

impl Region {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    pub fn image(bitmap: Bitmap) -> Self {
        Self::Image(ImageRegion::new(bitmap))
    }

    /// Whether the user may delete this region.
    pub fn is_editable(&self) -> bool {
        match self {
            Self::Image(_) => true,
            Self::Text(text) => !text.is_empty(),
            Self::ImageUrl(_) | Self::Spacer | Self::Error(_) => false,
        }
    }

    /// Whether a delete may target this region: editable regions plus failed fetches.
    pub fn is_removable(&self) -> bool {
        self.is_editable() || matches!(self, Self::Error(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Spacer => true,
            Self::Image(_) | Self::ImageUrl(_) | Self::Error(_) => false,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer)
    }

    /// `ImageUrl` and `Error` regions: placeholders that cannot be submitted or reordered.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::ImageUrl(_) | Self::Error(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Bitmap> {
        match self {
            Self::Image(image) => Some(image.bitmap()),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "Text({text:?})"),
            Self::Image(image) => {
                let bitmap = image.bitmap();
                match image.content_type() {
                    Some(content_type) => write!(
                        f,
                        "Image({}x{}, {content_type})",
                        bitmap.width(),
                        bitmap.height()
                    ),
                    None => write!(f, "Image({}x{})", bitmap.width(), bitmap.height()),
                }
            }
            Self::ImageUrl(url) => write!(f, "ImageUrl({url})"),
            Self::Spacer => f.write_str("Spacer"),
            Self::Error(url) => write!(f, "Error({url})"),
        }
    }
}
