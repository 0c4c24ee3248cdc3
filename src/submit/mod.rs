// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mapping a finished composition to the content regions sent to the network.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Serialize, Serializer};

use crate::model::{Composition, ImageRegion, Region};

/// Longest text block accepted for submission, in Unicode scalar values.
pub const MAX_TEXT_LENGTH: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRegion {
    Text(String),
    Image(ImageRegion),
}

impl ContentRegion {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    TooLong {
        index: usize,
        length: usize,
        max: usize,
    },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { index, length, max } => write!(
                f,
                "text region {index} is too long ({length} characters, max {max})"
            ),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Converts the canonical list into submission content.
///
/// Any text block longer than [`MAX_TEXT_LENGTH`] rejects the whole submission. Text is
/// emitted trimmed and blank blocks are dropped; images pass through; placeholders and spacers
/// are never submitted. An empty result means there is nothing to send.
pub fn generate_post_content(regions: &[Region]) -> Result<Vec<ContentRegion>, SubmitError> {
    let mut content = Vec::with_capacity(regions.len());
    for (index, region) in regions.iter().enumerate() {
        match region {
            Region::Text(text) => {
                let length = text.chars().count();
                if length > MAX_TEXT_LENGTH {
                    tracing::warn!(index, length, max = MAX_TEXT_LENGTH, "text region too long");
                    return Err(SubmitError::TooLong {
                        index,
                        length,
                        max: MAX_TEXT_LENGTH,
                    });
                }

                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    content.push(ContentRegion::Text(trimmed.to_owned()));
                }
            }
            Region::Image(image) => content.push(ContentRegion::Image(image.clone())),
            Region::ImageUrl(_) | Region::Spacer | Region::Error(_) => {}
        }
    }
    Ok(content)
}

/// Whether the post button should be enabled.
pub fn can_submit(composition: &Composition) -> bool {
    !composition.is_reordering() && composition.regions().iter().any(Region::is_editable)
}

#[derive(Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum ContentRegionJson<'a> {
    Text(&'a str),
    Image(ImageContentJson<'a>),
}

#[derive(Serialize)]
struct ImageContentJson<'a> {
    width: u32,
    height: u32,
    bitmap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
}

impl Serialize for ContentRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json = match self {
            Self::Text(text) => ContentRegionJson::Text(text),
            Self::Image(image) => {
                let bitmap = image.bitmap();
                ContentRegionJson::Image(ImageContentJson {
                    width: bitmap.width(),
                    height: bitmap.height(),
                    bitmap: BASE64.encode(bitmap.bytes()),
                    data: image.data().map(|data| BASE64.encode(data)),
                    content_type: image.content_type(),
                })
            }
        };
        json.serialize(serializer)
    }
}
