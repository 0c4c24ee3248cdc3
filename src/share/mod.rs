// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content posted from the system share sheet.

use crate::model::{Bitmap, ImageRegion};
use crate::submit::ContentRegion;

/// One shared item as the share sheet previews it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPreview {
    pub image: Option<Bitmap>,
    pub text: Option<String>,
}

impl ItemPreview {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            image: None,
            text: Some(text.into()),
        }
    }

    pub fn image(bitmap: Bitmap) -> Self {
        Self {
            image: Some(bitmap),
            text: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.image.is_none() && self.text.as_deref().map_or(true, is_blank)
    }
}

/// Whether the share sheet has anything worth posting.
pub fn has_share_content(context_text: Option<&str>, previews: &[ItemPreview]) -> bool {
    context_text.is_some_and(|text| !is_blank(text))
        || previews.iter().any(|preview| !preview.is_empty())
}

/// Builds submission content from the text typed into the share sheet and the shared items.
///
/// The typed text comes first. Item text that repeats text already emitted is dropped, since
/// share sheets commonly pre-fill the context with the shared link.
pub fn prep_share_content(context_text: Option<&str>, previews: &[ItemPreview]) -> Vec<ContentRegion> {
    let mut content = Vec::with_capacity(previews.len() + 1);
    let mut seen: Vec<&str> = Vec::new();

    if let Some(text) = context_text.filter(|text| !is_blank(text)) {
        content.push(ContentRegion::Text(text.to_owned()));
        seen.push(text);
    }

    for preview in previews {
        if let Some(text) = preview.text.as_deref().filter(|text| !is_blank(text)) {
            if !seen.contains(&text) {
                content.push(ContentRegion::Text(text.to_owned()));
                seen.push(text);
            }
        }
        if let Some(bitmap) = &preview.image {
            content.push(ContentRegion::Image(ImageRegion::new(bitmap.clone())));
        }
    }

    tracing::debug!(items = previews.len(), regions = content.len(), "prepared share content");
    content
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{has_share_content, prep_share_content, ItemPreview};
    use crate::model::{Bitmap, ImageRegion};
    use crate::submit::ContentRegion;

    fn bitmap() -> Bitmap {
        Bitmap::new(1, 1, vec![9u8; 4])
    }

    fn text(value: &str) -> ContentRegion {
        ContentRegion::Text(value.to_owned())
    }

    #[test]
    fn context_comes_first_then_items_in_order() {
        let previews = [
            ItemPreview::text("https://ello.co"),
            ItemPreview::image(bitmap()),
            ItemPreview::text("hello"),
        ];
        let content = prep_share_content(Some("yo"), &previews);
        assert_eq!(
            content,
            vec![
                text("yo"),
                text("https://ello.co"),
                ContentRegion::Image(ImageRegion::new(bitmap())),
                text("hello"),
            ]
        );
    }

    #[test]
    fn duplicate_text_is_filtered() {
        let content = prep_share_content(Some("yo"), &[ItemPreview::text("yo")]);
        assert_eq!(content, vec![text("yo")]);

        let previews = [ItemPreview::text("link"), ItemPreview::text("link")];
        assert_eq!(prep_share_content(None, &previews), vec![text("link")]);
    }

    #[test]
    fn blank_context_is_skipped() {
        let content = prep_share_content(Some("  "), &[ItemPreview::image(bitmap())]);
        assert_eq!(content.len(), 1);
        assert!(content[0].is_image());
    }

    #[test]
    fn item_with_text_and_image_emits_both() {
        let preview = ItemPreview {
            image: Some(bitmap()),
            text: Some("caption".to_owned()),
        };
        let content = prep_share_content(None, &[preview]);
        assert!(content[0].is_text() && content[1].is_image());
    }

    #[test]
    fn has_share_content_ignores_blank_input() {
        assert!(!has_share_content(None, &[]));
        assert!(!has_share_content(Some(" \n"), &[ItemPreview::default()]));
        assert!(has_share_content(Some("yo"), &[]));
        assert!(has_share_content(None, &[ItemPreview::image(bitmap())]));
    }
}
