// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derived display sequences and the text merge rule.
//!
//! The canonical region list is never shown directly. The inline editor shows the *editable*
//! sequence (spacers between blocks, a trailing caret text); reorder mode shows the
//! *reorderable* sequence (images and non-empty text only).

use super::region::Region;

/// One row of a derived display sequence.
///
/// `position` is the canonical index the row was derived from. Spacers and the synthesized
/// trailing caret text have no canonical counterpart and carry `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub position: Option<usize>,
    pub region: Region,
}

impl DisplayEntry {
    pub fn new(position: usize, region: Region) -> Self {
        Self {
            position: Some(position),
            region,
        }
    }

    fn synthesized(region: Region) -> Self {
        Self {
            position: None,
            region,
        }
    }
}

/// Expands the canonical list for inline editing.
pub fn editable_regions(regions: &[Region]) -> Vec<DisplayEntry> {
    let Some(last) = regions.last() else {
        return vec![DisplayEntry::synthesized(Region::empty_text())];
    };

    let mut entries = Vec::with_capacity(regions.len() * 2 + 1);
    for (index, region) in regions.iter().enumerate() {
        if index > 0 {
            entries.push(DisplayEntry::synthesized(Region::Spacer));
        }
        entries.push(DisplayEntry::new(index, region.clone()));
    }

    // Input always resumes at the end of the post, so only the end is padded.
    if !last.is_text() {
        entries.push(DisplayEntry::synthesized(Region::Spacer));
        entries.push(DisplayEntry::synthesized(Region::empty_text()));
    }

    entries
}

/// Collapses the canonical list for free reordering: images and non-empty text only.
pub fn reorderable_regions(regions: &[Region]) -> Vec<DisplayEntry> {
    regions
        .iter()
        .enumerate()
        .filter(|(_, region)| region.is_image() || (region.is_text() && !region.is_empty()))
        .map(|(index, region)| DisplayEntry::new(index, region.clone()))
        .collect()
}

/// Joins two text blocks with exactly one blank line between them.
///
/// Newlines the user already typed at the end of `left` count toward the blank line, and extra
/// ones are kept verbatim. An empty side contributes nothing.
pub fn join_text(left: &str, right: &str) -> String {
    if left.is_empty() {
        return right.to_owned();
    }
    if right.is_empty() {
        return left.to_owned();
    }

    let separator = if left.ends_with("\n\n") {
        ""
    } else if left.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };

    let mut joined = String::with_capacity(left.len() + separator.len() + right.len());
    joined.push_str(left);
    joined.push_str(separator);
    joined.push_str(right);
    joined
}

/// Merges every run of adjacent `Text` regions with [`join_text`].
pub fn coalesce_text(regions: impl IntoIterator<Item = Region>) -> Vec<Region> {
    let mut out: Vec<Region> = Vec::new();
    for region in regions {
        if let Region::Text(right) = &region {
            if let Some(Region::Text(left)) = out.last_mut() {
                *left = join_text(left, right);
                continue;
            }
        }
        out.push(region);
    }
    out
}

/// Brings an arbitrary region list into canonical form.
///
/// Spacers are dropped, adjacent text is coalesced, and an empty list becomes a single empty
/// text region. Already canonical input is returned unchanged.
pub fn normalize_regions(regions: impl IntoIterator<Item = Region>) -> Vec<Region> {
    let mut out = coalesce_text(regions.into_iter().filter(|region| !region.is_spacer()));
    if out.is_empty() {
        out.push(Region::empty_text());
    }
    out
}

/// Merges the regions at `index - 1` and `index` when both are text.
///
/// Used after a removal at `index` to restore the no-adjacent-text invariant.
pub(crate) fn merge_text_at(regions: &mut Vec<Region>, index: usize) {
    if index == 0 || index >= regions.len() {
        return;
    }
    if !(regions[index - 1].is_text() && regions[index].is_text()) {
        return;
    }

    let right = regions.remove(index);
    if let (Region::Text(left), Region::Text(right)) = (&mut regions[index - 1], right) {
        *left = join_text(left, &right);
    }
}
