// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seeding a composition from an existing post or comment.
//!
//! Stored image regions only carry a URL, so editing starts with `ImageUrl` placeholders.
//! Fetches run elsewhere and report back through a [`FetchCompleter`]; the editing side drains
//! the [`HydrationQueue`] into its composition, applying each completion as an ordinary
//! `ResolveImage` op, so a completion never interleaves with a user edit.

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use crate::model::{coalesce_text, Bitmap, Composition, ImageRegion, Region};
use crate::ops::{apply_ops, ApplyError, EditOp, Op};

const ANIMATED_CONTENT_TYPE: &str = "image/gif";

/// A region of an already published post, as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRegion {
    Text { content: String },
    Image { url: Option<String> },
    Embed { url: String },
}

/// Whether the stored body can be opened in the editor at all.
///
/// Bodies with embeds (or without any regions) are not editable.
pub fn can_edit_regions(regions: Option<&[StoredRegion]>) -> bool {
    let Some(regions) = regions else {
        return false;
    };
    !regions.is_empty()
        && regions
            .iter()
            .all(|region| matches!(region, StoredRegion::Text { .. } | StoredRegion::Image { .. }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub index: usize,
    pub url: String,
}

/// What a fetch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Image(Bitmap),
    /// An animated image: the poster frame plus the original GIF bytes.
    Animated { poster: Bitmap, data: Vec<u8> },
    Failed,
}

impl FetchOutcome {
    fn into_image(self) -> Option<ImageRegion> {
        match self {
            Self::Image(bitmap) => Some(ImageRegion::new(bitmap)),
            Self::Animated { poster, data } => {
                Some(ImageRegion::with_data(poster, data, ANIMATED_CONTENT_TYPE))
            }
            Self::Failed => None,
        }
    }
}

/// Maps stored regions to canonical regions.
///
/// Text is coalesced before pending indices are taken, so every [`PendingImage::index`] points
/// at its `ImageUrl` in the returned list. Images without a URL and embeds are skipped.
pub fn seed_regions(stored: &[StoredRegion]) -> (Vec<Region>, Vec<PendingImage>) {
    let regions = coalesce_text(stored.iter().filter_map(|region| match region {
        StoredRegion::Text { content } => Some(Region::text(content.clone())),
        StoredRegion::Image { url: Some(url) } => Some(Region::ImageUrl(url.clone())),
        StoredRegion::Image { url: None } | StoredRegion::Embed { .. } => None,
    }));

    let pending = regions
        .iter()
        .enumerate()
        .filter_map(|(index, region)| match region {
            Region::ImageUrl(url) => Some(PendingImage {
                index,
                url: url.clone(),
            }),
            _ => None,
        })
        .collect();

    (regions, pending)
}

/// Seeds a composition for editing and returns the queue its fetches report to.
pub fn start_hydration(stored: &[StoredRegion]) -> (Composition, HydrationQueue) {
    let (regions, pending) = seed_regions(stored);
    tracing::debug!(
        regions = regions.len(),
        pending = pending.len(),
        "seeded composition for editing"
    );
    (Composition::with_regions(regions), HydrationQueue::new(pending))
}

#[derive(Debug)]
struct Completion {
    index: usize,
    url: String,
    outcome: FetchOutcome,
}

/// Handle a fetch uses to report its result.
#[derive(Debug, Clone)]
pub struct FetchCompleter {
    tx: mpsc::UnboundedSender<Completion>,
}

impl FetchCompleter {
    /// Returns `false` when the queue is gone; the result is then discarded.
    pub fn complete(&self, image: &PendingImage, outcome: FetchOutcome) -> bool {
        self.tx
            .send(Completion {
                index: image.index,
                url: image.url.clone(),
                outcome,
            })
            .is_ok()
    }
}

#[derive(Debug)]
pub struct HydrationQueue {
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    pending: BTreeMap<usize, String>,
}

impl HydrationQueue {
    pub fn new(pending: impl IntoIterator<Item = PendingImage>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            pending: pending
                .into_iter()
                .map(|image| (image.index, image.url))
                .collect(),
        }
    }

    pub fn completer(&self) -> FetchCompleter {
        FetchCompleter {
            tx: self.tx.clone(),
        }
    }

    pub fn pending(&self) -> Vec<PendingImage> {
        self.pending
            .iter()
            .map(|(index, url)| PendingImage {
                index: *index,
                url: url.clone(),
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies the completions that have arrived so far and returns how many landed.
    ///
    /// Each completion is its own batch and finds its placeholder even if edits moved it. A
    /// completion whose placeholder was deleted in the meantime is dropped.
    pub fn apply_ready(&mut self, composition: &mut Composition) -> Result<usize, ApplyError> {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply_completion(composition, completion)? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Waits for the next completion that lands in `composition`.
    ///
    /// Returns `Ok(false)` once every pending image is settled.
    pub async fn apply_next(&mut self, composition: &mut Composition) -> Result<bool, ApplyError> {
        while !self.is_complete() {
            let Some(completion) = self.rx.recv().await else {
                return Ok(false);
            };
            if self.apply_completion(composition, completion)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // An entry leaves `pending` only once its op applied or its placeholder is gone for good.
    fn apply_completion(
        &mut self,
        composition: &mut Composition,
        completion: Completion,
    ) -> Result<bool, ApplyError> {
        let Completion { index, url, outcome } = completion;
        if self.pending.get(&index) != Some(&url) {
            tracing::debug!(index, url = %url, "ignored unexpected image completion");
            return Ok(false);
        }

        let op = Op::Edit(EditOp::ResolveImage {
            index,
            url,
            image: outcome.into_image(),
        });
        let rev = composition.rev();
        match apply_ops(composition, rev, std::slice::from_ref(&op)) {
            Ok(_) => {
                self.pending.remove(&index);
                Ok(true)
            }
            Err(ApplyError::StaleImage { url, .. }) => {
                tracing::debug!(index, url = %url, "dropped stale image completion");
                self.pending.remove(&index);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}
