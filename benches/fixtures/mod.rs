// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use omnibar::model::{Bitmap, Composition, Region};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("omnibar_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A short post: a few paragraphs and two images.
    Small,
    /// A long thread-style post with an image every third block.
    Medium,
    /// Many large images with long captions.
    LargeImages,
}

fn paragraph(idx: usize, len: usize) -> String {
    let mut out = format!("paragraph {idx:04}: ");
    while out.len() < len {
        out.push_str("lorem ipsum dolor sit amet ");
    }
    out.truncate(len);
    out
}

fn bitmap(idx: usize, side: u32) -> Bitmap {
    let len = (side as usize) * (side as usize) * 4;
    let bytes = (0..len)
        .map(|offset| (offset.wrapping_mul(31).wrapping_add(idx)) as u8)
        .collect::<Vec<_>>();
    Bitmap::new(side, side, bytes)
}

/// Canonical regions for `case`: alternating text and image blocks ending in a text block.
pub fn regions(case: Case) -> Vec<Region> {
    let (blocks, image_every, text_len, side) = match case {
        Case::Small => (5, 2, 80, 8),
        Case::Medium => (60, 3, 240, 16),
        Case::LargeImages => (40, 1, 1200, 64),
    };

    let mut regions = Vec::with_capacity(blocks + 1);
    for idx in 0..blocks {
        if idx % (image_every + 1) == image_every {
            regions.push(Region::image(bitmap(idx, side)));
        } else {
            regions.push(Region::text(paragraph(idx, text_len)));
        }
    }
    regions.push(Region::empty_text());
    regions
}

pub fn composition(case: Case) -> Composition {
    Composition::with_regions(regions(case))
}
