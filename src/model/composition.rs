// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::region::Region;
use super::sequence::{editable_regions, normalize_regions, reorderable_regions, DisplayEntry};

/// Which display sequence the composer is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    Editing,
    Reordering,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => f.write_str("editing"),
            Self::Reordering => f.write_str("reordering"),
        }
    }
}

/// The derived sequence for the active mode, handed to the view layer after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySequence {
    Editable(Vec<DisplayEntry>),
    Reorderable(Vec<DisplayEntry>),
}

impl DisplaySequence {
    pub fn mode(&self) -> EditMode {
        match self {
            Self::Editable(_) => EditMode::Editing,
            Self::Reorderable(_) => EditMode::Reordering,
        }
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        match self {
            Self::Editable(entries) | Self::Reorderable(entries) => entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.entries().iter().map(|entry| &entry.region)
    }
}

/// A post or comment being composed.
///
/// Holds the canonical region list (no spacers, no adjacent text) and, while reordering, the
/// working reorder list that replaces it on commit. All mutation goes through
/// [`crate::ops::apply_ops`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    regions: Vec<Region>,
    reordering: Option<Vec<Region>>,
    rev: u64,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    pub fn new() -> Self {
        Self {
            regions: vec![Region::empty_text()],
            reordering: None,
            rev: 0,
        }
    }

    pub fn with_regions(regions: impl IntoIterator<Item = Region>) -> Self {
        Self {
            regions: normalize_regions(regions),
            reordering: None,
            rev: 0,
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn mode(&self) -> EditMode {
        if self.reordering.is_some() {
            EditMode::Reordering
        } else {
            EditMode::Editing
        }
    }

    pub fn is_reordering(&self) -> bool {
        self.reordering.is_some()
    }

    /// The working reorder list, present only in [`EditMode::Reordering`].
    pub fn reorder_list(&self) -> Option<&[Region]> {
        self.reordering.as_deref()
    }

    pub fn editable_regions(&self) -> Vec<DisplayEntry> {
        editable_regions(&self.regions)
    }

    /// While reordering, positions index the working reorder list; otherwise they are
    /// canonical indices.
    pub fn reorderable_regions(&self) -> Vec<DisplayEntry> {
        match &self.reordering {
            Some(list) => list
                .iter()
                .enumerate()
                .map(|(index, region)| DisplayEntry::new(index, region.clone()))
                .collect(),
            None => reorderable_regions(&self.regions),
        }
    }

    pub fn display(&self) -> DisplaySequence {
        match self.mode() {
            EditMode::Editing => DisplaySequence::Editable(self.editable_regions()),
            EditMode::Reordering => DisplaySequence::Reorderable(self.reorderable_regions()),
        }
    }

    pub(crate) fn replace_state(&mut self, regions: Vec<Region>, reordering: Option<Vec<Region>>) {
        self.regions = regions;
        self.reordering = reordering;
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}
