// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A composition owns a canonical list of regions; the editable and reorderable display
//! sequences are derived from it on demand.

pub mod composition;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod region;
pub mod sequence;
pub mod target;

pub use composition::{Composition, DisplaySequence, EditMode};
pub use ids::{CommentId, Id, IdError, PostId};
pub use region::{Bitmap, ImageRegion, Region};
pub use sequence::{
    coalesce_text, editable_regions, join_text, normalize_regions, reorderable_regions,
    DisplayEntry,
};
pub use target::ComposeTarget;
