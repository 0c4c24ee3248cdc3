// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Omnibar: region editor core for composing posts from text and image blocks.
//!
//! A [`model::Composition`] owns the canonical region list. Edits go through
//! [`ops::apply_ops`], which returns the editable or reorderable display sequence to show;
//! [`submit::generate_post_content`] turns the finished list into the network payload.

pub mod hydrate;
pub mod model;
pub mod ops;
pub mod share;
pub mod store;
pub mod submit;
