// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for unsent drafts on disk.
//!
//! A draft folder holds one JSON file per draft name (see
//! [`crate::model::ComposeTarget::draft_name`]); restoring a draft consumes it.

pub mod draft_folder;

pub use draft_folder::{DraftFolder, StoreError, WriteDurability};
