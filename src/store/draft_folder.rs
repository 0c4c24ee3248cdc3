// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::model::{normalize_regions, Bitmap, ComposeTarget, Composition, ImageRegion, Region};

const DRAFT_FILE_EXTENSION: &str = "draft.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Base64 {
        path: PathBuf,
        field: &'static str,
        source: base64::DecodeError,
    },
    SymlinkRefused {
        path: PathBuf,
    },
    InvalidDraftName {
        name: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Base64 {
                path,
                field,
                source,
            } => write!(f, "invalid base64 in {field} at {path:?}: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
            Self::InvalidDraftName { name } => write!(f, "invalid draft name: {name:?}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Base64 { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
            Self::InvalidDraftName { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// A directory of unsent compositions, one JSON file per draft name.
#[derive(Debug, Clone)]
pub struct DraftFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl DraftFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn draft_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidDraftName {
                name: name.to_owned(),
            });
        }
        let file_stem = encode_persisted_id_segment(name);
        Ok(self.root.join(format!("{file_stem}.{DRAFT_FILE_EXTENSION}")))
    }

    /// Writes the persistable regions (text and loaded images) under `name`.
    pub fn save_draft(&self, name: &str, regions: &[Region]) -> Result<(), StoreError> {
        let path = self.draft_path(name)?;
        let draft = draft_to_json(regions);
        let mut contents = serde_json::to_vec_pretty(&draft).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        contents.push(b'\n');

        write_atomic(&self.root, &path, &contents, self.durability)?;
        tracing::debug!(
            draft = name,
            regions = draft.regions.len(),
            path = %path.display(),
            "saved draft"
        );
        Ok(())
    }

    /// Reads a draft without removing it. A missing draft is `Ok(None)`.
    pub fn load_draft(&self, name: &str) -> Result<Option<Vec<Region>>, StoreError> {
        let path = self.draft_path(name)?;
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let draft: DraftJson =
            serde_json::from_slice(&contents).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
        let regions = draft_from_json(&path, draft)?;
        tracing::debug!(draft = name, regions = regions.len(), "loaded draft");
        Ok(Some(regions))
    }

    /// Reads and deletes a draft; a restored draft is consumed.
    pub fn take_draft(&self, name: &str) -> Result<Option<Vec<Region>>, StoreError> {
        let regions = self.load_draft(name)?;
        if regions.is_some() {
            self.remove_draft(name)?;
        }
        Ok(regions)
    }

    /// Returns whether a draft existed.
    pub fn remove_draft(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.draft_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(draft = name, "removed draft");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Starts a composition for `target`.
    ///
    /// Non-empty `default_text` wins and leaves any draft in place. Otherwise the target's draft,
    /// if there is one, is taken and seeds the composition.
    pub fn open(
        &self,
        target: &ComposeTarget,
        default_text: Option<&str>,
    ) -> Result<Composition, StoreError> {
        if let Some(text) = default_text.filter(|text| !text.is_empty()) {
            return Ok(Composition::with_regions([Region::text(text)]));
        }

        let Some(name) = target.draft_name() else {
            return Ok(Composition::new());
        };
        match self.take_draft(&name)? {
            Some(regions) => Ok(Composition::with_regions(regions)),
            None => Ok(Composition::new()),
        }
    }

    /// Keeps an abandoned composition for later. Returns whether a draft was written.
    ///
    /// Edits are never drafted. A composition with nothing editable clears the target's draft
    /// instead of writing an empty one.
    pub fn save_on_cancel(
        &self,
        target: &ComposeTarget,
        composition: &Composition,
    ) -> Result<bool, StoreError> {
        let Some(name) = target.draft_name() else {
            return Ok(false);
        };
        if !composition.regions().iter().any(Region::is_editable) {
            self.remove_draft(&name)?;
            return Ok(false);
        }
        self.save_draft(&name, composition.regions())?;
        Ok(true)
    }
}

fn encode_persisted_id_segment(segment: &str) -> String {
    if !needs_windows_safe_filename_segment_encoding(segment) {
        return segment.to_owned();
    }

    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(1 + segment.len().saturating_mul(2));
    out.push('~');
    for &b in segment.as_bytes() {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

fn needs_windows_safe_filename_segment_encoding(segment: &str) -> bool {
    if segment.starts_with('~') || segment.starts_with('.') {
        return true;
    }
    if segment.ends_with(' ') || segment.ends_with('.') {
        return true;
    }

    let trimmed = segment.trim_end_matches([' ', '.']);
    let base = trimmed.split('.').next().unwrap_or(trimmed);
    if is_windows_device_name(base) {
        return true;
    }

    segment.chars().any(|ch| {
        matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
            || ch <= '\u{1f}'
            || ch == '\u{7f}'
    })
}

fn is_windows_device_name(base: &str) -> bool {
    let base = base.to_ascii_uppercase();
    match base.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        _ => base
            .strip_prefix("COM")
            .or_else(|| base.strip_prefix("LPT"))
            .is_some_and(|num| matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")),
    }
}

// Extracted draft JSON mapping and atomic write helpers.
include!("draft_folder/helpers.rs");
