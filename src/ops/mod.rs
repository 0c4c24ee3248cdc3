// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for compositions.
//!
//! Operations are applied with optimistic concurrency (revision checks): row and position
//! arguments refer to the display sequence the caller derived at `base_rev`. A batch is
//! applied to a working copy and committed only if every op succeeds, and the result carries
//! the freshly derived display sequence for the view layer.

use std::fmt;

use crate::model::sequence::merge_text_at;
use crate::model::{
    coalesce_text, normalize_regions, reorderable_regions, Composition, DisplaySequence, EditMode,
    ImageRegion, Region,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Edit(EditOp),
    Reorder(ReorderOp),
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Self::Edit(EditOp::SetRegions { .. }) => OpKind::SetRegions,
            Self::Edit(EditOp::DeleteRow { .. }) => OpKind::DeleteRow,
            Self::Edit(EditOp::AppendImage { .. }) => OpKind::AppendImage,
            Self::Edit(EditOp::UpdateText { .. }) => OpKind::UpdateText,
            Self::Edit(EditOp::PruneEmptyText) => OpKind::PruneEmptyText,
            Self::Edit(EditOp::ResolveImage { .. }) => OpKind::ResolveImage,
            Self::Reorder(ReorderOp::Begin) => OpKind::BeginReorder,
            Self::Reorder(ReorderOp::Move { .. }) => OpKind::MoveReorderable,
            Self::Reorder(ReorderOp::Delete { .. }) => OpKind::DeleteReorderable,
            Self::Reorder(ReorderOp::End) => OpKind::EndReorder,
        }
    }
}

/// Operations against the canonical list; rows index the editable sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Replace the whole list (draft restore, default text, edit hydration).
    SetRegions { regions: Vec<Region> },
    DeleteRow { row: usize },
    AppendImage { image: ImageRegion },
    /// The user changed the text of a text row. Writing into the trailing caret row appends a
    /// new text region.
    UpdateText { row: usize, text: String },
    /// Drop empty text regions except the last one ("stop editing").
    PruneEmptyText,
    /// Settle a pending `ImageUrl` at canonical `index`. `image: None` marks the fetch as failed.
    ResolveImage {
        index: usize,
        url: String,
        image: Option<ImageRegion>,
    },
}

/// Operations of the free reorder mode; positions index the reorder list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOp {
    Begin,
    Move { from: usize, to: usize },
    Delete { position: usize },
    /// Commit the reorder list back into the canonical list.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    SetRegions,
    DeleteRow,
    AppendImage,
    UpdateText,
    PruneEmptyText,
    ResolveImage,
    BeginReorder,
    MoveReorderable,
    DeleteReorderable,
    EndReorder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub display: DisplaySequence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    WrongMode { op_kind: OpKind, mode: EditMode },
    RowOutOfRange { row: usize, len: usize },
    RowNotEditable { row: usize },
    RowNotText { row: usize },
    PositionOutOfRange { position: usize, len: usize },
    UnresolvedImages { count: usize },
    StaleImage { index: usize, url: String },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::WrongMode { op_kind, mode } => {
                write!(f, "op {op_kind:?} is not allowed while {mode}")
            }
            Self::RowOutOfRange { row, len } => {
                write!(f, "row {row} is out of range (rows={len})")
            }
            Self::RowNotEditable { row } => write!(f, "row {row} is not editable"),
            Self::RowNotText { row } => write!(f, "row {row} is not a text row"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "reorder position {position} is out of range (len={len})")
            }
            Self::UnresolvedImages { count } => {
                write!(f, "cannot reorder while {count} image(s) are pending or failed")
            }
            Self::StaleImage { index, url } => {
                write!(f, "no pending image {url} at index {index}")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

pub fn apply_ops(
    composition: &mut Composition,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = composition.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            display: composition.display(),
        });
    }

    let mut state = EditState {
        regions: composition.regions().to_vec(),
        reordering: composition.reorder_list().map(<[Region]>::to_vec),
    };

    for op in ops {
        match op {
            Op::Edit(edit_op) => apply_edit_op(&mut state, edit_op)?,
            Op::Reorder(reorder_op) => apply_reorder_op(&mut state, reorder_op)?,
        }
    }

    composition.replace_state(state.regions, state.reordering);
    composition.bump_rev();
    let new_rev = composition.rev();

    tracing::debug!(
        rev = new_rev,
        applied = ops.len(),
        mode = %composition.mode(),
        regions = composition.regions().len(),
        "applied composition ops"
    );

    Ok(ApplyResult { new_rev, applied: ops.len(), display: composition.display() })
}

/// Working copy of a composition while a batch is applied.
#[derive(Debug)]
struct EditState {
    regions: Vec<Region>,
    reordering: Option<Vec<Region>>,
}

impl EditState {
    fn mode(&self) -> EditMode {
        if self.reordering.is_some() {
            EditMode::Reordering
        } else {
            EditMode::Editing
        }
    }

    fn require_editing(&self, op_kind: OpKind) -> Result<(), ApplyError> {
        match self.mode() {
            EditMode::Editing => Ok(()),
            mode => Err(ApplyError::WrongMode { op_kind, mode }),
        }
    }

    fn reorder_list_mut(&mut self, op_kind: OpKind) -> Result<&mut Vec<Region>, ApplyError> {
        let mode = self.mode();
        self.reordering
            .as_mut()
            .ok_or(ApplyError::WrongMode { op_kind, mode })
    }
}

// Extracted op-application implementation for edit/reorder mutations.
include!("ops_impl.rs");
