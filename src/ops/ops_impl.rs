// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Edit/reorder mutation implementation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_edit_op(state: &mut EditState, op: &EditOp) -> Result<(), ApplyError> {
    match op {
        EditOp::SetRegions { regions } => {
            state.require_editing(OpKind::SetRegions)?;
            state.regions = normalize_regions(regions.iter().cloned());
            Ok(())
        }
        EditOp::DeleteRow { row } => {
            state.require_editing(OpKind::DeleteRow)?;
            let index = match resolve_row(&state.regions, *row)? {
                RowTarget::Canonical(index) if state.regions[index].is_removable() => index,
                _ => return Err(ApplyError::RowNotEditable { row: *row }),
            };

            state.regions.remove(index);
            merge_text_at(&mut state.regions, index);
            if state.regions.is_empty() {
                state.regions.push(Region::empty_text());
            }
            Ok(())
        }
        EditOp::AppendImage { image } => {
            state.require_editing(OpKind::AppendImage)?;
            // The trailing caret text is re-synthesized after the image.
            if state
                .regions
                .last()
                .is_some_and(|last| last.is_text() && last.is_empty())
            {
                state.regions.pop();
            }
            state.regions.push(Region::Image(image.clone()));
            Ok(())
        }
        EditOp::UpdateText { row, text } => {
            state.require_editing(OpKind::UpdateText)?;
            match resolve_row(&state.regions, *row)? {
                RowTarget::Canonical(index) => {
                    let Region::Text(existing) = &mut state.regions[index] else {
                        return Err(ApplyError::RowNotText { row: *row });
                    };
                    existing.clone_from(text);

                    // Only the first and last text blocks may be empty.
                    let last = state.regions.len() - 1;
                    if text.is_empty() && index > 0 && index < last {
                        state.regions.remove(index);
                        merge_text_at(&mut state.regions, index);
                    }
                    Ok(())
                }
                RowTarget::Caret => {
                    if !text.is_empty() {
                        state.regions.push(Region::text(text.clone()));
                    }
                    Ok(())
                }
                RowTarget::Spacer => Err(ApplyError::RowNotText { row: *row }),
            }
        }
        EditOp::PruneEmptyText => {
            state.require_editing(OpKind::PruneEmptyText)?;
            let last = state.regions.len().saturating_sub(1);
            let kept = std::mem::take(&mut state.regions)
                .into_iter()
                .enumerate()
                .filter(|(index, region)| *index == last || !(region.is_text() && region.is_empty()))
                .map(|(_, region)| region);
            state.regions = normalize_regions(kept);
            Ok(())
        }
        EditOp::ResolveImage { index, url, image } => {
            let Some(found) = locate_placeholder(&state.regions, *index, url) else {
                return Err(ApplyError::StaleImage {
                    index: *index,
                    url: url.clone(),
                });
            };

            state.regions[found] = match image {
                Some(image) => Region::Image(image.clone()),
                None => Region::Error(url.clone()),
            };
            Ok(())
        }
    }
}

fn apply_reorder_op(state: &mut EditState, op: &ReorderOp) -> Result<(), ApplyError> {
    match op {
        ReorderOp::Begin => {
            state.require_editing(OpKind::BeginReorder)?;
            let count = state
                .regions
                .iter()
                .filter(|region| region.is_unresolved())
                .count();
            if count > 0 {
                return Err(ApplyError::UnresolvedImages { count });
            }

            let list = reorderable_regions(&state.regions)
                .into_iter()
                .map(|entry| entry.region)
                .collect();
            state.reordering = Some(list);
            Ok(())
        }
        ReorderOp::Move { from, to } => {
            let list = state.reorder_list_mut(OpKind::MoveReorderable)?;
            let len = list.len();
            for position in [*from, *to] {
                if position >= len {
                    return Err(ApplyError::PositionOutOfRange { position, len });
                }
            }

            let region = list.remove(*from);
            list.insert(*to, region);
            Ok(())
        }
        ReorderOp::Delete { position } => {
            let list = state.reorder_list_mut(OpKind::DeleteReorderable)?;
            let len = list.len();
            if *position >= len {
                return Err(ApplyError::PositionOutOfRange {
                    position: *position,
                    len,
                });
            }

            list.remove(*position);
            merge_text_at(list, *position);
            if list.is_empty() {
                // Nothing left to reorder.
                state.reordering = None;
                state.regions = vec![Region::empty_text()];
            }
            Ok(())
        }
        ReorderOp::End => {
            let list = std::mem::take(state.reorder_list_mut(OpKind::EndReorder)?);
            let mut regions = coalesce_text(list);
            if !regions.last().is_some_and(Region::is_text) {
                regions.push(Region::empty_text());
            }
            state.regions = regions;
            state.reordering = None;
            Ok(())
        }
    }
}

// `index` is where the placeholder sat when its fetch started; edits made since then may have
// shifted it. Among placeholders for the same url the one closest to `index` wins.
fn locate_placeholder(regions: &[Region], index: usize, url: &str) -> Option<usize> {
    if matches!(regions.get(index), Some(Region::ImageUrl(pending)) if pending == url) {
        return Some(index);
    }
    regions
        .iter()
        .enumerate()
        .filter(|(_, region)| matches!(region, Region::ImageUrl(pending) if pending == url))
        .map(|(found, _)| found)
        .min_by_key(|found| found.abs_diff(index))
}

/// What a row of the editable sequence points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowTarget {
    Canonical(usize),
    Spacer,
    /// The synthesized trailing text after a non-text last region.
    Caret,
}

// Mirrors `editable_regions` without materializing it: canonical regions sit on even rows,
// spacers on odd rows, and a padded list gains a spacer plus a caret row.
fn resolve_row(regions: &[Region], row: usize) -> Result<RowTarget, ApplyError> {
    let Some(last) = regions.last() else {
        return if row == 0 {
            Ok(RowTarget::Caret)
        } else {
            Err(ApplyError::RowOutOfRange { row, len: 1 })
        };
    };

    let canonical_rows = regions.len() * 2 - 1;
    let len = if last.is_text() {
        canonical_rows
    } else {
        canonical_rows + 2
    };
    if row >= len {
        return Err(ApplyError::RowOutOfRange { row, len });
    }

    if row % 2 == 1 {
        Ok(RowTarget::Spacer)
    } else if row < canonical_rows {
        Ok(RowTarget::Canonical(row / 2))
    } else {
        Ok(RowTarget::Caret)
    }
}
