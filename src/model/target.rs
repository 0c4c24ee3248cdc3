// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{CommentId, PostId};

const POST_DRAFT_NAME: &str = "omnibar_v2_post";
const COMMENT_DRAFT_PREFIX: &str = "omnibar_v2_comment_";

/// What a composition will be submitted as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComposeTarget {
    NewPost,
    /// A new comment on `parent_post_id` (the repost id when commenting on a repost).
    Comment {
        parent_post_id: PostId,
    },
    EditPost {
        post_id: PostId,
    },
    EditComment {
        post_id: PostId,
        comment_id: CommentId,
    },
}

impl ComposeTarget {
    /// Name of the draft an abandoned composition is saved under.
    ///
    /// Edits are never drafted: cancelling an edit discards it.
    pub fn draft_name(&self) -> Option<String> {
        match self {
            Self::NewPost => Some(POST_DRAFT_NAME.to_owned()),
            Self::Comment { parent_post_id } => {
                Some(format!("{COMMENT_DRAFT_PREFIX}{parent_post_id}"))
            }
            Self::EditPost { .. } | Self::EditComment { .. } => None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::EditPost { .. } | Self::EditComment { .. })
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. } | Self::EditComment { .. })
    }
}
