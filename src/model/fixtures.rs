// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::region::{Bitmap, Region};

pub(crate) fn text(value: &str) -> Region {
    Region::text(value)
}

pub(crate) fn image() -> Region {
    Region::image(Bitmap::new(1, 1, vec![0u8, 0, 0, 255]))
}

/// Compact shape of a region list: `T(text)`, `I`, `S`, `U`, `E`, separated by spaces.
pub(crate) fn kinds(regions: &[Region]) -> String {
    regions
        .iter()
        .map(|region| match region {
            Region::Text(text) => format!("T({text})"),
            Region::Image(_) => "I".to_owned(),
            Region::ImageUrl(_) => "U".to_owned(),
            Region::Spacer => "S".to_owned(),
            Region::Error(_) => "E".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
