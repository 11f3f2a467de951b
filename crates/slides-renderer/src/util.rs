//! Shared utility functions for markdown rendering.

use pulldown_cmark::{Alignment, HeadingLevel};

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// HTML `align` attribute for a table column (empty for unaligned columns).
#[must_use]
pub(crate) fn alignment_attr(alignment: Option<&Alignment>) -> &'static str {
    match alignment {
        Some(Alignment::Left) => r#" align="left""#,
        Some(Alignment::Center) => r#" align="center""#,
        Some(Alignment::Right) => r#" align="right""#,
        Some(Alignment::None) | None => "",
    }
}
