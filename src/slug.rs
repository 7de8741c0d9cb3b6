//! Slug validation.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits and single hyphens, never starting or ending with a hyphen.

use crate::CmsError;

/// Return `true` when `value` is a valid slug.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Check an optional slug before it is written.
pub(crate) fn validate(slug: Option<&str>) -> Result<(), CmsError> {
    match slug {
        Some(slug) if !is_valid_slug(slug) => Err(CmsError::InvalidSlug(slug.to_owned())),
        _ => Ok(()),
    }
}
