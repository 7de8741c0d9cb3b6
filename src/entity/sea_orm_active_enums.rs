use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Publication state of a content item.
///
/// Any state may follow any other; see [`super::content::ActiveModel`] for the
/// `published_at` stamping rule.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ContentStatus {
    #[default]
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
    /// Published, but only visible to authenticated readers.
    #[sea_orm(string_value = "PRIVATE")]
    Private,
}

impl ContentStatus {
    /// Every variant that counts as published.
    pub const PUBLISHED: [Self; 2] = [Self::Published, Self::Private];

    pub fn is_published(&self) -> bool {
        Self::PUBLISHED.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn draft_is_the_default_and_unpublished() {
        assert_eq!(ContentStatus::default(), ContentStatus::Draft);
        assert!(!ContentStatus::Draft.is_published());
        assert!(ContentStatus::Published.is_published());
        assert!(ContentStatus::Private.is_published());
    }

    #[test]
    fn stored_as_upper_case_strings() {
        assert_eq!(ContentStatus::Draft.to_value(), "DRAFT".to_owned());
        assert_eq!(
            ContentStatus::try_from_value(&"PRIVATE".to_owned()).unwrap(),
            ContentStatus::Private
        );
        assert!(ContentStatus::try_from_value(&"ARCHIVED".to_owned()).is_err());
    }

    #[test]
    fn serialized_like_the_stored_value() {
        assert_eq!(
            serde_json::to_string(&ContentStatus::Published).unwrap(),
            "\"PUBLISHED\""
        );
        assert_eq!(
            serde_json::from_str::<ContentStatus>("\"DRAFT\"").unwrap(),
            ContentStatus::Draft
        );
    }
}
