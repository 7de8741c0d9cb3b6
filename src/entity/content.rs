use super::ContentStatus;
use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(default_value = "DRAFT")]
    pub status: ContentStatus,
    #[sea_orm(unique)]
    pub slug: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(indexed)]
    pub published_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::content_tag::Entity")]
    ContentTag,
    #[sea_orm(has_many = "super::content_category::Entity")]
    ContentCategory,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::content_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentTag.def()
    }
}

impl Related<super::content_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentCategory.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_tag::Relation::Content.def().rev())
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_category::Relation::Content.def().rev())
    }
}

/// Lifecycle rules applied on every `insert`, `update` and `save`:
///
/// - insert stamps `created_at` and `updated_at` with the same instant and
///   defaults `status` to [`ContentStatus::Draft`];
/// - update refreshes `updated_at` and never writes `created_at`;
/// - setting a published status while `published_at` is empty stamps
///   `published_at`.
///
/// Bulk statements built with `Entity::insert` / `Entity::update_many` bypass
/// these hooks.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = super::now();

        if insert {
            self.created_at = Set(now);
            self.updated_at = Set(now);
            if matches!(self.status, ActiveValue::NotSet) {
                self.status = Set(ContentStatus::Draft);
            }
        } else {
            let updated_at = match &self.created_at {
                ActiveValue::Unchanged(created_at) => now.max(*created_at),
                _ => now,
            };
            if self.created_at.is_set() {
                self.created_at = ActiveValue::NotSet;
            }
            self.updated_at = Set(updated_at);
        }

        if self.publishes() && self.lacks_published_at(insert) {
            self.published_at = Set(Some(now));
        }

        Ok(self)
    }
}

impl ActiveModel {
    fn publishes(&self) -> bool {
        match &self.status {
            ActiveValue::Set(status) => status.is_published(),
            _ => false,
        }
    }

    fn lacks_published_at(&self, insert: bool) -> bool {
        match &self.published_at {
            ActiveValue::Set(published_at) | ActiveValue::Unchanged(published_at) => {
                published_at.is_none()
            }
            ActiveValue::NotSet => insert,
        }
    }
}
