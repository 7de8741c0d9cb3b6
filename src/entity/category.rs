use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: Option<String>,
    #[sea_orm(indexed)]
    pub parent_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Parent,
    #[sea_orm(has_many = "super::content_category::Entity")]
    ContentCategory,
}

impl Related<super::content_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentCategory.def()
    }
}

impl Related<super::content::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_category::Relation::Content.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_category::Relation::Category.def().rev())
    }
}

/// Walks from a category to its parent.
#[derive(Debug)]
pub struct ParentLink;

impl Linked for ParentLink {
    type FromEntity = Entity;

    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Parent.def()]
    }
}

impl ActiveModelBehavior for ActiveModel {}
