use crate::{
    entity::{
        category, comment, content, content_category, content_tag, prelude::*, tag, ContentStatus,
    },
    slug, CmsError,
};
use sea_orm::{
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, Set, TransactionTrait, TryInsertResult,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Fields of a new content item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    /// `None` stores [`ContentStatus::Draft`].
    pub status: Option<ContentStatus>,
}

/// Changes to an existing content item; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<ContentStatus>,
    pub slug: Option<Option<String>>,
    pub published_at: Option<Option<DateTimeWithTimeZone>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: Option<String>,
    pub parent_id: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub slug: Option<Option<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content_id: i32,
    pub author: String,
    pub body: String,
}

/// What happens to the child categories of a deleted category.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryDeletePolicy {
    /// Refuse while any child exists.
    #[default]
    Restrict,
    /// Detach the children, turning them into roots.
    Nullify,
    /// Delete the whole subtree.
    Cascade,
}

/// Writes, each in its own transaction.
#[derive(Debug)]
pub struct Mutation;

impl Mutation {
    #[instrument(skip(db))]
    pub async fn create_content(
        db: &DbConn,
        form_data: NewContent,
    ) -> Result<content::Model, CmsError> {
        slug::validate(form_data.slug.as_deref())?;

        let txn = db.begin().await?;
        let mut model = content::ActiveModel {
            title: Set(form_data.title),
            content: Set(form_data.content),
            slug: Set(form_data.slug),
            ..Default::default()
        };
        if let Some(status) = form_data.status {
            model.status = Set(status);
        }
        let content = model.insert(&txn).await?;
        txn.commit().await?;

        info!(id = content.id, "content created");
        Ok(content)
    }

    #[instrument(skip(db))]
    pub async fn update_content_by_id(
        db: &DbConn,
        id: i32,
        changes: ContentChanges,
    ) -> Result<content::Model, CmsError> {
        if let Some(slug) = &changes.slug {
            slug::validate(slug.as_deref())?;
        }

        let txn = db.begin().await?;
        let mut model = Content::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CmsError::NotFound {
                entity: "content",
                id,
            })?
            .into_active_model();

        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(body) = changes.content {
            model.content = Set(body);
        }
        if let Some(status) = changes.status {
            model.status = Set(status);
        }
        if let Some(slug) = changes.slug {
            model.slug = Set(slug);
        }
        if let Some(published_at) = changes.published_at {
            model.published_at = Set(published_at);
        }

        let content = model.update(&txn).await?;
        txn.commit().await?;
        Ok(content)
    }

    /// Delete a content item; its comments and join rows go with it.
    #[instrument(skip(db))]
    pub async fn delete_content(db: &DbConn, id: i32) -> Result<(), CmsError> {
        let txn = db.begin().await?;
        let res = Content::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(CmsError::NotFound {
                entity: "content",
                id,
            });
        }
        txn.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create_category(
        db: &DbConn,
        form_data: NewCategory,
    ) -> Result<category::Model, CmsError> {
        slug::validate(form_data.slug.as_deref())?;

        let txn = db.begin().await?;
        let category = category::ActiveModel {
            name: Set(form_data.name),
            slug: Set(form_data.slug),
            parent_id: Set(form_data.parent_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(category)
    }

    #[instrument(skip(db))]
    pub async fn update_category_by_id(
        db: &DbConn,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<category::Model, CmsError> {
        if let Some(slug) = &changes.slug {
            slug::validate(slug.as_deref())?;
        }

        let txn = db.begin().await?;
        let mut model = find_category(&txn, id).await?.into_active_model();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(slug) = changes.slug {
            model.slug = Set(slug);
        }
        let category = model.update(&txn).await?;
        txn.commit().await?;
        Ok(category)
    }

    /// Move a category under `parent_id`, or make it a root with `None`.
    ///
    /// Fails with [`CmsError::CategoryCycle`] when `parent_id` is the category
    /// itself or one of its descendants.
    #[instrument(skip(db))]
    pub async fn set_category_parent(
        db: &DbConn,
        id: i32,
        parent_id: Option<i32>,
    ) -> Result<category::Model, CmsError> {
        let txn = db.begin().await?;
        let tree = crate::Query::category_tree(&txn).await?;
        let Some(category) = tree.get(id).cloned() else {
            return Err(CmsError::NotFound {
                entity: "category",
                id,
            });
        };

        if let Some(parent) = parent_id {
            if !tree.contains(parent) {
                return Err(CmsError::NotFound {
                    entity: "category",
                    id: parent,
                });
            }
            if tree.would_create_cycle(id, parent) {
                warn!(category = id, parent, "rejected cyclic parent");
                return Err(CmsError::CategoryCycle {
                    category: id,
                    parent,
                });
            }
        }

        let mut model = category.into_active_model();
        model.parent_id = Set(parent_id);
        let category = model.update(&txn).await?;
        txn.commit().await?;
        Ok(category)
    }

    /// Delete a category, handling its children according to `policy`.
    ///
    /// Content associations of every deleted category are removed with it.
    #[instrument(skip(db))]
    pub async fn delete_category(
        db: &DbConn,
        id: i32,
        policy: CategoryDeletePolicy,
    ) -> Result<(), CmsError> {
        let txn = db.begin().await?;
        find_category(&txn, id).await?;

        match policy {
            CategoryDeletePolicy::Restrict => {
                let children = Category::find()
                    .filter(category::Column::ParentId.eq(id))
                    .count(&txn)
                    .await?;
                if children > 0 {
                    warn!(category = id, children, "category still has children");
                    return Err(CmsError::CategoryHasChildren {
                        category: id,
                        children,
                    });
                }
                Category::delete_by_id(id).exec(&txn).await?;
            }
            CategoryDeletePolicy::Nullify => {
                Category::update_many()
                    .col_expr(
                        category::Column::ParentId,
                        Expr::value(Option::<i32>::None),
                    )
                    .filter(category::Column::ParentId.eq(id))
                    .exec(&txn)
                    .await?;
                Category::delete_by_id(id).exec(&txn).await?;
            }
            CategoryDeletePolicy::Cascade => {
                let tree = crate::Query::category_tree(&txn).await?;
                let mut doomed = tree.descendants(id);
                doomed.reverse();
                doomed.push(id);
                for category in doomed {
                    Category::delete_by_id(category).exec(&txn).await?;
                }
            }
        }

        txn.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create_tag(db: &DbConn, form_data: NewTag) -> Result<tag::Model, CmsError> {
        slug::validate(form_data.slug.as_deref())?;

        let txn = db.begin().await?;
        let tag = tag::ActiveModel {
            name: Set(form_data.name),
            slug: Set(form_data.slug),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(tag)
    }

    /// Delete a tag; it is detached from every content item.
    #[instrument(skip(db))]
    pub async fn delete_tag(db: &DbConn, id: i32) -> Result<(), CmsError> {
        let txn = db.begin().await?;
        let res = Tag::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(CmsError::NotFound { entity: "tag", id });
        }
        txn.commit().await?;
        Ok(())
    }

    /// Add a comment; fails with [`CmsError::ForeignKeyViolation`] when the
    /// content does not exist.
    #[instrument(skip(db, form_data), fields(content_id = form_data.content_id))]
    pub async fn create_comment(
        db: &DbConn,
        form_data: NewComment,
    ) -> Result<comment::Model, CmsError> {
        let txn = db.begin().await?;
        let comment = comment::ActiveModel {
            content_id: Set(form_data.content_id),
            author: Set(form_data.author),
            body: Set(form_data.body),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(comment)
    }

    #[instrument(skip(db))]
    pub async fn delete_comment(db: &DbConn, id: i32) -> Result<(), CmsError> {
        let txn = db.begin().await?;
        let res = Comment::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(CmsError::NotFound {
                entity: "comment",
                id,
            });
        }
        txn.commit().await?;
        Ok(())
    }

    /// Associate a tag with a content item.
    ///
    /// Attaching an existing pair is a no-op; returns whether a row was added.
    #[instrument(skip(db))]
    pub async fn attach_tag(db: &DbConn, content_id: i32, tag_id: i32) -> Result<bool, CmsError> {
        let txn = db.begin().await?;
        let inserted = ContentTag::insert(content_tag::ActiveModel {
            content_id: Set(content_id),
            tag_id: Set(tag_id),
        })
        .on_conflict(
            OnConflict::columns([content_tag::Column::ContentId, content_tag::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(&txn)
        .await?;
        txn.commit().await?;
        Ok(matches!(inserted, TryInsertResult::Inserted(_)))
    }

    /// Returns whether the pair existed.
    #[instrument(skip(db))]
    pub async fn detach_tag(db: &DbConn, content_id: i32, tag_id: i32) -> Result<bool, CmsError> {
        let txn = db.begin().await?;
        let res = ContentTag::delete_many()
            .filter(content_tag::Column::ContentId.eq(content_id))
            .filter(content_tag::Column::TagId.eq(tag_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    /// Associate a category with a content item.
    ///
    /// Attaching an existing pair is a no-op; returns whether a row was added.
    #[instrument(skip(db))]
    pub async fn attach_category(
        db: &DbConn,
        content_id: i32,
        category_id: i32,
    ) -> Result<bool, CmsError> {
        let txn = db.begin().await?;
        let inserted = ContentCategory::insert(content_category::ActiveModel {
            content_id: Set(content_id),
            category_id: Set(category_id),
        })
        .on_conflict(
            OnConflict::columns([
                content_category::Column::ContentId,
                content_category::Column::CategoryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .do_nothing()
        .exec(&txn)
        .await?;
        txn.commit().await?;
        Ok(matches!(inserted, TryInsertResult::Inserted(_)))
    }

    /// Returns whether the pair existed.
    #[instrument(skip(db))]
    pub async fn detach_category(
        db: &DbConn,
        content_id: i32,
        category_id: i32,
    ) -> Result<bool, CmsError> {
        let txn = db.begin().await?;
        let res = ContentCategory::delete_many()
            .filter(content_category::Column::ContentId.eq(content_id))
            .filter(content_category::Column::CategoryId.eq(category_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}

async fn find_category<C>(db: &C, id: i32) -> Result<category::Model, CmsError>
where
    C: sea_orm::ConnectionTrait,
{
    Category::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CmsError::NotFound {
            entity: "category",
            id,
        })
}
