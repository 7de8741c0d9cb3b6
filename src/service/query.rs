use crate::{
    entity::{category, comment, content, prelude::*, tag, ContentStatus},
    CategoryTree, CmsError,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

/// Read-only lookups.
#[derive(Debug)]
pub struct Query;

impl Query {
    pub async fn find_content_by_id<C>(db: &C, id: i32) -> Result<Option<content::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Content::find_by_id(id).one(db).await?)
    }

    pub async fn find_content_by_slug<C>(
        db: &C,
        slug: &str,
    ) -> Result<Option<content::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Content::find()
            .filter(content::Column::Slug.eq(slug))
            .one(db)
            .await?)
    }

    /// Contents in a published status, most recently published first.
    pub async fn published_contents<C>(db: &C) -> Result<Vec<content::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Content::find()
            .filter(content::Column::Status.is_in(ContentStatus::PUBLISHED))
            .order_by_desc(content::Column::PublishedAt)
            .order_by_desc(content::Column::Id)
            .all(db)
            .await?)
    }

    /// Comments pointing at `content`, oldest first.
    pub async fn comments_of<C>(
        db: &C,
        content: &content::Model,
    ) -> Result<Vec<comment::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(content
            .find_related(Comment)
            .order_by_asc(comment::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn tags_of<C>(db: &C, content: &content::Model) -> Result<Vec<tag::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(content
            .find_related(Tag)
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn categories_of<C>(
        db: &C,
        content: &content::Model,
    ) -> Result<Vec<category::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(content
            .find_related(Category)
            .order_by_asc(category::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn contents_with_tag<C>(
        db: &C,
        tag: &tag::Model,
    ) -> Result<Vec<content::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(tag
            .find_related(Content)
            .order_by_asc(content::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn contents_in_category<C>(
        db: &C,
        category: &category::Model,
    ) -> Result<Vec<content::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(category
            .find_related(Content)
            .order_by_asc(content::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn find_tag_by_slug<C>(db: &C, slug: &str) -> Result<Option<tag::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Tag::find().filter(tag::Column::Slug.eq(slug)).one(db).await?)
    }

    pub async fn find_category_by_id<C>(
        db: &C,
        id: i32,
    ) -> Result<Option<category::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find_by_id(id).one(db).await?)
    }

    pub async fn find_category_by_slug<C>(
        db: &C,
        slug: &str,
    ) -> Result<Option<category::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find()
            .filter(category::Column::Slug.eq(slug))
            .one(db)
            .await?)
    }

    pub async fn parent_of<C>(
        db: &C,
        category: &category::Model,
    ) -> Result<Option<category::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(category.find_linked(category::ParentLink).one(db).await?)
    }

    pub async fn children_of<C>(db: &C, id: i32) -> Result<Vec<category::Model>, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find()
            .filter(category::Column::ParentId.eq(id))
            .order_by_asc(category::Column::Id)
            .all(db)
            .await?)
    }

    /// Load the whole `category` table into a [`CategoryTree`].
    pub async fn category_tree<C>(db: &C) -> Result<CategoryTree, CmsError>
    where
        C: ConnectionTrait,
    {
        Ok(CategoryTree::new(Category::find().all(db).await?))
    }
}
