pub mod common;

use cms_entity::{
    entity::prelude::*, CategoryChanges, CategoryDeletePolicy, CmsError, Mutation, NewCategory,
    Query,
};
pub use common::TestContext;
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};

struct Sample {
    news: i32,
    local: i32,
    sport: i32,
    city: i32,
}

//   news
//   ├── local
//   │   └── city
//   └── sport
async fn sample(ctx: &TestContext) -> Sample {
    let news = ctx.category("News", None).await.id;
    let local = ctx.category("Local", Some(news)).await.id;
    let sport = ctx.category("Sport", Some(news)).await.id;
    let city = ctx.category("City", Some(local)).await.id;
    Sample {
        news,
        local,
        sport,
        city,
    }
}

async fn category_ids(ctx: &TestContext) -> Vec<i32> {
    Category::find()
        .all(&ctx.db)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect()
}

#[tokio::test]
async fn parent_and_children() {
    let ctx = TestContext::new("parent_and_children").await;
    let s = sample(&ctx).await;

    let local = Query::find_category_by_id(&ctx.db, s.local)
        .await
        .unwrap()
        .unwrap();
    let parent = Query::parent_of(&ctx.db, &local).await.unwrap().unwrap();
    assert_eq!(parent.id, s.news);
    assert_eq!(Query::parent_of(&ctx.db, &parent).await.unwrap(), None);

    let children: Vec<i32> = Query::children_of(&ctx.db, s.news)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(children, vec![s.local, s.sport]);

    let tree = Query::category_tree(&ctx.db).await.unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.ancestors(s.city), vec![s.local, s.news]);
    assert_eq!(tree.descendants(s.news), vec![s.local, s.sport, s.city]);
    assert_eq!(tree.roots().map(|c| c.id).collect::<Vec<_>>(), vec![s.news]);
}

#[tokio::test]
async fn restrict_refuses_parents() {
    let ctx = TestContext::new("restrict_refuses_parents").await;
    let s = sample(&ctx).await;

    assert_eq!(
        Mutation::delete_category(&ctx.db, s.news, CategoryDeletePolicy::Restrict).await,
        Err(CmsError::CategoryHasChildren {
            category: s.news,
            children: 2
        })
    );
    assert_eq!(category_ids(&ctx).await.len(), 4);

    Mutation::delete_category(&ctx.db, s.city, CategoryDeletePolicy::default())
        .await
        .unwrap();
    assert_eq!(category_ids(&ctx).await, vec![s.news, s.local, s.sport]);
}

#[tokio::test]
async fn raw_delete_of_a_parent_violates_foreign_key() {
    let ctx = TestContext::new("raw_delete_of_a_parent_violates_foreign_key").await;
    let s = sample(&ctx).await;

    let err: CmsError = Category::delete_by_id(s.local)
        .exec(&ctx.db)
        .await
        .unwrap_err()
        .into();
    assert!(
        matches!(&err, CmsError::ForeignKeyViolation(msg) if msg.contains("FOREIGN KEY")),
        "{err:?}"
    );
    assert!(err.is_constraint_violation());
    assert_eq!(category_ids(&ctx).await, vec![s.news, s.local, s.sport, s.city]);
}

#[tokio::test]
async fn nullify_promotes_children_to_roots() {
    let ctx = TestContext::new("nullify_promotes_children_to_roots").await;
    let s = sample(&ctx).await;

    Mutation::delete_category(&ctx.db, s.news, CategoryDeletePolicy::Nullify)
        .await
        .unwrap();

    let tree = Query::category_tree(&ctx.db).await.unwrap();
    assert!(!tree.contains(s.news));
    assert_eq!(
        tree.roots().map(|c| c.id).collect::<Vec<_>>(),
        vec![s.local, s.sport]
    );
    assert_eq!(tree.parent(s.city), Some(s.local));
}

#[tokio::test]
async fn cascade_removes_the_subtree() {
    let ctx = TestContext::new("cascade_removes_the_subtree").await;
    let s = sample(&ctx).await;
    let other = ctx.category("Other", None).await.id;
    let post = ctx.content("Post", None).await;
    Mutation::attach_category(&ctx.db, post.id, s.city)
        .await
        .unwrap();
    Mutation::attach_category(&ctx.db, post.id, other)
        .await
        .unwrap();

    Mutation::delete_category(&ctx.db, s.local, CategoryDeletePolicy::Cascade)
        .await
        .unwrap();
    assert_eq!(category_ids(&ctx).await, vec![s.news, s.sport, other]);
    assert_eq!(ContentCategory::find().count(&ctx.db).await.unwrap(), 1);

    Mutation::delete_category(&ctx.db, s.news, CategoryDeletePolicy::Cascade)
        .await
        .unwrap();
    assert_eq!(category_ids(&ctx).await, vec![other]);
}

#[tokio::test]
async fn deleting_a_missing_category_is_not_found() {
    let ctx = TestContext::new("deleting_a_missing_category_is_not_found").await;

    for policy in [
        CategoryDeletePolicy::Restrict,
        CategoryDeletePolicy::Nullify,
        CategoryDeletePolicy::Cascade,
    ] {
        assert_eq!(
            Mutation::delete_category(&ctx.db, 9, policy).await,
            Err(CmsError::NotFound {
                entity: "category",
                id: 9
            })
        );
    }
}

#[tokio::test]
async fn reparenting_rejects_cycles() {
    let ctx = TestContext::new("reparenting_rejects_cycles").await;
    let s = sample(&ctx).await;

    assert_eq!(
        Mutation::set_category_parent(&ctx.db, s.news, Some(s.news)).await,
        Err(CmsError::CategoryCycle {
            category: s.news,
            parent: s.news
        })
    );
    assert_eq!(
        Mutation::set_category_parent(&ctx.db, s.news, Some(s.city)).await,
        Err(CmsError::CategoryCycle {
            category: s.news,
            parent: s.city
        })
    );
    assert_eq!(
        Mutation::set_category_parent(&ctx.db, s.local, Some(99)).await,
        Err(CmsError::NotFound {
            entity: "category",
            id: 99
        })
    );

    let moved = Mutation::set_category_parent(&ctx.db, s.city, Some(s.sport))
        .await
        .unwrap();
    assert_eq!(moved.parent_id, Some(s.sport));
    let root = Mutation::set_category_parent(&ctx.db, s.local, None)
        .await
        .unwrap();
    assert_eq!(root.parent_id, None);

    let tree = Query::category_tree(&ctx.db).await.unwrap();
    assert_eq!(tree.find_cycle(), None);
    assert_eq!(tree.ancestors(s.city), vec![s.sport, s.news]);
}

#[tokio::test]
async fn missing_parent_violates_foreign_key() {
    let ctx = TestContext::new("missing_parent_violates_foreign_key").await;

    let err = Mutation::create_category(
        &ctx.db,
        NewCategory {
            name: "Orphan".to_owned(),
            slug: None,
            parent_id: Some(404),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CmsError::ForeignKeyViolation(_)), "{err:?}");
}

#[tokio::test]
async fn category_slugs() {
    let ctx = TestContext::new("category_slugs").await;
    let news = Mutation::create_category(
        &ctx.db,
        NewCategory {
            name: "News".to_owned(),
            slug: Some("news".to_owned()),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    let sport = ctx.category("Sport", None).await;

    assert_eq!(
        Query::find_category_by_slug(&ctx.db, "news").await.unwrap(),
        Some(news)
    );

    let err = Mutation::update_category_by_id(
        &ctx.db,
        sport.id,
        CategoryChanges {
            slug: Some(Some("news".to_owned())),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(
        matches!(&err, CmsError::UniqueConstraintViolation(msg) if msg.contains("category.slug")),
        "{err:?}"
    );

    let renamed = Mutation::update_category_by_id(
        &ctx.db,
        sport.id,
        CategoryChanges {
            name: Some("Sports".to_owned()),
            slug: Some(Some("sports".to_owned())),
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Sports");
    assert_eq!(renamed.slug.as_deref(), Some("sports"));
}
