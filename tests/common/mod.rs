#![allow(dead_code)]

use cms_entity::{
    entity::{category, content, tag},
    schema, DatabaseConfig, Mutation, NewCategory, NewContent, NewTag,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

pub struct TestContext {
    pub db: DatabaseConnection,
}

impl TestContext {
    /// A fresh in-memory database with every table created.
    pub async fn new(test_name: &str) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let db = DatabaseConfig::default().connect().await.unwrap();
        schema::create_tables(&db).await.unwrap();
        tracing::debug!(test_name, "schema created");

        Self { db }
    }

    pub async fn content(&self, title: &str, slug: Option<&str>) -> content::Model {
        Mutation::create_content(
            &self.db,
            NewContent {
                title: title.to_owned(),
                content: format!("{title} body"),
                slug: slug.map(str::to_owned),
                status: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn tag(&self, name: &str, slug: Option<&str>) -> tag::Model {
        Mutation::create_tag(
            &self.db,
            NewTag {
                name: name.to_owned(),
                slug: slug.map(str::to_owned),
            },
        )
        .await
        .unwrap()
    }

    pub async fn category(&self, name: &str, parent_id: Option<i32>) -> category::Model {
        Mutation::create_category(
            &self.db,
            NewCategory {
                name: name.to_owned(),
                slug: None,
                parent_id,
            },
        )
        .await
        .unwrap()
    }
}
