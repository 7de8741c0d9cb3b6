#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # cms-entity
//!
//! The persistent data model of a content-management system, declared as
//! SeaORM entities.
//!
//! ```text
//! category ──< category (parent_id)
//!    │
//!    └──< content_category >── content ──< content_tag >── tag
//!                                 │
//!                                 └──< comment
//! ```
//!
//! ## A quick taste
//!
//! ```no_run
//! use cms_entity::{schema, DatabaseConfig, Mutation, NewContent, Query};
//!
//! # async fn run() -> Result<(), cms_entity::CmsError> {
//! let db = DatabaseConfig::from_env()?.connect().await?;
//! schema::create_tables(&db).await?;
//!
//! let post = Mutation::create_content(
//!     &db,
//!     NewContent {
//!         title: "Hello".to_owned(),
//!         content: "First post".to_owned(),
//!         slug: Some("hello".to_owned()),
//!         ..Default::default()
//!     },
//! )
//! .await?;
//! assert_eq!(Query::find_content_by_slug(&db, "hello").await?, Some(post));
//! # Ok(())
//! # }
//! ```
//!
//! Storage rules live on the entities themselves: `content` stamps its
//! timestamps in `ActiveModelBehavior::before_save`, unique slugs and foreign
//! keys are declared on the models and emitted by [`schema`]. Constraint
//! failures surface as [`CmsError`] variants rather than raw driver errors.

pub mod config;
pub mod entity;
pub mod error;
pub mod schema;
mod service;
pub mod slug;
pub mod tree;

pub use config::DatabaseConfig;
pub use error::CmsError;
pub use service::*;
pub use tree::CategoryTree;
