//! SeaORM entities of the content-management data model.
//!
//! Each submodule declares one table. `content_tag` and `content_category` are
//! join tables carrying only the two foreign keys; Comment owns the foreign key
//! to Content, so Content reaches its comments through a lookup rather than a
//! stored collection.

pub mod category;
pub mod comment;
pub mod content;
pub mod content_category;
pub mod content_tag;
pub mod prelude;
pub mod sea_orm_active_enums;
pub mod tag;

pub use sea_orm_active_enums::ContentStatus;

use sea_orm::prelude::DateTimeWithTimeZone;

/// The timestamp stamped into lifecycle columns.
pub(crate) fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}
