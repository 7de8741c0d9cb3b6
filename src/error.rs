use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// An error from an unsuccessful operation on the content model.
///
/// Constraint violations raised by the storage layer are classified into their
/// own variants so callers never have to inspect driver messages; anything
/// else is kept as the underlying [`DbErr`].
#[derive(Error, Debug, PartialEq)]
pub enum CmsError {
    /// A unique column or key already holds the value, e.g. a duplicate slug
    #[error("Unique Constraint Violation: {0}")]
    UniqueConstraintViolation(String),
    /// A required column was left empty
    #[error("Not Null Violation: {0}")]
    NotNullViolation(String),
    /// A row references a missing parent, or a delete would orphan children
    #[error("Foreign Key Violation: {0}")]
    ForeignKeyViolation(String),
    /// The record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table of the missing record
        entity: &'static str,
        /// Primary key that was looked up
        id: i32,
    },
    /// Re-parenting would make a category its own ancestor
    #[error("category {category} cannot be placed under {parent}: the tree would contain a cycle")]
    CategoryCycle {
        /// Category being moved
        category: i32,
        /// Requested parent
        parent: i32,
    },
    /// A restricted delete found children still pointing at the category
    #[error("category {category} still has {children} child categories")]
    CategoryHasChildren {
        /// Category being deleted
        category: i32,
        /// Number of direct children
        children: u64,
    },
    /// A slug is not lowercase ASCII letters, digits and single hyphens
    #[error("invalid slug {0:?}")]
    InvalidSlug(String),
    /// The connection settings could not be read
    #[error("Config Error: {0}")]
    Config(String),
    /// Any other storage error
    #[error(transparent)]
    Db(DbErr),
}

impl From<DbErr> for CmsError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                return Self::UniqueConstraintViolation(message)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                return Self::ForeignKeyViolation(message)
            }
            _ => {}
        }

        let message = err.to_string();
        if let Some(detail) = driver_detail(&message, &NOT_NULL_MARKERS) {
            Self::NotNullViolation(detail)
        } else if let Some(detail) = driver_detail(&message, &FOREIGN_KEY_MARKERS) {
            Self::ForeignKeyViolation(detail)
        } else {
            Self::Db(err)
        }
    }
}

/// NOT NULL failures as worded by SQLite, PostgreSQL and MySQL.
const NOT_NULL_MARKERS: [&str; 3] = [
    "NOT NULL constraint failed",
    "violates not-null constraint",
    "cannot be null",
];

/// SQLite raises `ON DELETE RESTRICT` with code 1811 rather than 787, which
/// `sql_err()` does not recognise.
const FOREIGN_KEY_MARKERS: [&str; 1] = ["FOREIGN KEY constraint failed"];

/// The driver's own wording when `message` carries one of `markers`, with the
/// sqlx wrapper and SQLite result code stripped.
fn driver_detail(message: &str, markers: &[&str]) -> Option<String> {
    if !markers.iter().any(|marker| message.contains(marker)) {
        return None;
    }
    let detail = message
        .rsplit_once("error returned from database: ")
        .map_or(message, |(_, detail)| detail);
    let detail = match detail.strip_prefix("(code: ") {
        Some(rest) => rest.split_once(") ").map_or(rest, |(_, detail)| detail),
        None => detail,
    };
    Some(detail.trim().to_owned())
}

impl CmsError {
    /// `true` for the three constraint violation kinds.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueConstraintViolation(_)
                | Self::NotNullViolation(_)
                | Self::ForeignKeyViolation(_)
        )
    }
}
