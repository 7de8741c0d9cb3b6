//! Table and index creation for the content model.
//!
//! Statements are derived from the entity declarations, so unique columns,
//! nullability, foreign keys and the `indexed` columns all come from
//! [`crate::entity`].

use crate::entity::prelude::*;
use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, DbBackend, DbErr, EntityTrait, Schema,
};
use tracing::debug;

/// Create every table and index, skipping those that already exist.
///
/// Tables are created parents first so foreign keys always resolve.
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();

    for stmt in table_statements(backend) {
        let stmt = backend.build(&stmt);
        debug!(sql = %stmt, "create table");
        db.execute(stmt).await?;
    }
    for stmt in index_statements(backend) {
        let stmt = backend.build(&stmt);
        debug!(sql = %stmt, "create index");
        db.execute(stmt).await?;
    }

    Ok(())
}

/// `CREATE TABLE IF NOT EXISTS` for every entity, in dependency order.
pub fn table_statements(backend: DbBackend) -> Vec<TableCreateStatement> {
    let schema = Schema::new(backend);
    vec![
        create_table(&schema, Tag),
        create_table(&schema, Category),
        create_table(&schema, Content),
        create_table(&schema, Comment),
        create_table(&schema, ContentTag),
        create_table(&schema, ContentCategory),
    ]
}

/// `CREATE INDEX IF NOT EXISTS` for every column declared `indexed`.
pub fn index_statements(backend: DbBackend) -> Vec<IndexCreateStatement> {
    let schema = Schema::new(backend);
    [
        schema.create_index_from_entity(Category),
        schema.create_index_from_entity(Content),
        schema.create_index_from_entity(Comment),
        schema.create_index_from_entity(ContentTag),
        schema.create_index_from_entity(ContentCategory),
    ]
    .into_iter()
    .flatten()
    .map(|mut stmt| stmt.if_not_exists().to_owned())
    .collect()
}

fn create_table<E>(schema: &Schema, entity: E) -> TableCreateStatement
where
    E: EntityTrait,
{
    schema.create_table_from_entity(entity).if_not_exists().to_owned()
}
