//! Replace-all synchronization of 1:N child tables (tags, gallery).

use crate::error::{AppError, AppResult};
use crate::resources::ChildCollection;
use sea_orm::sea_query::{Alias, Expr, Order, Query, SimpleExpr};
use sea_orm::ConnectionTrait;
use std::collections::HashMap;

/// Delete every child row of `parent_id`, then insert `items` in order.
/// Runs on whatever connection it is given, normally an open transaction.
pub async fn replace_all<C: ConnectionTrait>(
    conn: &C,
    collection: &ChildCollection,
    parent_id: i32,
    items: &[String],
) -> AppResult<()> {
    delete_for_parent(conn, collection, parent_id).await?;

    let backend = conn.get_database_backend();
    for item in items {
        let mut insert = Query::insert();
        insert
            .into_table(Alias::new(collection.table))
            .columns([
                Alias::new(collection.parent_column),
                Alias::new(collection.value_column),
            ]);
        insert
            .values([
                SimpleExpr::Value(parent_id.into()),
                SimpleExpr::Value(item.clone().into()),
            ])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("{:?}", e)))?;
        conn.execute(backend.build(&insert)).await?;
    }

    Ok(())
}

pub async fn delete_for_parent<C: ConnectionTrait>(
    conn: &C,
    collection: &ChildCollection,
    parent_id: i32,
) -> AppResult<u64> {
    let delete = Query::delete()
        .from_table(Alias::new(collection.table))
        .and_where(Expr::col(Alias::new(collection.parent_column)).eq(parent_id))
        .to_owned();

    let backend = conn.get_database_backend();
    let result = conn.execute(backend.build(&delete)).await?;
    Ok(result.rows_affected())
}

/// Child values grouped by parent id, each list in insertion order.
pub async fn load_for_parents<C: ConnectionTrait>(
    conn: &C,
    collection: &ChildCollection,
    parent_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<String>>> {
    let mut grouped: HashMap<i32, Vec<String>> = HashMap::new();
    if parent_ids.is_empty() {
        return Ok(grouped);
    }

    let select = Query::select()
        .columns([
            Alias::new(collection.parent_column),
            Alias::new(collection.value_column),
        ])
        .from(Alias::new(collection.table))
        .and_where(
            Expr::col(Alias::new(collection.parent_column)).is_in(parent_ids.iter().copied()),
        )
        .order_by(Alias::new("id"), Order::Asc)
        .to_owned();

    let backend = conn.get_database_backend();
    for row in conn.query_all(backend.build(&select)).await? {
        let parent: i32 = row.try_get("", collection.parent_column)?;
        let value: Option<String> = row.try_get("", collection.value_column)?;
        if let Some(value) = value {
            grouped.entry(parent).or_default().push(value);
        }
    }

    Ok(grouped)
}
