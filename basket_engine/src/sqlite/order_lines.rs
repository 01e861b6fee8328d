use log::trace;
use sqlx::SqliteConnection;

use super::SqliteDatabaseError;
use crate::{
    db_types::{BasketId, NewOrderLine, OrderLine},
    traits::InsertLineResult,
};

const LINE_COLUMNS: &str = r#"
    id,
    basket_id,
    product_id,
    product_variant_id,
    qty,
    product_price,
    created_at,
    updated_at
"#;

pub async fn fetch_lines(
    basket_id: &BasketId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderLine>, SqliteDatabaseError> {
    let query = format!("SELECT {LINE_COLUMNS} FROM order_lines WHERE basket_id = $1 ORDER BY id");
    let lines = sqlx::query_as::<_, OrderLine>(&query).bind(basket_id).fetch_all(&mut *conn).await?;
    Ok(lines)
}

pub async fn fetch_line(
    line_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<OrderLine>, SqliteDatabaseError> {
    let query = format!("SELECT {LINE_COLUMNS} FROM order_lines WHERE id = $1");
    let line = sqlx::query_as::<_, OrderLine>(&query).bind(line_id).fetch_optional(&mut *conn).await?;
    Ok(line)
}

/// Inserts a new line. A unique-constraint hit on (basket, product, variant) is reported as
/// [`InsertLineResult::Duplicate`] so that callers can treat the race as a retryable conflict.
pub async fn insert_line(
    line: NewOrderLine,
    conn: &mut SqliteConnection,
) -> Result<InsertLineResult, SqliteDatabaseError> {
    let result = sqlx::query(
        r#"
            INSERT INTO order_lines (basket_id, product_id, product_variant_id, qty, product_price)
            VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&line.basket_id)
    .bind(&line.product_id)
    .bind(&line.product_variant_id)
    .bind(line.qty)
    .bind(line.product_price)
    .execute(&mut *conn)
    .await;
    match result {
        Ok(done) => {
            let id = done.last_insert_rowid();
            trace!("🗃️ Order line {id} saved for basket {}", line.basket_id);
            fetch_line(id, conn)
                .await?
                .map(InsertLineResult::Inserted)
                .ok_or_else(|| SqliteDatabaseError::QueryError(format!("Order line {id} missing straight after insert")))
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertLineResult::Duplicate),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_line_qty(
    line_id: i64,
    qty: i64,
    conn: &mut SqliteConnection,
) -> Result<OrderLine, SqliteDatabaseError> {
    let result = sqlx::query("UPDATE order_lines SET qty = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2")
        .bind(qty)
        .bind(line_id)
        .execute(&mut *conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(SqliteDatabaseError::LineNotFound(line_id));
    }
    fetch_line(line_id, conn).await?.ok_or(SqliteDatabaseError::LineNotFound(line_id))
}

/// Deleting a line that is already gone is not an error; reconciliation only cares that the key is free afterwards.
pub async fn delete_line(line_id: i64, conn: &mut SqliteConnection) -> Result<(), SqliteDatabaseError> {
    sqlx::query("DELETE FROM order_lines WHERE id = $1").bind(line_id).execute(&mut *conn).await?;
    Ok(())
}

pub async fn clear_basket(
    basket_id: &BasketId,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let result =
        sqlx::query("DELETE FROM order_lines WHERE basket_id = $1").bind(basket_id).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
