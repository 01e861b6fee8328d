use log::debug;
use sqlx::SqliteConnection;

use super::SqliteDatabaseError;
use crate::db_types::{Basket, BasketId, NewBasket};

const BASKET_COLUMNS: &str = r#"
    id,
    user_id,
    created_at,
    updated_at
"#;

pub async fn insert_basket(
    basket: NewBasket,
    conn: &mut SqliteConnection,
) -> Result<Basket, SqliteDatabaseError> {
    let id = BasketId::random();
    sqlx::query("INSERT INTO baskets (id, user_id) VALUES ($1, $2)")
        .bind(&id)
        .bind(&basket.user_id)
        .execute(&mut *conn)
        .await?;
    debug!("🗃️ Basket {id} saved in the DB");
    fetch_basket(&id, conn)
        .await?
        .ok_or_else(|| SqliteDatabaseError::QueryError(format!("Basket {id} missing straight after insert")))
}

pub async fn fetch_basket(
    id: &BasketId,
    conn: &mut SqliteConnection,
) -> Result<Option<Basket>, SqliteDatabaseError> {
    let query = format!("SELECT {BASKET_COLUMNS} FROM baskets WHERE id = $1");
    let basket = sqlx::query_as::<_, Basket>(&query).bind(id).fetch_optional(&mut *conn).await?;
    Ok(basket)
}

/// Deletes the basket row. The order_lines cascade removes any remaining lines in the same statement.
pub async fn delete_basket(
    id: &BasketId,
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM baskets WHERE id = $1").bind(id).execute(&mut *conn).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn fetch_checkout_id(
    basket_id: &BasketId,
    conn: &mut SqliteConnection,
) -> Result<Option<i64>, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM checkouts WHERE basket_id = $1")
        .bind(basket_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id)
}
