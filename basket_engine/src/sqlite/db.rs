use std::{fmt::Debug, str::FromStr};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use super::{baskets, order_lines, SqliteDatabaseError};
use crate::{
    db_types::{Basket, BasketId, NewBasket, NewOrderLine, OrderLine},
    traits::{BasketStore, InsertLineResult},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    // Foreign keys must be on for the basket -> order_lines cascade to fire.
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await
}

impl BasketStore for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_basket(&self, basket: NewBasket) -> Result<Basket, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        baskets::insert_basket(basket, &mut conn).await
    }

    async fn fetch_basket(&self, id: &BasketId) -> Result<Option<Basket>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        baskets::fetch_basket(id, &mut conn).await
    }

    async fn delete_basket(&self, id: &BasketId) -> Result<bool, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        baskets::delete_basket(id, &mut conn).await
    }

    async fn fetch_lines(&self, basket_id: &BasketId) -> Result<Vec<OrderLine>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_lines::fetch_lines(basket_id, &mut conn).await
    }

    async fn insert_line(&self, line: NewOrderLine) -> Result<InsertLineResult, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_lines::insert_line(line, &mut conn).await
    }

    async fn update_line_qty(&self, line_id: i64, qty: i64) -> Result<OrderLine, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_lines::update_line_qty(line_id, qty, &mut conn).await
    }

    async fn delete_line(&self, line_id: i64) -> Result<(), Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_lines::delete_line(line_id, &mut conn).await
    }

    async fn clear_basket(&self, basket_id: &BasketId) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_lines::clear_basket(basket_id, &mut conn).await
    }

    async fn fetch_checkout_id(&self, basket_id: &BasketId) -> Result<Option<i64>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        baskets::fetch_checkout_id(basket_id, &mut conn).await
    }
}
