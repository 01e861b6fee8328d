use crate::db_types::{Basket, BasketId, NewBasket, NewOrderLine, OrderLine};

#[derive(Debug, Clone)]
pub enum InsertLineResult {
    Inserted(OrderLine),
    /// The (basket, product, variant) key is already taken. The constraint backstop fired; callers treat this as a
    /// retryable conflict rather than an error from the store.
    Duplicate,
}

/// The persistence contract for basket backends.
#[allow(async_fn_in_trait)]
pub trait BasketStore {
    type Error: std::error::Error;

    async fn insert_basket(&self, basket: NewBasket) -> Result<Basket, Self::Error>;

    async fn fetch_basket(&self, id: &BasketId) -> Result<Option<Basket>, Self::Error>;

    /// Deletes the basket and, via cascade, all of its lines. Returns false if the basket did not exist.
    async fn delete_basket(&self, id: &BasketId) -> Result<bool, Self::Error>;

    /// Returns every line in the basket. Order is unspecified; reconciliation keys lines by (product, variant).
    async fn fetch_lines(&self, basket_id: &BasketId) -> Result<Vec<OrderLine>, Self::Error>;

    async fn insert_line(&self, line: NewOrderLine) -> Result<InsertLineResult, Self::Error>;

    /// In-place quantity update. The line id and price snapshot are untouched.
    async fn update_line_qty(&self, line_id: i64, qty: i64) -> Result<OrderLine, Self::Error>;

    async fn delete_line(&self, line_id: i64) -> Result<(), Self::Error>;

    /// Bulk-deletes every line in the basket. Returns the number of lines removed.
    async fn clear_basket(&self, basket_id: &BasketId) -> Result<u64, Self::Error>;

    async fn fetch_checkout_id(&self, basket_id: &BasketId) -> Result<Option<i64>, Self::Error>;
}
