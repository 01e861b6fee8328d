use basket_engine::{
    db_types::{Basket, BasketId, NewBasket, NewOrderLine, OrderLine, UserAuth},
    traits::{BasketStore, CatalogError, InsertLineResult, ProductCatalog, ProductInfo},
    SqliteDatabaseError,
};
use mockall::mock;

use crate::auth::{AuthError, AuthResolver};

mock! {
    pub Store {}
    impl BasketStore for Store {
        type Error = SqliteDatabaseError;
        async fn insert_basket(&self, basket: NewBasket) -> Result<Basket, SqliteDatabaseError>;
        async fn fetch_basket(&self, id: &BasketId) -> Result<Option<Basket>, SqliteDatabaseError>;
        async fn delete_basket(&self, id: &BasketId) -> Result<bool, SqliteDatabaseError>;
        async fn fetch_lines(&self, basket_id: &BasketId) -> Result<Vec<OrderLine>, SqliteDatabaseError>;
        async fn insert_line(&self, line: NewOrderLine) -> Result<InsertLineResult, SqliteDatabaseError>;
        async fn update_line_qty(&self, line_id: i64, qty: i64) -> Result<OrderLine, SqliteDatabaseError>;
        async fn delete_line(&self, line_id: i64) -> Result<(), SqliteDatabaseError>;
        async fn clear_basket(&self, basket_id: &BasketId) -> Result<u64, SqliteDatabaseError>;
        async fn fetch_checkout_id(&self, basket_id: &BasketId) -> Result<Option<i64>, SqliteDatabaseError>;
    }
}

mock! {
    pub Catalog {}
    impl ProductCatalog for Catalog {
        async fn product(&self, product_id: &str) -> Result<ProductInfo, CatalogError>;
    }
}

mock! {
    pub Auth {}
    impl AuthResolver for Auth {
        async fn resolve(&self, auth_token: &str) -> Result<UserAuth, AuthError>;
    }
}
