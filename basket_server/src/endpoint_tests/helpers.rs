use actix_web::{
    http::StatusCode,
    test::{self, TestRequest},
    web,
    App,
};
use basket_engine::{
    db_types::{Basket, BasketId, OrderLine},
    traits::{ProductInfo, VariantInfo},
    BasketApi,
};
use bg_common::Cents;
use chrono::Utc;

use crate::{
    endpoint_tests::mocks::{MockAuth, MockCatalog, MockStore},
    routes::{ClearBasketRoute, CreateBasketRoute, DeleteBasketRoute, GetBasketRoute, UpdateBasketRoute},
};

/// Builds the full route table around the given mocks and runs a single request against it.
pub async fn send_request(
    store: MockStore,
    catalog: MockCatalog,
    auth: MockAuth,
    req: TestRequest,
) -> Result<(StatusCode, String), String> {
    let api = BasketApi::new(store, catalog);
    let app = App::new()
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(auth))
        .service(CreateBasketRoute::<MockStore, MockCatalog>::new())
        .service(GetBasketRoute::<MockStore, MockCatalog>::new())
        .service(UpdateBasketRoute::<MockStore, MockCatalog>::new())
        .service(ClearBasketRoute::<MockStore, MockCatalog>::new())
        .service(DeleteBasketRoute::<MockStore, MockCatalog, MockAuth>::new());
    let service = test::init_service(app).await;
    let res = test::try_call_service(&service, req.to_request()).await.map_err(|e| e.to_string())?;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    Ok((status, body))
}

pub fn basket(id: &str, user_id: Option<&str>) -> Basket {
    Basket {
        id: BasketId::from(id.to_string()),
        user_id: user_id.map(String::from),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn order_line(id: i64, basket_id: &str, product_id: &str, variant_id: &str, qty: i64, price: i64) -> OrderLine {
    OrderLine {
        id,
        basket_id: BasketId::from(basket_id.to_string()),
        product_id: product_id.to_string(),
        product_variant_id: variant_id.to_string(),
        qty,
        product_price: Cents::from(price),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn product_info(id: &str, name: &str, variants: &[(&str, i64)]) -> ProductInfo {
    ProductInfo {
        id: id.to_string(),
        name: name.to_string(),
        product_variants: variants
            .iter()
            .map(|(vid, price)| VariantInfo { id: vid.to_string(), price: Cents::from(*price) })
            .collect(),
        images: vec![],
    }
}
