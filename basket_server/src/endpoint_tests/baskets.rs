use actix_web::{http::StatusCode, test::TestRequest};
use basket_engine::{
    db_types::{Role, UserAuth},
    InsertLineResult,
};
use serde_json::{json, Value};

use crate::{
    auth::AuthError,
    endpoint_tests::{
        helpers::{basket, order_line, product_info, send_request},
        mocks::{MockAuth, MockCatalog, MockStore},
    },
};

#[actix_web::test]
async fn create_basket_returns_the_empty_view() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_insert_basket().times(1).returning(|b| {
        let mut created = basket("b1", None);
        created.user_id = b.user_id;
        Ok(created)
    });
    store.expect_fetch_basket().times(1).returning(|_| Ok(Some(basket("b1", Some("alice")))));
    store.expect_fetch_lines().times(1).returning(|_| Ok(vec![]));
    store.expect_fetch_checkout_id().times(1).returning(|_| Ok(None));

    let req = TestRequest::post().uri("/baskets").set_json(json!({ "userId": "alice" }));
    let (status, body) = send_request(store, MockCatalog::new(), MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["id"], "b1");
    assert_eq!(view["userId"], "alice");
    assert_eq!(view["totalAmount"], 0);
    assert_eq!(view["orderProducts"], json!([]));
}

#[actix_web::test]
async fn fetching_a_basket_enriches_lines_from_the_catalog() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(1).returning(|_| Ok(Some(basket("b1", Some("alice")))));
    store.expect_fetch_lines().times(1).returning(|_| Ok(vec![order_line(7, "b1", "p1", "v1", 2, 450)]));
    store.expect_fetch_checkout_id().times(1).returning(|_| Ok(None));
    let mut catalog = MockCatalog::new();
    catalog.expect_product().times(1).returning(|pid| Ok(product_info(pid, "Widget", &[("v1", 450)])));

    let req = TestRequest::get().uri("/baskets/b1");
    let (status, body) = send_request(store, catalog, MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["totalAmount"], 900);
    assert_eq!(view["orderProducts"][0]["lineTotal"], 900);
    assert_eq!(view["orderProducts"][0]["product"]["name"], "Widget");
}

#[actix_web::test]
async fn a_missing_basket_is_reported_as_404() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(1).returning(|_| Ok(None));

    let req = TestRequest::get().uri("/baskets/b404");
    let (status, body) = send_request(store, MockCatalog::new(), MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Basket b404"), "body was {body}");
}

#[actix_web::test]
async fn a_quantity_change_issues_only_the_update_write() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(2).returning(|_| Ok(Some(basket("b1", Some("alice")))));
    // The first fetch feeds the diff, the second feeds the response view.
    store.expect_fetch_lines().times(1).returning(|_| Ok(vec![order_line(7, "b1", "p1", "v1", 1, 450)]));
    store
        .expect_update_line_qty()
        .withf(|line_id, qty| *line_id == 7 && *qty == 3)
        .times(1)
        .returning(|_, qty| Ok(order_line(7, "b1", "p1", "v1", qty, 450)));
    store.expect_fetch_lines().times(1).returning(|_| Ok(vec![order_line(7, "b1", "p1", "v1", 3, 450)]));
    store.expect_fetch_checkout_id().times(1).returning(|_| Ok(None));
    let mut catalog = MockCatalog::new();
    catalog.expect_product().times(1).returning(|pid| Ok(product_info(pid, "Widget", &[("v1", 450)])));

    let req = TestRequest::put()
        .uri("/baskets/b1")
        .set_json(json!({ "orderProducts": [{ "productId": "p1", "productVariantId": "v1", "qty": 3 }] }));
    let (status, body) = send_request(store, catalog, MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["totalAmount"], 1350);
    assert!(view.get("failedKeys").is_none(), "no key should have failed: {body}");
}

#[actix_web::test]
async fn a_lost_insert_race_is_reported_as_a_conflict() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(2).returning(|_| Ok(Some(basket("b1", None))));
    // Another reconcile grabbed the key between the diff and the insert, so the constraint backstop fires
    store.expect_fetch_lines().times(2).returning(|_| Ok(vec![]));
    store.expect_insert_line().times(1).returning(|_| Ok(InsertLineResult::Duplicate));
    store.expect_fetch_checkout_id().times(1).returning(|_| Ok(None));
    let mut catalog = MockCatalog::new();
    catalog.expect_product().times(1).returning(|pid| Ok(product_info(pid, "Widget", &[("v1", 450)])));

    let req = TestRequest::put()
        .uri("/baskets/b1")
        .set_json(json!({ "orderProducts": [{ "productId": "p1", "productVariantId": "v1", "qty": 1 }] }));
    let (status, body) = send_request(store, catalog, MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::OK, "a per-key conflict must not fail the whole call");
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["failedKeys"][0]["productId"], "p1");
    assert_eq!(view["failedKeys"][0]["op"], "add");
    assert_eq!(view["failedKeys"][0]["reason"], "conflict");
}

#[actix_web::test]
async fn a_negative_quantity_is_rejected() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(1).returning(|_| Ok(Some(basket("b1", None))));
    store.expect_fetch_lines().times(1).returning(|_| Ok(vec![]));

    let req = TestRequest::put()
        .uri("/baskets/b1")
        .set_json(json!({ "orderProducts": [{ "productId": "p1", "productVariantId": "v1", "qty": -1 }] }));
    let (status, body) = send_request(store, MockCatalog::new(), MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("may not be negative"), "body was {body}");
}

#[actix_web::test]
async fn clearing_a_basket_returns_the_empty_view() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(2).returning(|_| Ok(Some(basket("b1", Some("alice")))));
    store.expect_clear_basket().times(1).returning(|_| Ok(2));
    store.expect_fetch_lines().times(1).returning(|_| Ok(vec![]));
    store.expect_fetch_checkout_id().times(1).returning(|_| Ok(None));

    let req = TestRequest::get().uri("/baskets/b1/clear");
    let (status, body) = send_request(store, MockCatalog::new(), MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["totalAmount"], 0);
    assert_eq!(view["orderProducts"], json!([]));
}

#[actix_web::test]
async fn deleting_without_a_token_is_401() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::delete().uri("/baskets/b1");
    let (status, body) = send_request(MockStore::new(), MockCatalog::new(), MockAuth::new(), req).await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Auth token not provided"), "body was {body}");
}

#[actix_web::test]
async fn an_admin_may_delete_any_basket() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuth::new();
    auth.expect_resolve()
        .withf(|token| token == "Bearer admin-token")
        .times(1)
        .returning(|_| Ok(UserAuth { id: "root".to_string(), role: Role::Admin }));
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(1).returning(|_| Ok(Some(basket("b1", Some("alice")))));
    store.expect_delete_basket().times(1).returning(|_| Ok(true));

    let req = TestRequest::delete().uri("/baskets/b1").insert_header(("Authorization", "Bearer admin-token"));
    let (status, body) = send_request(store, MockCatalog::new(), auth, req).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let res: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(res["success"], true);
}

#[actix_web::test]
async fn a_non_owner_may_not_delete_a_basket() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuth::new();
    auth.expect_resolve().times(1).returning(|_| Ok(UserAuth { id: "mallory".to_string(), role: Role::User }));
    let mut store = MockStore::new();
    store.expect_fetch_basket().times(1).returning(|_| Ok(Some(basket("b1", Some("alice")))));

    let req = TestRequest::delete().uri("/baskets/b1").insert_header(("Authorization", "Bearer user-token"));
    let (status, body) = send_request(store, MockCatalog::new(), auth, req).await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("owner or an admin"), "body was {body}");
}

#[actix_web::test]
async fn a_users_service_outage_is_a_502() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuth::new();
    auth.expect_resolve().times(1).returning(|_| Err(AuthError::Unreachable("connection refused".to_string())));

    let req = TestRequest::delete().uri("/baskets/b1").insert_header(("Authorization", "Bearer user-token"));
    let (status, _) = send_request(MockStore::new(), MockCatalog::new(), auth, req).await.unwrap();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
