//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the store and catalog backends so that endpoint tests can run them against mocks.
//! actix cannot register generic handlers through its attribute macros, so registration goes through the `route!`
//! macro instead.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use basket_engine::{db_types::BasketId, traits::BasketStore, BasketApi, DesiredLine, ProductCatalog};
use log::*;

use crate::{
    auth::{auth_header, AuthResolver},
    data_objects::{JsonResponse, NewBasketRequest, ReconcileResponse, UpdateBasketRequest},
    errors::ServerError,
};

#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

route!(create_basket => Post "/baskets" impl BasketStore, ProductCatalog);
route!(get_basket => Get "/baskets/{id}" impl BasketStore, ProductCatalog);
route!(update_basket => Put "/baskets/{id}" impl BasketStore, ProductCatalog);
route!(clear_basket => Get "/baskets/{id}/clear" impl BasketStore, ProductCatalog);
route!(delete_basket => Delete "/baskets/{id}" impl BasketStore, ProductCatalog, AuthResolver);

//----------------------------------------------------------------------------------------------------------------------

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

/// Route handler for POST /baskets
pub async fn create_basket<B: BasketStore, C: ProductCatalog>(
    api: web::Data<BasketApi<B, C>>,
    body: Option<web::Json<NewBasketRequest>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = body.map(|b| b.into_inner().user_id).unwrap_or_default();
    let view = api.create_basket(user_id).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Route handler for GET /baskets/{id}
pub async fn get_basket<B: BasketStore, C: ProductCatalog>(
    path: web::Path<String>,
    api: web::Data<BasketApi<B, C>>,
) -> Result<HttpResponse, ServerError> {
    let basket_id = BasketId::from(path.into_inner());
    let view = api.basket_view(&basket_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Route handler for PUT /baskets/{id}
///
/// The body is the client's full desired basket state. Partially applied reconciliations still return 200 with the
/// keys that failed, so clients can retry just those.
pub async fn update_basket<B: BasketStore, C: ProductCatalog>(
    path: web::Path<String>,
    body: web::Json<UpdateBasketRequest>,
    api: web::Data<BasketApi<B, C>>,
) -> Result<HttpResponse, ServerError> {
    let basket_id = BasketId::from(path.into_inner());
    let desired: Vec<DesiredLine> = body.into_inner().order_products;
    debug!("💻️ Basket update request for {basket_id} with {} entries", desired.len());
    let outcome = api.reconcile(&basket_id, desired).await?;
    if !outcome.is_complete() {
        info!("💻️ Basket {basket_id} reconciliation left {} keys unapplied", outcome.failed.len());
    }
    let response = ReconcileResponse { basket: outcome.view, failed_keys: outcome.failed };
    Ok(HttpResponse::Ok().json(response))
}

/// Route handler for GET /baskets/{id}/clear
pub async fn clear_basket<B: BasketStore, C: ProductCatalog>(
    path: web::Path<String>,
    api: web::Data<BasketApi<B, C>>,
) -> Result<HttpResponse, ServerError> {
    let basket_id = BasketId::from(path.into_inner());
    let view = api.clear_basket(&basket_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Route handler for DELETE /baskets/{id}
///
/// Requires an Authorization header the users service can resolve; only the owning user or an admin may delete.
pub async fn delete_basket<B: BasketStore, C: ProductCatalog, A: AuthResolver>(
    req: HttpRequest,
    path: web::Path<String>,
    api: web::Data<BasketApi<B, C>>,
    auth: web::Data<A>,
) -> Result<HttpResponse, ServerError> {
    let token = auth_header(&req)?;
    let user = auth.resolve(token).await?;
    let basket_id = BasketId::from(path.into_inner());
    api.delete_basket(&basket_id, &user).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Basket {basket_id} deleted"))))
}
