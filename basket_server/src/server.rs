use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use basket_engine::{BasketApi, SqliteDatabase};
use catalog_client::{CatalogApi, UsersApi};
use log::info;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{CatalogProducts, RemoteAuth},
    routes::{health, ClearBasketRoute, CreateBasketRoute, DeleteBasketRoute, GetBasketRoute, UpdateBasketRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let catalog = CatalogProducts::new(
        CatalogApi::new(config.catalog.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    let auth =
        RemoteAuth::new(UsersApi::new(config.users.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?);
    let srv = create_server_instance(config, db, catalog, auth)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    catalog: CatalogProducts,
    auth: RemoteAuth,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let basket_api = BasketApi::new(db.clone(), catalog.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bg::access_log"))
            .app_data(web::Data::new(basket_api))
            .app_data(web::Data::new(auth.clone()))
            .service(health)
            .service(CreateBasketRoute::<SqliteDatabase, CatalogProducts>::new())
            .service(GetBasketRoute::<SqliteDatabase, CatalogProducts>::new())
            .service(UpdateBasketRoute::<SqliteDatabase, CatalogProducts>::new())
            .service(ClearBasketRoute::<SqliteDatabase, CatalogProducts>::new())
            .service(DeleteBasketRoute::<SqliteDatabase, CatalogProducts, RemoteAuth>::new())
    })
    .bind((config.host.as_str(), config.port))
    .map_err(|e| ServerError::InitializeError(e.to_string()))?
    .run();
    info!("🚦️ Basket gateway started on {}:{}", config.host, config.port);
    Ok(srv)
}
