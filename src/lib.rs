pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;

use application::product_service::ProductService;
use domain::ports::ProductStore;
use errors::{AppError, StartupError};
use handlers::products;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
    ),
    components(schemas(products::ProductRequest, products::ProductResponse)),
    tags((name = "products", description = "Product catalog with soft delete"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Registers the product routes for a service backed by `S`.
///
/// The app must provide a `web::Data<ProductService<S>>`.
pub fn configure<S: ProductStore>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/products")
            .route("", web::get().to(products::list_products::<S>))
            .route("/", web::get().to(products::list_products::<S>))
            .route("", web::post().to(products::create_product::<S>))
            .route("/", web::post().to(products::create_product::<S>))
            .route("/{id}", web::get().to(products::get_product::<S>))
            .route("/{id}", web::put().to(products::update_product::<S>))
            .route("/{id}", web::delete().to(products::delete_product::<S>)),
    )
    .route("/api-docs/openapi.json", web::get().to(openapi_json));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server<S: ProductStore>(
    service: ProductService<S>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure::<S>)
    })
    .bind((host.to_string(), port))?
    .run())
}
