use dotenvy::dotenv;
use product_service::application::product_service::ProductService;
use product_service::config::{Config, ConfigError, StorageKind};
use product_service::errors::StartupError;
use product_service::infrastructure::{DieselProductStore, InMemoryProductStore};
use product_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    match config.storage {
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let pool = create_pool(database_url, config.pool_size)?;
            run_migrations(&pool)?;

            let service = ProductService::new(DieselProductStore::new(pool));
            build_server(service, &config.host, config.port)?.await?;
        }
        StorageKind::Memory => {
            log::warn!("Using in-memory storage; products are lost on shutdown");
            let service = ProductService::new(InMemoryProductStore::new());
            build_server(service, &config.host, config.port)?.await?;
        }
    }

    Ok(())
}
