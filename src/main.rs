use actix_web::{middleware::Logger, App, HttpServer};
use log::{error, info};
use std::io;
use std::sync::Arc;

use taskpad::app::{self, AppServices};
use taskpad::auth::SessionKeys;
use taskpad::config::{Config, SERVER_PORT};
use taskpad::store::PgStore;

fn startup_error<E>(context: &str, e: E) -> io::Error
where
    E: std::fmt::Display,
{
    error!("{}: {}", context, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let store = PgStore::connect(&config)
        .await
        .map_err(|e| startup_error("failed to connect to database", e))?;
    store
        .migrate()
        .await
        .map_err(|e| startup_error("failed to migrate database", e))?;

    let services = AppServices::new(Arc::new(store), SessionKeys::from_config(&config));

    info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(app::cors())
            .wrap(Logger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .bind((config.server_host.as_str(), SERVER_PORT))?
    .run()
    .await
}
