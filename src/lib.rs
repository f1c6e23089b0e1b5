#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::auth::AuthConfig;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::InMemoryRepository;

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
pub mod query;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds the product store, seeding it from `seed_file` when configured.
#[cfg(feature = "server")]
pub fn build_repository(server_config: &ServerConfig) -> std::io::Result<InMemoryRepository> {
    match &server_config.seed_file {
        Some(path) => InMemoryRepository::from_json_file(path)
            .map_err(|e| std::io::Error::other(format!("Failed to seed products: {e}"))),
        None => Ok(InMemoryRepository::new()),
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = build_repository(&server_config)?;
    let auth_config = AuthConfig::new(&server_config.secret);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting product catalog on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(auth_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
