//! ServiGo API server entry point.
//!
//! Wires the PostgreSQL repositories, the object-store client, and the
//! domain services together, then serves the HTTP surface.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sg_api::app::create_app;
use sg_api::routes::AppState;
use sg_core::services::{OfferService, VerificationService, VerificationServiceConfig};
use sg_infra::database::{
    DatabasePool, PgDocumentRepository, PgOfferRepository, PgOutboxRepository, PgUserRepository,
};
use sg_infra::storage::BucketStorageClient;
use sg_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        environment = %config.environment,
        "Starting ServiGo API server"
    );

    // Database pool and repositories
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to create database pool")?;
    let user_repo = Arc::new(PgUserRepository::new(pool.get_pool().clone()));
    let document_repo = Arc::new(PgDocumentRepository::new(pool.get_pool().clone()));
    let outbox_repo = Arc::new(PgOutboxRepository::new(pool.get_pool().clone()));
    let offer_repo = Arc::new(PgOfferRepository::new(pool.get_pool().clone()));

    // Object-store client
    let storage = Arc::new(
        BucketStorageClient::new(config.storage.clone())
            .context("failed to create storage client")?,
    );

    // Domain services
    let verification_service = Arc::new(VerificationService::new(
        user_repo.clone(),
        document_repo,
        outbox_repo.clone(),
        storage,
        VerificationServiceConfig::default(),
    ));
    let offer_service = Arc::new(OfferService::new(offer_repo, user_repo, outbox_repo));

    let app_state = web::Data::new(AppState {
        verification_service,
        offer_service,
        auth: config.auth.clone(),
    });

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let payload_limit = config.server.max_payload_size;
    HttpServer::new(move || {
        create_app(app_state.clone()).app_data(web::PayloadConfig::new(payload_limit))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
