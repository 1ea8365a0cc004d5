//! Application factory
//!
//! Builds the Actix-web application with all routes and middleware wired to
//! the injected services.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::offers::{create, list, respond};
use crate::routes::verification::{detail, gate, pending, review, upload};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<U, D, B, S, O>(
    app_state: web::Data<AppState<U, D, B, S, O>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    let cors = create_cors();
    let jwt_secret = app_state.auth.jwt_secret.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        // Middleware (logging outermost, then CORS)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Admin back-office routes
                .service(
                    web::scope("/admin")
                        .wrap(JwtAuth::with_secret(jwt_secret.clone()))
                        .route(
                            "/verifications/pending",
                            web::get().to(pending::pending_users::<U, D, B, S, O>),
                        )
                        .route("/users/{id}", web::get().to(detail::get_user::<U, D, B, S, O>))
                        .route(
                            "/users/{id}/documents",
                            web::get().to(detail::get_user_documents::<U, D, B, S, O>),
                        )
                        .route(
                            "/users/{id}/review",
                            web::post().to(review::begin_review::<U, D, B, S, O>),
                        )
                        .route(
                            "/users/{id}/approve",
                            web::post().to(review::approve_user::<U, D, B, S, O>),
                        )
                        .route(
                            "/users/{id}/reject",
                            web::post().to(review::reject_user::<U, D, B, S, O>),
                        )
                        .route(
                            "/users/{id}/ban",
                            web::post().to(review::ban_user::<U, D, B, S, O>),
                        ),
                )
                // Authenticated user routes
                .service(
                    web::scope("/me")
                        .wrap(JwtAuth::with_secret(jwt_secret.clone()))
                        .route(
                            "/verification",
                            web::get().to(gate::verification_gate::<U, D, B, S, O>),
                        )
                        .route(
                            "/documents/{slot}",
                            web::post().to(upload::upload_document::<U, D, B, S, O>),
                        ),
                )
                // Offer routes
                .service(
                    web::scope("/offers")
                        .wrap(JwtAuth::with_secret(jwt_secret))
                        .route("", web::post().to(create::create_offer::<U, D, B, S, O>))
                        .route("/sent", web::get().to(list::sent_offers::<U, D, B, S, O>))
                        .route(
                            "/received",
                            web::get().to(list::received_offers::<U, D, B, S, O>),
                        )
                        .route(
                            "/{id}/accept",
                            web::post().to(respond::accept_offer::<U, D, B, S, O>),
                        )
                        .route(
                            "/{id}/reject",
                            web::post().to(respond::reject_offer::<U, D, B, S, O>),
                        )
                        .route(
                            "/{id}/cancel",
                            web::post().to(respond::cancel_offer::<U, D, B, S, O>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "servigo-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
