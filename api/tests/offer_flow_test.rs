//! Integration tests for the offer endpoints

mod common;

use actix_web::{http::header, test};
use uuid::Uuid;

use common::{bearer, pending_professional, test_state};
use sg_api::app::create_app;
use sg_api::middleware::auth::Role;

#[actix_web::test]
async fn test_unverified_professional_cannot_create_offers() {
    let ctx = test_state();
    let user = pending_professional("newpro@example.com");
    ctx.users.insert(user.clone()).await;

    let app = test::init_service(create_app(ctx.state.clone())).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/offers")
        .insert_header((header::AUTHORIZATION, bearer(user.id, Role::User)))
        .set_json(serde_json::json!({
            "service_id": Uuid::new_v4(),
            "client_id": Uuid::new_v4(),
            "amount": "150.00",
            "description": "Pintura de interiores"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn test_offer_lifecycle_accept() {
    let ctx = test_state();
    let mut pro = pending_professional("pro@example.com");
    pro.approve(Uuid::new_v4()).unwrap();
    ctx.users.insert(pro.clone()).await;
    let client_id = Uuid::new_v4();

    let app = test::init_service(create_app(ctx.state.clone())).await;

    // Professional creates the offer
    let req = test::TestRequest::post()
        .uri("/api/v1/offers")
        .insert_header((header::AUTHORIZATION, bearer(pro.id, Role::User)))
        .set_json(serde_json::json!({
            "service_id": Uuid::new_v4(),
            "client_id": client_id,
            "amount": "150.00",
            "description": "Pintura de interiores"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "pending");
    let offer_id = body["data"]["id"].as_str().unwrap().to_string();

    // The client accepts it
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/offers/{}/accept", offer_id))
        .insert_header((header::AUTHORIZATION, bearer(client_id, Role::User)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "accepted");

    // A second settlement conflicts
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/offers/{}/reject", offer_id))
        .insert_header((header::AUTHORIZATION, bearer(client_id, Role::User)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);
}

#[actix_web::test]
async fn test_only_the_client_may_respond() {
    let ctx = test_state();
    let mut pro = pending_professional("pro2@example.com");
    pro.approve(Uuid::new_v4()).unwrap();
    ctx.users.insert(pro.clone()).await;
    let client_id = Uuid::new_v4();

    let app = test::init_service(create_app(ctx.state.clone())).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/offers")
        .insert_header((header::AUTHORIZATION, bearer(pro.id, Role::User)))
        .set_json(serde_json::json!({
            "service_id": Uuid::new_v4(),
            "client_id": client_id,
            "amount": "90.00",
            "description": "Jardinería"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let offer_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/offers/{}/accept", offer_id))
        .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4(), Role::User)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);
}

#[actix_web::test]
async fn test_professional_sees_sent_offers() {
    let ctx = test_state();
    let mut pro = pending_professional("pro3@example.com");
    pro.approve(Uuid::new_v4()).unwrap();
    ctx.users.insert(pro.clone()).await;

    let app = test::init_service(create_app(ctx.state.clone())).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/offers")
        .insert_header((header::AUTHORIZATION, bearer(pro.id, Role::User)))
        .set_json(serde_json::json!({
            "service_id": Uuid::new_v4(),
            "client_id": Uuid::new_v4(),
            "amount": "60.00",
            "description": "Limpieza"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::get()
        .uri("/api/v1/offers/sent")
        .insert_header((header::AUTHORIZATION, bearer(pro.id, Role::User)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
