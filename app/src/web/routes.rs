// app/src/web/routes.rs

use crate::web::handlers::{approval_handlers, auth_handlers, coop_handlers, order_handlers, product_handlers};
use actix_web::{web, HttpResponse};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(web::scope("/auth").route("/signup", web::post().to(auth_handlers::signup_handler)))
      .service(
        web::scope("/stores/{store_id}")
          .route("/products", web::post().to(product_handlers::create_product_handler))
          .route("/coops", web::post().to(coop_handlers::create_coop_handler)),
      )
      .route("/orders", web::post().to(order_handlers::create_order_handler))
      .service(
        web::scope("/signup-requests/{request_id}")
          .route("/approve", web::post().to(approval_handlers::approve_request_handler))
          .route("/reject", web::post().to(approval_handlers::reject_request_handler)),
      ),
  );
}
