use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::db::Database;
use crate::error::ApiError;
use crate::models::review::{NewReview, Upvotes};

pub async fn get_reviews(db: web::Data<Database>) -> HttpResponse {
    let reviews = db.reviews().await;
    info!("[API] Returning {} reviews", reviews.len());
    HttpResponse::Ok().json(reviews)
}

pub async fn get_review(
    db: web::Data<Database>,
    review_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let review_id = review_id.into_inner();
    match db.find_review(&review_id).await {
        Some(review) => Ok(HttpResponse::Ok().json(review)),
        None => {
            warn!("[API] Review {} not found", review_id);
            Err(ApiError::NotFound(review_id))
        }
    }
}

pub async fn get_review_upvotes(
    db: web::Data<Database>,
    review_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let review_id = review_id.into_inner();
    match db.find_review(&review_id).await {
        Some(review) => Ok(HttpResponse::Ok().json(Upvotes {
            upvotes: review.upvotes,
        })),
        None => {
            warn!("[API] Review {} not found", review_id);
            Err(ApiError::NotFound(review_id))
        }
    }
}

pub async fn create_review(
    db: web::Data<Database>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let Some(new_review) = NewReview::from_payload(payload.into_inner()) else {
        warn!("[API] Rejected review without product, username and review");
        return Err(ApiError::MissingProperties);
    };

    let review = db.insert_review(new_review).await?;
    info!("[API] Created review {}", review.review_id);

    Ok(HttpResponse::Created().json(json!({ "status": "success", "body": review })))
}

pub async fn upvote_review(
    db: web::Data<Database>,
    review_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let review_id = review_id.into_inner();
    match db.increment_upvotes(&review_id).await? {
        Some(review) => {
            info!("[API] Upvoted review {} to {}", review_id, review.upvotes);
            Ok(HttpResponse::Ok().json(review))
        }
        None => {
            warn!("[API] Review {} not found", review_id);
            Err(ApiError::NotFound(review_id))
        }
    }
}

pub async fn get_pets(db: web::Data<Database>) -> HttpResponse {
    info!("[API] Returning {} pets", db.pets().len());
    HttpResponse::Ok().json(db.pets())
}

pub async fn get_terms(db: web::Data<Database>) -> HttpResponse {
    info!("[API] Returning {} terms", db.terms().len());
    HttpResponse::Ok().json(db.terms())
}

// Bodies that are not JSON get the same `{error}` shape as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("[API] Rejected request body: {}", err);
        ApiError::MalformedPayload(err.to_string()).into()
    })
}

/// Registers every route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("/reviews", web::get().to(get_reviews)) // GET /api/reviews
            .route("/reviews", web::post().to(create_review)) // POST /api/reviews
            .route("/reviews/{id}", web::get().to(get_review)) // GET /api/reviews/{id}
            .route("/reviews/{id}/upvotes", web::get().to(get_review_upvotes)) // GET /api/reviews/{id}/upvotes
            .route("/reviews/{id}/upvotes", web::put().to(upvote_review)) // PUT /api/reviews/{id}/upvotes
            .route("/pets", web::get().to(get_pets)) // GET /api/pets
            .route("/terms", web::get().to(get_terms)), // GET /api/terms
    );
}
