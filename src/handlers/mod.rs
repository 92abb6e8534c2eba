pub mod auth_handlers;
pub mod feed_handlers;
pub mod follow_handlers;
pub mod plan_handlers;
pub mod subscription_handlers;
pub mod trainer_handlers;

#[cfg(test)]
pub mod test_support;

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::ApiError;

/// Route table shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .service(auth_handlers::register) // POST /api/auth/register
                    .service(auth_handlers::login) // POST /api/auth/login
                    .service(auth_handlers::me), // GET /api/auth/me
            )
            .service(
                web::scope("/plans")
                    .service(plan_handlers::my_plans) // GET /api/plans/trainer/my-plans
                    .service(plan_handlers::list_plans) // GET /api/plans
                    .service(plan_handlers::create_plan) // POST /api/plans
                    .service(plan_handlers::get_plan) // GET /api/plans/{id}
                    .service(plan_handlers::update_plan) // PUT /api/plans/{id}
                    .service(plan_handlers::delete_plan), // DELETE /api/plans/{id}
            )
            .service(
                web::scope("/subscriptions")
                    .service(subscription_handlers::subscribe) // POST /api/subscriptions
                    .service(subscription_handlers::list_subscriptions) // GET /api/subscriptions
                    .service(subscription_handlers::check_subscription), // GET /api/subscriptions/{plan_id}
            )
            .service(
                web::scope("/follow")
                    .service(follow_handlers::list_following) // GET /api/follow
                    .service(follow_handlers::follow_trainer) // POST /api/follow/{trainer_id}
                    .service(follow_handlers::unfollow_trainer) // DELETE /api/follow/{trainer_id}
                    .service(follow_handlers::check_following), // GET /api/follow/{trainer_id}
            )
            .service(web::scope("/feed").service(feed_handlers::get_feed)) // GET /api/feed
            .service(
                web::scope("/trainers")
                    .service(trainer_handlers::list_trainers) // GET /api/trainers
                    .service(trainer_handlers::get_trainer), // GET /api/trainers/{id}
            ),
    );
}

/// Malformed bodies answer in the same envelope as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

/// Parses an id taken from the path. `what` names the entity in the message.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::BadRequest(format!("Invalid {} ID format", what)))
}

/// GET /api/health
#[get("/api/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "OK", "message": "FitPlan API is running" }))
}
