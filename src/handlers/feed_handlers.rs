// src/handlers/feed_handlers.rs
use actix_web::{get, web, HttpResponse};

use crate::AppState;
use crate::dtos::api_response::ApiResponse;
use crate::errors::ApiError;
use crate::middleware::auth_extractor::MemberUser;
use crate::services::feed_service;

/// GET /api/feed
/// Plans from followed trainers, newest first.
#[get("")]
pub async fn get_feed(
    state: web::Data<AppState>,
    MemberUser(user): MemberUser,
) -> Result<HttpResponse, ApiError> {
    let feed = feed_service::build_feed(&state.repos, user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Feed retrieved successfully", feed)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::handlers::test_support::Harness;

    #[actix_web::test]
    async fn subscribe_follow_feed_unfollow_flow() {
        let h = Harness::new();
        let app = test::init_service(App::new().configure(h.mount())).await;
        let (coach, trainer) = h.account("John Fitness", "john@trainer.com", "trainer").await;
        let (_, member) = h.account("Jane", "jane@user.com", "user").await;

        let req = test::TestRequest::post()
            .uri("/api/plans")
            .insert_header(("Authorization", trainer))
            .set_json(json!({
                "title": "Fat Loss Beginner Plan",
                "description": "Six weeks of basics",
                "price": 49.99,
                "duration": 30,
                "content": "Week 1: walk"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let plan_id = created["data"]["id"].as_str().unwrap().to_string();
        let plan_uri = format!("/api/plans/{}", plan_id);

        // anonymous preview
        let req = test::TestRequest::get().uri(&plan_uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].get("content").is_none());
        assert_eq!(body["data"]["isSubscribed"], false);

        let req = test::TestRequest::post()
            .uri("/api/subscriptions")
            .insert_header(("Authorization", member.clone()))
            .set_json(json!({ "planId": plan_id }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri(&plan_uri)
            .insert_header(("Authorization", member.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["content"], "Week 1: walk");
        assert_eq!(body["data"]["isSubscribed"], true);

        let follow_uri = format!("/api/follow/{}", coach.id);
        let req = test::TestRequest::post()
            .uri(&follow_uri)
            .insert_header(("Authorization", member.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/feed")
            .insert_header(("Authorization", member.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let feed = body["data"].as_array().unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0]["isSubscribed"], true);
        assert_eq!(feed[0]["trainer"]["name"], "John Fitness");

        let req = test::TestRequest::delete()
            .uri(&follow_uri)
            .insert_header(("Authorization", member.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/feed")
            .insert_header(("Authorization", member.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().is_empty());

        // unfollowing leaves the subscription in place
        let req = test::TestRequest::get()
            .uri(&format!("/api/subscriptions/{}", plan_id))
            .insert_header(("Authorization", member.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["isSubscribed"], true);

        let req = test::TestRequest::get()
            .uri(&plan_uri)
            .insert_header(("Authorization", member))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["content"], "Week 1: walk");
    }

    #[actix_web::test]
    async fn feed_is_for_members_only() {
        let h = Harness::new();
        let app = test::init_service(App::new().configure(h.mount())).await;
        let (_, trainer) = h.account("T", "t@x.co", "trainer").await;

        let req = test::TestRequest::get()
            .uri("/api/feed")
            .insert_header(("Authorization", trainer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Access denied. User role required");
    }
}
