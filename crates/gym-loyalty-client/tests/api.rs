//! Gym API client tests against a mock server.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gym_loyalty_client::{ClientError, GymApiClient};
use gym_loyalty_core::{
    purchase_subscription, ClientId, DurationUnit, LoyaltyError, PlanId, PurchaseRequest,
    RewardId, RewardStatus, SubscriptionId,
};

fn client(server: &MockServer) -> GymApiClient {
    GymApiClient::new(server.uri(), Some("secret".into())).expect("client builds")
}

fn reward_json(id: u32, status: &str, expires_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "subscription_id": 7,
        "client_id": 42,
        "attendance_count": 21,
        "discount_percentage": "10.00",
        "eligible_date": "2026-10-01",
        "expires_at": expires_at,
        "status": status
    })
}

fn plan_json() -> serde_json::Value {
    json!({
        "id": 3,
        "name": "Monthly",
        "duration_unit": "month",
        "duration_count": 1,
        "price": "100.00"
    })
}

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn attendances_follow_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients/42/attendances"))
        .and(query_param_is_missing("page"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": format!("{}/clients/42/attendances?page=2", server.uri()),
            "results": [
                {"id": 1, "client_id": 42, "check_in": "2026-10-17T07:30:00+03:00"},
                {"id": 2, "client_id": 42, "check_in": "2026-10-18T18:05:00+03:00"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clients/42/attendances"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "results": [
                {"id": 3, "client_id": 42, "check_in": "2026-10-16T06:00:00+03:00"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client_id = ClientId::new("42").unwrap();
    let attendances = client(&server).list_attendances(&client_id).await.unwrap();

    assert_eq!(attendances.len(), 3);
    assert_eq!(attendances[2].id.as_str(), "3");

    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let streaks = gym_loyalty_core::compute_streaks(&attendances, today);
    assert_eq!(streaks.current, 3);
}

#[tokio::test]
async fn bare_array_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients/42/rewards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reward_json(1, "pending", "2026-11-01T00:00:00Z"),
            reward_json(2, "applied", "2026-11-01T00:00:00Z")
        ])))
        .mount(&server)
        .await;

    let rewards = client(&server)
        .list_rewards(&ClientId::new("42").unwrap())
        .await
        .unwrap();

    assert_eq!(rewards.len(), 2);
    assert_eq!(rewards[1].status, RewardStatus::Applied);
    assert!((rewards[0].discount_percentage - 10.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn plan_with_text_price() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_json()))
        .mount(&server)
        .await;

    let plan = client(&server)
        .get_plan(&PlanId::new("3").unwrap())
        .await
        .unwrap();
    assert_eq!(plan.duration_unit, DurationUnit::Month);
    assert!((plan.price - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn missing_subscription_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_subscription(&SubscriptionId::new("99").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::NotFound { entity: "subscription", ref id } if id == "99"
    ));
}

#[tokio::test]
async fn server_error_body_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/3"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": "internal", "message": "database unavailable"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_plan(&PlanId::new("3").unwrap())
        .await
        .unwrap_err();

    match err {
        ClientError::Api {
            code,
            message,
            status,
        } => {
            assert_eq!(code, "internal");
            assert_eq!(message, "database unavailable");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn calculate_reward_posts_to_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/7/calculate-reward"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(reward_json(11, "pending", "2026-11-30T23:59:59Z")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reward = client(&server)
        .request_reward(&SubscriptionId::new("7").unwrap())
        .await
        .unwrap();
    assert_eq!(reward.id, RewardId::new("11").unwrap());
}

#[tokio::test]
async fn rejected_apply_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rewards/11/apply"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"code": "already_applied", "message": "Reward already applied"}
        })))
        .mount(&server)
        .await;

    let request =
        gym_loyalty_core::validate_apply_input(Some("11"), Some("20"), "10").unwrap();
    let err = client(&server)
        .apply_reward_record(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::RewardRejected { ref reward_id, .. } if reward_id == "11"));
}

#[tokio::test]
async fn purchase_with_reward_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions"))
        .and(body_json(json!({
            "client_id": "42",
            "plan_id": "3",
            "start_date": "2026-10-18",
            "end_date": "2026-11-17",
            "final_price": 90.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 20,
            "client_id": 42,
            "plan_id": 3,
            "start_date": "2026-10-18",
            "end_date": "2026-11-17",
            "status": "pending_payment",
            "final_price": "90.00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut applied = reward_json(11, "applied", "2026-11-01T00:00:00Z");
    applied["applied_at"] = json!("2026-10-18T12:00:00Z");
    applied["applied_subscription_id"] = json!(20);

    Mock::given(method("POST"))
        .and(path("/rewards/11/apply"))
        .and(body_json(json!({"subscription_id": "20", "discount_percentage": 10.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(applied))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let plan: gym_loyalty_core::Plan = serde_json::from_value(plan_json()).unwrap();
    let reward: gym_loyalty_core::Reward =
        serde_json::from_value(reward_json(11, "pending", "2026-11-01T00:00:00Z")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

    let request = PurchaseRequest {
        client_id: ClientId::new("42").unwrap(),
        plan,
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    };
    let outcome = purchase_subscription(&api, &request, Some(&reward), now)
        .await
        .unwrap();

    assert!(outcome.reward_applied());
    assert!(outcome.warning.is_none());
    assert!((outcome.price.saved_amount - 10.0).abs() < f64::EPSILON);
    assert_eq!(outcome.subscription.final_price, Some(90.0));
}

#[tokio::test]
async fn failed_apply_surfaces_as_warning() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 21,
            "client_id": 42,
            "plan_id": 3,
            "start_date": "2026-10-18",
            "end_date": "2026-11-17",
            "status": "active",
            "final_price": 90
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rewards/11/apply"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = client(&server);
    let plan: gym_loyalty_core::Plan = serde_json::from_value(plan_json()).unwrap();
    let reward: gym_loyalty_core::Reward =
        serde_json::from_value(reward_json(11, "pending", "2026-11-01T00:00:00Z")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

    let request = PurchaseRequest {
        client_id: ClientId::new("42").unwrap(),
        plan,
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    };
    let outcome = purchase_subscription(&api, &request, Some(&reward), now)
        .await
        .unwrap();

    assert!(!outcome.reward_applied());
    assert_eq!(outcome.subscription.id.as_str(), "21");
    assert!(outcome.warning.unwrap().contains("HTTP 503"));
}

#[tokio::test]
async fn gateway_errors_become_external_service_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client(&server);
    let plan: gym_loyalty_core::Plan = serde_json::from_value(plan_json()).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let request = PurchaseRequest {
        client_id: ClientId::new("42").unwrap(),
        plan,
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    };

    let err = purchase_subscription(&api, &request, None, now)
        .await
        .unwrap_err();
    assert!(matches!(err, LoyaltyError::ExternalService { ref service, .. } if service == "gym-api"));
}
