//! Integration tests for `ChooseeClient` using wiremock HTTP mocks.

use choosee_client::{ChooseeClient, ClientError, Session};
use choosee_core::auth::{RegisterForm, TokenPair};
use choosee_core::store::{Action, AppState, Route};
use choosee_core::suggestion::SaveSuggestionRequest;
use choosee_core::{Coords, PreferenceDraft, RecommendationKey, RestaurantRecommendation, SaveOutcome};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ChooseeClient {
    ChooseeClient::with_base_url(
        &format!("{}/api", server.uri()),
        Some(30),
        "choosee-test",
        Session::in_memory(),
    )
    .expect("client construction should not fail")
}

fn signed_in_client(server: &MockServer) -> ChooseeClient {
    let client = test_client(server);
    client
        .session()
        .store_tokens(&TokenPair {
            access: "old-access".to_string(),
            refresh: "refresh-1".to_string(),
        })
        .unwrap();
    client
}

fn complete_draft() -> PreferenceDraft {
    let mut draft = PreferenceDraft::default();
    draft.location = Some(Coords::new(10.3157, 123.8854));
    draft.location_enabled = true;
    draft
}

fn restaurant(name: &str) -> RestaurantRecommendation {
    serde_json::from_value(json!({
        "name": name,
        "address": "Mango Ave, Cebu City",
        "lat": 10.31,
        "lng": 123.89,
        "rating": 4.6,
        "types": ["ramen_restaurant"],
        "rank": "1"
    }))
    .unwrap()
}

#[tokio::test]
async fn search_places_sends_draft_body_and_parses_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/maps/search_places/"))
        .and(body_json(json!({
            "lat": 10.3157,
            "lng": 123.8854,
            "preferences": {
                "food_preference": "Surprise me, Choosee!",
                "dietary_preference": "Not choosy atm!",
                "max_price": 75
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "restaurants": [
                {"name": "Ippudo", "address": "SM Seaside", "lat": 10.28, "lng": 123.88, "rank": "1"},
                {"name": "Abaca", "address": "Mactan", "lat": 10.31, "lng": 124.02, "rank": 2, "price_level": 3}
            ],
            "count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let recs = client
        .search_draft(&complete_draft())
        .await
        .expect("search should succeed");

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].rank, Some(1));
    assert_eq!(recs[1].rank, Some(2));
    assert_eq!(recs[1].price_level, Some(3));
}

#[tokio::test]
async fn empty_search_result_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/maps/search_places/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"restaurants": [], "count": 0})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let recs = client.search_draft(&complete_draft()).await.unwrap();
    assert!(recs.is_empty());

    let mut state = AppState::default().reduce(Action::FetchStarted {
        center: Coords::new(10.3157, 123.8854),
    });
    let tag = state.results.latest_tag();
    state = state.reduce(Action::FetchSucceeded {
        tag,
        recommendations: recs,
    });
    assert!(state.results.error.is_none());
    assert!(choosee_core::presentation::markers(
        &state.results.recommendations,
        choosee_core::presentation::Viewport::Desktop
    )
    .is_empty());
}

#[tokio::test]
async fn incomplete_draft_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search_draft(&PreferenceDraft::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Incomplete(_)),
        "expected Incomplete, got: {err:?}"
    );
}

#[tokio::test]
async fn backend_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/maps/search_places/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Places quota exhausted"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.search_draft(&complete_draft()).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(err.user_message(), "Places quota exhausted");
}

#[tokio::test]
async fn login_persists_tokens_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "juan@example.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a1",
            "refresh": "r1",
            "user": {"id": 3, "username": "juan", "email": "juan@example.com"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = client
        .login(" juan@example.com ", "hunter22")
        .await
        .unwrap()
        .expect("user returned");

    assert_eq!(user.display_name(), "juan");
    assert_eq!(client.session().access_token().unwrap().as_deref(), Some("a1"));
    assert_eq!(client.session().refresh_token().unwrap().as_deref(), Some("r1"));
    assert_eq!(client.session().user().unwrap(), Some(user));
}

#[tokio::test]
async fn register_validates_locally_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut form = RegisterForm {
        username: "juan".to_string(),
        email: "juan@example.com".to_string(),
        password: "longenough".to_string(),
        password_confirmation: "different1".to_string(),
    };
    let err = client.register(&form).await.unwrap_err();
    assert_eq!(err.user_message(), "Passwords do not match");

    form.password_confirmation = form.password.clone();
    client.register(&form).await.expect("valid form registers");
}

#[tokio::test]
async fn expired_access_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/visited/check_visited/"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new-access"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/visited/check_visited/"))
        .and(header("authorization", "Bearer new-access"))
        .and(body_json(json!({
            "location": {"name": "Ippudo", "address": "Mango Ave, Cebu City"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_visited": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let visited = client.check_visited(&restaurant("Ippudo")).await.unwrap();

    assert!(visited);
    assert_eq!(
        client.session().access_token().unwrap().as_deref(),
        Some("new-access")
    );
}

#[tokio::test]
async fn failed_refresh_on_toggle_clears_session_and_routes_to_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/visited/toggle_visited/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/refresh/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is blacklisted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let rec = restaurant("Ippudo");
    let key = rec.key();

    let mut state = AppState::default()
        .reduce(Action::LoginSucceeded(None))
        .reduce(Action::SelectVisited(
            serde_json::from_value(json!({
                "id": 9, "name": "Ippudo", "address": "Mango Ave, Cebu City",
                "lat": 10.31, "lng": 123.89
            }))
            .unwrap(),
        ))
        .reduce(Action::ToggleStarted);

    let err = client.toggle_visited(&rec).await.unwrap_err();
    assert!(err.is_session_expired(), "expected SessionExpired, got: {err:?}");
    assert!(client.session().access_token().unwrap().is_none());
    assert!(client.session().refresh_token().unwrap().is_none());

    state = state.reduce(Action::ToggleFailed { key }).reduce(Action::SessionExpired);
    assert_eq!(state.route, Route::Login);
    assert_eq!(state.route.path(), "/login");
    assert!(!state.auth.is_authenticated);
}

#[tokio::test]
async fn toggle_twice_returns_to_original_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/visited/toggle_visited/"))
        .and(body_partial_json(json!({
            "location": {"name": "Ippudo", "types": ["ramen_restaurant"]},
            "notes": "Visited Ippudo"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_visited": true})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/visited/toggle_visited/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_visited": false})))
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let rec = restaurant("Ippudo");
    let key = RecommendationKey::Name("Ippudo".to_string());

    let mut state = AppState::default()
        .reduce(Action::LoginSucceeded(None))
        .reduce(Action::FetchStarted {
            center: Coords::new(10.3, 123.9),
        });
    let tag = state.results.latest_tag();
    state = state
        .reduce(Action::FetchSucceeded {
            tag,
            recommendations: vec![rec.clone()],
        })
        .reduce(Action::Select(key.clone()));
    let original = state.detail.is_visited;

    for _ in 0..2 {
        state = state.reduce(Action::ToggleStarted);
        let is_visited = client.toggle_visited(&rec).await.unwrap();
        state = state.reduce(Action::ToggleSucceeded {
            key: key.clone(),
            is_visited,
        });
    }

    assert_eq!(state.detail.is_visited, original);
}

#[tokio::test]
async fn visited_calls_require_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.toggle_visited(&restaurant("Ippudo")).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
}

#[tokio::test]
async fn visited_list_accepts_wrapped_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/visited/"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "visited_locations": [
                {"id": "v1", "name": "Ippudo", "address": "Mango Ave, Cebu City", "lat": 10.31, "lng": 123.89}
            ]
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let visited = client.visited_locations().await.unwrap();
    assert_eq!(visited.len(), 1);
    assert!(visited[0].matches(&restaurant("Ippudo")));
}

#[tokio::test]
async fn duplicate_suggestion_is_reported_as_already_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/suggestions/save_suggestions/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "DUPLICATE_SUGGESTION",
            "message": "You already saved this suggestion"
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let search = complete_draft().to_search_request().unwrap();
    let request = SaveSuggestionRequest::new(&search, vec![restaurant("Ippudo")]);
    let outcome = client.save_suggestions(&request).await.unwrap();
    assert_eq!(outcome, SaveOutcome::AlreadySaved);
}

#[tokio::test]
async fn user_suggestions_lists_saved_bundles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/suggestions/user_suggestions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 4,
                "date_created": "2025-05-01T08:30:00Z",
                "prompt": {
                    "lat": 10.3, "lng": 123.9,
                    "food_preference": "Thai", "dietary_preference": "Vegan", "price": 200
                },
                "locations": [{"name": "Lemongrass", "lat": 10.3, "lng": 123.9, "rank": "1"}]
            }
        ])))
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let saved = client.user_suggestions().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].prompt.max_price, Some(200));
    assert_eq!(saved[0].locations[0].name, "Lemongrass");
}

#[tokio::test]
async fn logout_clears_credentials_even_when_backend_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/logout"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let result = client.logout().await;

    assert!(result.is_err());
    assert!(client.session().access_token().unwrap().is_none());
    assert!(client.session().refresh_token().unwrap().is_none());
}

#[tokio::test]
async fn current_user_refreshes_stored_copy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "email": "juan@example.com"
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server);
    let user = client.current_user().await.unwrap();
    assert_eq!(user.display_name(), "juan@example.com");
    assert_eq!(client.session().user().unwrap(), Some(user));
}

#[tokio::test]
async fn slow_backend_is_awaited_without_a_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(1500))
                .set_body_json(json!({"id": 3, "email": "juan@example.com"})),
        )
        .mount(&server)
        .await;

    let client = ChooseeClient::with_base_url(
        &format!("{}/api", server.uri()),
        None,
        "choosee-test",
        Session::in_memory(),
    )
    .unwrap();
    client.session().store_access_token("access").unwrap();

    let user = client.current_user().await.unwrap();
    assert_eq!(user.email, "juan@example.com");
}
