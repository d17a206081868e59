//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use choosee_client::PlacesClient;
use choosee_core::Coords;
use serde_json::json;
use wiremock::matchers::{body_json, header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::with_base_urls(
        "maps-key",
        &format!("{}/v1", server.uri()),
        &format!("{}/maps/api/geocode", server.uri()),
        Some(30),
        "choosee-test",
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn search_text_sends_biased_query_and_maps_places() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "maps-key"))
        .and(headers(
            "X-Goog-FieldMask",
            vec![
                "places.id",
                "places.displayName",
                "places.formattedAddress",
                "places.location",
            ],
        ))
        .and(body_json(json!({
            "textQuery": "IT Park",
            "maxResultCount": 5,
            "locationBias": {
                "circle": {
                    "center": {"latitude": 14.5995, "longitude": 120.9842},
                    "radius": 50000.0
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [
                {
                    "id": "p1",
                    "displayName": {"text": "Cebu IT Park"},
                    "formattedAddress": "Lahug, Cebu City",
                    "location": {"latitude": 10.33, "longitude": 123.905}
                },
                {"id": "p2", "displayName": {"text": "No coords"}}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client.search_text("  IT Park ").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].place_id, "p1");
    assert_eq!(results[0].main_text, "Cebu IT Park");
    assert_eq!(results[0].secondary_text, "Lahug, Cebu City");
    assert_eq!(results[0].coords, Coords::new(10.33, 123.905));
}

#[tokio::test]
async fn blank_query_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.search_text("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn reverse_geocode_labels_pin_with_first_component() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("latlng", "10.3,123.9"))
        .and(query_param("key", "maps-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "place_id": "g1",
                "formatted_address": "12 Osmena Blvd, Cebu City",
                "address_components": [{"long_name": "12"}],
                "geometry": {"location": {"lat": 10.3001, "lng": 123.9002}}
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let pin = client
        .reverse_geocode(Coords::new(10.3, 123.9))
        .await
        .unwrap()
        .expect("a result");

    assert_eq!(pin.main_text, "12");
    assert_eq!(pin.secondary_text, "12 Osmena Blvd, Cebu City");
    assert_eq!(pin.coords, Coords::new(10.3001, 123.9002));
}

#[tokio::test]
async fn reverse_geocode_without_components_uses_dropped_pin_label() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "place_id": "g2",
                "formatted_address": "Unnamed Road",
                "geometry": {"location": {"lat": 10.0, "lng": 124.0}}
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let pin = client
        .reverse_geocode(Coords::new(10.0, 124.0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pin.main_text, "Dropped Pin");
}

#[tokio::test]
async fn reverse_geocode_zero_results_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client
        .reverse_geocode(Coords::new(0.0, 0.0))
        .await
        .unwrap()
        .is_none());
}
