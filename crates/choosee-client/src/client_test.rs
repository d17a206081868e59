use super::*;

fn test_client(base_url: &str) -> ChooseeClient {
    ChooseeClient::with_base_url(base_url, Some(30), "choosee-test", Session::in_memory())
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_to_base_path() {
    let client = test_client("https://weats-backend.onrender.com/api");
    let url = client.endpoint("maps/search_places/").unwrap();
    assert_eq!(
        url.as_str(),
        "https://weats-backend.onrender.com/api/maps/search_places/"
    );
}

#[test]
fn endpoint_tolerates_slashes_on_both_sides() {
    let client = test_client("https://weats-backend.onrender.com/api/");
    let url = client.endpoint("/users/login").unwrap();
    assert_eq!(url.as_str(), "https://weats-backend.onrender.com/api/users/login");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ChooseeClient::with_base_url("not a url", None, "ua", Session::in_memory())
        .unwrap_err();
    assert!(
        matches!(err, ClientError::InvalidBaseUrl { ref url, .. } if url == "not a url"),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}

#[test]
fn require_login_needs_access_token() {
    let client = test_client("http://localhost");
    assert!(matches!(
        client.require_login(),
        Err(ClientError::NotAuthenticated)
    ));
    client.session().store_access_token("abc").unwrap();
    assert!(client.require_login().is_ok());
}
