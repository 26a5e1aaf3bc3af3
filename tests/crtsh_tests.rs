use std::time::Duration;

use crtsh_hunter::discover::{CertificateSource, CrtShClient};
use crtsh_hunter::user_agent::{candidates, UserAgentProfile};
use crtsh_hunter::FetchError;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer, timeout: Duration) -> CrtShClient {
    CrtShClient::new(format!("{}/", server.uri()), timeout, UserAgentProfile::Desktop).unwrap()
}

#[tokio::test]
async fn fetch_sends_query_and_returns_names_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("output", "json"))
        .and(query_param("CN", "example.com"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"issuer_ca_id": 1, "name_value": "www.example.com"},
            {"issuer_ca_id": 2, "name_value": "www.example.com"},
            {"issuer_ca_id": 3, "name_value": "*.example.com"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let names = client_for(&server, Duration::from_secs(5)).fetch("example.com").await.unwrap();
    assert_eq!(names, vec!["www.example.com", "www.example.com", "*.example.com"]);
}

#[tokio::test]
async fn fetch_uses_a_table_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    client_for(&server, Duration::from_secs(5)).fetch("example.com").await.unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let ua = requests[0].headers.get("user-agent").unwrap().to_str().unwrap().to_string();
    assert!(candidates(UserAgentProfile::Desktop).contains(&ua.as_str()));
}

#[tokio::test]
async fn fetch_reports_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5)).fetch("example.com").await.unwrap_err();
    match err {
        FetchError::BadStatus { status, domain } => {
            assert_eq!(status, 503);
            assert_eq!(domain, "example.com");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5)).fetch("example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn fetch_times_out_on_hanging_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_millis(200)).fetch("example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(ref e) if e.is_timeout()), "got {err:?}");
}

#[tokio::test]
async fn fetch_reports_unreachable_endpoint() {
    // nothing listens on port 9 of the loopback interface
    let client = CrtShClient::new("http://127.0.0.1:9/", Duration::from_secs(2), UserAgentProfile::Linux).unwrap();
    let err = client.fetch("example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
