//! Integration tests for the SOS API clients using wiremock
//!
//! These tests verify request shape (paths, bearer token, JSON bodies) and
//! status handling against a mock HTTP server.

use integration_sos_api::{
    DirectoryClient, GatewayClient, HttpDirectoryClient, HttpGatewayClient, SosApiConfig,
    SosApiError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

const API_KEY: &str = "test-api-key";

fn sample_contact(id: &str, priority: i32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Contact {id}"),
        "role": "paramedic",
        "phone": "+33600000001",
        "email": format!("{id}@example.com"),
        "priority": priority,
        "isAvailable": true,
        "zones": ["lyon"],
        "specialties": ["medical"],
        "notificationPreferences": {"sms": true, "email": true, "call": false, "app": true}
    })
}

fn config(mock_server: &MockServer) -> SosApiConfig {
    SosApiConfig::new(mock_server.uri(), API_KEY).with_timeout_secs(5)
}

/// Create a directory client configured to use the mock server
fn directory_client(mock_server: &MockServer) -> HttpDirectoryClient {
    #[allow(clippy::expect_used)]
    HttpDirectoryClient::new(config(mock_server)).expect("Failed to create client")
}

/// Create a gateway client configured to use the mock server
fn gateway_client(mock_server: &MockServer) -> HttpGatewayClient {
    #[allow(clippy::expect_used)]
    HttpGatewayClient::new(config(mock_server)).expect("Failed to create client")
}

// ============================================================================
// Directory
// ============================================================================

#[tokio::test]
async fn get_vehicle_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles/V1"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "V1",
            "registrationNumber": "AB-123-CD",
            "type": "truck",
            "driver": {"id": "d1", "name": "Dan", "phone": "+33600000009"},
            "emergencyContacts": ["c1", "c2", "c3"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let vehicle = directory_client(&mock_server).get_vehicle("V1").await;

    assert!(vehicle.is_ok(), "Expected success, got: {vehicle:?}");
    assert_eq!(vehicle.unwrap().emergency_contacts, vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn get_contact_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = directory_client(&mock_server).get_contact("ghost").await;

    assert!(matches!(result, Err(SosApiError::NotFound(r)) if r == "contact ghost"));
}

#[tokio::test]
async fn get_contact_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = directory_client(&mock_server).get_contact("c1").await;

    assert!(matches!(result, Err(SosApiError::ParseError(_))));
}

#[tokio::test]
async fn list_available_contacts_filters_server_side() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("isAvailable", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([sample_contact("c1", 1), sample_contact("c2", 2)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let contacts = directory_client(&mock_server)
        .list_available_contacts()
        .await
        .unwrap();

    assert_eq!(contacts.len(), 2);
    assert!(contacts.iter().all(|c| c.is_available));
}

#[tokio::test]
async fn find_contacts_in_zone_encodes_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts/zone"))
        .and(query_param("location", "Lyon Part-Dieu & gare"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([sample_contact("c1", 1)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let contacts = directory_client(&mock_server)
        .find_contacts_in_zone("Lyon Part-Dieu & gare")
        .await
        .unwrap();

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id, "c1");
}

#[tokio::test]
async fn directory_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let result = directory_client(&mock_server).list_available_contacts().await;

    assert!(matches!(result, Err(SosApiError::RateLimitExceeded)));
}

#[tokio::test]
async fn directory_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = HttpDirectoryClient::new(config(&mock_server).with_timeout_secs(1)).unwrap();
    let result = client.find_contacts_in_zone("Lyon").await;

    assert!(matches!(result, Err(SosApiError::Timeout { timeout_secs: 1 })));
}

// ============================================================================
// Gateway
// ============================================================================

#[tokio::test]
async fn send_sms_posts_json_with_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sms"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"to": "+33600000001", "message": "help"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .send_sms("+33600000001", "help")
        .await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn blank_recipient_is_left_to_the_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sms"))
        .and(body_json(serde_json::json!({"to": "", "message": "help"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server).send_sms("", "help").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn send_email_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email"))
        .and(body_json(serde_json::json!({
            "to": "a@example.com",
            "subject": "ALERTE SOS",
            "message": "help"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .send_email("a@example.com", "ALERTE SOS", "help")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn initiate_call_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .and(body_json(serde_json::json!({"to": "+33600000001", "message": "help"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .initiate_call("+33600000001", "help")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn send_notification_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notification"))
        .and(body_json(serde_json::json!({
            "userId": "c1",
            "message": "help",
            "priority": "high",
            "data": {"type": "SOS_ALERT", "requiresAction": true}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .send_notification("c1", "help", "high")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn non_200_success_codes_are_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sms"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .send_sms("+33600000001", "help")
        .await;

    assert!(matches!(result, Err(SosApiError::UnexpectedStatus { status: 202 })));
}

#[tokio::test]
async fn gateway_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .initiate_call("+33600000001", "help")
        .await;

    assert!(matches!(result, Err(SosApiError::UnexpectedStatus { status: 503 })));
}

#[tokio::test]
async fn gateway_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = gateway_client(&mock_server)
        .send_notification("c1", "help", "high")
        .await;

    assert!(matches!(result, Err(SosApiError::Unauthorized)));
}

#[tokio::test]
async fn connection_refused() {
    let client =
        HttpGatewayClient::new(SosApiConfig::new("http://127.0.0.1:1", API_KEY)).unwrap();
    let result = client.send_sms("+33600000001", "help").await;

    assert!(result.is_err());
    assert!(result.unwrap_err().is_retryable());
}
