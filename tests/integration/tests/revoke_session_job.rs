use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use gws_core::{
    ENV_ADDRESS, ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID, ENV_OAUTH2_CLIENT_CREDENTIALS_SCOPE,
    ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL, SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET,
};
use gws_revoke_action::{ActionConfig, ExecutionContext, RevokeSessionAction};
use httpmock::prelude::*;
use serde_json::{json, Value};

const TEST_USER_AGENT: &str = "gws-revoke-session-integration/0.0";

fn action() -> RevokeSessionAction {
    RevokeSessionAction::new(
        ActionConfig::default()
            .with_request_timeout_ms(5_000)
            .with_user_agent(TEST_USER_AGENT),
    )
}

fn client_credentials_context(server: &MockServer) -> ExecutionContext {
    serde_json::from_value(json!({
        "environment": {
            ENV_ADDRESS: server.base_url(),
            ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL: format!("{}/oauth2/token", server.base_url()),
            ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID: "directory-client",
            ENV_OAUTH2_CLIENT_CREDENTIALS_SCOPE: "admin.directory.user.security"
        },
        "secrets": {
            SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET: "directory-secret"
        }
    }))
    .expect("context should deserialize")
}

#[tokio::test]
async fn integration_client_credentials_token_feeds_sign_out_request() {
    let server = MockServer::start();
    let expected_basic = format!(
        "Basic {}",
        BASE64_STANDARD.encode("directory-client:directory-secret")
    );
    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth2/token")
            .header("authorization", expected_basic.as_str())
            .header("user-agent", TEST_USER_AGENT)
            .body_includes("grant_type=client_credentials")
            .body_includes("scope=admin.directory.user.security");
        then.status(200)
            .json_body(json!({ "access_token": "minted-token", "expires_in": 3600 }));
    });
    let sign_out_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/admin/directory/v1/users/118234567890/signOut")
            .header("authorization", "Bearer minted-token");
        then.status(204);
    });

    let result = action()
        .invoke(
            &json!({ "userKey": "118234567890" }),
            &client_credentials_context(&server),
        )
        .await
        .expect("invoke should succeed");

    token_mock.assert_calls(1);
    sign_out_mock.assert_calls(1);

    let output = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(output["userKey"], "118234567890");
    assert_eq!(output["sessionRevoked"], true);
    assert!(output["revokedAt"].as_str().is_some());
}

#[tokio::test]
async fn integration_token_failure_stops_before_sign_out() {
    let server = MockServer::start();
    let token_mock = server.mock(|when, then| {
        when.method(POST).path("/oauth2/token");
        then.status(400)
            .json_body(json!({ "error": "invalid_scope" }));
    });
    let sign_out_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/admin/directory/v1/users/118234567890/signOut");
        then.status(204);
    });

    let error = action()
        .invoke(
            &json!({ "userKey": "118234567890" }),
            &client_credentials_context(&server),
        )
        .await
        .expect_err("invoke should fail");

    token_mock.assert_calls(1);
    sign_out_mock.assert_calls(0);
    assert_eq!(error.status_code(), Some(400));
    assert_eq!(
        error.to_string(),
        "OAuth2 token request failed: 400 Bad Request - {\"error\":\"invalid_scope\"}"
    );
}

#[tokio::test]
async fn integration_missing_credentials_sends_unauthenticated_request() {
    let server = MockServer::start();
    let sign_out_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/admin/directory/v1/users/118234567890/signOut");
        then.status(401).json_body(json!({
            "error": { "code": 401, "message": "Login Required." }
        }));
    });

    let context = ExecutionContext::new().with_environment(ENV_ADDRESS, server.base_url());
    let error = action()
        .invoke(&json!({ "userKey": "118234567890" }), &context)
        .await
        .expect_err("invoke should fail");

    sign_out_mock.assert_calls(1);
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.to_string(), "Failed to revoke sessions: Login Required.");
}

#[tokio::test]
async fn integration_halt_report_matches_framework_shape() {
    let result = action()
        .halt(&json!({ "reason": "timeout" }), &ExecutionContext::new())
        .await;

    let output: Value = serde_json::to_value(&result).expect("serialize halt result");
    assert_eq!(output["userKey"], "unknown");
    assert_eq!(output["reason"], "timeout");
    assert_eq!(output["cleanupCompleted"], true);
    assert!(output["haltedAt"].as_str().is_some());
}
