// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use budget_guard::auth::Credentials;
use budget_guard::{check_app, AppEngineClient, Config, Outcome, PubSubMessage, ServingStatus};
use httpmock::Method::{GET, PATCH};
use httpmock::MockServer;
use pretty_assertions::assert_eq;

const PROJECT: &str = "billing-demo";
const TOKEN: &str = "ya29.integration";

fn monthly_message(threshold: &str) -> PubSubMessage {
    let json = format!(
        r#"{{"costAmount":120,"budgetAmount":100,"budgetDisplayName":"monthly","alertThresholdExceeded":{threshold}}}"#
    );
    PubSubMessage {
        data: BASE64.encode(json),
        ..Default::default()
    }
}

fn setup(server: &MockServer) -> (Config, AppEngineClient) {
    let config = Config::new(PROJECT)
        .with_api_endpoint(server.base_url())
        .with_credentials(Credentials::Static(TOKEN.to_string()));
    let client = AppEngineClient::new(&config).unwrap();
    (config, client)
}

#[tokio::test]
async fn test_exceeded_budget_disables_serving_app() {
    let server = MockServer::start_async().await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v1/apps/{PROJECT}"));
            then.status(200)
                .header("content-type", "application/json")
                .body(format!(r#"{{"id":"{PROJECT}","servingStatus":"SERVING"}}"#));
        })
        .await;
    let patch = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path(format!("/v1/apps/{PROJECT}"))
                .query_param("updateMask", "servingStatus")
                .header("authorization", format!("Bearer {TOKEN}"))
                .json_body(serde_json::json!({ "servingStatus": "USER_DISABLED" }));
            then.status(200).body("{}");
        })
        .await;
    let (config, client) = setup(&server);

    let outcome = check_app(&monthly_message("1.0"), &config, &client)
        .await
        .unwrap();

    assert_eq!(
        Outcome::Disabled {
            previous: ServingStatus::Serving
        },
        outcome
    );
    get.assert_calls_async(1).await;
    patch.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_already_disabled_app_is_not_patched() {
    let server = MockServer::start_async().await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v1/apps/{PROJECT}"));
            then.status(200)
                .body(format!(r#"{{"id":"{PROJECT}","servingStatus":"USER_DISABLED"}}"#));
        })
        .await;
    let patch = server
        .mock_async(|when, then| {
            when.method(PATCH);
            then.status(200).body("{}");
        })
        .await;
    let (config, client) = setup(&server);

    let outcome = check_app(&monthly_message("1.0"), &config, &client)
        .await
        .unwrap();

    assert_eq!(
        Outcome::AlreadyDisabled {
            status: ServingStatus::UserDisabled
        },
        outcome
    );
    get.assert_calls_async(1).await;
    patch.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_half_spent_budget_is_log_only() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|_when, then| {
            then.status(500);
        })
        .await;
    let (config, client) = setup(&server);

    let outcome = check_app(&monthly_message("0.5"), &config, &client)
        .await
        .unwrap();

    assert_eq!(Outcome::BelowThreshold, outcome);
    any.assert_calls_async(0).await;
}
