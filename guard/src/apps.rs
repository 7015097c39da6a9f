// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::config::Config;
use crate::status::ServingStatus;
use crate::{Error, Result};

const GET_OPERATION: &str = "apps.get";
const PATCH_OPERATION: &str = "apps.patch";

/// Application management operations the kill-switch needs.
#[async_trait]
pub trait AppsApi: Send + Sync {
    async fn get_serving_status(&self, app_id: &str) -> Result<ServingStatus>;
    async fn set_serving_status(&self, app_id: &str, status: ServingStatus) -> Result<()>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Application {
    #[serde(default)]
    serving_status: Option<ServingStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServingStatusPatch {
    serving_status: ServingStatus,
}

/// App Engine Admin API v1 client.
#[derive(Clone, Debug)]
pub struct AppEngineClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl AppEngineClient {
    pub fn new(config: &Config) -> Result<AppEngineClient> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("budget-guard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(AppEngineClient::with_http_client(config, http))
    }

    pub fn with_http_client(config: &Config, http: reqwest::Client) -> AppEngineClient {
        AppEngineClient {
            http,
            endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
        }
    }

    fn app_url(&self, app_id: &str) -> String {
        format!("{}/v1/apps/{}", self.endpoint, app_id)
    }
}

async fn check_status(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(Error::RemoteStatus {
        operation,
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl AppsApi for AppEngineClient {
    async fn get_serving_status(&self, app_id: &str) -> Result<ServingStatus> {
        let token = self.credentials.access_token(&self.http).await?;
        let url = self.app_url(app_id);
        debug!("GET {}", url);

        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let response = check_status(GET_OPERATION, response).await?;
        let app: Application = response.json().await.map_err(|e| Error::InvalidResponse {
            operation: GET_OPERATION,
            reason: e.to_string(),
        })?;

        Ok(app.serving_status.unwrap_or(ServingStatus::Unspecified))
    }

    async fn set_serving_status(&self, app_id: &str, status: ServingStatus) -> Result<()> {
        let token = self.credentials.access_token(&self.http).await?;
        let url = self.app_url(app_id);
        debug!("PATCH {} servingStatus={}", url, status);

        let response = self
            .http
            .patch(&url)
            .query(&[("updateMask", "servingStatus")])
            .bearer_auth(token)
            .json(&ServingStatusPatch {
                serving_status: status,
            })
            .send()
            .await?;
        // The response is a long running operation; it is not awaited.
        check_status(PATCH_OPERATION, response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "apps_tests.rs"]
mod apps_tests;
