// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use crate::{Error, Result};

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
const METADATA_FLAVOR: &str = "Metadata-Flavor";

/// Where the bearer token for the Admin API comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Static(String),
    /// Default service account of the runtime, read from the metadata server.
    MetadataServer { host: String },
}

// Tokens stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Static(_) => f.write_str("Static(<redacted>)"),
            Credentials::MetadataServer { host } => f
                .debug_struct("MetadataServer")
                .field("host", host)
                .finish(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl Credentials {
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String> {
        match self {
            Credentials::Static(token) => Ok(token.clone()),
            Credentials::MetadataServer { host } => fetch_metadata_token(http, host).await,
        }
    }
}

async fn fetch_metadata_token(http: &reqwest::Client, host: &str) -> Result<String> {
    let url = format!("http://{}{}", host.trim_end_matches('/'), TOKEN_PATH);
    let response = http
        .get(&url)
        .header(METADATA_FLAVOR, "Google")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::RemoteStatus {
            operation: "metadata.token",
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let token: TokenResponse = response.json().await.map_err(|e| Error::InvalidResponse {
        operation: "metadata.token",
        reason: e.to_string(),
    })?;
    Ok(token.access_token)
}
