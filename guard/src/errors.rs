// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error decoding base64 message data {0}")]
    Base64Error(#[from] base64::DecodeError),
    #[error("Message data is not valid UTF-8 {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("Error parsing budget notification JSON {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Required configuration `{0}` is not set")]
    MissingConfiguration(String),
    #[error("Configuration `{name}` has an invalid value `{value}`: {reason}")]
    InvalidConfiguration {
        name: String,
        value: String,
        reason: String,
    },
    #[error("HTTP request failed {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote call `{operation}` failed with status {status}: {body}")]
    RemoteStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("Unexpected response from `{operation}`: {reason}")]
    InvalidResponse {
        operation: &'static str,
        reason: String,
    },
}

impl Error {
    /// True when the failure came from the event payload rather than the
    /// environment or a remote call. Re-delivering such an event cannot succeed.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::Base64Error(_) | Error::Utf8Error(_) | Error::JsonError(_)
        )
    }
}
