// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Serving status of an App Engine application, as reported by the Admin API.
///
/// Values the API may add later are kept verbatim in [`ServingStatus::Other`]
/// so they can be logged and compared without failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServingStatus {
    Unspecified,
    Serving,
    UserDisabled,
    SystemDisabled,
    Other(String),
}

impl ServingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ServingStatus::Unspecified => "UNSPECIFIED",
            ServingStatus::Serving => "SERVING",
            ServingStatus::UserDisabled => "USER_DISABLED",
            ServingStatus::SystemDisabled => "SYSTEM_DISABLED",
            ServingStatus::Other(status) => status,
        }
    }

    pub fn is_serving(&self) -> bool {
        matches!(self, ServingStatus::Serving)
    }
}

impl From<String> for ServingStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "UNSPECIFIED" => ServingStatus::Unspecified,
            "SERVING" => ServingStatus::Serving,
            "USER_DISABLED" => ServingStatus::UserDisabled,
            "SYSTEM_DISABLED" => ServingStatus::SystemDisabled,
            _ => ServingStatus::Other(status),
        }
    }
}

impl From<&str> for ServingStatus {
    fn from(status: &str) -> Self {
        ServingStatus::from(status.to_string())
    }
}

impl From<ServingStatus> for String {
    fn from(status: ServingStatus) -> Self {
        match status {
            ServingStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for ServingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
