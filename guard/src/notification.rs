// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A single Pub/Sub message as delivered to a background function.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubSubMessage {
    /// Base64 encoded payload.
    pub data: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    #[serde(default, alias = "message_id", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Inbound event. Accepts either the bare message or the push subscription
/// envelope that wraps it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetEvent {
    Push {
        message: PubSubMessage,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subscription: Option<String>,
    },
    Message(PubSubMessage),
}

impl BudgetEvent {
    pub fn message(&self) -> &PubSubMessage {
        match self {
            BudgetEvent::Push { message, .. } => message,
            BudgetEvent::Message(message) => message,
        }
    }

    pub fn into_message(self) -> PubSubMessage {
        match self {
            BudgetEvent::Push { message, .. } => message,
            BudgetEvent::Message(message) => message,
        }
    }
}

impl From<PubSubMessage> for BudgetEvent {
    fn from(message: PubSubMessage) -> Self {
        BudgetEvent::Message(message)
    }
}

/// Budget notification published by Cloud Billing.
///
/// The four amounts the kill-switch acts on are required; a payload without any
/// of them fails to parse. The remaining fields are informational.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetNotification {
    pub cost_amount: f64,
    pub budget_amount: f64,
    pub budget_display_name: String,
    pub alert_threshold_exceeded: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_interval_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_amount_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_threshold_exceeded: Option<f64>,
}

impl BudgetNotification {
    pub fn from_json(json: &str) -> Result<BudgetNotification> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes the base64 data of `message` and parses it as a notification.
    pub fn decode(message: &PubSubMessage) -> Result<BudgetNotification> {
        let bytes = BASE64.decode(message.data.trim())?;
        let json = String::from_utf8(bytes)?;
        BudgetNotification::from_json(&json)
    }

    /// Currency suffix for log lines, empty when the notification has none.
    pub(crate) fn currency(&self) -> &str {
        self.currency_code.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod notification_tests;
