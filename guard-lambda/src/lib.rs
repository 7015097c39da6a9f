// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use budget_guard::{check_app, AppEngineClient, AppsApi, BudgetEvent, Config, Outcome};
use lambda_runtime::{Context, Error};
use log::{error, info};
use serde_derive::Serialize;

/// Everything an invocation needs, built once per cold start.
pub struct GuardState {
    pub config: Config,
    pub apps: Box<dyn AppsApi>,
}

impl GuardState {
    pub fn new(config: Config, apps: Box<dyn AppsApi>) -> GuardState {
        GuardState { config, apps }
    }

    pub fn from_env() -> Result<GuardState, Error> {
        let config = Config::from_env()?;
        let apps = AppEngineClient::new(&config)?;
        info!(
            "Budget guard configured for app {} with trigger threshold {}",
            config.app_id(),
            config.trigger_threshold
        );
        Ok(GuardState::new(config, Box::new(apps)))
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerOutput {
    pub message: String,
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub body: String,
}

// Implement Display for the Failure response so that we can then implement Error.
impl std::fmt::Display for FailureResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

impl std::error::Error for FailureResponse {}

fn summary(outcome: &Outcome, app_id: &str) -> String {
    match outcome {
        Outcome::BelowThreshold => "No action necessary".to_string(),
        Outcome::AlreadyDisabled { status } => {
            format!("App '{}' is already disabled ({})", app_id, status)
        }
        Outcome::Disabled { previous } => {
            format!("Disabled app '{}' (was {})", app_id, previous)
        }
    }
}

pub async fn call_budget_guard(
    e: BudgetEvent,
    _c: Context,
    state: &GuardState,
) -> Result<HandlerOutput, Error> {
    let message = e.into_message();
    if let Some(id) = &message.message_id {
        info!("Handling budget notification message [{}]", id);
    }

    let outcome = check_app(&message, &state.config, state.apps.as_ref())
        .await
        .map_err(|err| {
            if err.is_malformed_input() {
                error!("Budget notification could not be decoded: {}", err);
            } else {
                error!(
                    "Failed to check app '{}' against budget: {}",
                    state.config.app_id(),
                    err
                );
            }
            FailureResponse {
                body: err.to_string(),
            }
        })?;

    Ok(HandlerOutput {
        message: summary(&outcome, state.config.app_id()),
        outcome,
    })
}
