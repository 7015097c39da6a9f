// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use log::{info, warn};
use serde::Serialize;

use crate::apps::AppsApi;
use crate::config::Config;
use crate::notification::{BudgetNotification, PubSubMessage};
use crate::status::ServingStatus;
use crate::Result;

/// What a single invocation did.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Alert threshold below the trigger; no remote calls were made.
    BelowThreshold,
    AlreadyDisabled { status: ServingStatus },
    Disabled { previous: ServingStatus },
}

/// Checks a budget notification and disables the App Engine application once
/// the alert threshold reaches `config.trigger_threshold`.
///
/// Decoding failures and remote call failures are returned as is; the caller's
/// platform owns redelivery.
pub async fn check_app<A>(message: &PubSubMessage, config: &Config, apps: &A) -> Result<Outcome>
where
    A: AppsApi + ?Sized,
{
    let notification = BudgetNotification::decode(message)?;
    check_notification(&notification, config, apps).await
}

pub async fn check_notification<A>(
    notification: &BudgetNotification,
    config: &Config,
    apps: &A,
) -> Result<Outcome>
where
    A: AppsApi + ?Sized,
{
    let currency = notification.currency();

    if notification.alert_threshold_exceeded < config.trigger_threshold {
        info!(
            "No action necessary at {} for {}. Current Cost: {} {} Budget Amount: {} {}",
            notification.alert_threshold_exceeded,
            notification.budget_display_name,
            notification.cost_amount,
            currency,
            notification.budget_amount,
            currency
        );
        return Ok(Outcome::BelowThreshold);
    }

    let app_id = config.app_id();
    let current = apps.get_serving_status(app_id).await?;
    info!("Current servingStatus of {}: {}", app_id, current);

    if !current.is_serving() {
        info!(
            "Budget threshold exceeded, but {} is already disabled ({}). Budget Alert: {}",
            app_id, current, notification.budget_display_name
        );
        return Ok(Outcome::AlreadyDisabled { status: current });
    }

    warn!(
        "Budget threshold exceeded, disabling app {}. Budget Alert: {} Budget Threshold: {} Budget Amount: {} {} Current Cost: {} {}",
        app_id,
        notification.budget_display_name,
        notification.alert_threshold_exceeded,
        notification.budget_amount,
        currency,
        notification.cost_amount,
        currency
    );
    apps.set_serving_status(app_id, ServingStatus::UserDisabled).await?;

    Ok(Outcome::Disabled { previous: current })
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod handler_tests;
