// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Budget kill-switch for App Engine.
//!
//! [`handler::check_app`] decodes a Cloud Billing budget notification and, once
//! the alert threshold reaches the configured trigger, switches the application's
//! serving status to `USER_DISABLED` through an [`apps::AppsApi`].

pub mod apps;
pub mod auth;
pub mod config;
mod errors;
pub mod handler;
pub mod notification;
pub mod status;

pub use crate::apps::{AppEngineClient, AppsApi};
pub use crate::config::Config;
pub use crate::errors::Error;
pub use crate::handler::{check_app, check_notification, Outcome};
pub use crate::notification::{BudgetEvent, BudgetNotification, PubSubMessage};
pub use crate::status::ServingStatus;

pub type Result<T> = std::result::Result<T, Error>;
