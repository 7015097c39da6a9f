// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use budget_guard_lambda::{call_budget_guard, GuardState};
use lambda_runtime::{handler_fn, Error};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> Result<(), Error> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let state = Arc::new(GuardState::from_env()?);
    let func = handler_fn(move |event, context| {
        let state = Arc::clone(&state);
        async move { call_budget_guard(event, context, &state).await }
    });
    lambda_runtime::run(func).await?;
    Ok(())
}
