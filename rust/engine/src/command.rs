// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command entry point: checks the view, resolves the configuration and
//! runs the orchestrator, mapping everything to a command result.

use exterior_dims_config::{select_default, ConfigurationStore, ExteriorConfiguration};

use crate::error::Result;
use crate::host::{DimensionHandle, DimensionHost, Notice, PlanView};
use crate::orchestrator::{ExteriorDimensions, RunOutcome};
use crate::settings::PipelineSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Succeeded { created: Vec<DimensionHandle> },
    Cancelled,
    Failed(String),
}

impl CommandResult {
    fn nothing_done() -> Self {
        CommandResult::Succeeded {
            created: Vec::new(),
        }
    }
}

/// Runs the command with the configuration chosen by the user settings.
/// Unexpected errors are shown through the host and end as `Failed`.
pub fn execute<H: DimensionHost>(
    host: &mut H,
    configurations: &[ExteriorConfiguration],
    settings: &PipelineSettings,
) -> CommandResult {
    match try_execute(host, configurations, settings) {
        Ok(result) => result,
        Err(error) => fail(host, error.to_string()),
    }
}

/// Same as [`execute`], loading the configurations from `store` first.
pub fn execute_from_store<H: DimensionHost>(
    host: &mut H,
    store: &ConfigurationStore,
    settings: &PipelineSettings,
) -> CommandResult {
    match try_execute_from_store(host, store, settings) {
        Ok(result) => result,
        Err(error) => fail(host, error.to_string()),
    }
}

fn try_execute_from_store<H: DimensionHost>(
    host: &mut H,
    store: &ConfigurationStore,
    settings: &PipelineSettings,
) -> Result<CommandResult> {
    let configurations = store.load()?;
    try_execute(host, &configurations, settings)
}

fn fail<H: DimensionHost>(host: &mut H, message: String) -> CommandResult {
    tracing::error!(error = %message, "exterior dimensions failed");
    host.notify(&Notice::Unexpected(message.clone()));
    CommandResult::Failed(message)
}

fn try_execute<H: DimensionHost>(
    host: &mut H,
    configurations: &[ExteriorConfiguration],
    settings: &PipelineSettings,
) -> Result<CommandResult> {
    let view = host.active_view();
    if !view.is_plan {
        host.notify(&Notice::NotPlanView);
        return Ok(CommandResult::nothing_done());
    }

    let Some(configuration) = select_default(configurations, settings.user.default_configuration)
    else {
        host.notify(&Notice::NoConfiguration);
        return Ok(CommandResult::nothing_done());
    };
    tracing::debug!(name = %configuration.name, id = %configuration.id, "using configuration");

    let plan = PlanView::from_view(&view)?;
    let result = match ExteriorDimensions::new(configuration, settings).run(host, &plan) {
        RunOutcome::Completed { created } => CommandResult::Succeeded { created },
        RunOutcome::Cancelled => CommandResult::Cancelled,
        RunOutcome::Aborted(_) => CommandResult::nothing_done(),
    };
    Ok(result)
}
