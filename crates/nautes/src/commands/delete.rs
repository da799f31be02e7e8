use crate::error::CliError;
use crate::prompt::StdinConfirm;
use colored::Colorize;
use nautes_config::Settings;
use nautes_core::{Dispatcher, Registry};

pub async fn handle(
    registry: &Registry,
    dispatcher: &Dispatcher<'_>,
    settings: &Settings,
    kind_name: &str,
    names: &[String],
    yes: bool,
) -> anyhow::Result<()> {
    let kind = super::resolve_kind(registry, kind_name)?;
    let scope = super::scope_for(kind, settings)?;

    let mut confirm = StdinConfirm::stdin();
    let report = dispatcher
        .delete_by_name(
            kind,
            names,
            scope,
            yes,
            &mut confirm,
            &mut super::print_event,
        )
        .await?;

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("{} '{}': {}", "✗".red(), failure.name, failure.error);
        }
        return Err(CliError::BatchFailed {
            failed: report.failures.len(),
        }
        .into());
    }
    Ok(())
}
