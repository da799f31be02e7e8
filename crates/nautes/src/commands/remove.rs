use crate::error::CliError;
use colored::Colorize;
use nautes_core::{Dispatcher, Registry};
use std::path::Path;

pub async fn handle(
    registry: &Registry,
    dispatcher: &Dispatcher<'_>,
    file: &Path,
) -> anyhow::Result<()> {
    println!("{}", "リソースを削除中...".yellow());
    println!("APIサーバー: {}", dispatcher.options().server.cyan());

    let documents = super::load_documents(file)?;
    println!("{} 件のリソースが見つかりました", documents.len());
    println!();

    // 依存する側の種別から順に削除する
    let report = dispatcher
        .remove(&documents, &registry.remove_order(), &mut super::print_event)
        .await?;

    println!();
    if !report.is_success() {
        for failure in &report.failures {
            eprintln!(
                "{} {} '{}': {}",
                "✗".red(),
                failure.kind,
                failure.name,
                failure.error
            );
        }
        return Err(CliError::BatchFailed {
            failed: report.failures.len(),
        }
        .into());
    }

    println!(
        "{}",
        format!("✓ {} 件のリソースを削除しました", report.succeeded)
            .green()
            .bold()
    );
    Ok(())
}
