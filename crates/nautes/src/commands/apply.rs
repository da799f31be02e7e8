use colored::Colorize;
use nautes_core::{Dispatcher, Registry};
use std::path::Path;

pub async fn handle(
    registry: &Registry,
    dispatcher: &Dispatcher<'_>,
    file: &Path,
) -> anyhow::Result<()> {
    println!("{}", "リソースを適用中...".yellow());
    println!("APIサーバー: {}", dispatcher.options().server.cyan());

    let documents = super::load_documents(file)?;
    println!("{} 件のリソースが見つかりました", documents.len());
    println!();

    // 依存される側の種別から順に作成する
    let saved = dispatcher
        .apply(&documents, &registry.apply_order(), &mut super::print_event)
        .await?;

    println!();
    println!(
        "{}",
        format!("✓ {} 件のリソースを適用しました", saved).green().bold()
    );
    Ok(())
}
