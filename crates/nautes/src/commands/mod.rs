pub mod api_resources;
pub mod apply;
pub mod delete;
pub mod get;
pub mod remove;

use crate::error::CliError;
use colored::Colorize;
use nautes_config::Settings;
use nautes_core::{Event, Registry, ResourceDocument, ResourceKind};
use std::path::Path;

/// マニフェストファイルを読み込み、ドキュメントに分割
pub fn load_documents(file: &Path) -> anyhow::Result<Vec<ResourceDocument>> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        anyhow::anyhow!("マニフェストを読み込めません: {}: {}", file.display(), e)
    })?;
    let documents = nautes_core::parse_documents(&content)?;
    tracing::debug!(file = %file.display(), documents = documents.len(), "manifest loaded");
    Ok(documents)
}

/// コマンド名からリソース種別を解決
pub fn resolve_kind<'r>(registry: &'r Registry, name: &str) -> anyhow::Result<&'r dyn ResourceKind> {
    registry
        .resolve(name)
        .map_err(|_| CliError::UnknownKind(name.to_string()).into())
}

/// プロダクト配下の種別ならプロダクト名を要求
pub fn scope_for<'s>(kind: &dyn ResourceKind, settings: &'s Settings) -> anyhow::Result<Option<&'s str>> {
    if kind.descriptor().scope_field.is_none() {
        return Ok(None);
    }
    Ok(Some(settings.require_product()?))
}

/// 進捗イベントを表示
pub fn print_event(event: Event) {
    match event {
        Event::Saved { kind, name } => {
            println!("  {} {} '{}' を保存しました", "✓".green(), kind, name.cyan());
        }
        Event::Removed { kind, name } => {
            println!("  {} {} '{}' を削除しました", "✓".green(), kind, name.cyan());
        }
        Event::Cancelled { name, .. } => {
            println!("  {} '{}' の削除をキャンセルしました", "ℹ".blue(), name);
        }
        Event::Failed {
            kind,
            name,
            message,
        } => {
            println!(
                "  {} {} '{}' の処理に失敗しました: {}",
                "⚠".yellow(),
                kind,
                name,
                message
            );
        }
        Event::SkippedKind { kind, count } => {
            println!(
                "  {} 未対応の種別 '{}' のドキュメント {} 件をスキップしました",
                "ℹ".blue(),
                kind,
                count
            );
        }
    }
}
