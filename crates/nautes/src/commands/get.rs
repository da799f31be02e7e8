use nautes_config::Settings;
use nautes_core::{Dispatcher, OutputFormat, Registry};

pub async fn handle(
    registry: &Registry,
    dispatcher: &Dispatcher<'_>,
    settings: &Settings,
    kind_name: &str,
    names: &[String],
    output: &str,
) -> anyhow::Result<()> {
    // リクエスト前に出力形式を検証する
    let format: OutputFormat = output.parse()?;
    let kind = super::resolve_kind(registry, kind_name)?;
    let scope = super::scope_for(kind, settings)?;

    let listing = dispatcher.get(kind, names, scope).await?;

    let stdout = std::io::stdout();
    listing.write(format, &kind.fields(), &mut stdout.lock())?;
    Ok(())
}
