use nautes_core::{Registry, Table};

/// 対応しているリソース種別を適用順に表示
pub fn handle(registry: &Registry) -> anyhow::Result<()> {
    let table = resource_table(registry);
    let stdout = std::io::stdout();
    table.write(&mut stdout.lock())?;
    Ok(())
}

fn resource_table(registry: &Registry) -> Table {
    let mut rows: Vec<(u32, Vec<String>)> = registry
        .kinds()
        .map(|kind| {
            let descriptor = kind.descriptor();
            let row = vec![
                format!("{}s", descriptor.command_name()),
                descriptor.aliases.join(","),
                descriptor.kind.to_string(),
                descriptor.apply_order.to_string(),
                descriptor.path_template.to_string(),
            ];
            (descriptor.apply_order, row)
        })
        .collect();
    rows.sort_by_key(|(order, _)| *order);

    Table {
        headers: ["NAME", "SHORTNAMES", "KIND", "APPLY ORDER", "PATH"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: rows.into_iter().map(|(_, row)| row).collect(),
    }
}
