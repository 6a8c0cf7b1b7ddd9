//! `relsync list`: print the assets attached to a release.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use relsync_sync::lister::list_assets;

use super::target::TargetArgs;

/// Arguments for `relsync list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print a table instead of JSON.
    #[arg(long)]
    pub table: bool,
}

#[derive(Serialize, Tabled)]
struct AssetRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "name")]
    name: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let prepared = self.target.prepare()?;
        let target = prepared.target()?;

        let rows = list_assets(&prepared.client, &target)
            .map(|asset| {
                asset.map(|a| AssetRow {
                    id: a.id.0,
                    name: a.name,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to list assets of {target}"))?;

        if self.table {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&rows).context("failed to encode assets")?;
        println!("{json}");
        Ok(())
    }
}
