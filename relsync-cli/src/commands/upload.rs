//! `relsync upload`: delete masked assets, then upload local files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use relsync_core::{
    inputs::{parse_bool, split_multiline},
    UploadOutcome,
};
use relsync_sync::{files::resolve_files, pipeline, PatternSet, SyncReport, SyncRequest};

use super::target::{non_empty, TargetArgs};

/// Arguments for `relsync upload`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Files or glob patterns to upload; each value may hold several lines.
    #[arg(env = "RELSYNC_FILES", value_name = "FILES")]
    pub files: Vec<String>,

    /// Wildcard mask (`*`, `?`) of existing assets to delete before uploading.
    #[arg(long = "delete", env = "RELSYNC_DELETE", value_name = "MASK")]
    pub delete: Vec<String>,

    /// Replace an asset that already has the uploaded name [default: true].
    #[arg(long, env = "RELSYNC_OVERWRITE", value_name = "BOOL")]
    pub overwrite: Option<String>,

    /// File the `assets=<json>` output line is appended to.
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Also print a table of the uploaded assets to stderr.
    #[arg(long)]
    pub table: bool,
}

impl UploadArgs {
    pub fn run(self) -> Result<()> {
        let prepared = self.target.prepare()?;

        let cwd = std::env::current_dir().context("could not determine current directory")?;
        let files = resolve_files(&split_multiline(&self.files), &cwd)?;
        let delete_patterns = PatternSet::compile(&split_multiline(&self.delete))?;
        let overwrite = match non_empty(&self.overwrite) {
            Some(value) => parse_bool("overwrite", value)?,
            None => true,
        };

        let request = SyncRequest {
            target: prepared.target()?,
            files,
            delete_patterns,
            overwrite,
        };
        let report = pipeline::run(&prepared.client, &request)?;

        let json = serde_json::to_string(&report.uploaded).context("failed to encode results")?;
        println!("{json}");
        if let Some(path) = self.output_file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            write_output(path, &json)?;
        }

        if self.table {
            print_table(&request, &report);
        }
        eprintln!(
            "{} {} uploaded, {} deleted",
            "✓".green(),
            report.uploaded.len(),
            report.deleted.len()
        );
        Ok(())
    }
}

/// Append `assets=<json>` to the runner's output file.
fn write_output(path: &Path, json: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;
    writeln!(file, "assets={json}")
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}

#[derive(Tabled)]
struct UploadRow {
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "asset id")]
    id: String,
    #[tabled(rename = "url")]
    url: String,
}

fn print_table(request: &SyncRequest, report: &SyncReport) {
    let rows = request
        .files
        .iter()
        .zip(&report.uploaded)
        .map(|(file, UploadOutcome { id, url })| UploadRow {
            file: file.asset_name.clone(),
            id: id.to_string(),
            url: url.clone(),
        });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    eprintln!("{table}");
}
