//! The `generate` command.
//!
//! Loads the configuration and the item snapshot, runs one pipeline per
//! enabled item kind and writes the resulting [`GenerationReport`] to stdout
//! or to `--output`.
//!
//! ```bash
//! autotier generate --snapshot items.json
//! autotier generate --snapshot items.json --format json --output layout.json
//! autotier generate --snapshot items.json --mode tag --kind weapons
//! ```

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::cli::{CliConfig, OutputFormat};
use crate::pipeline::{GenerationReport, ItemKind, TierlistLayout, generate_all};
use crate::snapshot::ItemSnapshot;

/// Grouping mode override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupingMode {
    /// Align crafting chains in columns
    Chain,
    /// Group by configured tag descriptors
    Tag,
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Item snapshot (JSON) to lay out
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Override the configured grouping mode
    #[arg(long, value_enum)]
    mode: Option<GroupingMode>,

    /// Only generate this item kind
    #[arg(long, value_enum)]
    kind: Option<ItemKind>,
}

impl GenerateCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let (config, _) = cli.load_tierlist_config().await?.sanitized();
        let snapshot = ItemSnapshot::load(&self.snapshot).await?;

        let kinds = self.kind.map_or_else(|| ItemKind::ALL.to_vec(), |kind| vec![kind]);
        let progression = self.mode.map(|mode| mode == GroupingMode::Chain);
        let report = generate_all(&config, &snapshot, &kinds, progression);

        let rendered = match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            }
            OutputFormat::Text => render_text(&report),
        };

        match &self.output {
            Some(path) => {
                fs::write(path, rendered)
                    .await
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                info!("Wrote {} tierlist(s) to {}", report.layouts.len(), path.display());
            }
            None => println!("{rendered}"),
        }

        if report.has_failures() {
            let kinds: Vec<String> =
                report.failures.iter().map(|failure| failure.kind.to_string()).collect();
            bail!("Tierlist generation failed for: {}", kinds.join(", "));
        }
        Ok(())
    }
}

fn render_text(report: &GenerationReport) -> String {
    let mut out = String::new();

    for layout in &report.layouts {
        render_layout(&mut out, layout);
    }
    for skip in &report.skipped {
        let _ = writeln!(out, "{} {}: {}", "⚠".yellow(), skip.kind, skip.reason);
    }
    for failure in &report.failures {
        let _ = writeln!(out, "{} {}: {}", "✗".red(), failure.kind, failure.error);
    }

    out.trim_end().to_string()
}

fn render_layout(out: &mut String, layout: &TierlistLayout) {
    let mode = if layout.progression {
        "chain"
    } else {
        "tag"
    };
    let _ = writeln!(
        out,
        "{} {} ({}, {} mode, {} items)",
        "✓".green(),
        layout.chapter_title.bold(),
        layout.chapter_id,
        mode,
        layout.items.len()
    );

    for marker in &layout.tier_markers {
        let _ = writeln!(out, "  {}", marker.label.cyan());
        for item in layout.items.iter().filter(|item| item.tier == marker.tier) {
            let tag = item.tag_label.as_deref().map(|label| format!(" [{label}]")).unwrap_or_default();
            let _ = writeln!(
                out,
                "    col {:>3}  {:<40} {:>7.2}{}",
                item.column,
                item.id.as_str(),
                item.score,
                tag.dimmed()
            );
        }
    }

    if !layout.edges.is_empty() {
        let _ = writeln!(out, "  {} dependency edges", layout.edges.len());
    }
    for skipped in &layout.skipped_edges {
        let cycle: Vec<&str> = skipped.cycle.iter().map(|id| id.as_str()).collect();
        let _ = writeln!(out, "  {} skipped cycle: {}", "⚠".yellow(), cycle.join(" -> "));
    }
    let _ = writeln!(out, "  fingerprint {}", layout.fingerprint.dimmed());
    out.push('\n');
}
