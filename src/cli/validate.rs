//! The `validate` command.
//!
//! Checks a configuration against an item snapshot without generating
//! anything:
//!
//! - out-of-range layout values (warning, clamped at generation time)
//! - malformed tier overrides (error)
//! - overrides naming items absent from the snapshot (error, with a
//!   closest-match suggestion)
//! - manual or skipped items absent from the snapshot (warning)
//! - tag groups that match no item (warning)
//! - enabled kinds that select no items (warning)
//!
//! Exits with status 1 when any error is found, or any warning in `--strict`
//! mode.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use strsim::levenshtein;

use crate::cli::{CliConfig, OutputFormat};
use crate::config::{ItemFilter, TierlistConfig, parse_override};
use crate::core::{AutotierError, ItemId};
use crate::pipeline::{ItemKind, KindProfile};
use crate::snapshot::ItemSnapshot;

/// Maximum edit distance for a suggestion, as a percentage of the id length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Item snapshot (JSON) to validate against
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

/// Findings of a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResults {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidateCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = cli.load_tierlist_config().await?;
        let snapshot = ItemSnapshot::load(&self.snapshot).await?;

        let mut results = validate_config(config, &snapshot);
        if self.strict && !results.warnings.is_empty() {
            results.valid = false;
        }

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&results)
                    .context("Failed to serialize validation results")?;
                println!("{json}");
            }
            OutputFormat::Text => print_text(&results),
        }

        if results.valid {
            Ok(())
        } else {
            Err(AutotierError::ConfigError {
                message: format!(
                    "Validation failed: {} error(s), {} warning(s)",
                    results.errors.len(),
                    results.warnings.len()
                ),
            }
            .into())
        }
    }
}

/// Validate `config` against the items of `snapshot`.
pub fn validate_config(config: TierlistConfig, snapshot: &ItemSnapshot) -> ValidationResults {
    let mut results = ValidationResults::default();
    let known: Vec<&str> = snapshot.item_ids().map(ItemId::as_str).collect();

    let (config, issues) = config.sanitized();
    results.warnings.extend(issues.iter().map(ToString::to_string));

    for kind in ItemKind::ALL {
        let settings = kind.settings(&config);

        for entry in &settings.tier_overrides {
            match parse_override(entry) {
                Ok((id, _)) if !snapshot.contains(&id) => {
                    results.errors.push(unknown_item(
                        &format!("Override '{entry}' in [{kind}] names an unknown item"),
                        &id,
                        &known,
                    ));
                }
                Ok(_) => {}
                Err(e) => results.errors.push(e.to_string()),
            }
        }

        for raw in &settings.items {
            match ItemId::parse(raw) {
                Ok(id) if !snapshot.contains(&id) => results.warnings.push(unknown_item(
                    &format!("Item '{raw}' in [{kind}] is not in the snapshot"),
                    &id,
                    &known,
                )),
                Ok(_) => {}
                Err(e) => results.errors.push(e.to_string()),
            }
        }

        if kind.is_enabled(&config) {
            let profile = KindProfile::for_kind(kind, &config.layout);
            let filter = ItemFilter::new(
                settings,
                &config.filter,
                config.generation.use_attribute_detection,
                profile.score.detection_attribute(),
            );
            if filter.apply(&snapshot.items).is_empty() {
                results.warnings.push(format!("No {kind} selected from the snapshot"));
            }
        }
    }

    for raw in &config.filter.skipped_items {
        match ItemId::parse(raw) {
            Ok(id) if !snapshot.contains(&id) => results.warnings.push(unknown_item(
                &format!("Skipped item '{raw}' is not in the snapshot"),
                &id,
                &known,
            )),
            Ok(_) => {}
            Err(e) => results.errors.push(e.to_string()),
        }
    }

    for descriptor in &config.tag_groups {
        if !snapshot.items.iter().any(|item| descriptor.matches(item)) {
            results.warnings.push(format!("Tag group '{}' matches no item", descriptor.label));
        }
    }

    if config.generation.enable_progression_alignment && snapshot.recipes.is_none() {
        results.warnings.push(
            "Snapshot has no recipes; progression alignment will fall back to tag groups"
                .to_string(),
        );
    }

    results.valid = results.errors.is_empty();
    results
}

fn unknown_item(message: &str, id: &ItemId, known: &[&str]) -> String {
    match closest_match(id.as_str(), known) {
        Some(candidate) => format!("{message} (did you mean '{candidate}'?)"),
        None => message.to_string(),
    }
}

/// Closest known id within the similarity threshold.
fn closest_match<'a>(target: &str, known: &[&'a str]) -> Option<&'a str> {
    let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    known
        .iter()
        .map(|candidate| (levenshtein(target, candidate), *candidate))
        .filter(|(distance, _)| *distance <= limit)
        .min()
        .map(|(_, candidate)| candidate)
}

fn print_text(results: &ValidationResults) {
    for error in &results.errors {
        println!("{} {}", "✗".red(), error);
    }
    for warning in &results.warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }
    if results.valid {
        println!("{} Configuration is valid", "✓".green());
    }
}
