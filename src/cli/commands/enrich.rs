//! Enrichment command.

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::repository::Roster;
use crate::services::Enricher;

/// Enrich the next batch of rows, saving after each.
pub async fn cmd_enrich(settings: &Settings, verbose: bool) -> anyhow::Result<()> {
    let path = &settings.roster_path;
    let mut roster = Roster::load(path)
        .with_context(|| format!("Failed to load roster {}", path.display()))?;

    if roster.is_empty() {
        println!("{} Roster {} has no rows", style("!").yellow(), path.display());
        return Ok(());
    }

    let enricher = Enricher::from_settings(settings, verbose)?;
    let summary = enricher.run(&mut roster, path).await?;

    println!(
        "{} Enriched {} of {} rows -> {}",
        style("✓").green(),
        summary.rows.len(),
        roster.len(),
        path.display()
    );
    Ok(())
}
