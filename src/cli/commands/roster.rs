//! Read-only roster commands.

use anyhow::Context;
use console::style;

use super::super::helpers::{render_roster, truncate};
use crate::config::Settings;
use crate::repository::Roster;
use crate::services::select_rows;

fn load(settings: &Settings) -> anyhow::Result<Roster> {
    let path = &settings.roster_path;
    Roster::load(path).with_context(|| format!("Failed to load roster {}", path.display()))
}

/// List the rows the next enrichment run would pick.
pub fn cmd_select(settings: &Settings) -> anyhow::Result<()> {
    let roster = load(settings)?;
    let selected = select_rows(&roster, settings.batch_size);

    println!(
        "\n{}",
        style(format!(
            "Next batch: {} of {} rows",
            selected.len(),
            roster.len()
        ))
        .bold()
    );
    println!("{}", "-".repeat(60));

    for index in selected {
        let Some(univ) = roster.get(index) else {
            continue;
        };
        let last = univ
            .scraped_at
            .as_deref()
            .map(|s| style(s.to_string()).dim().to_string())
            .unwrap_or_else(|| style("never").yellow().to_string());
        println!(
            "{:>5}  {:<40}  {}",
            index,
            truncate(univ.name.as_deref().unwrap_or(""), 40),
            last
        );
    }
    Ok(())
}

/// Print the roster as a table.
pub fn cmd_show(settings: &Settings, max_width: usize) -> anyhow::Result<()> {
    let roster = load(settings)?;
    println!("{}", render_roster(&roster, max_width));
    Ok(())
}
