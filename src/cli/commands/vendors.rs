//! Vendor probing command.

use anyhow::Context;
use console::style;

use super::super::helpers::render_roster;
use crate::config::Settings;
use crate::repository::{load_vendor_list, Roster};
use crate::services::VendorScan;

/// Cell width used for the table printed after the pass.
const TABLE_CELL_WIDTH: usize = 40;

/// Probe every vendor against every website, saving after each vendor.
pub async fn cmd_vendors(settings: &Settings, verbose: bool, show_table: bool) -> anyhow::Result<()> {
    let vendors = load_vendor_list(&settings.vendors_path)?;
    if vendors.is_empty() {
        println!(
            "{} No vendors in {}",
            style("!").yellow(),
            settings.vendors_path.display()
        );
        return Ok(());
    }

    let path = &settings.roster_path;
    let mut roster = Roster::load(path)
        .with_context(|| format!("Failed to load roster {}", path.display()))?;

    let scan = VendorScan::from_settings(settings, verbose)?;
    let summary = scan.run(&mut roster, &vendors, path).await?;

    if show_table {
        println!("{}", render_roster(&roster, TABLE_CELL_WIDTH));
    }

    println!("\n{}", style("Vendor matches").bold());
    for (vendor, matches) in &summary.vendors {
        println!("  {:<24} {}", vendor, matches);
    }
    println!(
        "{} Checked {} vendors, {} matches -> {}",
        style("✓").green(),
        summary.vendors.len(),
        summary.total_matches(),
        path.display()
    );
    Ok(())
}
