//! List tracked URLs.

use console::style;

use super::helpers::truncate;
use crate::config::Settings;

/// Print every tracked URL with its latest check.
pub async fn cmd_list(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context()?;
    let rows = ctx.urls().list_all().await?;

    if rows.is_empty() {
        println!(
            "{} No URLs tracked yet. Add one with 'pagecheck add <url>'.",
            style("!").yellow()
        );
        return Ok(());
    }

    println!("{}", style("Tracked URLs").bold());
    println!("{}", "-".repeat(78));
    println!("{:<5} {:<40} {:<8} Last check", "ID", "Name", "Status");
    println!("{}", "-".repeat(78));
    for row in &rows {
        let status = row
            .last_status_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let checked = row
            .last_check_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<5} {:<40} {:<8} {}",
            row.id,
            truncate(&row.name, 40),
            status,
            checked
        );
    }
    Ok(())
}
