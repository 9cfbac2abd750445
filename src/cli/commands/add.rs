//! Add a URL from the command line.

use console::style;

use crate::config::Settings;
use crate::urls::{self, ValidationIssue};

/// Normalize, validate and store a URL.
pub async fn cmd_add(settings: &Settings, raw: &str) -> anyhow::Result<()> {
    let normalized = urls::normalize(raw);
    let issues = if raw.trim().is_empty() {
        vec![ValidationIssue::Required]
    } else {
        urls::validate(&normalized)
    };
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("{} {}", style("✗").red(), issue.message());
        }
        anyhow::bail!("invalid URL: {}", raw);
    }

    let ctx = settings.create_db_context()?;
    let (id, created) = ctx.urls().insert_or_get(&normalized).await?;
    if created {
        println!("{} Added {} with id {}", style("✓").green(), normalized, id);
    } else {
        println!(
            "{} {} already tracked with id {}",
            style("!").yellow(),
            normalized,
            id
        );
    }
    Ok(())
}
