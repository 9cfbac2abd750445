//! Run a page check from the command line.

use console::style;

use super::helpers::truncate;
use crate::checker::PageChecker;
use crate::config::Settings;

/// Fetch a stored URL and record the result.
pub async fn cmd_check(settings: &Settings, id: i32) -> anyhow::Result<()> {
    let ctx = settings.create_db_context()?;
    let url = ctx
        .urls()
        .get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no URL with id {}", id))?;

    println!("{} Checking {}...", style("→").cyan(), url.name);

    let checker = PageChecker::new(settings.fetch_timeout());
    let info = match checker.check(&url.name).await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("{} Check failed: {}", style("✗").red(), e);
            return Err(e.into());
        }
    };

    let check = ctx.checks().save(url.id, &info).await?;

    println!("{} Recorded check {}", style("✓").green(), check.id);
    println!("  Status: {}", info.status_code);
    if !info.title.is_empty() {
        println!("  Title: {}", info.title);
    }
    if !info.h1.is_empty() {
        println!("  H1: {}", info.h1);
    }
    if !info.description.is_empty() {
        println!("  Description: {}", truncate(&info.description, 70));
    }
    Ok(())
}
