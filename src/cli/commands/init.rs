//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::repository::util::redact_url_password;
use crate::repository::{DB_CONNECT_ATTEMPTS, DB_CONNECT_RETRY_DELAY};

/// Initialize the database schema.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context()?;

    println!("{} Connecting to database...", style("→").cyan());
    ctx.wait_until_ready(DB_CONNECT_ATTEMPTS, DB_CONNECT_RETRY_DELAY)
        .await?;

    ctx.init_schema().await?;

    println!(
        "{} Database ready at {}",
        style("✓").green(),
        redact_url_password(&settings.database_url())
    );

    Ok(())
}
