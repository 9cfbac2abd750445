//! Web server command.

use console::style;

use crate::config::Settings;
use crate::repository::{DB_CONNECT_ATTEMPTS, DB_CONNECT_RETRY_DELAY};

/// Port used when the bind address does not name one.
const DEFAULT_PORT: u16 = 3000;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);

    println!("{} Preparing database...", style("→").cyan());
    let ctx = settings.create_db_context()?;
    ctx.wait_until_ready(DB_CONNECT_ATTEMPTS, DB_CONNECT_RETRY_DELAY)
        .await?;
    match ctx.init_schema().await {
        Ok(()) => {
            println!("  {} Database ready", style("✓").green());
        }
        Err(e) => {
            eprintln!("  {} Schema setup failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("database initialization failed: {}", e));
        }
    }

    println!(
        "{} Starting server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Split a bind address into host and port.
///
/// Accepts a bare port (`8080`), a bare host (`0.0.0.0`), or `host:port`.
/// Bare ports bind loopback; bare hosts get [`DEFAULT_PORT`].
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    match bind.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (bind.to_string(), DEFAULT_PORT),
        },
        None => (bind.to_string(), DEFAULT_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(parse_bind_address("8080"), ("127.0.0.1".to_string(), 8080));
        assert_eq!(
            parse_bind_address("0.0.0.0"),
            ("0.0.0.0".to_string(), DEFAULT_PORT)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:8080"),
            ("0.0.0.0".to_string(), 8080)
        );
        assert_eq!(
            parse_bind_address("localhost:3000"),
            ("localhost".to_string(), 3000)
        );
    }
}
