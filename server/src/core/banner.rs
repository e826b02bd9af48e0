//! Startup banner

use super::config::AppConfig;
use super::constants::APP_NAME;
use crate::utils::terminal::terminal_link;

/// Host to show in URLs; wildcard binds are displayed as localhost
fn display_host(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    }
}

/// Print the startup banner with URLs
pub fn print_banner(config: &AppConfig) {
    let host = display_host(&config.server.host);
    let base = format!("http://{}:{}", host, config.server.port);

    // Label width, padded for alignment
    const W: usize = 10;

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "API:",
        terminal_link(&format!("{}/api/query", base))
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Docs:",
        terminal_link(&format!("{}/api/docs", base))
    );
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Upstream:", config.upstream.url
    );
    println!(
        "  \x1b[90m➜  {:<W$} {}\x1b[0m",
        "Mode:", config.query.mode
    );
    if matches!(config.server.host.as_str(), "127.0.0.1" | "localhost") {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }
    println!();
}
