//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(ctx: &CommandContext, config_path: Option<&str>) -> Result<()> {
    let path = Config::resolve_path(config_path)?;
    let links = ctx.locator.stored_links()?;
    let config = &ctx.config;

    if ctx.format == OutputFormat::Json {
        let json = serde_json::json!({
            "config_path": path.display().to_string(),
            "config_found": path.exists(),
            "api_host": config.api_host,
            "session_cookie": config.session_cookie.is_some(),
            "store_path": ctx.store_path.display().to_string(),
            "stored_links": links,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}\n", "Editlink Status".bold());

    if path.exists() {
        println!("Config file: {}", path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            path.display().to_string().cyan(),
            "(not found, using defaults)".dimmed()
        );
    }
    println!();

    if config.session_cookie.is_some() {
        println!("{} Session cookie configured", "✓".green());
    } else {
        println!("{} No session cookie configured", "○".dimmed());
    }

    if let Some(ref host) = config.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    println!(
        "{} Link store: {} ({} links)",
        "✓".green(),
        ctx.store_path.display(),
        links
    );
    println!();

    Ok(())
}
