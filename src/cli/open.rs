//! Open and forget commands for stored tab links

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;

/// Print the stored link for a tab
pub fn open(ctx: &CommandContext, tab_id: u64) -> Result<()> {
    let link = ctx.locator.open_link(tab_id)?;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "tab_id": tab_id, "link": link });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty => match link {
            Some(link) => println!("{}", link),
            None => println!("{} No link stored for tab {}", "○".dimmed(), tab_id),
        },
    }

    Ok(())
}

/// Drop the stored link for a tab
pub fn forget(ctx: &CommandContext, tab_id: u64) -> Result<()> {
    let removed = ctx.locator.forget_tab(tab_id)?;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "tab_id": tab_id, "removed": removed });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty => {
            if removed {
                println!("{} Forgot link for tab {}", "✓".green(), tab_id);
            } else {
                println!("{} No link stored for tab {}", "○".dimmed(), tab_id);
            }
        }
    }

    Ok(())
}
