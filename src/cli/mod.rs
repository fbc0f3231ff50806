//! CLI command definitions and handlers

use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
pub use clap_complete::Shell;

pub mod completions;
pub mod context;
pub mod lookup;
pub mod open;
pub mod status;

pub use context::CommandContext;

/// Editlink - find the editor page for the content a browser tab shows
#[derive(Parser, Debug)]
#[command(name = "editlink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "EDITLINK_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "EDITLINK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "EDITLINK_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the editable entry behind one or more tabs
    Lookup {
        /// Tabs as `[TAB_ID=]URL`; tabs without an id are numbered by position
        #[arg(required = true, value_name = "TAB")]
        tabs: Vec<TabArg>,
    },

    /// Print the stored deep link for a tab
    Open {
        #[arg(long)]
        tab_id: u64,
    },

    /// Drop the stored deep link for a tab
    Forget {
        #[arg(long)]
        tab_id: u64,
    },

    /// Show configuration and link store status
    Status,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// A tab given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabArg {
    pub tab_id: Option<u64>,
    pub url: String,
}

impl FromStr for TabArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("tab URL must not be empty".to_string());
        }
        if let Some((id, url)) = s.split_once('=')
            && let Ok(tab_id) = id.parse::<u64>()
        {
            if url.is_empty() {
                return Err(format!("tab {} has no URL", tab_id));
            }
            return Ok(Self {
                tab_id: Some(tab_id),
                url: url.to_string(),
            });
        }
        Ok(Self {
            tab_id: None,
            url: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_arg_with_id() {
        let arg: TabArg = "7=https://www.siteA.com/foo".parse().unwrap();
        assert_eq!(arg.tab_id, Some(7));
        assert_eq!(arg.url, "https://www.siteA.com/foo");
    }

    #[test]
    fn test_tab_arg_without_id() {
        let arg: TabArg = "https://www.siteA.com/foo?a=1".parse().unwrap();
        assert_eq!(arg.tab_id, None);
        assert_eq!(arg.url, "https://www.siteA.com/foo?a=1");
    }

    #[test]
    fn test_tab_arg_rejects_missing_url() {
        assert!("3=".parse::<TabArg>().is_err());
        assert!("".parse::<TabArg>().is_err());
    }

    #[test]
    fn test_cli_parses_lookup() {
        let cli = Cli::parse_from(["editlink", "lookup", "1=https://a.com/x", "https://b.com/y"]);
        match cli.command {
            Commands::Lookup { tabs } => assert_eq!(tabs.len(), 2),
            _ => panic!("Expected lookup command"),
        }
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
