//! Command execution context
//!
//! Loads configuration and wires the HTTP client, cookie jar, link store
//! and notification sink into a [`Locator`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::client::ContentClient;
use crate::config::Config;
use crate::cookie::CookieJar;
use crate::error::Result;
use crate::notify::ConsoleSink;
use crate::pipeline::Locator;
use crate::store::SqliteLinkStore;

/// Context for command execution containing config, locator, and runtime options.
pub struct CommandContext {
    pub config: Config,
    pub locator: Locator,
    pub format: OutputFormat,
    /// Backing file of the link store
    pub store_path: PathBuf,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Arguments
    /// * `format` - Output format (pretty/json)
    /// * `config_path` - Optional path to config file (defaults to ~/.editlink/config.yaml)
    ///
    /// # Errors
    /// Returns error if config is invalid or the link store cannot be opened.
    pub fn new(format: OutputFormat, config_path: Option<&str>) -> Result<Self> {
        let config = Config::load_at(config_path)?;

        let store = match &config.store_path {
            Some(dir) => SqliteLinkStore::open_at(dir)?,
            None => SqliteLinkStore::open()?,
        };
        let store_path = store.path().to_path_buf();

        let cookies = Arc::new(CookieJar::new());
        let client = ContentClient::new(&config, cookies.clone())?;

        let locator = Locator::new(
            &config,
            Arc::new(client),
            cookies,
            Arc::new(store),
            Arc::new(ConsoleSink),
        );

        Ok(Self {
            config,
            locator,
            format,
            store_path,
        })
    }
}
