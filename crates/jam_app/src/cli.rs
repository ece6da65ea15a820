use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jam_core::ViewLocation;
use jam_engine::{ApiSettings, DEFAULT_BASE_URL};

/// Terminal client for browsing collections and copying companies between them.
#[derive(Debug, Parser)]
#[command(name = "jam_app", version, about)]
pub struct Cli {
    /// Base URL of the collections API.
    #[arg(long, env = "JAM_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Location to open, e.g. `jam://collections?collection=<id>` or a web link.
    #[arg(long, conflicts_with = "collection")]
    pub location: Option<String>,

    /// Collection to open.
    #[arg(long)]
    pub collection: Option<String>,

    /// Seconds between refetches of the visible page.
    #[arg(long, env = "JAM_POLL_SECS", default_value_t = 5)]
    pub poll_secs: u64,

    /// File holding the last location between runs.
    #[arg(long, env = "JAM_STATE_FILE", default_value = ".jam_state.ron")]
    pub state_file: PathBuf,

    /// Log file used by the interactive UI.
    #[arg(long, env = "JAM_LOG_FILE", default_value = "jam.log")]
    pub log_file: PathBuf,

    #[arg(long, env = "JAM_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every collection as `<id>\t<name>`.
    Collections,
    /// Print a batch of companies.
    Companies {
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// Copy companies from one collection into another.
    Copy {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        /// Company ids to copy; omit to copy the whole source collection.
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
    },
}

impl Cli {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_url.clone(),
            ..ApiSettings::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs.max(1))
    }

    /// Location given on the command line, if any.
    pub fn explicit_location(&self) -> Result<Option<ViewLocation>> {
        if let Some(raw) = &self.location {
            let location = ViewLocation::parse(raw)
                .with_context(|| format!("invalid location {raw:?}"))?;
            return Ok(Some(location));
        }
        Ok(self.collection.as_deref().map(ViewLocation::for_collection))
    }
}
