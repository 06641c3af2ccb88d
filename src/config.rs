//! Run configuration.
//!
//! Built-in defaults cover the VTM press site. A YAML file can override the
//! request settings and replace the list of sites; command-line flags win
//! over both.
//!
//! ```yaml
//! delay_ms: 1500
//! sites:
//!   - source: vtm
//!     base_url: https://communicatie.vtm.be
//!   - source: vier
//!     base_url: https://pers.vier.be
//!     listing_url: https://pers.vier.be/nieuws
//! ```

use crate::cli::Cli;
use crate::error::Result;
use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::scrapers::profiles::{SiteProfile, vtm};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Pause between consecutive article requests.
    pub delay_ms: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
    pub sites: Vec<SiteProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sites: vec![vtm()],
        }
    }
}

impl Config {
    /// Parse a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).await?;
        let config: Config = serde_yaml::from_str(&raw)?;
        info!(sites = config.sites.len(), "Loaded configuration");
        Ok(config)
    }

    /// File config if one was given, defaults otherwise, then CLI overrides.
    pub async fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(Path::new(path)).await?,
            None => Self::default(),
        };
        if let Some(delay_ms) = cli.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = cli.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        Ok(config)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
