use std::collections::BTreeMap;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use crate::conversion::RateTable;
use crate::schemas::Currency;

pub const DEFAULT_CONFIG_FILE: &str = "tripsplit.toml";

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub log: LogSettings,
    pub rates: RateSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allow_any_origin: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RateSettings {
    pub base: Currency,
    #[serde(default)]
    pub table: BTreeMap<Currency, f64>,
}

impl RateSettings {
    pub fn rate_table(&self) -> Result<RateTable> {
        RateTable::new(self.base.clone(), self.table.clone()).context("invalid rate table")
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.allow_any_origin", false)?
        .set_default("log.filter", "info")?
        .set_default("rates.base", "USD")?)
}

impl Settings {
    // Defaults, then the optional TOML file, then TRIPSPLIT__* variables
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_FILE);
        defaults()?
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("TRIPSPLIT").separator("__"))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .with_context(|| format!("failed to parse configuration from {path}"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("failed to parse configuration")
    }
}
