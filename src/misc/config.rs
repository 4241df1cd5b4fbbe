use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::{misc::shared_init::config_path, models::registry::EnsRegistryResolver};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Keyed by chain id.
    #[serde(default)]
    pub chains: HashMap<String, ChainConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainConfig {
    pub rpc_url: Option<String>,
    /// ENS registry deployment, when the chain does not use the canonical one.
    pub registry: Option<Address>,
    /// Default gas price, e.g. "3gwei".
    pub gas_price: Option<String>,
}

impl Config {
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(config_path()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Creates an empty config file, and its directory, unless one exists.
    pub fn init_if_missing() -> Result<()> {
        Self::init_if_missing_at(&Self::config_file_path()?)
    }

    pub fn init_if_missing_at(path: &Path) -> Result<()> {
        if !path.exists() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, "")?;
        }
        Ok(())
    }

    pub fn get_chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.get(&chain_id.to_string())
    }

    pub fn registry_resolver(&self) -> EnsRegistryResolver {
        self.chains
            .iter()
            .filter_map(|(chain_id, chain)| Some((chain_id.parse::<u64>().ok()?, chain.registry?)))
            .fold(EnsRegistryResolver::default(), |resolver, (chain_id, registry)| {
                resolver.with_override(chain_id, registry)
            })
    }
}
