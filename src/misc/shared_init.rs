use std::{path::PathBuf, sync::Arc};

use alloy::{providers::ProviderBuilder, rpc::client::RpcClient};
use eyre::{Result, bail, eyre};
use tracing::debug;
use url::Url;

use super::config::Config;
use crate::{
    GenericProvider,
    models::{network::AlloyNetwork, registry::EnsRegistryResolver},
};

pub type SharedNetwork = AlloyNetwork<Arc<GenericProvider>>;

pub struct SharedDeps {
    pub network: SharedNetwork,
    pub resolver: EnsRegistryResolver,
    pub config: Config,
}

pub fn init_deps(conn_opts: &ConnOpts) -> Result<SharedDeps> {
    if conn_opts.rpc_url.is_none() && conn_opts.chain_id.is_none() {
        bail!("Either --rpc-url or --chain-id must be specified")
    }
    Config::init_if_missing()?;
    let config = Config::load()?;

    let rpc_url = match (&conn_opts.rpc_url, conn_opts.chain_id) {
        (Some(url), None) => url.clone(),
        (None, Some(chain_id)) => config
            .get_chain(chain_id)
            .and_then(|chain| chain.rpc_url.clone())
            .ok_or_else(|| {
                eyre!(
                    "No rpc_url configured for chain ID {} in {}",
                    chain_id,
                    Config::config_file_path()
                        .map(|path| path.display().to_string())
                        .unwrap_or_default()
                )
            })?,
        _ => {
            bail!("Either --rpc-url or --chain-id must be specified")
        }
    };

    debug!(%rpc_url, "Connecting");
    let provider = Arc::new(init_provider(&rpc_url)?);
    let resolver = config.registry_resolver();

    Ok(SharedDeps {
        network: AlloyNetwork::new(provider),
        resolver,
        config,
    })
}

/// HTTP provider without a retry layer: a node that does not answer is
/// reported as unreachable instead of being polled again.
pub fn init_provider(rpc_url: &str) -> Result<GenericProvider> {
    let url: Url = rpc_url
        .parse()
        .map_err(|e| eyre!("Invalid RPC URL '{}': {}", rpc_url, e))?;

    debug!("Initializing HTTP provider");
    let client = RpcClient::builder().http(url);

    Ok(ProviderBuilder::new().connect_client(client))
}

pub fn config_path() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".ens-reverse"))
        .ok_or_else(|| eyre!("Cannot determine home directory"))
}

#[derive(Clone, Debug, clap::Parser)]
pub struct ConnOpts {
    #[arg(
        long,
        help = "The URL of the HTTP provider",
        env = "ETH_RPC_URL",
        conflicts_with = "chain_id"
    )]
    pub rpc_url: Option<String>,

    #[arg(
        long,
        help = "Chain ID to select the RPC URL from the config file",
        conflicts_with = "rpc_url"
    )]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn print(&self, text: &str, json: serde_json::Value) -> Result<()> {
        match self {
            Self::Text => println!("{text}"),
            Self::Json => println!("{}", serde_json::to_string(&json)?),
            Self::JsonPretty => println!("{}", serde_json::to_string_pretty(&json)?),
        }
        Ok(())
    }
}
