use std::path::PathBuf;

use alloy::{primitives::Address, providers::Provider};
use colored::Colorize;
use ens_reverse::{
    misc::{
        gas_price::parse_gas_price,
        registrar::{build_session, locate_registrar_with, set_name},
        shared_init::{ConnOpts, OutputFormat, init_deps},
    },
    models::credentials::{KeystoreWallet, PrivateKeyWallet, Wallet},
};
use eyre::{Result, bail, eyre};
use serde_json::json;
use tracing::info;

#[derive(Debug, clap::Parser)]
pub struct SetNameArgs {
    #[arg(help = "Name to set for the sending account, e.g. 'alice.eth'")]
    name: String,

    #[arg(long, help = "Account that sends the transaction")]
    account: String,

    #[arg(
        long,
        help = "Encrypted JSON keystore holding the account",
        conflicts_with = "private_key",
        required_unless_present = "private_key"
    )]
    keystore: Option<PathBuf>,

    #[arg(
        long,
        help = "Keystore passphrase",
        env = "ENS_PASSPHRASE",
        hide_env_values = true
    )]
    passphrase: Option<String>,

    #[arg(
        long,
        help = "Raw private key (development chains only)",
        env = "ENS_PRIVATE_KEY",
        hide_env_values = true
    )]
    private_key: Option<String>,

    #[arg(
        long,
        help = "Gas price, e.g. '3gwei' (default: config file, then the node's suggestion)"
    )]
    gas_price: Option<String>,

    #[arg(long, help = "Output format", default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    conn_opts: ConnOpts,
}

impl SetNameArgs {
    pub async fn run(&self) -> Result<()> {
        let account: Address = self
            .account
            .parse()
            .map_err(|_| eyre!("Invalid account address: {}", self.account))?;

        let wallet: Box<dyn Wallet> = match (&self.keystore, &self.private_key) {
            (Some(path), _) => Box::new(KeystoreWallet::new(path)),
            (None, Some(key)) => Box::new(PrivateKeyWallet::new(key)),
            (None, None) => bail!("Either --keystore or --private-key must be specified"),
        };
        let passphrase = match (&self.keystore, &self.passphrase) {
            (Some(_), None) => bail!("--passphrase or ENS_PASSPHRASE is required with --keystore"),
            (_, passphrase) => passphrase.clone().unwrap_or_default(),
        };

        let deps = init_deps(&self.conn_opts)?;
        let registrar = locate_registrar_with(&deps.network, &deps.resolver).await?;
        let chain_id = registrar.chain_id();

        let gas_price = match self.gas_price.as_deref().or_else(|| {
            deps.config
                .get_chain(chain_id)
                .and_then(|chain| chain.gas_price.as_deref())
        }) {
            Some(gas_price) => parse_gas_price(gas_price)?,
            None => deps.network.provider().get_gas_price().await?,
        };

        let session = build_session(
            chain_id,
            wallet.as_ref(),
            account,
            &passphrase,
            registrar,
            gas_price,
        )?;
        info!(%account, name = %self.name, gas_price, "Setting reverse name");
        let tx_hash = set_name(&session, &self.name).await?;

        let text = format!(
            "Submitted setName(\"{}\") from {}\nTransaction: {}",
            self.name,
            account,
            tx_hash.to_string().yellow()
        );
        self.format.print(
            &text,
            json!({
                "chain_id": chain_id,
                "account": account,
                "name": self.name,
                "gas_price": gas_price.to_string(),
                "tx_hash": tx_hash,
            }),
        )
    }
}
