use alloy::primitives::Address;
use colored::Colorize;
use ens_reverse::{
    misc::{
        registrar::{locate_registrar_with, reverse_name},
        shared_init::{ConnOpts, OutputFormat, init_deps},
    },
    models::session::CallOpts,
};
use eyre::{Result, eyre};
use serde_json::json;

#[derive(Debug, clap::Parser)]
pub struct NameArgs {
    #[arg(help = "Address to look up")]
    address: String,

    #[arg(long, help = "Output format", default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    conn_opts: ConnOpts,
}

impl NameArgs {
    pub async fn run(&self) -> Result<()> {
        let address: Address = self
            .address
            .parse()
            .map_err(|_| eyre!("Invalid address format: {}", self.address))?;

        let deps = init_deps(&self.conn_opts)?;
        let registrar = locate_registrar_with(&deps.network, &deps.resolver).await?;
        let name = reverse_name(&registrar, &CallOpts::pending(), address).await?;

        let text = match &name {
            Some(name) => format!("{address} -> {}", format!("<{name}>").yellow()),
            None => format!("{address} has no reverse name"),
        };
        self.format.print(
            &text,
            json!({
                "address": address,
                "name": name,
            }),
        )
    }
}
