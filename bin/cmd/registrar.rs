use colored::Colorize;
use ens_reverse::{
    misc::{
        registrar::locate_registrar_with,
        shared_init::{ConnOpts, OutputFormat, init_deps},
    },
    models::reverse_registrar::ReverseRegistrar,
};
use eyre::Result;
use serde_json::json;

#[derive(Debug, clap::Parser)]
pub struct RegistrarArgs {
    #[arg(long, help = "Output format", default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    conn_opts: ConnOpts,
}

impl RegistrarArgs {
    pub async fn run(&self) -> Result<()> {
        let deps = init_deps(&self.conn_opts)?;
        let registrar = locate_registrar_with(&deps.network, &deps.resolver).await?;

        let text = format!(
            "Reverse registrar: {}\nENS registry:      {}",
            registrar.address().to_string().yellow(),
            registrar.registry()
        );
        let info = json!({
            "reverse_registrar": registrar.address(),
            "registry": registrar.registry(),
        });
        self.format.print(&text, info)
    }
}
