mod cmd;
use clap::{Parser, Subcommand};
use cmd::{name::NameArgs, registrar::RegistrarArgs, set_name::SetNameArgs};
use ens_reverse::{misc::utils::init_logs, models::registrar_error::RegistrarError};
use eyre::Result;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "ens-reverse: ENS reverse registrar CLI

Locate the reverse registrar of a network, read reverse names and set the
reverse name of your account."
)]
pub struct ERArgs {
    #[command(subcommand)]
    pub cmd: ERSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ERSubcommand {
    #[command(about = "Print the reverse registrar address", alias = "r")]
    Registrar(RegistrarArgs),
    #[command(about = "Print the reverse name of an address", alias = "n")]
    Name(NameArgs),
    #[command(about = "Set the reverse name of your account")]
    SetName(SetNameArgs),
}

#[tokio::main]
async fn main() {
    init_logs();
    match execute().await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            if e
                .downcast_ref::<RegistrarError>()
                .is_some_and(RegistrarError::is_connectivity)
            {
                eprintln!("Check --rpc-url or the rpc_url configured for this chain");
            }
            std::process::exit(1);
        }
    }
}

type ER = ERSubcommand;

async fn execute() -> Result<()> {
    let args = ERArgs::parse();

    match args.cmd {
        ER::Registrar(args) => {
            args.run().await?;
        }
        ER::Name(args) => {
            args.run().await?;
        }
        ER::SetName(args) => {
            args.run().await?;
        }
    }

    Ok(())
}
