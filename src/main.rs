use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mbti_convert::{
    serve, Commands, Container, ContainerConfig, DisplayState, FormView, HttpEndpoint, MbtiType,
};

#[derive(Parser)]
#[command(name = "mbti-convert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            port,
            public,
            mock_completion,
        } => {
            let host = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            let container = Arc::new(Container::new(ContainerConfig::from_env(mock_completion)));
            serve(container, SocketAddr::new(host, port)).await?;
        }

        Commands::Convert {
            message,
            mbti_type,
            endpoint,
        } => {
            if MbtiType::from_label(&mbti_type).is_none() {
                info!("{mbti_type} is not one of the 16 MBTI types; sending it as-is");
            }

            let endpoint = HttpEndpoint::new(endpoint);
            let mut view = FormView::new();
            view.set_message(message)?;
            view.select_category(mbti_type)?;

            match view.run(&endpoint).await? {
                DisplayState::Result(text) => println!("{text}"),
                DisplayState::Error(error) => bail!("{error}"),
                DisplayState::Idle | DisplayState::Loading => {
                    bail!("conversion did not complete")
                }
            }
        }
    }

    Ok(())
}
