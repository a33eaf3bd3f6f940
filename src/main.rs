#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_arena::cli::{Cli, Commands};
#[cfg(feature = "std")]
use battleship_arena::{init_logging, Client, Server, TcpTransport};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let server = Server::bind(args.server_config()).await?;
            println!("Serving battleship arena on {}", server.local_addr()?);
            server.run().await?;
        }
        Commands::Watch { connect } => {
            let transport = TcpTransport::with_timeout(
                tokio::net::TcpStream::connect(&connect).await?,
                Duration::from_secs(24 * 60 * 60),
            );
            let mut client = Client::new(transport);
            loop {
                let event = client.next_event().await?;
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }
    Ok(())
}
