#![cfg(feature = "std")]
//! Command-line surface of the `battleship-arena` binary.

use clap::{Args, Parser, Subcommand};
use tokio::time::Duration;

use crate::config::SessionConfig;
use crate::server::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "battleship-arena", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Host the match and broadcast its events to every connection.
    Serve(ServeArgs),
    /// Connect to a server and print every broadcast event as a JSON line.
    Watch {
        #[arg(long, default_value = "127.0.0.1:5000")]
        connect: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: String,
    #[arg(long, default_value_t = 300, help = "Close connections idle this long")]
    pub idle_timeout_secs: u64,
    #[arg(long, default_value_t = 64 * 1024)]
    pub max_frame_bytes: u32,
    #[arg(long, help = "Wait for StartGame instead of starting on the second join")]
    pub manual_start: bool,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        let session = if self.manual_start {
            SessionConfig::manual_start()
        } else {
            SessionConfig::default()
        };
        ServerConfig {
            bind: self.bind.clone(),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            max_frame: self.max_frame_bytes,
            session,
        }
    }
}
