#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod config;
mod error;
mod session;
mod ship;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod dispatcher;
#[cfg(feature = "std")]
pub mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use config::*;
pub use error::*;
pub use session::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use client::Client;
#[cfg(feature = "std")]
pub use dispatcher::{ConnectionId, Dispatcher};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use protocol::*;
#[cfg(feature = "std")]
pub use server::{Server, ServerConfig};
#[cfg(feature = "std")]
pub use transport::tcp::TcpTransport;
