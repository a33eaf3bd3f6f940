#![cfg(feature = "std")]
//! Events exchanged between connected clients and the server.

use serde::{Deserialize, Serialize};

use crate::session::{MoveOutcome, Slot};

/// Current protocol version. Increment on breaking changes to [`Message`].
pub const PROTOCOL_VERSION: u32 = 1;

/// Requests a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientEvent {
    AddPlayer,
    StartGame,
    PlaceShip {
        player_id: Slot,
        ship: String,
        x: usize,
        y: usize,
        /// `horizontal` or `vertical`; parsed by the server.
        orientation: String,
    },
    MakeMove {
        player_id: Slot,
        x: usize,
        y: usize,
    },
    LeaveGame {
        player_id: Slot,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Notifications broadcast to every connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerEvent {
    Connection {
        status: ConnectionStatus,
        /// Connections open after this change.
        peers: usize,
        protocol: u32,
    },
    PlayerAdded {
        message: String,
        player_id: Slot,
    },
    GameStarted {
        message: String,
    },
    ShipPlaced {
        player_id: Slot,
        ship: String,
        message: String,
    },
    MoveResult(MoveOutcome),
    GameOver {
        winner: Slot,
    },
    PlayerLeft {
        message: String,
    },
    GameReset {
        message: String,
    },
    Error {
        kind: String,
        message: String,
    },
}

/// Unit of transmission on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Client to server.
    Request(ClientEvent),
    /// Server to client.
    Event(ServerEvent),
}
