//! Errors returned by session operations.

use alloc::string::String;
use core::fmt;

use crate::session::Slot;

/// Why a ship could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Ship name is not part of the catalog.
    UnknownShip(String),
    /// Every ship of this name is already on the board.
    NoneRemaining(String),
    /// Some cell of the ship would fall outside the grid.
    OutOfBounds,
    /// Some cell of the ship is already occupied.
    Overlap,
    /// Orientation text was neither horizontal nor vertical.
    BadOrientation(String),
    /// Automatic placement found no free position for this ship.
    NoRoom(String),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::UnknownShip(name) => write!(f, "unknown ship '{}'", name),
            PlacementError::NoneRemaining(name) => {
                write!(f, "no '{}' left to place", name)
            }
            PlacementError::OutOfBounds => write!(f, "ship does not fit inside the board"),
            PlacementError::Overlap => write!(f, "ship overlaps another ship"),
            PlacementError::BadOrientation(text) => write!(
                f,
                "invalid orientation '{}', expected horizontal or vertical",
                text
            ),
            PlacementError::NoRoom(name) => write!(f, "no room left for '{}'", name),
        }
    }
}

/// Errors returned by [`GameSession`](crate::GameSession) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Two players are already joined.
    Full,
    /// The slot is not joined.
    NotFound(Slot),
    /// The match needs exactly two players.
    NotEnoughPlayers { joined: usize },
    /// The match is already running or finished.
    AlreadyStarted,
    /// Ship placement was rejected.
    InvalidPlacement(PlacementError),
    /// Shot coordinates are off the board.
    InvalidCoordinate { x: usize, y: usize },
}

impl SessionError {
    /// Stable snake_case identifier, used in error notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Full => "full",
            SessionError::NotFound(_) => "not_found",
            SessionError::NotEnoughPlayers { .. } => "not_enough_players",
            SessionError::AlreadyStarted => "already_started",
            SessionError::InvalidPlacement(_) => "invalid_placement",
            SessionError::InvalidCoordinate { .. } => "invalid_coordinate",
        }
    }
}

impl From<PlacementError> for SessionError {
    fn from(err: PlacementError) -> Self {
        SessionError::InvalidPlacement(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Full => write!(f, "Maximum number of players reached"),
            SessionError::NotFound(slot) => {
                write!(f, "Player {} is not in the match", slot)
            }
            SessionError::NotEnoughPlayers { joined } => write!(
                f,
                "Two players are required to start the match ({} joined)",
                joined
            ),
            SessionError::AlreadyStarted => write!(f, "The match has already started"),
            SessionError::InvalidPlacement(reason) => {
                write!(f, "Invalid placement: {}", reason)
            }
            SessionError::InvalidCoordinate { x, y } => {
                write!(f, "Coordinate ({}, {}) is outside the board", x, y)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
