//! The authoritative state machine for one two-player match.
//!
//! A [`GameSession`] is created once and reset in place: whenever a player
//! leaves, or a move is attempted after the match was decided, every board,
//! ship list and turn marker is rebuilt from the session's configuration.
//! The session never blocks and never logs; each operation returns a value
//! the caller is expected to forward to the players.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::board::{Board, BoardView, Shot};
use crate::config::{SessionConfig, MAX_PLAYERS};
use crate::error::SessionError;
use crate::ship::Orientation;

/// Identity of a joined player: 0 or 1.
pub type Slot = u8;

/// Coarse lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Finished(Slot),
}

/// What a move attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// The match has not started; nothing changed.
    NotStarted,
    /// The previous match was already decided; the session was reset.
    Restarted { previous_winner: Slot },
    /// Fewer than two players remained; the session was reset.
    InsufficientPlayers,
    /// Somebody else has the turn; nothing changed.
    NotYourTurn { current: Slot },
    Miss { x: usize, y: usize },
    Hit { x: usize, y: usize },
    /// Deciding hit: the opponent has no ship cells left.
    Win { x: usize, y: usize, winner: Slot },
}

/// Result of [`GameSession::make_move`], carrying both full boards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    /// Slot that attempted the move.
    pub slot: Slot,
    pub kind: MoveKind,
    pub message: String,
    pub boards: [BoardView; 2],
}

impl MoveOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self.kind, MoveKind::Hit { .. } | MoveKind::Win { .. })
    }

    pub fn winner(&self) -> Option<Slot> {
        match self.kind {
            MoveKind::Win { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// Target of the shot, if one was fired.
    pub fn coordinate(&self) -> Option<(usize, usize)> {
        match self.kind {
            MoveKind::Miss { x, y } | MoveKind::Hit { x, y } | MoveKind::Win { x, y, .. } => {
                Some((x, y))
            }
            _ => None,
        }
    }
}

/// Result of a successful [`GameSession::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined {
    pub slot: Slot,
    pub message: String,
    /// Set when this join filled the session and triggered the match start.
    pub started: Option<Result<String, SessionError>>,
}

/// Comparable snapshot of everything observable about a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub players: Vec<Slot>,
    pub current_turn: Slot,
    pub started: bool,
    pub winner: Option<Slot>,
    pub boards: [BoardView; 2],
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    boards: [Board; 2],
    players: Vec<Slot>,
    current_turn: Slot,
    started: bool,
    winner: Option<Slot>,
}

impl GameSession {
    /// Session with the standard catalog that starts automatically.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let boards = [Board::new(&config.catalog), Board::new(&config.catalog)];
        Self {
            config,
            boards,
            players: Vec::new(),
            current_turn: 0,
            started: false,
            winner: None,
        }
    }

    /// Joined slots in admission order.
    pub fn players(&self) -> &[Slot] {
        &self.players
    }

    pub fn current_turn(&self) -> Slot {
        self.current_turn
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn winner(&self) -> Option<Slot> {
        self.winner
    }

    /// Board owned by `slot`.
    pub fn board(&self, slot: Slot) -> Option<&Board> {
        self.boards.get(slot as usize)
    }

    pub fn status(&self) -> SessionStatus {
        match (self.winner, self.started) {
            (Some(winner), _) => SessionStatus::Finished(winner),
            (None, true) => SessionStatus::InProgress,
            (None, false) => SessionStatus::NotStarted,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            players: self.players.clone(),
            current_turn: self.current_turn,
            started: self.started,
            winner: self.winner,
            boards: self.views(),
        }
    }

    /// Admit a player into the lowest free slot.
    pub fn join(&mut self) -> Result<Joined, SessionError> {
        let slot = (0..MAX_PLAYERS as Slot)
            .find(|s| !self.players.contains(s))
            .ok_or(SessionError::Full)?;
        self.players.push(slot);
        let started = if self.players.len() == MAX_PLAYERS && self.config.auto_start {
            Some(self.start_match())
        } else {
            None
        };
        Ok(Joined {
            slot,
            message: format!("Player {} joined", slot + 1),
            started,
        })
    }

    /// Remove `slot` and reset the whole session.
    pub fn leave(&mut self, slot: Slot) -> Result<String, SessionError> {
        if !self.players.contains(&slot) {
            return Err(SessionError::NotFound(slot));
        }
        self.players.retain(|s| *s != slot);
        self.reset();
        Ok(format!(
            "Player {} left the match and the game was reset",
            slot + 1
        ))
    }

    /// Place every ship still waiting in the inventory and open the match.
    ///
    /// Nothing is committed unless both boards could be completed.
    pub fn start_match(&mut self) -> Result<String, SessionError> {
        if self.started || self.winner.is_some() {
            return Err(SessionError::AlreadyStarted);
        }
        if self.players.len() != MAX_PLAYERS {
            return Err(SessionError::NotEnoughPlayers {
                joined: self.players.len(),
            });
        }
        let mut boards = self.boards.clone();
        for board in boards.iter_mut() {
            board.place_remaining()?;
        }
        self.boards = boards;
        self.started = true;
        self.current_turn = 0;
        Ok("The match has started".to_string())
    }

    /// Manually place one catalog ship on the board of `slot` before the
    /// match starts.
    pub fn place_ship(
        &mut self,
        slot: Slot,
        ship_name: &str,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<String, SessionError> {
        if self.started || self.winner.is_some() {
            return Err(SessionError::AlreadyStarted);
        }
        if !self.players.contains(&slot) {
            return Err(SessionError::NotFound(slot));
        }
        let ship = self.boards[slot as usize].place(ship_name, x, y, orientation)?;
        Ok(format!(
            "Player {} placed {} at ({}, {}) {}",
            slot + 1,
            ship.name(),
            x,
            y,
            ship.orientation()
        ))
    }

    /// Fire at (x, y) on the opponent's board on behalf of `slot`.
    pub fn make_move(&mut self, slot: Slot, x: usize, y: usize) -> Result<MoveOutcome, SessionError> {
        if let Some(previous_winner) = self.winner {
            self.reset();
            let message = format!(
                "The match is over! Player {} won. The game has been reset.",
                previous_winner + 1
            );
            return Ok(self.outcome(slot, MoveKind::Restarted { previous_winner }, message));
        }
        if !self.started {
            let message = "The match has not started yet. Waiting for players.".to_string();
            return Ok(self.outcome(slot, MoveKind::NotStarted, message));
        }
        if self.players.len() < MAX_PLAYERS {
            self.reset();
            let message =
                "Not enough players to make a move. The game has been reset.".to_string();
            return Ok(self.outcome(slot, MoveKind::InsufficientPlayers, message));
        }
        if slot != self.current_turn {
            let current = self.current_turn;
            let message = format!("It is player {}'s turn.", current + 1);
            return Ok(self.outcome(slot, MoveKind::NotYourTurn { current }, message));
        }

        let shooter = self.current_turn;
        let opponent = 1 - shooter;
        let target = &mut self.boards[opponent as usize];
        let shot = target
            .fire(x, y)
            .ok_or(SessionError::InvalidCoordinate { x, y })?;
        let (kind, message) = match shot {
            Shot::Hit if target.all_sunk() => {
                self.winner = Some(shooter);
                self.started = false;
                (
                    MoveKind::Win {
                        x,
                        y,
                        winner: shooter,
                    },
                    format!("Player {} hit and won the match!", shooter + 1),
                )
            }
            Shot::Hit => (MoveKind::Hit { x, y }, format!("Player {} hit!", shooter + 1)),
            Shot::Miss => (
                MoveKind::Miss { x, y },
                format!("Player {} missed!", shooter + 1),
            ),
        };
        if self.winner.is_none() {
            self.current_turn = opponent;
        }
        Ok(self.outcome(slot, kind, message))
    }

    fn reset(&mut self) {
        *self = Self::with_config(self.config.clone());
    }

    fn views(&self) -> [BoardView; 2] {
        [self.boards[0].view(), self.boards[1].view()]
    }

    fn outcome(&self, slot: Slot, kind: MoveKind, message: String) -> MoveOutcome {
        MoveOutcome {
            slot,
            kind,
            message,
            boards: self.views(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
