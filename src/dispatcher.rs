#![cfg(feature = "std")]
//! Maps inbound client events onto [`GameSession`] operations and turns the
//! results into the events broadcast to every connected client.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::error::SessionError;
use crate::protocol::{ClientEvent, ConnectionStatus, ServerEvent, PROTOCOL_VERSION};
use crate::session::{GameSession, MoveKind, Slot};
use crate::ship::Orientation;

/// Server-assigned identifier of a client connection.
pub type ConnectionId = u64;

const RESET_MESSAGE: &str = "The game has been reset!";

pub struct Dispatcher {
    session: GameSession,
    /// Which connection joined each slot during the current round.
    owners: BTreeMap<Slot, ConnectionId>,
}

impl Dispatcher {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            owners: BTreeMap::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Slot joined by `conn` in the current round, if any.
    pub fn owned_slot(&self, conn: ConnectionId) -> Option<Slot> {
        self.owners
            .iter()
            .find(|(_, owner)| **owner == conn)
            .map(|(slot, _)| *slot)
    }

    /// Handle one client event, returning the events to broadcast.
    pub fn handle(&mut self, conn: ConnectionId, event: ClientEvent) -> Vec<ServerEvent> {
        debug!("connection {} sent {:?}", conn, event);
        let result = match event {
            ClientEvent::AddPlayer => self.add_player(conn),
            ClientEvent::StartGame => self
                .session
                .start_match()
                .map(|message| vec![ServerEvent::GameStarted { message }]),
            ClientEvent::PlaceShip {
                player_id,
                ship,
                x,
                y,
                orientation,
            } => orientation
                .parse::<Orientation>()
                .map_err(SessionError::from)
                .and_then(|orientation| {
                    self.session
                        .place_ship(player_id, &ship, x, y, orientation)
                })
                .map(|message| {
                    vec![ServerEvent::ShipPlaced {
                        player_id,
                        ship,
                        message,
                    }]
                }),
            ClientEvent::MakeMove { player_id, x, y } => self.make_move(player_id, x, y),
            ClientEvent::LeaveGame { player_id } => self.leave(player_id),
        };
        match result {
            Ok(events) => events,
            Err(e) => {
                warn!("connection {}: {}", conn, e);
                vec![error_event(&e)]
            }
        }
    }

    pub fn connected(&mut self, conn: ConnectionId, peers: usize) -> Vec<ServerEvent> {
        info!("connection {} opened ({} connected)", conn, peers);
        vec![ServerEvent::Connection {
            status: ConnectionStatus::Connected,
            peers,
            protocol: PROTOCOL_VERSION,
        }]
    }

    /// A connection went away. A player who joined through it in the current
    /// round leaves the match, which resets the session.
    pub fn disconnected(&mut self, conn: ConnectionId, peers: usize) -> Vec<ServerEvent> {
        info!("connection {} closed ({} connected)", conn, peers);
        let mut events = vec![ServerEvent::Connection {
            status: ConnectionStatus::Disconnected,
            peers,
            protocol: PROTOCOL_VERSION,
        }];
        if let Some(slot) = self.owned_slot(conn) {
            match self.leave(slot) {
                Ok(left) => events.extend(left),
                Err(e) => warn!("connection {} held slot {}: {}", conn, slot, e),
            }
        }
        events
    }

    fn add_player(&mut self, conn: ConnectionId) -> Result<Vec<ServerEvent>, SessionError> {
        let joined = self.session.join()?;
        info!("connection {} joined as player {}", conn, joined.slot);
        self.owners.insert(joined.slot, conn);
        let mut events = vec![ServerEvent::PlayerAdded {
            message: joined.message,
            player_id: joined.slot,
        }];
        match joined.started {
            Some(Ok(message)) => {
                info!("match started");
                events.push(ServerEvent::GameStarted { message });
            }
            Some(Err(e)) => {
                warn!("automatic start failed: {}", e);
                events.push(error_event(&e));
            }
            None => {}
        }
        Ok(events)
    }

    fn make_move(
        &mut self,
        player_id: Slot,
        x: usize,
        y: usize,
    ) -> Result<Vec<ServerEvent>, SessionError> {
        let outcome = self.session.make_move(player_id, x, y)?;
        if let Some((x, y)) = outcome.coordinate() {
            debug!(
                "player {} fired at ({}, {}):\n{}",
                player_id,
                x,
                y,
                outcome.boards[1 - player_id as usize]
            );
        }
        if matches!(
            outcome.kind,
            MoveKind::Restarted { .. } | MoveKind::InsufficientPlayers
        ) {
            info!("session reset after finished match");
            self.owners.clear();
        }
        let winner = outcome.winner();
        let mut events = vec![ServerEvent::MoveResult(outcome)];
        if let Some(winner) = winner {
            info!("player {} won the match", winner);
            events.push(ServerEvent::GameOver { winner });
        }
        Ok(events)
    }

    fn leave(&mut self, player_id: Slot) -> Result<Vec<ServerEvent>, SessionError> {
        let message = self.session.leave(player_id)?;
        info!("player {} left, session reset", player_id);
        self.owners.clear();
        Ok(vec![
            ServerEvent::PlayerLeft { message },
            ServerEvent::GameReset {
                message: RESET_MESSAGE.to_string(),
            },
        ])
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(GameSession::new())
    }
}

fn error_event(err: &SessionError) -> ServerEvent {
    ServerEvent::Error {
        kind: err.kind().to_string(),
        message: err.to_string(),
    }
}
