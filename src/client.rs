#![cfg(feature = "std")]

use crate::protocol::{ClientEvent, Message, ServerEvent};
use crate::session::Slot;
use crate::ship::Orientation;
use crate::transport::Transport;

/// Client handle: sends requests and reads the broadcast event stream.
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn send(&mut self, event: ClientEvent) -> anyhow::Result<()> {
        self.transport.send(Message::Request(event)).await
    }

    /// Next broadcast event, in server order.
    pub async fn next_event(&mut self) -> anyhow::Result<ServerEvent> {
        match self.transport.recv().await? {
            Message::Event(event) => Ok(event),
            other => Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
        }
    }

    /// Skip events until one matches `pred`.
    pub async fn wait_for<F>(&mut self, mut pred: F) -> anyhow::Result<ServerEvent>
    where
        F: FnMut(&ServerEvent) -> bool + Send,
    {
        loop {
            let event = self.next_event().await?;
            if pred(&event) {
                return Ok(event);
            }
        }
    }

    pub async fn add_player(&mut self) -> anyhow::Result<()> {
        self.send(ClientEvent::AddPlayer).await
    }

    pub async fn start_game(&mut self) -> anyhow::Result<()> {
        self.send(ClientEvent::StartGame).await
    }

    pub async fn place_ship(
        &mut self,
        player_id: Slot,
        ship: &str,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> anyhow::Result<()> {
        self.send(ClientEvent::PlaceShip {
            player_id,
            ship: ship.to_string(),
            x,
            y,
            orientation: orientation.to_string(),
        })
        .await
    }

    pub async fn make_move(&mut self, player_id: Slot, x: usize, y: usize) -> anyhow::Result<()> {
        self.send(ClientEvent::MakeMove { player_id, x, y }).await
    }

    pub async fn leave_game(&mut self, player_id: Slot) -> anyhow::Result<()> {
        self.send(ClientEvent::LeaveGame { player_id }).await
    }
}
