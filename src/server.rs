#![cfg(feature = "std")]
//! TCP front end: accepts connections, feeds their requests through a
//! shared [`Dispatcher`] and broadcasts every resulting event to everyone.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::config::SessionConfig;
use crate::dispatcher::{ConnectionId, Dispatcher};
use crate::protocol::{Message, ServerEvent};
use crate::session::GameSession;
use crate::transport::frame::{read_frame, write_frame, DEFAULT_MAX_FRAME};

/// Default idle time before a silent connection is closed (5 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Outbound events buffered per connection before it starts lagging.
const BROADCAST_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub idle_timeout: Duration,
    pub max_frame: u32,
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_frame: DEFAULT_MAX_FRAME,
            session: SessionConfig::default(),
        }
    }
}

struct Hub {
    dispatcher: Dispatcher,
    peers: usize,
}

struct Shared {
    hub: Mutex<Hub>,
    events: broadcast::Sender<ServerEvent>,
    next_id: AtomicU64,
    idle_timeout: Duration,
    max_frame: u32,
}

impl Shared {
    /// Publish while the hub lock is held so every client sees one order.
    fn publish(&self, events: Vec<ServerEvent>) {
        for event in events {
            // No subscribers just means nobody is listening right now.
            let _ = self.events.send(event);
        }
    }
}

pub struct Server {
    listener: TcpListener,
    shared: Arc<Shared>,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.bind).await?;
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        let shared = Arc::new(Shared {
            hub: Mutex::new(Hub {
                dispatcher: Dispatcher::new(GameSession::with_config(config.session)),
                peers: 0,
            }),
            events,
            next_id: AtomicU64::new(0),
            idle_timeout: config.idle_timeout,
            max_frame: config.max_frame,
        });
        Ok(Self { listener, shared })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub async fn run(self) -> anyhow::Result<()> {
        info!("listening on {}", self.listener.local_addr()?);
        loop {
            let (stream, addr) = self.listener.accept().await?;
            let id = self.shared.next_id.fetch_add(1, Ordering::SeqCst);
            info!("accepted connection {} from {}", id, addr);
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move {
                handle_connection(shared, id, stream).await;
            });
        }
    }
}

async fn handle_connection(shared: Arc<Shared>, id: ConnectionId, stream: TcpStream) {
    if let Err(e) = stream.set_nodelay(true) {
        warn!("connection {}: {}", id, e);
    }
    let (mut read_half, mut write_half) = stream.into_split();
    let mut rx = shared.events.subscribe();

    {
        let mut hub = shared.hub.lock().await;
        hub.peers += 1;
        let peers = hub.peers;
        let events = hub.dispatcher.connected(id, peers);
        shared.publish(events);
    }

    let max_frame = shared.max_frame;
    let writer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = write_frame(&mut write_half, &Message::Event(event), max_frame).await
                    {
                        warn!("connection {}: {}", id, e);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("connection {} lagged, {} events dropped", id, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    loop {
        let msg = match timeout(shared.idle_timeout, read_frame(&mut read_half, max_frame)).await {
            Err(_) => {
                info!("connection {} idle for {:?}", id, shared.idle_timeout);
                break;
            }
            Ok(Err(e)) => {
                info!("connection {}: {}", id, e);
                break;
            }
            Ok(Ok(msg)) => msg,
        };
        match msg {
            Message::Request(event) => {
                let mut hub = shared.hub.lock().await;
                let events = hub.dispatcher.handle(id, event);
                shared.publish(events);
            }
            Message::Event(_) => {
                warn!("connection {} sent a server event, closing", id);
                break;
            }
        }
    }

    {
        let mut hub = shared.hub.lock().await;
        hub.peers = hub.peers.saturating_sub(1);
        let peers = hub.peers;
        let events = hub.dispatcher.disconnected(id, peers);
        shared.publish(events);
    }
    writer.abort();
}
