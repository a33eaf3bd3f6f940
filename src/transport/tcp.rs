use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::frame::{read_frame, write_frame, DEFAULT_MAX_FRAME};
use crate::transport::Transport;

/// Default timeout for network operations (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client side of a TCP connection to the arena server.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_frame: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, DEFAULT_MAX_FRAME)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, timeout_duration, DEFAULT_MAX_FRAME)
    }

    pub fn with_config(stream: TcpStream, timeout_duration: Duration, max_frame: u32) -> Self {
        Self {
            stream,
            timeout_duration,
            max_frame,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        timeout(
            self.timeout_duration,
            write_frame(&mut self.stream, &msg, self.max_frame),
        )
        .await
        .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        timeout(
            self.timeout_duration,
            read_frame(&mut self.stream, self.max_frame),
        )
        .await
        .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))?
    }
}
