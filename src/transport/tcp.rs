use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::{PeerClosed, Transport};

/// Default timeout for network operations (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum frame size (1 MB); a full leaderboard is far smaller.
pub const MAX_MESSAGE_SIZE: u32 = 1_000_000;

/// Length-prefixed bincode frames over a TCP stream.
///
/// Each frame is a 4-byte big-endian length followed by that many bytes of
/// bincode-encoded [`Message`].
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Self::connect_with_timeout(addr, DEFAULT_TIMEOUT).await
    }

    pub async fn connect_with_timeout<A: ToSocketAddrs>(
        addr: A,
        timeout_duration: Duration,
    ) -> anyhow::Result<Self> {
        let stream = timeout(timeout_duration, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", timeout_duration))??;
        Ok(Self::with_timeout(stream, timeout_duration))
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::ConnectionReset
    {
        PeerClosed.into()
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::ConnectionReset => PeerClosed.into(),
        _ => anyhow::anyhow!("Read error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let send_op = async {
            let data = bincode::serialize(&msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
            if data.len() as u64 > self.max_message_size as u64 {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    data.len(),
                    self.max_message_size
                ));
            }
            let len = (data.len() as u32).to_be_bytes();
            self.stream.write_all(&len).await.map_err(write_error)?;
            self.stream.write_all(&data).await.map_err(write_error)?;
            anyhow::Ok(())
        };

        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            self.stream.read_exact(&mut len_buf).await.map_err(read_error)?;
            let len = u32::from_be_bytes(len_buf);

            if len > self.max_message_size {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    self.max_message_size
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            self.stream.read_exact(&mut buf).await.map_err(read_error)?;
            let msg = bincode::deserialize(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };

        timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))?
    }
}
