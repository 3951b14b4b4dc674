//! Gateway - TCP listener and the single event loop.
//!
//! Every accepted socket gets two small tasks: a reader that forwards raw
//! reads to the loop, and a writer that drains the connection's outgoing
//! queue. All protocol state lives in the [`Server`] owned by the loop.

use crate::config::LimitsConfig;
use crate::network::{QueueTransport, Server};
use crate::state::ServerInfo;
use bytes::Bytes;
use futures_util::SinkExt;
use ircserv_proto::{ConnectionId, LineCodec, ReadEvent};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc};
use tokio_util::codec::FramedWrite;
use tracing::{debug, error, info, instrument, warn};

/// Capacity of the reader-to-loop event queue.
const EVENT_CHANNEL_SIZE: usize = 1024;

/// What woke the event loop.
enum Wake {
    Shutdown,
    Accepted(std::io::Result<(TcpStream, SocketAddr)>),
    Read(ConnectionId, ReadEvent),
}

/// The Gateway accepts TCP connections and runs the server loop.
pub struct Gateway {
    listener: TcpListener,
    server: Server,
    transport: QueueTransport,
    read_chunk: usize,
    send_queue: usize,
}

impl Gateway {
    /// Bind the listener. Port 0 picks a free port.
    pub async fn bind(
        addr: SocketAddr,
        server_info: ServerInfo,
        limits: &LimitsConfig,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, server = %server_info.name, "listener bound");

        Ok(Self {
            listener,
            server: Server::new(server_info, limits.max_pending_bytes),
            transport: QueueTransport::default(),
            read_chunk: limits.read_chunk,
            send_queue: limits.send_queue,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run until a shutdown signal arrives.
    #[instrument(skip_all, name = "gateway")]
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let (events_tx, mut events_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

        loop {
            let wake = tokio::select! {
                biased;
                _ = shutdown.recv() => Wake::Shutdown,
                accepted = self.listener.accept() => Wake::Accepted(accepted),
                Some((id, event)) = events_rx.recv() => Wake::Read(id, event),
            };

            match wake {
                Wake::Shutdown => {
                    info!(clients = self.transport.len(), "shutdown signal received");
                    self.transport.close_all();
                    return Ok(());
                }
                Wake::Accepted(Ok((stream, addr))) => self.admit(stream, addr, &events_tx),
                Wake::Accepted(Err(e)) => error!(error = %e, "failed to accept connection"),
                Wake::Read(id, event) => self.server.on_read(id, event, &mut self.transport),
            }
        }
    }

    fn admit(
        &mut self,
        stream: TcpStream,
        addr: SocketAddr,
        events: &mpsc::Sender<(ConnectionId, ReadEvent)>,
    ) {
        if let Err(e) = stream.set_nodelay(true) {
            debug!(%addr, error = %e, "set_nodelay failed");
        }
        let id = self.server.accept();
        let (reader, writer) = stream.into_split();
        let (outgoing_tx, outgoing_rx) = mpsc::channel(self.send_queue);

        let read_task = tokio::spawn(read_loop(id, reader, self.read_chunk, events.clone()));
        let write_task = tokio::spawn(write_loop(id, writer, outgoing_rx));
        self.transport.register(
            id,
            outgoing_tx,
            read_task.abort_handle(),
            write_task.abort_handle(),
        );

        info!(conn = id, %addr, "connection accepted");
    }
}

/// Forward raw reads to the event loop until EOF or error.
async fn read_loop(
    id: ConnectionId,
    mut reader: OwnedReadHalf,
    chunk: usize,
    events: mpsc::Sender<(ConnectionId, ReadEvent)>,
) {
    let mut buf = vec![0u8; chunk];
    loop {
        let event = match reader.read(&mut buf).await {
            Ok(0) => ReadEvent::Closed,
            Ok(n) => ReadEvent::Data(Bytes::copy_from_slice(&buf[..n])),
            Err(e) => ReadEvent::Failed(e),
        };
        let last = !matches!(event, ReadEvent::Data(_));
        if events.send((id, event)).await.is_err() || last {
            break;
        }
    }
}

/// Write queued lines until the queue closes, then shut the socket down.
async fn write_loop(id: ConnectionId, writer: OwnedWriteHalf, mut outgoing: mpsc::Receiver<String>) {
    let mut sink = FramedWrite::new(writer, LineCodec::new());
    while let Some(line) = outgoing.recv().await {
        if let Err(e) = sink.send(line).await {
            warn!(conn = id, error = %e, "write failed");
            break;
        }
    }
    if let Err(e) = sink.get_mut().shutdown().await {
        debug!(conn = id, error = %e, "socket shutdown failed");
    }
    debug!(conn = id, "writer finished");
}
