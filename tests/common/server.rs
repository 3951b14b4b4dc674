//! Test server management.
//!
//! Runs an in-process gateway on an ephemeral loopback port.

use ircserv::config::LimitsConfig;
use ircserv::network::Gateway;
use ircserv::state::ServerInfo;
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub const SERVER_NAME: &str = "IRCS";
pub const PASSWORD: &str = "s3cr3t";

/// A test server instance, stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<anyhow::Result<()>>>,
}

impl TestServer {
    /// Spawn a server with default limits.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(LimitsConfig::default()).await
    }

    pub async fn spawn_with(limits: LimitsConfig) -> anyhow::Result<Self> {
        let info = ServerInfo {
            name: SERVER_NAME.to_string(),
            password: PASSWORD.to_string(),
        };
        let gateway = Gateway::bind("127.0.0.1:0".parse()?, info, &limits).await?;
        let addr = gateway.local_addr()?;
        let (shutdown, rx) = broadcast::channel(1);
        let task = tokio::spawn(gateway.run(rx));
        Ok(Self {
            addr,
            shutdown,
            task: Some(task),
        })
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Create a new test client connected to this server.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address(), nick).await
    }

    /// Connect and fully register `nick`, draining the handshake replies.
    pub async fn registered(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect(nick).await?;
        client.register().await?;
        Ok(client)
    }

    /// Signal shutdown and wait for the loop to exit.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        let _ = self.shutdown.send(());
        match self.task.take() {
            Some(task) => task.await?,
            None => Ok(()),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
