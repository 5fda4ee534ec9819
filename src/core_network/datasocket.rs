use std::net::IpAddr;
use std::sync::Arc;

use rand::Rng;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::constants::{ACCEPT_POLL_INTERVAL_MS, ACCEPT_POLL_RETRIES, PASSIVE_BIND_RETRIES};
use crate::core_network::error::DataSocketError;
use crate::logger::FtpLogger;

/// The data channel for one transfer: either an outbound connection to the
/// address the client named (active mode), or an inbound listener the client
/// dials (passive mode). Single-use; the session drops it after every
/// RETR/STOR/LIST/NLST.
pub enum DataSocket {
    Active(ActiveSocket),
    Passive(PassiveSocket),
}

impl DataSocket {
    pub async fn active(
        host: &str,
        port: u16,
        logger: Option<Arc<dyn FtpLogger>>,
    ) -> Result<Self, DataSocketError> {
        Ok(DataSocket::Active(ActiveSocket::open(host, port, logger).await?))
    }

    pub async fn passive(
        listen_ip: IpAddr,
        min_port: u16,
        max_port: u16,
        logger: Option<Arc<dyn FtpLogger>>,
    ) -> Result<Self, DataSocketError> {
        Ok(DataSocket::Passive(
            PassiveSocket::open(listen_ip, min_port, max_port, logger).await?,
        ))
    }

    /// The address a PASV/EPSV/PORT reply should quote: the listener's side
    /// for passive sockets, the dialled peer's for active ones.
    pub fn host(&self) -> String {
        match self {
            DataSocket::Active(socket) => socket.host.clone(),
            DataSocket::Passive(socket) => socket.listen_ip.to_string(),
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            DataSocket::Active(socket) => socket.port,
            DataSocket::Passive(socket) => socket.port,
        }
    }

    /// The underlying stream, once usable. For a passive socket this waits
    /// (bounded) for the client to connect.
    pub async fn stream(&mut self) -> Result<&mut TcpStream, DataSocketError> {
        match self {
            DataSocket::Active(socket) => socket.conn.as_mut().ok_or(DataSocketError::Unavailable),
            DataSocket::Passive(socket) => socket.stream().await,
        }
    }

    pub async fn close(&mut self) {
        match self {
            DataSocket::Active(socket) => {
                if let Some(mut conn) = socket.conn.take() {
                    let _ = conn.shutdown().await;
                }
            }
            DataSocket::Passive(socket) => socket.close().await,
        }
    }
}

/// Active mode: the server dials the `(host, port)` the client supplied via
/// PORT or EPRT.
pub struct ActiveSocket {
    conn: Option<TcpStream>,
    host: String,
    port: u16,
}

impl ActiveSocket {
    async fn open(
        host: &str,
        port: u16,
        logger: Option<Arc<dyn FtpLogger>>,
    ) -> Result<Self, DataSocketError> {
        if let Some(logger) = &logger {
            logger.debug(&format!("opening active data connection to {}:{}", host, port));
        }
        let conn = TcpStream::connect((host, port))
            .await
            .map_err(DataSocketError::Dial)?;
        Ok(ActiveSocket {
            conn: Some(conn),
            host: host.to_string(),
            port,
        })
    }
}

/// Passive mode: a listener bound on the control channel's local IP. The
/// bound port is known as soon as construction returns, so the PASV/EPSV
/// reply can be sent before the client has connected; a helper task performs
/// the single accept in the background.
pub struct PassiveSocket {
    listen_ip: IpAddr,
    port: u16,
    conn: Option<TcpStream>,
    pending: Arc<Mutex<Option<TcpStream>>>,
    accept_task: JoinHandle<()>,
}

impl PassiveSocket {
    async fn open(
        listen_ip: IpAddr,
        min_port: u16,
        max_port: u16,
        logger: Option<Arc<dyn FtpLogger>>,
    ) -> Result<Self, DataSocketError> {
        let listener = bind_in_range(listen_ip, min_port, max_port).await?;
        let port = listener.local_addr().map_err(DataSocketError::Bind)?.port();

        let pending: Arc<Mutex<Option<TcpStream>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&pending);
        let accept_task = tokio::spawn(async move {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    if let Some(logger) = &logger {
                        logger.debug(&format!("accepted data connection from {}", addr));
                    }
                    *slot.lock().await = Some(stream);
                }
                Err(err) => {
                    if let Some(logger) = &logger {
                        logger.error(&format!("failed to accept data connection: {}", err));
                    }
                }
            }
        });

        Ok(PassiveSocket {
            listen_ip,
            port,
            conn: None,
            pending,
            accept_task,
        })
    }

    async fn stream(&mut self) -> Result<&mut TcpStream, DataSocketError> {
        if !self.wait_for_open_socket().await {
            return Err(DataSocketError::Unavailable);
        }
        self.conn.as_mut().ok_or(DataSocketError::Unavailable)
    }

    /// Polls for the accepted connection with a linearly growing interval.
    /// The wait is bounded so a client that never dials in cannot pin the
    /// session forever.
    async fn wait_for_open_socket(&mut self) -> bool {
        let mut retries: u32 = 0;
        loop {
            if self.conn.is_none() {
                if let Some(stream) = self.pending.lock().await.take() {
                    self.conn = Some(stream);
                }
            }
            if self.conn.is_some() {
                return true;
            }
            if retries > ACCEPT_POLL_RETRIES {
                return false;
            }
            sleep(Duration::from_millis(
                ACCEPT_POLL_INTERVAL_MS * (retries as u64 + 1),
            ))
            .await;
            retries += 1;
        }
    }

    async fn close(&mut self) {
        // Wait the helper task out so the listener is truly gone before the
        // caller moves on; a replacement socket must not race the old port.
        self.accept_task.abort();
        let _ = (&mut self.accept_task).await;
        if let Some(mut conn) = self.conn.take() {
            let _ = conn.shutdown().await;
        }
        if let Some(mut conn) = self.pending.lock().await.take() {
            let _ = conn.shutdown().await;
        }
    }
}

async fn bind_in_range(
    listen_ip: IpAddr,
    min_port: u16,
    max_port: u16,
) -> Result<TcpListener, DataSocketError> {
    if min_port == 0 && max_port == 0 {
        return TcpListener::bind((listen_ip, 0))
            .await
            .map_err(DataSocketError::Bind);
    }
    for _ in 0..PASSIVE_BIND_RETRIES {
        let port = random_port(min_port, max_port);
        if let Ok(listener) = TcpListener::bind((listen_ip, port)).await {
            return Ok(listener);
        }
    }
    Err(DataSocketError::NoPortAvailable)
}

/// Samples a port from the inclusive `[min, max]` range; `[0, 0]` means "let
/// the kernel choose".
pub fn random_port(min: u16, max: u16) -> u16 {
    if min == 0 && max == 0 {
        0
    } else {
        rand::thread_rng().gen_range(min..=max)
    }
}
