use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::FutureExt;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::driver::DriverFactory;
use crate::logger::FtpLogger;
use crate::session::Session;

/// The outer shell: binds the control listener, accepts connections, and
/// spawns one [`Session`] worker per client. Sessions share nothing mutable;
/// the shell only keeps their join handles so `close()` can sever them.
pub struct FtpServer {
    config: ServerConfig,
    factory: Box<dyn DriverFactory>,
    logger: Option<Arc<dyn FtpLogger>>,
    shutdown: Notify,
    bound_addr: Mutex<Option<SocketAddr>>,
    sessions: Mutex<Vec<JoinHandle<()>>>,
}

impl FtpServer {
    pub fn new(
        config: ServerConfig,
        factory: Box<dyn DriverFactory>,
        logger: Option<Arc<dyn FtpLogger>>,
    ) -> Self {
        FtpServer {
            config,
            factory,
            logger,
            shutdown: Notify::new(),
            bound_addr: Mutex::new(None),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// The address the control listener is bound on. None until
    /// `listen_and_serve` has bound it; useful when listening on port 0.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.bound_addr.lock().await
    }

    /// Binds the control listener and accepts until `close()` is called.
    pub async fn listen_and_serve(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.listen_host, self.config.listen_port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind control listener on {}", addr))?;
        let local = listener
            .local_addr()
            .context("failed to read control listener address")?;
        *self.bound_addr.lock().await = Some(local);
        self.log_info(&format!(
            "{} listening on {}",
            self.config.server_name, local
        ));

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => break,
                accepted = listener.accept() => {
                    let (socket, addr) = match accepted {
                        Ok(pair) => pair,
                        Err(err) => {
                            self.log_warn(&format!("failed to accept connection: {}", err));
                            continue;
                        }
                    };
                    self.log_debug(&format!("new connection from {}", addr));
                    self.spawn_session(socket, addr).await;
                }
            }
        }

        // Sever every open control channel; each worker's read loop exits
        // and its cleanup closes any attached data socket.
        for handle in self.sessions.lock().await.drain(..) {
            handle.abort();
        }
        self.log_info("server shut down");
        Ok(())
    }

    /// Stops the accept loop and severs every open session. Safe to call
    /// from another task; `listen_and_serve` returns once the listener is
    /// closed.
    pub fn close(&self) {
        self.shutdown.notify_one();
    }

    async fn spawn_session(&self, socket: tokio::net::TcpStream, addr: SocketAddr) {
        let driver = match self.factory.new_driver() {
            Ok(driver) => driver,
            Err(err) => {
                self.log_error(&format!("failed to create driver for {}: {:#}", addr, err));
                return;
            }
        };

        let session = match Session::new(socket, driver, self.logger.clone(), &self.config) {
            Ok(session) => session,
            Err(err) => {
                self.log_error(&format!("failed to set up session for {}: {:#}", addr, err));
                return;
            }
        };

        let logger = self.logger.clone();
        let handle = tokio::spawn(async move {
            // A handler that panics takes down this session only; the
            // server keeps accepting.
            match AssertUnwindSafe(session.serve()).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    if let Some(logger) = &logger {
                        logger.warn(&format!("session for {} ended with error: {:#}", addr, err));
                    }
                }
                Err(_) => {
                    if let Some(logger) = &logger {
                        logger.warn(&format!("recovered from panic in session for {}", addr));
                    }
                }
            }
        });

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|handle| !handle.is_finished());
        sessions.push(handle);
    }

    fn log_debug(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.debug(message);
        }
    }

    fn log_info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.info(message);
        }
    }

    fn log_warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.warn(message);
        }
    }

    fn log_error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.error(message);
        }
    }
}
