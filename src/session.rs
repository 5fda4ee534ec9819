use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::{sleep, Duration};

use crate::config::ServerConfig;
use crate::constants::POST_TRANSFER_PAUSE_MS;
use crate::core_ftpcommand::handlers::COMMANDS;
use crate::core_network::datasocket::DataSocket;
use crate::driver::Driver;
use crate::helpers;
use crate::logger::FtpLogger;

/// One FTP session: the per-connection protocol engine. Owns the control
/// connection, the session state, and the data socket (at most one at a
/// time). Commands run strictly serially, so handlers see a consistent view
/// of the state without any locking.
pub struct Session {
    session_id: String,
    control_reader: BufReader<OwnedReadHalf>,
    control_writer: OwnedWriteHalf,
    local_addr: SocketAddr,
    remote_addr: SocketAddr,
    pub(crate) driver: Box<dyn Driver>,
    logger: Option<Arc<dyn FtpLogger>>,
    server_name: String,
    /// Current working directory; always an absolute canonical path.
    pub(crate) name_prefix: String,
    /// Username supplied by USER, pending the matching PASS.
    pub(crate) req_user: String,
    /// Authenticated username; non-empty means the session is logged in.
    pub(crate) user: String,
    /// Path captured by RNFR, consumed by the next command.
    pub(crate) rename_from: String,
    pub(crate) data_conn: Option<DataSocket>,
    passive_ports: (u16, u16),
    pasv_advertised_ip: Option<String>,
    closed: bool,
}

impl Session {
    /// Wraps an already-accepted control connection. The driver instance is
    /// owned by this session for its whole lifetime.
    pub fn new(
        control_conn: TcpStream,
        driver: Box<dyn Driver>,
        logger: Option<Arc<dyn FtpLogger>>,
        config: &ServerConfig,
    ) -> Result<Self> {
        let local_addr = control_conn
            .local_addr()
            .context("failed to read control connection local address")?;
        let remote_addr = control_conn
            .peer_addr()
            .context("failed to read control connection peer address")?;
        let (read_half, write_half) = control_conn.into_split();

        Ok(Session {
            session_id: new_session_id(),
            control_reader: BufReader::new(read_half),
            control_writer: write_half,
            local_addr,
            remote_addr,
            driver,
            logger,
            server_name: config.server_name.clone(),
            name_prefix: String::from("/"),
            req_user: String::new(),
            user: String::new(),
            rename_from: String::new(),
            data_conn: None,
            passive_ports: (config.pasv_min_port, config.pasv_max_port),
            pasv_advertised_ip: config.pasv_address.clone(),
            closed: false,
        })
    }

    /// Greets the client, then reads and dispatches control lines until the
    /// connection goes away. Handler errors are logged and the loop carries
    /// on; transport errors end the session.
    pub async fn serve(mut self) -> Result<()> {
        self.log_debug(&format!(
            "connection established (local: {}, remote: {})",
            self.local_ip(),
            self.remote_ip()
        ));

        let greeting = self.server_name.clone();
        self.write_message(220, &greeting).await?;

        let mut line = String::new();
        loop {
            if self.closed {
                break;
            }
            line.clear();
            match self.control_reader.read_line(&mut line).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            if let Err(err) = self.receive_line(&line).await {
                self.log_warn(&format!(
                    "failed to process line: {} - {:#}",
                    line.trim_end(),
                    err
                ));
            }
        }

        self.log_debug("connection terminated");
        self.close().await;
        Ok(())
    }

    /// Parses one control line, applies the parameter and authentication
    /// gates, and runs the handler from the command table.
    async fn receive_line(&mut self, line: &str) -> Result<()> {
        let (command, param) = parse_line(line);
        if command == "PASS" {
            self.log_debug("PASS ***");
        } else {
            self.log_debug(&format!("{} {}", command, param));
        }

        // A pending RNFR survives exactly one follow-up command, whatever it
        // turns out to be: unknown, gate-refused, or executed. Only RNTO is
        // handed the captured path before it is dropped.
        let pending_rename = std::mem::take(&mut self.rename_from);

        let spec = match COMMANDS.get(command.as_str()) {
            Some(spec) => spec,
            None => return self.write_message(500, "Command not found").await,
        };

        if spec.requires_param && param.is_empty() {
            return self
                .write_message(553, "action aborted, required param missing")
                .await;
        }
        if spec.requires_auth && self.user.is_empty() {
            return self.write_message(530, "not logged in").await;
        }

        if command == "RNTO" {
            self.rename_from = pending_rename;
        }
        let result = (spec.handler)(self, param.as_str()).await;
        if command == "RNTO" {
            self.rename_from.clear();
        }
        result
    }

    /// Sends a standard single-line reply: `CODE SP TEXT CRLF`.
    pub async fn write_message(&mut self, code: u16, message: &str) -> Result<()> {
        self.log_debug(&format!("{} {}", code, message));
        let line = format!("{} {}\r\n", code, message);
        self.control_writer
            .write_all(line.as_bytes())
            .await
            .context("failed to write control reply")?;
        self.control_writer.flush().await?;
        Ok(())
    }

    /// Sends a multi-line reply. The caller supplies the `CODE-` continuation
    /// and `CODE ` terminator framing (FEAT uses this shape).
    pub async fn write_lines(&mut self, code: u16, lines: &[&str]) -> Result<()> {
        let message = lines.join("\r\n") + "\r\n";
        self.log_debug(&format!("{} {}", code, message));
        self.control_writer
            .write_all(message.as_bytes())
            .await
            .context("failed to write control reply")?;
        self.control_writer.flush().await?;
        Ok(())
    }

    pub fn local_ip(&self) -> IpAddr {
        self.local_addr.ip()
    }

    pub fn remote_ip(&self) -> IpAddr {
        self.remote_addr.ip()
    }

    pub(crate) fn pasv_advertised_ip(&self) -> Option<&str> {
        self.pasv_advertised_ip.as_deref()
    }

    /// Resolves a client-supplied path against the current working directory
    /// into a canonical absolute virtual path.
    pub fn build_path(&self, filename: &str) -> String {
        helpers::build_path(&self.name_prefix, filename)
    }

    /// Copies `reader` into the current data socket, closes the socket, then
    /// confirms the transfer on the control channel. The short pause keeps
    /// clients happy that dislike a control reply landing in the same instant
    /// the data socket closes on loopback.
    pub async fn send_out_of_band_reader<R>(&mut self, reader: &mut R) -> Result<()>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut socket = match self.data_conn.take() {
            Some(socket) => socket,
            None => return self.write_message(425, "Data connection failed").await,
        };

        let copied = match socket.stream().await {
            Ok(stream) => tokio::io::copy(reader, stream)
                .await
                .map(|_| ())
                .map_err(anyhow::Error::from),
            Err(err) => Err(err.into()),
        };
        socket.close().await;

        if let Err(err) = copied {
            self.write_message(550, "Action not taken").await?;
            return Err(err).context("failed to send out-of-band data");
        }

        self.write_message(226, "Transfer complete.").await?;
        sleep(Duration::from_millis(POST_TRANSFER_PAUSE_MS)).await;
        Ok(())
    }

    pub async fn send_out_of_band(&mut self, data: &str) -> Result<()> {
        let mut reader = data.as_bytes();
        self.send_out_of_band_reader(&mut reader).await
    }

    /// Opens a passive data socket, replacing (and closing) any socket the
    /// session already holds. Returns the bound port for the PASV/EPSV reply.
    pub async fn new_passive_socket(&mut self) -> Result<u16> {
        if let Some(mut old) = self.data_conn.take() {
            old.close().await;
        }
        let socket = DataSocket::passive(
            self.local_ip(),
            self.passive_ports.0,
            self.passive_ports.1,
            self.logger.clone(),
        )
        .await?;
        let port = socket.port();
        self.data_conn = Some(socket);
        Ok(port)
    }

    /// Dials the client's listening socket, replacing (and closing) any data
    /// socket the session already holds.
    pub async fn new_active_socket(&mut self, host: &str, port: u16) -> Result<()> {
        if let Some(mut old) = self.data_conn.take() {
            old.close().await;
        }
        let socket = DataSocket::active(host, port, self.logger.clone()).await?;
        self.data_conn = Some(socket);
        Ok(())
    }

    /// Closes the session, even if the client isn't ready: shuts the control
    /// channel down and drops any attached data socket. The serve loop exits
    /// on its next pass.
    pub async fn close(&mut self) {
        if let Some(mut socket) = self.data_conn.take() {
            socket.close().await;
        }
        let _ = self.control_writer.shutdown().await;
        self.closed = true;
    }

    pub(crate) fn log_debug(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.debug(&format!("{} {}", self.session_id, message));
        }
    }

    pub(crate) fn log_warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.warn(&format!("{} {}", self.session_id, message));
        }
    }

    pub(crate) fn log_error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.error(&format!("{} {}", self.session_id, message));
        }
    }
}

/// Strips the line terminator and splits a control line into the uppercased
/// command token and its whitespace-trimmed parameter. Bare LF input is
/// tolerated alongside CRLF.
pub(crate) fn parse_line(line: &str) -> (String, String) {
    let trimmed = line.trim_end_matches(&['\r', '\n'][..]);
    match trimmed.split_once(' ') {
        Some((command, param)) => (command.to_ascii_uppercase(), param.trim().to_string()),
        None => (trimmed.to_ascii_uppercase(), String::new()),
    }
}

/// A 20-character hex id used only for log correlation, derived from a
/// 50-byte random seed hashed with SHA-256 and truncated.
fn new_session_id() -> String {
    let mut seed = [0u8; 50];
    rand::thread_rng().fill_bytes(&mut seed);
    let digest = Sha256::digest(seed);
    hex::encode(digest)[..20].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_splits_command_and_param() {
        assert_eq!(
            parse_line("RETR /one.txt\r\n"),
            ("RETR".to_string(), "/one.txt".to_string())
        );
    }

    #[test]
    fn parse_line_uppercases_the_command() {
        assert_eq!(
            parse_line("user test\r\n"),
            ("USER".to_string(), "test".to_string())
        );
    }

    #[test]
    fn parse_line_tolerates_bare_lf_and_missing_param() {
        assert_eq!(parse_line("quit\n"), ("QUIT".to_string(), String::new()));
        assert_eq!(parse_line("NOOP"), ("NOOP".to_string(), String::new()));
    }

    #[test]
    fn parse_line_trims_the_param_but_keeps_inner_spaces() {
        assert_eq!(
            parse_line("OPTS UTF8 ON\r\n"),
            ("OPTS".to_string(), "UTF8 ON".to_string())
        );
        assert_eq!(
            parse_line("STOR  spaced.txt \r\n"),
            ("STOR".to_string(), "spaced.txt".to_string())
        );
    }

    #[test]
    fn session_ids_are_20_hex_chars_and_unique() {
        let first = new_session_id();
        let second = new_session_id();
        assert_eq!(first.len(), 20);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
