//! An embeddable FTP server. The crate owns everything on the wire: the
//! control-channel protocol, reply codes, and the active/passive data
//! channel. It owns nothing of the backing store; authentication and all
//! filesystem semantics live behind the pluggable [`Driver`] trait, with one
//! fresh driver instance per connection.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ferroftp::{FtpServer, MemDriverFactory, ServerConfig, StdFtpLogger};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig {
//!         listen_port: 2121,
//!         ..ServerConfig::default()
//!     };
//!     let server = FtpServer::new(
//!         config,
//!         Box::new(MemDriverFactory),
//!         Some(Arc::new(StdFtpLogger::new())),
//!     );
//!     server.listen_and_serve().await
//! }
//! ```

pub mod config;
pub mod constants;
pub mod core_ftpcommand;
pub mod core_network;
pub mod driver;
pub mod helpers;
pub mod logger;
pub mod memdriver;
pub mod server;
pub mod session;

pub use config::ServerConfig;
pub use driver::{Driver, DriverFactory, FileEntry, FileStream};
pub use logger::{FtpLogger, LogLevel, StdFtpLogger};
pub use memdriver::{MemDriver, MemDriverFactory};
pub use server::FtpServer;
pub use session::Session;
