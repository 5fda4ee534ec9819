use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataSocketError {
    /// The passive listener never saw the client connect within the bounded
    /// wait; the transfer is abandoned rather than pinning the session.
    #[error("data socket unavailable")]
    Unavailable,

    #[error("unable to find available port to listen on")]
    NoPortAvailable,

    #[error("failed to bind passive listener: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to open active data connection: {0}")]
    Dial(#[source] io::Error),
}
