use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the SIZE FTP command (RFC 3659). A negative size from the driver
/// means the file isn't there.
pub async fn handle_size_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    let bytes = session
        .driver
        .bytes(&path)
        .await
        .with_context(|| format!("failed to execute SIZE path: {}", path))?;

    if bytes >= 0 {
        session.write_message(213, &bytes.to_string()).await
    } else {
        session.write_message(450, "file not available").await
    }
}
