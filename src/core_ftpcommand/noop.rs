use anyhow::Result;

use crate::session::Session;

/// Handles the NOOP FTP command, a keepalive ping from the client.
pub async fn handle_noop_command(session: &mut Session, _arg: &str) -> Result<()> {
    session.write_message(200, "OK").await
}
