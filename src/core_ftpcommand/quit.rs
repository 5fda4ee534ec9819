use anyhow::Result;

use crate::session::Session;

/// Handles the QUIT FTP command: the client asked for the connection to be
/// closed.
pub async fn handle_quit_command(session: &mut Session, _arg: &str) -> Result<()> {
    session.close().await;
    Ok(())
}
