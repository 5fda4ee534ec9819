use anyhow::Result;

use crate::session::Session;

/// Handles the SYST FTP command with the canned answer clients expect.
pub async fn handle_syst_command(session: &mut Session, _arg: &str) -> Result<()> {
    session.write_message(215, "UNIX Type: L8").await
}
