use anyhow::Result;

use crate::session::Session;

/// Handles the OPTS FTP command. Only the UTF8 switch is understood; file
/// names pass through unchanged either way.
pub async fn handle_opts_command(session: &mut Session, arg: &str) -> Result<()> {
    if arg == "UTF8 ON" || arg == "UTF8" {
        session.write_message(200, "OK").await
    } else {
        session.write_message(500, "Command not found").await
    }
}
