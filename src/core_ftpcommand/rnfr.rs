use anyhow::Result;

use crate::session::Session;

/// Handles the RNFR FTP command, the first half of a rename. The captured
/// path survives exactly until the next command.
pub async fn handle_rnfr_command(session: &mut Session, arg: &str) -> Result<()> {
    session.rename_from = session.build_path(arg);
    session
        .write_message(350, "Requested file action pending further information.")
        .await
}
