use anyhow::Result;

use crate::session::Session;

/// Handles the ALLO FTP command. Storage allocation is a relic; the reply
/// just tells the client so.
pub async fn handle_allo_command(session: &mut Session, _arg: &str) -> Result<()> {
    session.write_message(202, "Obsolete").await
}
