use anyhow::Result;

use crate::session::Session;

/// Handles the USER FTP command: remembers the name and asks for the
/// password. A repeated USER simply overwrites the pending name.
pub async fn handle_user_command(session: &mut Session, arg: &str) -> Result<()> {
    session.req_user = arg.to_string();
    session
        .write_message(331, "User name ok, password required")
        .await
}
