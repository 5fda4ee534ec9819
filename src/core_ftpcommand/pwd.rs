use anyhow::Result;

use crate::session::Session;

/// Handles the PWD FTP command, telling the client its current directory.
pub async fn handle_pwd_command(session: &mut Session, _arg: &str) -> Result<()> {
    let message = format!("\"{}\" is the current directory", session.name_prefix);
    session.write_message(257, &message).await
}
