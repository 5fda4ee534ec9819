use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the DELE FTP command, deleting a single file through the driver.
pub async fn handle_dele_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    let deleted = session
        .driver
        .delete_file(&path)
        .await
        .with_context(|| format!("failed to execute DELE path: {}", path))?;

    if deleted {
        session.write_message(250, "File deleted").await
    } else {
        session.write_message(550, "Action not taken").await
    }
}
