use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the RMD FTP command, deleting a directory through the driver.
pub async fn handle_rmd_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    let deleted = session
        .driver
        .delete_dir(&path)
        .await
        .with_context(|| format!("failed to execute RMD path: {}", path))?;

    if deleted {
        session.write_message(250, "Directory deleted").await
    } else {
        session.write_message(550, "Action not taken").await
    }
}
