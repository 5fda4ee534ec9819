use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the MKD FTP command, creating a directory through the driver.
pub async fn handle_mkd_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    let made = session
        .driver
        .make_dir(&path)
        .await
        .with_context(|| format!("failed to execute MKD path: {}", path))?;

    if made {
        session.write_message(257, "Directory created").await
    } else {
        session.write_message(550, "Action not taken").await
    }
}
