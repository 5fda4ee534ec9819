use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the RNTO FTP command, the second half of a rename. Without a
/// preceding RNFR there is nothing to rename.
pub async fn handle_rnto_command(session: &mut Session, arg: &str) -> Result<()> {
    if session.rename_from.is_empty() {
        return session
            .write_message(503, "Bad sequence of commands: use RNFR first.")
            .await;
    }

    let from_path = session.rename_from.clone();
    let to_path = session.build_path(arg);
    let renamed = session
        .driver
        .rename(&from_path, &to_path)
        .await
        .with_context(|| {
            format!("failed to execute RNTO from: {} to: {}", from_path, to_path)
        })?;

    if renamed {
        session.write_message(250, "File renamed").await
    } else {
        session.write_message(550, "Action not taken").await
    }
}
