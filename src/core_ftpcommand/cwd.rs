use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the CWD FTP command. The driver decides whether the target is a
/// directory the session may enter; on success the working directory sticks.
pub async fn handle_cwd_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    let changed = session
        .driver
        .change_dir(&path)
        .await
        .with_context(|| format!("failed to execute CWD path: {}", path))?;

    if changed {
        session.name_prefix = path.clone();
        session
            .write_message(250, &format!("Directory changed to {}", path))
            .await
    } else {
        session.write_message(550, "Action not taken").await
    }
}
