use anyhow::{Context, Result};

use crate::constants::MDTM_TIME_LAYOUT;
use crate::session::Session;

/// Handles the MDTM FTP command (RFC 3659), reporting a file's modification
/// time as `YYYYMMDDhhmmss`.
pub async fn handle_mdtm_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    match session.driver.modified_time(&path).await {
        Ok(modified) => {
            session
                .write_message(213, &modified.format(MDTM_TIME_LAYOUT).to_string())
                .await
        }
        Err(err) => {
            session.write_message(450, "File not available").await?;
            Err(err).with_context(|| format!("failed to execute MDTM path: {}", path))
        }
    }
}
