use anyhow::Result;

use crate::core_ftpcommand::cwd;
use crate::session::Session;

/// Handles the CDUP FTP command: change to the parent directory, which is
/// just CWD with a fixed argument.
pub async fn handle_cdup_command(session: &mut Session, _arg: &str) -> Result<()> {
    cwd::handle_cwd_command(session, "..").await
}
