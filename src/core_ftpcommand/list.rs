use anyhow::{Context, Result};

use crate::core_ftpcommand::listing::ListingFormatter;
use crate::core_ftpcommand::utils::strip_list_flags;
use crate::session::Session;

/// Handles the LIST FTP command: streams a detailed listing of the requested
/// directory over the data socket.
pub async fn handle_list_command(session: &mut Session, arg: &str) -> Result<()> {
    session
        .write_message(150, "Opening ASCII mode data connection for file list")
        .await?;

    let param = strip_list_flags(arg);
    let path = session.build_path(param);
    let files = session
        .driver
        .dir_contents(&path)
        .await
        .with_context(|| format!("failed to execute LIST path: {}", path))?;

    let listing = ListingFormatter::new(&files).detailed();
    session.send_out_of_band(&listing).await
}
