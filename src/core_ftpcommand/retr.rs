use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the RETR FTP command: opens the file through the driver and
/// streams it over the data socket. The completion reply only goes out once
/// the data socket has closed.
pub async fn handle_retr_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    let mut reader = match session.driver.get_file(&path).await {
        Ok(reader) => reader,
        Err(err) => {
            session.write_message(551, "File not available").await?;
            return Err(err).with_context(|| format!("failed to execute RETR path: {}", path));
        }
    };

    session
        .write_message(150, "Data connection open. Transfer starting.")
        .await?;
    session.send_out_of_band_reader(&mut reader).await
}
