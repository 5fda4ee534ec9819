use anyhow::{Context, Result};

use crate::session::Session;

/// Handles the STOR FTP command: hands the data socket to the driver as the
/// upload's byte source. The socket is closed before the final reply so the
/// client sees EOF ordering it can trust.
pub async fn handle_stor_command(session: &mut Session, arg: &str) -> Result<()> {
    let path = session.build_path(arg);
    session.write_message(150, "Data transfer starting").await?;

    let mut socket = match session.data_conn.take() {
        Some(socket) => socket,
        None => return session.write_message(425, "Data connection failed").await,
    };

    let stored = match socket.stream().await {
        Ok(stream) => session.driver.put_file(&path, stream).await,
        Err(err) => Err(err.into()),
    };
    socket.close().await;

    match stored {
        Ok(true) => session.write_message(226, "Transfer complete.").await,
        Ok(false) => session.write_message(450, "error during transfer").await,
        Err(err) => {
            session.write_message(450, "error during transfer").await?;
            Err(err).with_context(|| format!("failed to execute STOR path: {}", path))
        }
    }
}
