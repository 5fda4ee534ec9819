use anyhow::Result;

use crate::session::Session;

/// Handles the EPSV FTP command: like PASV but with the extended reply shape
/// from RFC 2428, which works for IPv6 control channels too.
pub async fn handle_epsv_command(session: &mut Session, _arg: &str) -> Result<()> {
    let port = match session.new_passive_socket().await {
        Ok(port) => port,
        Err(err) => {
            session.log_error(&format!("failed to open passive socket: {:#}", err));
            if let Err(write_err) = session.write_message(425, "Data connection failed").await {
                session.log_warn(&format!("failed to send 425 reply: {:#}", write_err));
            }
            return Err(err);
        }
    };

    session
        .write_message(229, &format!("Entering Extended Passive Mode (|||{}|)", port))
        .await
}
