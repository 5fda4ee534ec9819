use anyhow::Result;

use crate::session::Session;

/// Handles the PASS FTP command: asks the driver whether the pending
/// username and this password are valid. A failed login gets one reply pair
/// and then the connection is gone; the client must reconnect to retry.
pub async fn handle_pass_command(session: &mut Session, arg: &str) -> Result<()> {
    let user = session.req_user.clone();
    let remote_ip = session.remote_ip().to_string();

    let ok = match session.driver.authenticate(&user, arg, &remote_ip).await {
        Ok(ok) => ok,
        Err(err) => {
            session.log_warn(&format!("authentication failed for {}: {:#}", user, err));
            false
        }
    };

    if !ok {
        session
            .write_message(530, "Incorrect password, not logged in")
            .await?;
        session.write_message(221, "Goodbye.").await?;
        session.close().await;
        return Ok(());
    }

    session.user = session.req_user.clone();
    session.req_user.clear();
    session.write_message(230, "Password ok, continue").await
}
