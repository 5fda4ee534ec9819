use anyhow::Result;

use crate::session::Session;

/// Handles the MODE FTP command. Stream mode is the only one anyone uses;
/// everything else is refused as obsolete.
pub async fn handle_mode_command(session: &mut Session, arg: &str) -> Result<()> {
    if arg.eq_ignore_ascii_case("S") {
        session.write_message(200, "OK").await
    } else {
        session
            .write_message(504, "MODE is an obsolete command")
            .await
    }
}
