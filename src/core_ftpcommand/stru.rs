use anyhow::Result;

use crate::session::Session;

/// Handles the STRU FTP command. F(ile) structure is the only one that still
/// means anything; the record and page structures predate streamed bytes.
pub async fn handle_stru_command(session: &mut Session, arg: &str) -> Result<()> {
    if arg.eq_ignore_ascii_case("F") {
        session.write_message(200, "OK").await
    } else {
        session
            .write_message(504, "STRU is an obsolete command")
            .await
    }
}
