use anyhow::Result;

use crate::session::Session;

/// Handles the TYPE FTP command. Bytes are streamed unchanged, so ASCII and
/// Image both just succeed; the RFC requires accepting ASCII even though it
/// changes nothing here.
pub async fn handle_type_command(session: &mut Session, arg: &str) -> Result<()> {
    if arg.eq_ignore_ascii_case("A") {
        session.write_message(200, "Type set to ASCII").await
    } else if arg.eq_ignore_ascii_case("I") {
        session.write_message(200, "Type set to binary").await
    } else {
        session.write_message(500, "Invalid type").await
    }
}
