use anyhow::Result;

use crate::session::Session;

/// Handles the FEAT FTP command (RFC 2389), listing the extensions this
/// server understands beyond plain RFC 959.
pub async fn handle_feat_command(session: &mut Session, _arg: &str) -> Result<()> {
    session
        .write_lines(
            211,
            &[
                "211-Features supported:",
                " EPRT",
                " EPSV",
                " MDTM",
                " SIZE",
                " UTF8",
                "211 End FEAT.",
            ],
        )
        .await
}
