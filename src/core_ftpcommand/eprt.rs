use anyhow::Result;

use crate::session::Session;

/// Handles the EPRT FTP command (RFC 2428): the extended form of PORT, which
/// carries an address family and supports IPv6.
pub async fn handle_eprt_command(session: &mut Session, arg: &str) -> Result<()> {
    let parsed = match parse_eprt_param(arg) {
        Some(parsed) => parsed,
        None => return session.write_message(425, "Data connection failed").await,
    };
    let (family, host, port) = parsed;

    if family != 1 && family != 2 {
        return session
            .write_message(522, "Network protocol not supported, use (1,2)")
            .await;
    }

    match session.new_active_socket(&host, port).await {
        Ok(()) => {
            session
                .write_message(200, &format!("Connection established ({})", port))
                .await
        }
        Err(err) => {
            session.log_error(&format!("failed to open active socket: {:#}", err));
            session.write_message(425, "Data connection failed").await?;
            Err(err)
        }
    }
}

/// Parses `<d><family><d><host><d><port><d>`, e.g. `|1|132.235.1.2|6275|`.
/// The delimiter is whatever character the parameter starts with.
fn parse_eprt_param(param: &str) -> Option<(u8, String, u16)> {
    let delimiter = param.chars().next()?;
    let parts: Vec<&str> = param.split(delimiter).collect();
    if parts.len() < 4 {
        return None;
    }
    let family: u8 = parts[1].parse().ok()?;
    let host = parts[2];
    if host.is_empty() {
        return None;
    }
    let port: u16 = parts[3].parse().ok()?;
    Some((family, host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ipv4_and_ipv6_forms() {
        assert_eq!(
            parse_eprt_param("|1|132.235.1.2|6275|"),
            Some((1, String::from("132.235.1.2"), 6275))
        );
        assert_eq!(
            parse_eprt_param("|2|1080::8:800:200C:417A|5282|"),
            Some((2, String::from("1080::8:800:200C:417A"), 5282))
        );
    }

    #[test]
    fn rejects_malformed_parameters() {
        assert_eq!(parse_eprt_param(""), None);
        assert_eq!(parse_eprt_param("|1|132.235.1.2"), None);
        assert_eq!(parse_eprt_param("|one|host|21|"), None);
    }
}
