use anyhow::Result;

use crate::session::Session;

/// Handles the PASV FTP command: opens a passive listener and quotes its
/// address as the `(h1,h2,h3,h4,p1,p2)` tuple. The reply goes out as soon as
/// the port is bound, before the client has connected.
pub async fn handle_pasv_command(session: &mut Session, _arg: &str) -> Result<()> {
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

    // Advertise the configured NAT address when set, otherwise the IP the
    // control channel is actually on.
    let host = match session.pasv_advertised_ip() {
        Some(ip) => ip.to_string(),
        None => session.local_ip().to_string(),
    };

    let target = match format_pasv_target(&host, port) {
        Some(target) => target,
        None => {
            session.write_message(425, "Data connection failed").await?;
            anyhow::bail!("passive address {} is not a dotted quad", host);
        }
    };

    session
        .write_message(227, &format!("Entering Passive Mode {}", target))
        .await
}

/// `(h1,h2,h3,h4,p1,p2)` with `port == 256 * p1 + p2`. Returns None when the
/// host is not an IPv4 dotted quad (EPSV covers that case).
pub(crate) fn format_pasv_target(host: &str, port: u16) -> Option<String> {
    let quads: Vec<&str> = host.split('.').collect();
    if quads.len() != 4 {
        return None;
    }
    Some(format!(
        "({},{},{},{},{},{})",
        quads[0],
        quads[1],
        quads[2],
        quads[3],
        port / 256,
        port % 256
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_encodes_the_port_in_two_bytes() {
        assert_eq!(
            format_pasv_target("192.168.1.10", 60201),
            Some(String::from("(192,168,1,10,235,41)"))
        );
        let port = 60201;
        let (p1, p2) = (port / 256, port % 256);
        assert_eq!(256 * p1 + p2, port);
    }

    #[test]
    fn non_ipv4_hosts_are_rejected() {
        assert_eq!(format_pasv_target("::1", 2121), None);
    }
}
