use anyhow::Result;

use crate::session::Session;

/// Handles the PORT FTP command: the client has opened a listening socket
/// and asks the server to dial it for the next transfer.
pub async fn handle_port_command(session: &mut Session, arg: &str) -> Result<()> {
    let (host, port) = match parse_port_param(arg) {
        Some(target) => target,
        None => return session.write_message(425, "Data connection failed").await,
    };

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

/// Parses `h1,h2,h3,h4,p1,p2` into a host and port, with `port = 256 * p1 +
/// p2`. Extra trailing fields are ignored.
fn parse_port_param(param: &str) -> Option<(String, u16)> {
    let nums: Vec<&str> = param.split(',').map(str::trim).collect();
    if nums.len() < 6 {
        return None;
    }
    for quad in &nums[0..4] {
        quad.parse::<u8>().ok()?;
    }
    let p1: u8 = nums[4].parse().ok()?;
    let p2: u8 = nums[5].parse().ok()?;
    let host = format!("{}.{}.{}.{}", nums[0], nums[1], nums[2], nums[3]);
    Some((host, u16::from(p1) * 256 + u16::from(p2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_six_tuple() {
        assert_eq!(
            parse_port_param("127,0,0,1,235,41"),
            Some((String::from("127.0.0.1"), 60201))
        );
    }

    #[test]
    fn rejects_short_or_malformed_tuples() {
        assert_eq!(parse_port_param("127,0,0,1,235"), None);
        assert_eq!(parse_port_param("127,0,0,1,300,41"), None);
        assert_eq!(parse_port_param("not,an,ip,at,all,1"), None);
    }
}
