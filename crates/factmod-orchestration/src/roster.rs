//! Server roster: one `host:port` per line.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use factmod_core::error::FactError;

/// Address of one worker server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServerDescriptor {
    /// Host name or IP literal (IPv6 without brackets).
    pub host: String,
    /// TCP port, never zero.
    pub port: u16,
}

impl ServerDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ServerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Why a roster line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterLineError {
    /// No `:` separating host and port.
    #[error("expected host:port")]
    MissingColon,
    /// Nothing before the colon.
    #[error("empty host")]
    EmptyHost,
    /// Port is not an integer in 1..=65535.
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

impl FromStr for ServerDescriptor {
    type Err = RosterLineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (host, port) = line.rsplit_once(':').ok_or(RosterLineError::MissingColon)?;
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host)
            .trim();
        if host.is_empty() {
            return Err(RosterLineError::EmptyHost);
        }
        let port = port.trim();
        match port.parse::<u16>() {
            Ok(p) if p > 0 => Ok(Self::new(host, p)),
            _ => Err(RosterLineError::InvalidPort(port.to_string())),
        }
    }
}

/// Parse roster text. Blank lines and `#` comments are ignored; malformed
/// lines are skipped with a warning.
#[must_use]
pub fn parse_roster(text: &str) -> Vec<ServerDescriptor> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            match line.parse::<ServerDescriptor>() {
                Ok(server) => Some(server),
                Err(e) => {
                    warn!(line = index + 1, entry = line, error = %e, "skipping roster entry");
                    None
                }
            }
        })
        .collect()
}

/// Read and parse a roster file.
///
/// # Errors
///
/// `FactError::Config` if the file cannot be read or contains no valid
/// server.
pub fn load_roster(path: &Path) -> Result<Vec<ServerDescriptor>, FactError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        FactError::Config(format!("cannot read servers file {}: {e}", path.display()))
    })?;
    let servers = parse_roster(&text);
    if servers.is_empty() {
        return Err(FactError::Config(format!(
            "no valid servers found in {}",
            path.display()
        )));
    }
    Ok(servers)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_descriptor() {
        let s: ServerDescriptor = "localhost:20001".parse().unwrap();
        assert_eq!(s, ServerDescriptor::new("localhost", 20001));
        assert_eq!(s.to_string(), "localhost:20001");
    }

    #[test]
    fn parse_ipv6_descriptor() {
        let s: ServerDescriptor = "[::1]:9000".parse().unwrap();
        assert_eq!(s.host, "::1");
        assert_eq!(s.port, 9000);
        assert_eq!(s.to_string(), "[::1]:9000");
    }

    #[test]
    fn reject_malformed() {
        assert_eq!(
            "localhost".parse::<ServerDescriptor>(),
            Err(RosterLineError::MissingColon)
        );
        assert_eq!(
            ":8080".parse::<ServerDescriptor>(),
            Err(RosterLineError::EmptyHost)
        );
        assert!(matches!(
            "host:0".parse::<ServerDescriptor>(),
            Err(RosterLineError::InvalidPort(_))
        ));
        assert!(matches!(
            "host:70000".parse::<ServerDescriptor>(),
            Err(RosterLineError::InvalidPort(_))
        ));
        assert!(matches!(
            "host:http".parse::<ServerDescriptor>(),
            Err(RosterLineError::InvalidPort(_))
        ));
    }

    #[test]
    fn roster_skips_comments_blanks_and_bad_lines() {
        let text = "# workers\n\n127.0.0.1:20001\r\nbogus\n  10.0.0.2:20002  \nhost:99999\n";
        let servers = parse_roster(text);
        assert_eq!(
            servers,
            vec![
                ServerDescriptor::new("127.0.0.1", 20001),
                ServerDescriptor::new("10.0.0.2", 20002),
            ]
        );
    }

    #[test]
    fn load_roster_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "localhost:1\nlocalhost:2").unwrap();
        let servers = load_roster(file.path()).unwrap();
        assert_eq!(servers.len(), 2);
    }

    #[test]
    fn load_roster_without_valid_servers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here\nnot-a-server").unwrap();
        assert!(matches!(
            load_roster(file.path()),
            Err(FactError::Config(_))
        ));
    }

    #[test]
    fn load_missing_roster() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_roster(&dir.path().join("absent.txt")),
            Err(FactError::Config(_))
        ));
    }
}
