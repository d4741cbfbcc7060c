use crate::{ConfigError, FromEnv, env_parse};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Listen address of the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }

    /// Address handed to `TcpListener::bind`
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Environment variables:
/// - `HOST`: IP literal to bind (default `0.0.0.0`)
/// - `PORT` (default `8080`); `0` asks the OS for a free port
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_parse("HOST", "0.0.0.0")?,
            port: env_parse("PORT", "8080")?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_defaults_bind_all_interfaces() {
        temp_env::with_vars([("HOST", None::<&str>), ("PORT", None::<&str>)], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config, ServerConfig::default());
            assert_eq!(config.address().to_string(), "0.0.0.0:8080");
        });
    }

    #[test]
    fn test_loopback_with_custom_port() {
        temp_env::with_vars([("HOST", Some("127.0.0.1")), ("PORT", Some("3000"))], || {
            let config = ServerConfig::from_env().unwrap();
            assert!(config.host.is_loopback());
            assert_eq!(config.address().to_string(), "127.0.0.1:3000");
        });
    }

    #[test]
    fn test_ipv6_host() {
        temp_env::with_vars([("HOST", Some("::1")), ("PORT", Some("9000"))], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.host, IpAddr::V6(Ipv6Addr::LOCALHOST));
            assert_eq!(config.address().to_string(), "[::1]:9000");
        });
    }

    #[test]
    fn test_hostname_is_rejected() {
        temp_env::with_var("HOST", Some("localhost"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "HOST"));
        });
    }

    #[test]
    fn test_port_out_of_range() {
        temp_env::with_vars([("HOST", None), ("PORT", Some("70000"))], || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }
}
