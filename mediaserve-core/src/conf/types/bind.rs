use crate::conf::ConfigError;
use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8443;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BindSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// `all`, `loopback` or a literal IP address.
    pub interface: String,

    pub port: u16,
}

impl Default for BindSpec {
    fn default() -> Self {
        Self {
            origin: Origin::builtin("bind"),
            interface: "all".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl BindSpec {
    pub fn resolve(&self) -> Result<SocketAddr, ConfigError> {
        let interface = BindInterface::from_str(&self.interface)?;
        Ok(SocketAddr::new(interface.as_ip(), self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindInterface {
    /// 127.0.0.1
    Loopback,
    /// 0.0.0.0
    All,
    /// Custom IP address defined by an operator.
    Ip(IpAddr),
}

impl BindInterface {
    pub fn as_ip(&self) -> IpAddr {
        match self {
            BindInterface::Loopback => IpAddr::V4(Ipv4Addr::LOCALHOST),
            BindInterface::All => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            BindInterface::Ip(ip) => *ip,
        }
    }
}

impl FromStr for BindInterface {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loopback" => Ok(BindInterface::Loopback),
            "all" | "" => Ok(BindInterface::All),
            _ => IpAddr::from_str(s)
                .map(BindInterface::Ip)
                .map_err(|_| ConfigError::InvalidBindInterface(s.to_string())),
        }
    }
}

impl fmt::Display for BindInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindInterface::Loopback => write!(f, "loopback"),
            BindInterface::All => write!(f, "all"),
            BindInterface::Ip(ip) => write!(f, "{ip}"),
        }
    }
}
