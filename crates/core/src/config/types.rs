use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::catalog::BeatSaverConfig;
use crate::filter::FilterCriteria;
use crate::library::LibraryConfig;
use crate::selector::SelectorConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: BeatSaverConfig,
    #[serde(default)]
    pub search: SelectorConfig,
    /// Acceptance criteria; absent means every fetched item is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterCriteria>,
    #[serde(default)]
    pub library: LibraryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}
