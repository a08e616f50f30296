use crate::{node::Node, value::Properties};
use serde::{Deserialize, Serialize};
use strata_taxonomy::node_type::HOST;

///
/// Host
/// a network-addressable machine; taxonomy root
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Host {
    pub ip: String,
    pub hostname: String,
    pub os: String,
    pub mac_address: String,
    pub is_alive: bool,
}

impl Host {
    #[must_use]
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            is_alive: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }
}

impl Node for Host {
    fn node_type(&self) -> &str {
        HOST
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new().with("ip", &self.ip)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("hostname", &self.hostname)
            .with_sparse("os", &self.os)
            .with_sparse("mac_address", &self.mac_address)
            .with("is_alive", self.is_alive)
    }
}
