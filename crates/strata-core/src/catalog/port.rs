use crate::{
    catalog::{Host, resolve_parent},
    node::{Node, ParentEdge, ParentRef},
    value::Properties,
};
use serde::{Deserialize, Serialize};
use strata_taxonomy::{
    node_type::{HOST, PORT},
    relationship::HAS_PORT,
};

///
/// Port
/// a transport-layer port on a host
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Port {
    /// IP of the owning host (legacy key field).
    pub host_id: String,
    pub number: u16,
    pub protocol: String,
    pub state: String,
    pub banner: String,

    #[serde(skip)]
    parent: Option<ParentEdge>,
}

impl Port {
    #[must_use]
    pub fn new(host_id: impl Into<String>, number: u16, protocol: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            number,
            protocol: protocol.into(),
            ..Self::default()
        }
    }

    /// Attach to the owning host.
    ///
    /// # Panics
    /// If the host has a blank ip.
    #[must_use]
    pub fn on_host(mut self, host: &Host) -> Self {
        self.parent = Some(ParentEdge::to(host, HAS_PORT));
        self.host_id.clone_from(&host.ip);
        self
    }

    /// Stable `<host>:<number>:<protocol>` id used by services.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.host_id, self.number, self.protocol)
    }
}

impl Node for Port {
    fn node_type(&self) -> &str {
        PORT
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new()
            .with("host_id", &self.host_id)
            .with("number", self.number)
            .with("protocol", &self.protocol)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("state", &self.state)
            .with_sparse("banner", &self.banner)
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        resolve_parent(
            self.parent.as_ref(),
            || {
                (!self.host_id.is_empty()).then(|| {
                    ParentRef::new(HOST, Properties::new().with("ip", &self.host_id))
                })
            },
            HAS_PORT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeExt;

    #[test]
    fn on_host_mirrors_key_and_stores_edge() {
        let host = Host::new("10.0.0.1");
        let port = Port::new("", 443, "tcp").on_host(&host);

        assert_eq!(port.host_id, "10.0.0.1");
        assert_eq!(port.id(), "10.0.0.1:443:tcp");
        let edge = port.parent_edge().expect("attached port has a parent");
        assert!(edge.reference().matches(&host));
        assert_eq!(edge.relationship(), HAS_PORT);
    }

    #[test]
    fn legacy_host_id_implies_parent() {
        let port = Port::new("10.0.0.9", 22, "tcp");
        let reference = port.parent_reference().expect("legacy key implies a parent");

        assert!(reference.matches(&Host::new("10.0.0.9")));
        assert_eq!(port.relationship_label(), HAS_PORT);
    }

    #[test]
    fn stored_edge_wins_over_legacy_field() {
        let host = Host::new("10.0.0.1");
        let mut port = Port::new("", 80, "tcp").on_host(&host);
        port.host_id = "192.168.1.1".to_string();

        let reference = port.parent_reference().expect("parent present");
        assert!(reference.matches(&host), "explicit edge takes precedence");
    }

    #[test]
    fn unattached_port_without_host_id_has_no_parent() {
        let port = Port::new("", 80, "tcp");

        assert!(port.parent_edge().is_none());
        assert_eq!(port.relationship_label(), "");
    }

    #[test]
    fn blank_legacy_host_id_implies_no_parent() {
        let port = Port::new("  ", 80, "tcp");

        assert!(port.parent_edge().is_none());
    }

    #[test]
    #[should_panic(expected = "missing identifying properties")]
    fn attaching_to_keyless_host_panics() {
        let host = Host {
            ip: String::new(),
            ..Host::default()
        };
        let _ = Port::new("", 80, "tcp").on_host(&host);
    }
}
