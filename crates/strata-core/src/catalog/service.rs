use crate::{
    catalog::{Port, resolve_parent, split_port_id},
    node::{Node, ParentEdge, ParentRef},
    value::Properties,
};
use serde::{Deserialize, Serialize};
use strata_taxonomy::{
    node_type::{PORT, SERVICE},
    relationship::RUNS_SERVICE,
};

///
/// Service
/// an application protocol identified on a port
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Service {
    /// `<host>:<number>:<protocol>` of the owning port (legacy key field).
    pub port_id: String,
    pub name: String,
    pub product: String,
    pub version: String,
    pub is_tls: bool,

    #[serde(skip)]
    parent: Option<ParentEdge>,
}

impl Service {
    #[must_use]
    pub fn new(port_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// # Panics
    /// If the port has a blank host id or protocol.
    #[must_use]
    pub fn on_port(mut self, port: &Port) -> Self {
        self.parent = Some(ParentEdge::to(port, RUNS_SERVICE));
        self.port_id = port.id();
        self
    }

    /// Stable `<port_id>/<name>` id used by endpoints and technologies.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.port_id, self.name)
    }

    // legacy_parent
    fn legacy_parent(&self) -> Option<ParentRef> {
        let (host, number, protocol) = split_port_id(&self.port_id)?;

        Some(ParentRef::new(
            PORT,
            Properties::new()
                .with("host_id", host)
                .with("number", number)
                .with("protocol", protocol),
        ))
    }
}

impl Node for Service {
    fn node_type(&self) -> &str {
        SERVICE
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new()
            .with("port_id", &self.port_id)
            .with("name", &self.name)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("product", &self.product)
            .with_sparse("version", &self.version)
            .with("is_tls", self.is_tls)
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        resolve_parent(self.parent.as_ref(), || self.legacy_parent(), RUNS_SERVICE)
    }
}
