use crate::{
    catalog::{Service, resolve_parent, service_ref},
    node::{Node, ParentEdge},
    value::Properties,
};
use serde::{Deserialize, Serialize};
use strata_taxonomy::{node_type::TECHNOLOGY, relationship::USES_TECHNOLOGY};

///
/// Technology
/// a product or framework fingerprinted behind a service
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Technology {
    pub service_id: String,
    pub name: String,
    pub version: String,
    pub category: String,

    #[serde(skip)]
    parent: Option<ParentEdge>,
}

impl Technology {
    #[must_use]
    pub fn new(service_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// # Panics
    /// If the service has a blank port id or name.
    #[must_use]
    pub fn on_service(mut self, service: &Service) -> Self {
        self.parent = Some(ParentEdge::to(service, USES_TECHNOLOGY));
        self.service_id = service.id();
        self
    }
}

impl Node for Technology {
    fn node_type(&self) -> &str {
        TECHNOLOGY
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new()
            .with("service_id", &self.service_id)
            .with("name", &self.name)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("version", &self.version)
            .with_sparse("category", &self.category)
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        resolve_parent(
            self.parent.as_ref(),
            || service_ref(&self.service_id),
            USES_TECHNOLOGY,
        )
    }
}
