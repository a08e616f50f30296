use crate::{
    catalog::{Service, resolve_parent, service_ref},
    node::{Node, ParentEdge},
    value::Properties,
};
use serde::{Deserialize, Serialize};
use strata_taxonomy::{node_type::ENDPOINT, relationship::EXPOSES_ENDPOINT};

///
/// Endpoint
/// a URL served by a service
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Endpoint {
    /// `<port_id>/<service name>` of the owning service (legacy key field).
    pub service_id: String,
    pub url: String,
    pub method: String,
    pub status_code: u16,
    pub title: String,

    #[serde(skip)]
    parent: Option<ParentEdge>,
}

impl Endpoint {
    #[must_use]
    pub fn new(service_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// # Panics
    /// If the service has a blank port id or name.
    #[must_use]
    pub fn on_service(mut self, service: &Service) -> Self {
        self.parent = Some(ParentEdge::to(service, EXPOSES_ENDPOINT));
        self.service_id = service.id();
        self
    }
}

impl Node for Endpoint {
    fn node_type(&self) -> &str {
        ENDPOINT
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new()
            .with("service_id", &self.service_id)
            .with("url", &self.url)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("method", &self.method)
            .with_sparse("status_code", self.status_code)
            .with_sparse("title", &self.title)
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        resolve_parent(
            self.parent.as_ref(),
            || service_ref(&self.service_id),
            EXPOSES_ENDPOINT,
        )
    }
}
