use crate::{
    catalog::{Domain, resolve_parent},
    node::{Node, ParentEdge, ParentRef},
    value::Properties,
};
use serde::{Deserialize, Serialize};
use strata_taxonomy::{
    node_type::{DOMAIN, SUBDOMAIN},
    relationship::HAS_SUBDOMAIN,
};

///
/// Subdomain
/// a fully-qualified name below a registered domain
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Subdomain {
    /// Apex domain name (legacy key field).
    pub domain_id: String,
    pub name: String,
    pub resolved_ips: Vec<String>,
    pub source: String,

    #[serde(skip)]
    parent: Option<ParentEdge>,
}

impl Subdomain {
    #[must_use]
    pub fn new(domain_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain_id: domain_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// # Panics
    /// If the domain has an empty name.
    #[must_use]
    pub fn on_domain(mut self, domain: &Domain) -> Self {
        self.parent = Some(ParentEdge::to(domain, HAS_SUBDOMAIN));
        self.domain_id.clone_from(&domain.name);
        self
    }
}

impl Node for Subdomain {
    fn node_type(&self) -> &str {
        SUBDOMAIN
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new()
            .with("domain_id", &self.domain_id)
            .with("name", &self.name)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("resolved_ips", self.resolved_ips.clone())
            .with_sparse("source", &self.source)
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        resolve_parent(
            self.parent.as_ref(),
            || {
                (!self.domain_id.is_empty()).then(|| {
                    ParentRef::new(DOMAIN, Properties::new().with("name", &self.domain_id))
                })
            },
            HAS_SUBDOMAIN,
        )
    }
}
