//! Per-run container for discovered nodes and its tiered flattening.

mod order;


pub use order::{ForwardReference, find_forward_references};

use crate::{
    catalog::{Certificate, Domain, Endpoint, Host, Port, Service, Subdomain, Technology},
    node::{Node, NodeExt},
    output::NodeDescriptor,
};
use derive_more::Display;
use tracing::trace;

///
/// Tier
///
/// Coarse dependency depth of a category. Every category only references
/// categories of a strictly lower tier.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Tier {
    Root = 1,
    Dependent = 2,
    Nested = 3,
    Leaf = 4,
}

///
/// Category
/// canonical collections held by a discovery result
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Category {
    #[display("hosts")]
    Hosts,
    #[display("domains")]
    Domains,
    #[display("certificates")]
    Certificates,
    #[display("ports")]
    Ports,
    #[display("subdomains")]
    Subdomains,
    #[display("services")]
    Services,
    #[display("endpoints")]
    Endpoints,
    #[display("technologies")]
    Technologies,
}

impl Category {
    /// Flattening order: by tier, then declaration order within a tier.
    pub const ALL: [Self; 8] = [
        Self::Hosts,
        Self::Domains,
        Self::Certificates,
        Self::Ports,
        Self::Subdomains,
        Self::Services,
        Self::Endpoints,
        Self::Technologies,
    ];

    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::Hosts | Self::Domains | Self::Certificates => Tier::Root,
            Self::Ports | Self::Subdomains => Tier::Dependent,
            Self::Services => Tier::Nested,
            Self::Endpoints | Self::Technologies => Tier::Leaf,
        }
    }
}

///
/// DiscoveryResult
///
/// Everything one discovery run produced. Canonical categories are flattened
/// in tier order; `custom` follows in append order and is not re-sorted, so
/// tools with custom parent chains must append parents before children.
///
/// One run owns one result. Parallel sub-tasks build separate results.
///

#[derive(Debug, Default)]
pub struct DiscoveryResult {
    pub hosts: Vec<Host>,
    pub domains: Vec<Domain>,
    pub certificates: Vec<Certificate>,
    pub ports: Vec<Port>,
    pub subdomains: Vec<Subdomain>,
    pub services: Vec<Service>,
    pub endpoints: Vec<Endpoint>,
    pub technologies: Vec<Technology>,
    pub custom: Vec<Box<dyn Node>>,
}

impl DiscoveryResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_host(&mut self, host: Host) -> &mut Self {
        self.hosts.push(host);
        self
    }

    pub fn push_domain(&mut self, domain: Domain) -> &mut Self {
        self.domains.push(domain);
        self
    }

    pub fn push_certificate(&mut self, certificate: Certificate) -> &mut Self {
        self.certificates.push(certificate);
        self
    }

    pub fn push_port(&mut self, port: Port) -> &mut Self {
        self.ports.push(port);
        self
    }

    pub fn push_subdomain(&mut self, subdomain: Subdomain) -> &mut Self {
        self.subdomains.push(subdomain);
        self
    }

    pub fn push_service(&mut self, service: Service) -> &mut Self {
        self.services.push(service);
        self
    }

    pub fn push_endpoint(&mut self, endpoint: Endpoint) -> &mut Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn push_technology(&mut self, technology: Technology) -> &mut Self {
        self.technologies.push(technology);
        self
    }

    /// Append any node to the open-ended `custom` list.
    pub fn push_custom(&mut self, node: impl Node + 'static) -> &mut Self {
        self.custom.push(Box::new(node));
        self
    }

    /// Every held node, parents before children for canonical categories.
    #[must_use]
    pub fn all_nodes(&self) -> Vec<&dyn Node> {
        let mut nodes = Vec::with_capacity(self.node_count());
        nodes.extend(self.iter_nodes());

        trace!(nodes = nodes.len(), "flattened discovery result");

        nodes
    }

    /// Lazy form of [`Self::all_nodes`], same order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &dyn Node> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.category_nodes(category))
            .chain(self.custom.iter().map(|node| node.as_ref() as &dyn Node))
    }

    /// Nodes of one canonical category in insertion order.
    #[must_use]
    pub fn category_nodes(&self, category: Category) -> Vec<&dyn Node> {
        match category {
            Category::Hosts => as_nodes(&self.hosts),
            Category::Domains => as_nodes(&self.domains),
            Category::Certificates => as_nodes(&self.certificates),
            Category::Ports => as_nodes(&self.ports),
            Category::Subdomains => as_nodes(&self.subdomains),
            Category::Services => as_nodes(&self.services),
            Category::Endpoints => as_nodes(&self.endpoints),
            Category::Technologies => as_nodes(&self.technologies),
        }
    }

    #[must_use]
    pub const fn category_len(&self, category: Category) -> usize {
        match category {
            Category::Hosts => self.hosts.len(),
            Category::Domains => self.domains.len(),
            Category::Certificates => self.certificates.len(),
            Category::Ports => self.ports.len(),
            Category::Subdomains => self.subdomains.len(),
            Category::Services => self.services.len(),
            Category::Endpoints => self.endpoints.len(),
            Category::Technologies => self.technologies.len(),
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.category_len(*category))
            .sum::<usize>()
            + self.custom.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Nodes listed before a parent that is present later in the result.
    #[must_use]
    pub fn forward_references(&self) -> Vec<ForwardReference> {
        find_forward_references(&self.all_nodes())
    }

    /// Serializable snapshot of every node in flattening order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<NodeDescriptor> {
        self.all_nodes()
            .into_iter()
            .map(|node| node.descriptor())
            .collect()
    }
}

// as_nodes
fn as_nodes<T: Node>(items: &[T]) -> Vec<&dyn Node> {
    items.iter().map(|item| item as &dyn Node).collect()
}
