//! Canonical taxonomy: node type tags, relationship labels, namespaces and the
//! requirement table that says which types must declare a parent.
//!
//! The constants mirror the versioned taxonomy definition shared with the
//! graph loader. Treat them as opaque tags.

pub mod canonical;
pub mod table;

pub use table::{NodeTypeRule, RequirementTable, RequirementTableBuilder};

/// Version of the taxonomy definition these constants were taken from.
pub const TAXONOMY_VERSION: &str = "2026.10";

/// Separator between namespace and kind in custom type tags.
pub const NAMESPACE_SEPARATOR: char = ':';

///
/// node_type
/// Type tags for the canonical catalog.
///

pub mod node_type {
    pub const HOST: &str = "host";
    pub const DOMAIN: &str = "domain";
    pub const CERTIFICATE: &str = "certificate";
    pub const PORT: &str = "port";
    pub const SUBDOMAIN: &str = "subdomain";
    pub const SERVICE: &str = "service";
    pub const ENDPOINT: &str = "endpoint";
    pub const TECHNOLOGY: &str = "technology";

    pub const K8S_CLUSTER: &str = "k8s:cluster";
    pub const K8S_NAMESPACE: &str = "k8s:namespace";
    pub const K8S_POD: &str = "k8s:pod";

    pub const AWS_ACCOUNT: &str = "aws:account";
    pub const AWS_EC2_INSTANCE: &str = "aws:ec2_instance";
}

///
/// relationship
/// Edge labels connecting a child to its parent.
///

pub mod relationship {
    pub const HAS_PORT: &str = "HAS_PORT";
    pub const HAS_SUBDOMAIN: &str = "HAS_SUBDOMAIN";
    pub const RUNS_SERVICE: &str = "RUNS_SERVICE";
    pub const EXPOSES_ENDPOINT: &str = "EXPOSES_ENDPOINT";
    pub const USES_TECHNOLOGY: &str = "USES_TECHNOLOGY";
    pub const CONTAINS: &str = "CONTAINS";
    pub const OWNS: &str = "OWNS";
    pub const BELONGS_TO: &str = "BELONGS_TO";
}

///
/// namespace
/// Prefixes grouping custom kinds authored by independent tools.
///

pub mod namespace {
    pub const K8S: &str = "k8s";
    pub const AWS: &str = "aws";
    pub const GCP: &str = "gcp";
    pub const AZURE: &str = "azure";
    pub const MCP: &str = "mcp";
}

/// Join a namespace and kind into a type tag.
#[must_use]
pub fn namespaced(namespace: &str, kind: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{kind}")
}

/// Split a namespaced type tag; `None` for canonical (un-namespaced) tags.
#[must_use]
pub fn split_namespaced(node_type: &str) -> Option<(&str, &str)> {
    node_type.split_once(NAMESPACE_SEPARATOR)
}
