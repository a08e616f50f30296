//! Canonical catalog entities.
//!
//! Each entity follows the same pattern: public snake_case fields, a `new`
//! constructor taking the identifying fields, and for dependent entities an
//! `on_*` attach operation that stores the parent edge and mirrors the
//! parent's key into the legacy `*_id` field.
//!
//! A stored edge always wins over the legacy field. When only the legacy
//! field is set, the parent edge is derived from it.

mod certificate;
mod domain;
mod endpoint;
mod host;
mod port;
mod service;
mod subdomain;
mod technology;

pub use certificate::Certificate;
pub use domain::Domain;
pub use endpoint::Endpoint;
pub use host::Host;
pub use port::Port;
pub use service::Service;
pub use subdomain::Subdomain;
pub use technology::Technology;

use crate::{
    node::{ParentEdge, ParentRef},
    value::Properties,
};
use strata_taxonomy::node_type::SERVICE;

// resolve_parent
// explicit edge first, then the edge implied by a legacy key field when
// that field forms a complete key
fn resolve_parent(
    stored: Option<&ParentEdge>,
    legacy: impl FnOnce() -> Option<ParentRef>,
    relationship: &str,
) -> Option<ParentEdge> {
    if let Some(edge) = stored {
        return Some(edge.clone());
    }

    legacy().and_then(|reference| ParentEdge::try_new(reference, relationship).ok())
}

// split_port_id
// "<host>:<number>:<protocol>"; the host may itself contain ':' (IPv6)
fn split_port_id(port_id: &str) -> Option<(&str, u16, &str)> {
    let mut parts = port_id.rsplitn(3, ':');
    let protocol = parts.next().filter(|s| !s.is_empty())?;
    let number = parts.next()?.parse().ok()?;
    let host = parts.next().filter(|s| !s.is_empty())?;

    Some((host, number, protocol))
}

// service_ref
// service key implied by a legacy "<port_id>/<service name>" field
fn service_ref(service_id: &str) -> Option<ParentRef> {
    let (port_id, name) = split_service_id(service_id)?;

    Some(ParentRef::new(
        SERVICE,
        Properties::new()
            .with("port_id", port_id)
            .with("name", name),
    ))
}

// split_service_id
// "<port_id>/<service name>"
fn split_service_id(service_id: &str) -> Option<(&str, &str)> {
    let (port_id, name) = service_id.rsplit_once('/')?;
    if port_id.is_empty() || name.is_empty() {
        return None;
    }

    Some((port_id, name))
}
