use crate::node_type::*;

///
/// CanonicalType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CanonicalType {
    pub name: &'static str,
    pub requires_parent: bool,
}

impl CanonicalType {
    const fn root(name: &'static str) -> Self {
        Self {
            name,
            requires_parent: false,
        }
    }

    const fn dependent(name: &'static str) -> Self {
        Self {
            name,
            requires_parent: true,
        }
    }
}

/// Every canonical node type and whether it must declare a parent.
pub const CANONICAL_TYPES: &[CanonicalType] = &[
    // network
    CanonicalType::root(HOST),
    CanonicalType::root(DOMAIN),
    CanonicalType::root(CERTIFICATE),
    CanonicalType::dependent(PORT),
    CanonicalType::dependent(SUBDOMAIN),
    CanonicalType::dependent(SERVICE),
    CanonicalType::dependent(ENDPOINT),
    CanonicalType::dependent(TECHNOLOGY),
    // kubernetes
    CanonicalType::root(K8S_CLUSTER),
    CanonicalType::dependent(K8S_NAMESPACE),
    CanonicalType::dependent(K8S_POD),
    // aws
    CanonicalType::root(AWS_ACCOUNT),
    CanonicalType::dependent(AWS_EC2_INSTANCE),
];
