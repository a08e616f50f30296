use crate::{node::Node, value::Properties};
use serde::{Deserialize, Serialize};
use strata_taxonomy::node_type::DOMAIN;

///
/// Domain
/// a registered apex domain; taxonomy root
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Domain {
    pub name: String,
    pub registrar: String,
    pub name_servers: Vec<String>,
}

impl Domain {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Node for Domain {
    fn node_type(&self) -> &str {
        DOMAIN
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new().with("name", &self.name)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("registrar", &self.registrar)
            .with_sparse("name_servers", self.name_servers.clone())
    }
}
