use crate::{node::Node, value::Properties};
use serde::{Deserialize, Serialize};
use strata_taxonomy::node_type::CERTIFICATE;

///
/// Certificate
/// an X.509 certificate keyed by its SHA-256 fingerprint; taxonomy root
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Certificate {
    pub fingerprint_sha256: String,
    pub subject: String,
    pub issuer: String,
    pub not_before: String,
    pub not_after: String,
    pub subject_alt_names: Vec<String>,
    pub is_self_signed: bool,
}

impl Certificate {
    #[must_use]
    pub fn new(fingerprint_sha256: impl Into<String>) -> Self {
        Self {
            fingerprint_sha256: fingerprint_sha256.into(),
            ..Self::default()
        }
    }
}

impl Node for Certificate {
    fn node_type(&self) -> &str {
        CERTIFICATE
    }

    fn identifying_properties(&self) -> Properties {
        Properties::new().with("fingerprint_sha256", &self.fingerprint_sha256)
    }

    fn properties(&self) -> Properties {
        self.identifying_properties()
            .with_sparse("subject", &self.subject)
            .with_sparse("issuer", &self.issuer)
            .with_sparse("not_before", &self.not_before)
            .with_sparse("not_after", &self.not_after)
            .with_sparse("subject_alt_names", self.subject_alt_names.clone())
            .with("is_self_signed", self.is_self_signed)
    }
}
