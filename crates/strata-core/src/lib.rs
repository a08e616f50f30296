//! Core model for feeding discovered entities into a property graph:
//! the node contract, parent edges, the canonical catalog, custom entities,
//! validation against the taxonomy, and tiered flattening of discovery
//! results for the loader.

pub mod catalog;
pub mod custom;
pub mod discovery;
pub mod ingest;
pub mod node;
pub mod output;
pub mod validate;
pub mod value;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        catalog::*,
        custom::{CustomEntity, CustomEntityBuilder},
        discovery::{Category, DiscoveryResult, Tier},
        ingest::{GraphLoader, ingest},
        node::{Node, NodeExt, ParentEdge, ParentRef},
        props,
        validate::{Validator, validate_node},
        value::{Properties, Value},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] strata_config::ConfigError),

    #[error(transparent)]
    CustomEntityError(#[from] custom::CustomEntityError),

    #[error(transparent)]
    ParentEdgeError(#[from] node::ParentEdgeError),

    #[error(transparent)]
    ValidateError(#[from] validate::ValidateError),

    #[error(transparent)]
    ValidationErrors(#[from] validate::ValidationErrors),
}
