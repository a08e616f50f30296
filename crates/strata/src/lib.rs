//! ## Crate layout
//! - `config`: TOML taxonomy extensions.
//! - `core`: node contract, catalog, custom entities, validation, discovery
//!   results and the ingest pipeline.
//! - `taxonomy`: canonical type tags, relationship labels and the
//!   requirement table.
//!
//! The `prelude` module carries what a discovery tool needs to build and
//! validate a result.

pub use strata_config as config;
pub use strata_core as core;
pub use strata_taxonomy as taxonomy;

pub use strata_core::{Error, props};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use strata_config::TaxonomyConfig;
    pub use strata_core::prelude::*;
    pub use strata_taxonomy::{RequirementTable, namespace, node_type, relationship};
}
