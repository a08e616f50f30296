use crate::node::Node;
use std::fmt;
use strata_taxonomy::RequirementTable;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// ValidateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("unknown node type '{node_type}'")]
    UnknownNodeType { node_type: String },

    #[error(
        "node type '{node_type}' requires a parent; attach a parent reference before storing it"
    )]
    MissingRequiredParent { node_type: String },
}

impl ValidateError {
    #[must_use]
    pub fn node_type(&self) -> &str {
        match self {
            Self::UnknownNodeType { node_type } | Self::MissingRequiredParent { node_type } => {
                node_type
            }
        }
    }
}

///
/// Validator
///
/// Checks nodes against an injected requirement table.
/// Pure and synchronous; the table is only read.
///

#[derive(Clone, Copy, Debug)]
pub struct Validator<'a> {
    table: &'a RequirementTable,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub const fn new(table: &'a RequirementTable) -> Self {
        Self { table }
    }

    /// Validator over the process-wide canonical table.
    #[must_use]
    pub fn global() -> Validator<'static> {
        Validator::new(RequirementTable::global())
    }

    #[must_use]
    pub const fn table(&self) -> &'a RequirementTable {
        self.table
    }

    pub fn validate_node(&self, node: &(impl Node + ?Sized)) -> Result<(), ValidateError> {
        let node_type = node.node_type();

        let Some(requires_parent) = self.table.requires_parent(node_type) else {
            debug!(node_type, "rejected node of unknown type");
            return Err(ValidateError::UnknownNodeType {
                node_type: node_type.to_string(),
            });
        };

        if requires_parent && node.parent_edge().is_none() {
            debug!(node_type, "rejected dependent node without parent");
            return Err(ValidateError::MissingRequiredParent {
                node_type: node_type.to_string(),
            });
        }

        Ok(())
    }

    /// Validate every node, collecting all failures with their positions.
    pub fn validate_all<'n, I>(&self, nodes: I) -> Result<(), ValidationErrors>
    where
        I: IntoIterator<Item = &'n dyn Node>,
    {
        let mut errors = ValidationErrors::default();
        for (position, node) in nodes.into_iter().enumerate() {
            if let Err(error) = self.validate_node(node) {
                errors.push(position, error);
            }
        }

        errors.result()
    }
}

/// Validate against the process-wide canonical table.
pub fn validate_node(node: &(impl Node + ?Sized)) -> Result<(), ValidateError> {
    Validator::global().validate_node(node)
}

///
/// ValidationErrors
/// every failure from one pass, keyed by position in the validated sequence
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<(usize, ValidateError)>,
}

impl ValidationErrors {
    pub fn push(&mut self, position: usize, error: ValidateError) {
        self.errors.push((position, error));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ValidateError)> {
        self.errors.iter().map(|(position, error)| (*position, error))
    }

    /// `Ok` when nothing was collected.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (position, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "node {position}: {error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
