use crate::canonical::CANONICAL_TYPES;
use std::{collections::BTreeMap, sync::LazyLock};
use strata_config::TaxonomyConfig;
use tracing::debug;

///
/// GLOBAL
/// the process-wide canonical table, built on first access and never mutated
///

static GLOBAL: LazyLock<RequirementTable> = LazyLock::new(|| {
    let table = RequirementTable::canonical();
    debug!(types = table.len(), "canonical requirement table initialized");

    table
});

///
/// NodeTypeRule
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NodeTypeRule {
    pub requires_parent: bool,
}

///
/// RequirementTable
///
/// Immutable mapping of node type to its storage rule.
/// Built once, then only read; hand it to a validator by reference.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequirementTable {
    rules: BTreeMap<String, NodeTypeRule>,
}

impl RequirementTable {
    #[must_use]
    pub fn builder() -> RequirementTableBuilder {
        RequirementTableBuilder::default()
    }

    /// Table containing exactly the canonical taxonomy.
    #[must_use]
    pub fn canonical() -> Self {
        Self::builder().extend_canonical().build()
    }

    /// Shared canonical table for callers that do not inject their own.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Canonical entries (unless excluded) overlaid with the configured ones.
    #[must_use]
    pub fn from_config(config: &TaxonomyConfig) -> Self {
        let mut builder = Self::builder();
        if config.include_canonical {
            builder = builder.extend_canonical();
        }

        builder.extend_from(config).build()
    }

    /// `None` when the type is not part of the taxonomy.
    #[must_use]
    pub fn requires_parent(&self, node_type: &str) -> Option<bool> {
        self.rules.get(node_type).map(|rule| rule.requires_parent)
    }

    #[must_use]
    pub fn get(&self, node_type: &str) -> Option<NodeTypeRule> {
        self.rules.get(node_type).copied()
    }

    #[must_use]
    pub fn contains(&self, node_type: &str) -> bool {
        self.rules.contains_key(node_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in type-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeTypeRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), *rule))
    }

    /// Iterate the types that must declare a parent.
    pub fn dependent_types(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, rule)| rule.requires_parent)
            .map(|(name, _)| name)
    }
}

///
/// RequirementTableBuilder
///
/// Later entries for the same type replace earlier ones.
///

#[derive(Debug, Default)]
pub struct RequirementTableBuilder {
    rules: BTreeMap<String, NodeTypeRule>,
}

impl RequirementTableBuilder {
    /// Register a type that may be stored without a parent.
    #[must_use]
    pub fn root(self, node_type: impl Into<String>) -> Self {
        self.rule(node_type, false)
    }

    /// Register a type that must declare a parent.
    #[must_use]
    pub fn dependent(self, node_type: impl Into<String>) -> Self {
        self.rule(node_type, true)
    }

    #[must_use]
    pub fn rule(mut self, node_type: impl Into<String>, requires_parent: bool) -> Self {
        self.rules
            .insert(node_type.into(), NodeTypeRule { requires_parent });
        self
    }

    #[must_use]
    pub fn extend_canonical(mut self) -> Self {
        for ty in CANONICAL_TYPES {
            self = self.rule(ty.name, ty.requires_parent);
        }
        self
    }

    #[must_use]
    pub fn extend_from(mut self, config: &TaxonomyConfig) -> Self {
        for (name, ty) in &config.types {
            self = self.rule(name.as_str(), ty.requires_parent);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> RequirementTable {
        RequirementTable { rules: self.rules }
    }
}
