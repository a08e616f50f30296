use crate::{
    node::{Node, ParentEdge, ParentRef},
    value::{Properties, Value},
};
use serde::Serialize;
use strata_taxonomy::{NAMESPACE_SEPARATOR, namespaced};
use thiserror::Error as ThisError;

///
/// CustomEntityError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CustomEntityError {
    #[error("custom entity is missing a namespace")]
    MissingNamespace,

    #[error("custom entity is missing a kind")]
    MissingKind,

    #[error("custom entity {segment} '{value}' must not contain ':'")]
    InvalidSegment {
        segment: &'static str,
        value: String,
    },
}

///
/// CustomEntity
///
/// Generic node for kinds outside the canonical catalog, typed by
/// `(namespace, kind)` and carrying a dynamic property bag.
/// Immutable once built.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomEntity {
    node_type: String,
    namespace: String,
    kind: String,
    identifying: Properties,
    properties: Properties,
    parent: Option<ParentEdge>,
}

impl CustomEntity {
    #[must_use]
    pub fn builder() -> CustomEntityBuilder {
        CustomEntityBuilder::default()
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl Node for CustomEntity {
    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn identifying_properties(&self) -> Properties {
        self.identifying.clone()
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        self.parent.clone()
    }
}

///
/// CustomEntityBuilder
///
/// Steps may be called in any order; `build` checks the result.
///

#[derive(Clone, Debug, Default)]
pub struct CustomEntityBuilder {
    namespace: Option<String>,
    kind: Option<String>,
    identifying: Properties,
    properties: Properties,
    parent: Option<ParentEdge>,
}

impl CustomEntityBuilder {
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Replace the identifying property set.
    #[must_use]
    pub fn identifying(mut self, identifying: Properties) -> Self {
        self.identifying = identifying;
        self
    }

    /// Add one identifying property.
    #[must_use]
    pub fn identifying_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.identifying.set(key, value);
        self
    }

    /// Replace the descriptive property set.
    #[must_use]
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Add one descriptive property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// # Panics
    /// If the reference key is incomplete or the label is empty.
    #[must_use]
    pub fn parent(mut self, reference: ParentRef, relationship: impl Into<String>) -> Self {
        self.parent = Some(ParentEdge::new(reference, relationship));
        self
    }

    /// Attach to an in-memory parent node.
    ///
    /// # Panics
    /// If the parent key is incomplete or the label is empty.
    #[must_use]
    pub fn child_of(
        mut self,
        parent: &(impl Node + ?Sized),
        relationship: impl Into<String>,
    ) -> Self {
        self.parent = Some(ParentEdge::to(parent, relationship));
        self
    }

    /// Finish the entity. The full property set is the descriptive
    /// properties overlaid with the identifying ones.
    pub fn build(self) -> Result<CustomEntity, CustomEntityError> {
        let namespace = segment(self.namespace, "namespace", CustomEntityError::MissingNamespace)?;
        let kind = segment(self.kind, "kind", CustomEntityError::MissingKind)?;

        let mut properties = self.properties;
        properties.overlay(&self.identifying);

        Ok(CustomEntity {
            node_type: namespaced(&namespace, &kind),
            namespace,
            kind,
            identifying: self.identifying,
            properties,
            parent: self.parent,
        })
    }
}

// segment
fn segment(
    value: Option<String>,
    name: &'static str,
    missing: CustomEntityError,
) -> Result<String, CustomEntityError> {
    let value = value.filter(|v| !v.trim().is_empty()).ok_or(missing)?;
    if value.contains(NAMESPACE_SEPARATOR) {
        return Err(CustomEntityError::InvalidSegment {
            segment: name,
            value,
        });
    }

    Ok(value)
}
