use crate::{output::NodeDescriptor, value::Properties};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use thiserror::Error as ThisError;

///
/// Node
///
/// Capability contract for anything a discovery tool can hand to the graph
/// loader. Every method is side-effect free and may be called repeatedly.
///
/// The catalog of implementations is open: canonical entities live in
/// [`crate::catalog`], ad-hoc kinds use [`crate::custom::CustomEntity`], and
/// integrations may implement this trait on their own types.
///

pub trait Node: Debug {
    /// Taxonomy tag; must be registered in the requirement table to be stored.
    fn node_type(&self) -> &str;

    /// Natural key used by the loader to deduplicate the entity.
    fn identifying_properties(&self) -> Properties;

    /// Identifying properties plus descriptive attributes.
    fn properties(&self) -> Properties;

    /// Parent this node belongs to, with the edge label that connects them.
    /// `None` for taxonomy roots.
    fn parent_edge(&self) -> Option<ParentEdge> {
        None
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn node_type(&self) -> &str {
        (**self).node_type()
    }

    fn identifying_properties(&self) -> Properties {
        (**self).identifying_properties()
    }

    fn properties(&self) -> Properties {
        (**self).properties()
    }

    fn parent_edge(&self) -> Option<ParentEdge> {
        (**self).parent_edge()
    }
}

///
/// NodeExt
///
/// Views derived from the [`Node`] methods. Implemented for every node and
/// never overridden, so the label and reference always agree with
/// [`Node::parent_edge`].
///

pub trait NodeExt: Node {
    fn parent_reference(&self) -> Option<ParentRef>;

    /// Edge label to the parent, or an empty string when there is none.
    fn relationship_label(&self) -> String;

    /// This node's own lookup key, in the shape children use to refer to it.
    fn key(&self) -> ParentRef;

    fn descriptor(&self) -> NodeDescriptor;
}

impl<T: Node + ?Sized> NodeExt for T {
    fn parent_reference(&self) -> Option<ParentRef> {
        self.parent_edge().map(ParentEdge::into_reference)
    }

    fn relationship_label(&self) -> String {
        self.parent_edge()
            .map(|edge| edge.relationship)
            .unwrap_or_default()
    }

    fn key(&self) -> ParentRef {
        ParentRef::new(self.node_type(), self.identifying_properties())
    }

    fn descriptor(&self) -> NodeDescriptor {
        NodeDescriptor {
            node_type: self.node_type().to_string(),
            identifying_properties: self.identifying_properties(),
            properties: self.properties(),
            parent: self.parent_edge(),
        }
    }
}

///
/// ParentRef
///
/// Lookup key for another node: its type plus identifying properties.
/// The referenced node does not need to be in memory; the loader resolves it.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParentRef {
    pub node_type: String,
    pub identifying_properties: Properties,
}

impl ParentRef {
    #[must_use]
    pub fn new(node_type: impl Into<String>, identifying_properties: Properties) -> Self {
        Self {
            node_type: node_type.into(),
            identifying_properties,
        }
    }

    /// Reference an in-memory node.
    ///
    /// # Panics
    /// If any identifying property of the node is null or blank text.
    /// Attaching to a half-keyed parent is a bug in the calling tool.
    #[must_use]
    pub fn to(node: &(impl Node + ?Sized)) -> Self {
        let reference = node.key();
        assert!(
            reference.identifying_properties.is_lookup_key(),
            "cannot reference a '{}' node with missing identifying properties",
            reference.node_type
        );

        reference
    }

    /// True when `node` is the entity this reference points at.
    #[must_use]
    pub fn matches(&self, node: &(impl Node + ?Sized)) -> bool {
        self.node_type == node.node_type()
            && self.identifying_properties == node.identifying_properties()
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.node_type)?;
        for (i, (key, value)) in self.identifying_properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value:?}")?;
        }
        f.write_str("}")
    }
}

///
/// ParentEdgeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ParentEdgeError {
    #[error("parent '{node_type}' has missing identifying properties")]
    IncompleteKey { node_type: String },

    #[error("relationship label to parent '{node_type}' must not be empty")]
    EmptyRelationship { node_type: String },
}

///
/// ParentEdge
///
/// A parent reference together with the edge label that connects the child
/// to it. Both halves are checked on construction and on deserialization,
/// so a node cannot declare a parent without a label or a label without a
/// parent.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "RawParentEdge")]
pub struct ParentEdge {
    #[serde(flatten)]
    reference: ParentRef,
    relationship: String,
}

impl ParentEdge {
    /// # Panics
    /// If the reference key is incomplete or the label is empty.
    #[must_use]
    pub fn new(reference: ParentRef, relationship: impl Into<String>) -> Self {
        match Self::try_new(reference, relationship) {
            Ok(edge) => edge,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(
        reference: ParentRef,
        relationship: impl Into<String>,
    ) -> Result<Self, ParentEdgeError> {
        let relationship = relationship.into();
        if !reference.identifying_properties.is_lookup_key() {
            return Err(ParentEdgeError::IncompleteKey {
                node_type: reference.node_type,
            });
        }
        if relationship.trim().is_empty() {
            return Err(ParentEdgeError::EmptyRelationship {
                node_type: reference.node_type,
            });
        }

        Ok(Self {
            reference,
            relationship,
        })
    }

    /// Edge to an in-memory parent node.
    ///
    /// # Panics
    /// If the parent key is incomplete or the label is empty.
    #[must_use]
    pub fn to(parent: &(impl Node + ?Sized), relationship: impl Into<String>) -> Self {
        Self::new(ParentRef::to(parent), relationship)
    }

    #[must_use]
    pub const fn reference(&self) -> &ParentRef {
        &self.reference
    }

    #[must_use]
    pub fn relationship(&self) -> &str {
        &self.relationship
    }

    #[must_use]
    pub fn into_reference(self) -> ParentRef {
        self.reference
    }
}

// RawParentEdge
// wire shape of a parent edge before its halves are checked
#[derive(Deserialize)]
struct RawParentEdge {
    #[serde(flatten)]
    reference: ParentRef,
    relationship: String,
}

impl TryFrom<RawParentEdge> for ParentEdge {
    type Error = ParentEdgeError;

    fn try_from(raw: RawParentEdge) -> Result<Self, Self::Error> {
        Self::try_new(raw.reference, raw.relationship)
    }
}
