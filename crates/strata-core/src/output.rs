use crate::{discovery::DiscoveryResult, node::ParentEdge, value::Properties};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Key under which tools submit their discovery result for the loader.
pub const OUTPUT_KEY: &str = "discovery_result";

///
/// NodeDescriptor
///
/// Owned, serializable snapshot of one node as the loader consumes it.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NodeDescriptor {
    pub node_type: String,
    pub identifying_properties: Properties,
    pub properties: Properties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentEdge>,
}

impl DiscoveryResult {
    /// Tool output envelope: `{ "discovery_result": { "nodes": [...] } }`,
    /// nodes in flattening order.
    pub fn to_output(&self) -> serde_json::Result<JsonValue> {
        let nodes = self
            .descriptors()
            .into_iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;

        let mut body = Map::new();
        body.insert("nodes".to_string(), JsonValue::Array(nodes));

        let mut envelope = Map::new();
        envelope.insert(OUTPUT_KEY.to_string(), JsonValue::Object(body));

        Ok(JsonValue::Object(envelope))
    }
}

/// Pull the node list back out of a tool output envelope.
pub fn extract_descriptors(output: &JsonValue) -> Option<serde_json::Result<Vec<NodeDescriptor>>> {
    let nodes = output.get(OUTPUT_KEY)?.get("nodes")?;

    Some(serde_json::from_value(nodes.clone()))
}
