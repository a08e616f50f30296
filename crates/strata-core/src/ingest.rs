use crate::{
    discovery::{DiscoveryResult, ForwardReference, find_forward_references},
    node::Node,
    validate::{ValidationErrors, Validator},
};
use thiserror::Error as ThisError;
use tracing::{info, instrument, warn};

///
/// GraphLoader
///
/// Persistence seam implemented by the external graph loader. Nodes arrive
/// parents-first; resolving parent references to stored nodes and creating
/// edges is the loader's job.
///

pub trait GraphLoader {
    type Error: std::error::Error + 'static;

    fn load(&mut self, node: &dyn Node) -> Result<(), Self::Error>;
}

///
/// IngestError
///

#[derive(Debug, ThisError)]
pub enum IngestError<E>
where
    E: std::error::Error + 'static,
{
    #[error("discovery result failed validation:\n{0}")]
    Validation(ValidationErrors),

    #[error("loader rejected node {position} ('{node_type}'): {source}")]
    Load {
        position: usize,
        node_type: String,
        source: E,
    },
}

///
/// IngestReport
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestReport {
    pub loaded: usize,
    pub forward_references: Vec<ForwardReference>,
}

/// Flatten, validate and hand a discovery result to the loader.
///
/// Validation covers the whole result before the loader sees anything, so an
/// invalid result is never partially stored. The first loader error stops
/// the run.
#[instrument(skip_all, fields(nodes = result.node_count()))]
pub fn ingest<L: GraphLoader>(
    result: &DiscoveryResult,
    validator: &Validator<'_>,
    loader: &mut L,
) -> Result<IngestReport, IngestError<L::Error>> {
    let nodes = result.all_nodes();

    validator
        .validate_all(nodes.iter().copied())
        .map_err(|errors| {
            warn!(failures = errors.len(), "discovery result rejected");
            IngestError::Validation(errors)
        })?;

    let forward_references = find_forward_references(&nodes);
    for reference in &forward_references {
        warn!(
            child = reference.child_position,
            child_type = %reference.child_type,
            parent = reference.parent_position,
            "child listed before its parent"
        );
    }

    for (position, node) in nodes.iter().enumerate() {
        loader.load(*node).map_err(|source| IngestError::Load {
            position,
            node_type: node.node_type().to_string(),
            source,
        })?;
    }

    info!(loaded = nodes.len(), "discovery result handed to loader");

    Ok(IngestReport {
        loaded: nodes.len(),
        forward_references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Host, Port, Service},
        custom::CustomEntity,
        node::NodeExt,
        output::NodeDescriptor,
    };
    use strata_taxonomy::RequirementTable;

    ///
    /// RecordingLoader
    ///

    #[derive(Default)]
    struct RecordingLoader {
        loaded: Vec<NodeDescriptor>,
        fail_on: Option<&'static str>,
    }

    #[derive(Debug, ThisError)]
    #[error("store unavailable")]
    struct Unavailable;

    impl GraphLoader for RecordingLoader {
        type Error = Unavailable;

        fn load(&mut self, node: &dyn Node) -> Result<(), Self::Error> {
            if self.fail_on == Some(node.node_type()) {
                return Err(Unavailable);
            }
            self.loaded.push(node.descriptor());

            Ok(())
        }
    }

    fn network() -> DiscoveryResult {
        let host = Host::new("10.0.0.1");
        let port = Port::new("", 80, "tcp").on_host(&host);
        let service = Service::new("", "http").on_port(&port);

        let mut result = DiscoveryResult::new();
        result.push_service(service).push_port(port).push_host(host);
        result
    }

    #[test]
    fn loads_nodes_parents_first() {
        let mut loader = RecordingLoader::default();
        let report = ingest(&network(), &Validator::global(), &mut loader).expect("valid result");

        assert_eq!(report.loaded, 3);
        assert!(report.forward_references.is_empty());
        let types: Vec<_> = loader.loaded.iter().map(|d| d.node_type.as_str()).collect();
        assert_eq!(types, vec!["host", "port", "service"]);
    }

    #[test]
    fn invalid_result_loads_nothing() {
        let mut result = network();
        result.push_port(Port::new("", 443, "tcp"));

        let mut loader = RecordingLoader::default();
        let err = ingest(&result, &Validator::global(), &mut loader).expect_err("orphan port");

        match err {
            IngestError::Validation(errors) => assert_eq!(errors.len(), 1),
            other @ IngestError::Load { .. } => panic!("expected validation failure, got: {other}"),
        }
        assert!(loader.loaded.is_empty(), "nothing reaches the loader");
    }

    #[test]
    fn loader_failure_reports_position() {
        let mut loader = RecordingLoader {
            fail_on: Some("port"),
            ..RecordingLoader::default()
        };
        let err = ingest(&network(), &Validator::global(), &mut loader).expect_err("loader fails");

        assert!(
            matches!(err, IngestError::Load { position: 1, ref node_type, .. } if node_type == "port"),
            "got: {err}"
        );
        assert_eq!(loader.loaded.len(), 1);
    }

    #[test]
    fn reports_custom_children_listed_before_parents() {
        let table = RequirementTable::builder()
            .root("acme:site")
            .dependent("acme:line")
            .build();
        let site = CustomEntity::builder()
            .namespace("acme")
            .kind("site")
            .identifying_property("name", "north")
            .build()
            .expect("site");
        let line = CustomEntity::builder()
            .namespace("acme")
            .kind("line")
            .identifying_property("name", "l1")
            .child_of(&site, "CONTAINS")
            .build()
            .expect("line");

        let mut result = DiscoveryResult::new();
        result.push_custom(line).push_custom(site);

        let mut loader = RecordingLoader::default();
        let report = ingest(&result, &Validator::new(&table), &mut loader).expect("valid types");

        assert_eq!(report.loaded, 2);
        assert_eq!(report.forward_references.len(), 1);
        assert_eq!(report.forward_references[0].child_type, "acme:line");
    }
}
