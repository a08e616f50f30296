use strata::{Error, prelude::*};
use strata::core::{
    output::{OUTPUT_KEY, extract_descriptors},
    validate::ValidateError,
};
use thiserror::Error as ThisError;

///
/// MemoryLoader
/// keeps loaded node keys in arrival order
///

#[derive(Default)]
struct MemoryLoader {
    keys: Vec<ParentRef>,
}

#[derive(Debug, ThisError)]
#[error("unreachable")]
struct Never;

impl GraphLoader for MemoryLoader {
    type Error = Never;

    fn load(&mut self, node: &dyn Node) -> Result<(), Self::Error> {
        if let Some(parent) = node.parent_reference() {
            assert!(
                self.keys.contains(&parent),
                "parent {parent} of '{}' must be loaded first",
                node.node_type()
            );
        }
        self.keys.push(node.key());

        Ok(())
    }
}

#[test]
fn host_port_service_scenario() {
    let mut result = DiscoveryResult::new();
    result
        .push_service(Service::new("10.0.0.1:80:tcp", "http"))
        .push_port(Port::new("10.0.0.1", 80, "tcp"))
        .push_host(Host::new("10.0.0.1"));

    let nodes = result.all_nodes();
    let types: Vec<_> = nodes.iter().map(|n| n.node_type()).collect();
    assert_eq!(
        types,
        vec![node_type::HOST, node_type::PORT, node_type::SERVICE]
    );
    for node in &nodes {
        validate_node(*node).expect("legacy key fields imply consistent parents");
    }

    let mut loader = MemoryLoader::default();
    let report = ingest(&result, &Validator::global(), &mut loader).expect("ingest succeeds");
    assert_eq!(report.loaded, 3);
    assert_eq!(loader.keys.len(), 3);
}

#[test]
fn kubernetes_pod_custom_entity_scenario() {
    let payments = CustomEntity::builder()
        .namespace(namespace::K8S)
        .kind("namespace")
        .identifying(props! { "cluster" => "prod", "name" => "payments" })
        .parent(
            ParentRef::new(node_type::K8S_CLUSTER, props! { "name" => "prod" }),
            relationship::CONTAINS,
        )
        .build()
        .expect("namespace entity");
    let pod = CustomEntity::builder()
        .kind("pod")
        .identifying(props! { "namespace" => "payments", "name" => "api-0" })
        .property("phase", "Running")
        .child_of(&payments, relationship::CONTAINS)
        .namespace(namespace::K8S)
        .build()
        .expect("pod entity");

    assert_eq!(pod.node_type(), "k8s:pod");
    assert!(!pod.relationship_label().is_empty());

    let table = RequirementTable::builder().dependent("k8s:pod").build();
    Validator::new(&table)
        .validate_node(&pod)
        .expect("registered parent-required type with a parent");
    validate_node(&pod).expect("k8s:pod is canonical and parent-required");
}

#[test]
fn config_registers_tool_specific_types() {
    let config = TaxonomyConfig::from_toml_str(
        r#"
        [types."acme:site"]

        [types."acme:line"]
        requires_parent = true
        "#,
    )
    .expect("config parses");
    let table = RequirementTable::from_config(&config);
    let validator = Validator::new(&table);

    let site = CustomEntity::builder()
        .namespace("acme")
        .kind("site")
        .identifying_property("name", "north")
        .build()
        .expect("site");
    let orphan_line = CustomEntity::builder()
        .namespace("acme")
        .kind("line")
        .identifying_property("name", "l1")
        .build()
        .expect("line");

    assert_eq!(validator.validate_node(&site), Ok(()));
    assert_eq!(validator.validate_node(&Host::new("10.0.0.1")), Ok(()));
    assert_eq!(
        validator.validate_node(&orphan_line),
        Err(ValidateError::MissingRequiredParent {
            node_type: "acme:line".to_string()
        })
    );
    assert!(matches!(
        validate_node(&site),
        Err(ValidateError::UnknownNodeType { .. })
    ));
}

#[test]
fn full_network_result_round_trips_through_envelope() {
    let host = Host::new("10.0.0.1").with_hostname("web-1");
    let domain = Domain::new("example.com");
    let port = Port::new("", 443, "tcp").on_host(&host);
    let mut service = Service::new("", "https").on_port(&port);
    service.is_tls = true;
    let endpoint = Endpoint::new("", "https://web-1.example.com/login").on_service(&service);
    let tech = Technology::new("", "nginx").on_service(&service);
    let sub = Subdomain::new("", "web-1.example.com").on_domain(&domain);

    let mut result = DiscoveryResult::new();
    result
        .push_technology(tech)
        .push_endpoint(endpoint)
        .push_service(service)
        .push_subdomain(sub)
        .push_port(port)
        .push_certificate(Certificate::new("ab:cd"))
        .push_domain(domain)
        .push_host(host);

    assert_eq!(result.node_count(), 8);
    assert!(result.forward_references().is_empty());
    Validator::global()
        .validate_all(result.all_nodes())
        .expect("every node validates");

    let output = result.to_output().expect("envelope serializes");
    assert!(output.get(OUTPUT_KEY).is_some());
    let descriptors = extract_descriptors(&output)
        .expect("nodes present")
        .expect("nodes decode");
    let types: Vec<_> = descriptors.iter().map(|d| d.node_type.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "host",
            "domain",
            "certificate",
            "port",
            "subdomain",
            "service",
            "endpoint",
            "technology"
        ]
    );
}

#[test]
fn errors_convert_into_crate_error() {
    fn check(node: &dyn Node) -> Result<(), Error> {
        validate_node(node)?;
        Ok(())
    }

    fn build() -> Result<CustomEntity, Error> {
        Ok(CustomEntity::builder().namespace("acme").build()?)
    }

    let err = check(&Port::new("", 80, "tcp")).expect_err("orphan port");
    assert!(matches!(err, Error::ValidateError(_)));
    assert!(err.to_string().contains("requires a parent"));

    assert!(matches!(build(), Err(Error::CustomEntityError(_))));
}

#[test]
fn config_and_edge_errors_convert_into_crate_error() {
    fn load(source: &str) -> Result<TaxonomyConfig, Error> {
        Ok(TaxonomyConfig::from_toml_str(source)?)
    }

    fn attach(reference: ParentRef) -> Result<ParentEdge, Error> {
        Ok(ParentEdge::try_new(reference, relationship::CONTAINS)?)
    }

    assert!(matches!(
        load("include_everything = true"),
        Err(Error::ConfigError(_))
    ));
    assert!(load("[types.\"acme:site\"]").is_ok());

    let blank = ParentRef::new(node_type::HOST, props! { "ip" => "" });
    let err = attach(blank).expect_err("blank key");
    assert!(matches!(err, Error::ParentEdgeError(_)));
    assert!(err.to_string().contains("missing identifying properties"));
}

#[test]
fn version_is_exported() {
    assert!(!strata::VERSION.is_empty());
}

#[test]
fn envelope_is_plain_json() {
    let mut result = DiscoveryResult::new();
    result.push_host(Host::new("10.0.0.1"));

    let output = result.to_output().expect("envelope serializes");
    let text = serde_json::to_string(&output).expect("serialize envelope");
    assert!(text.starts_with(r#"{"discovery_result":{"nodes":["#), "got: {text}");
}
