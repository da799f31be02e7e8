use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

/// Continuous deployment of a manifest repository into an environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentRuntime {
    pub name: String,
    pub product: String,
    #[serde(alias = "manifestsource", alias = "manifestSource")]
    pub manifest_source: Option<ManifestSource>,
    #[serde(alias = "projectsRef", deserialize_with = "super::null_default")]
    pub projects_ref: Vec<String>,
    pub destination: Option<DeploymentDestination>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSource {
    #[serde(alias = "codeRepo")]
    pub code_repo: String,
    #[serde(alias = "targetRevision")]
    pub target_revision: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentDestination {
    pub environment: String,
    #[serde(deserialize_with = "super::null_default")]
    pub namespaces: Vec<String>,
}

impl Resource for DeploymentRuntime {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "DeploymentRuntime",
        path_template: "/api/v1/products/{}/deploymentruntimes/{}",
        path_var_names: &["product", "name"],
        aliases: &["dr", "drs"],
        apply_order: 7,
        remove_order: 0,
        scope_field: Some("product"),
    };
}

impl Tabular for DeploymentRuntime {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("product").column("product"),
            Field::nested::<ManifestSource>("manifest_source").optional(),
            Field::string("projects_ref").list().column("projectsRef"),
            Field::nested::<DeploymentDestination>("destination").optional(),
        ]
    }
}

impl Tabular for ManifestSource {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("code_repo").column("codeRepo"),
            Field::string("target_revision")
                .column("targetRevision")
                .merge_to("codeRepo"),
            Field::string("path").column("path").merge_to("codeRepo"),
        ]
    }
}

impl Tabular for DeploymentDestination {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("environment").column("environment"),
            Field::string("namespaces")
                .list()
                .column("namespaces")
                .merge_to("environment"),
        ]
    }
}
