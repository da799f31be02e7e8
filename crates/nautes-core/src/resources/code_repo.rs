use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

/// Source repository owned by a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeRepo {
    pub name: String,
    pub product: String,
    pub project: String,
    pub git: Option<CodeRepoGit>,
    pub webhook: Option<Webhook>,
    #[serde(alias = "deploymentRuntime")]
    pub deployment_runtime: bool,
    #[serde(alias = "projectPipelineRuntime")]
    pub pipeline_runtime: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeRepoGit {
    pub gitlab: Option<GitRepoDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub events: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitRepoDetails {
    pub name: String,
    pub path: String,
    pub visibility: String,
    pub description: String,
    #[serde(alias = "sshUrlToRepo")]
    pub ssh_url_to_repo: String,
    #[serde(alias = "httpUrlToRepo")]
    pub http_url_to_repo: String,
}

impl Resource for CodeRepo {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "CodeRepo",
        path_template: "/api/v1/products/{}/coderepos/{}",
        path_var_names: &["product", "name"],
        aliases: &["cr", "crs"],
        apply_order: 4,
        remove_order: 3,
        scope_field: Some("product"),
    };
}

impl Tabular for CodeRepo {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("product").column("product"),
            Field::string("project").column("project").merge_to("product"),
            Field::nested::<CodeRepoGit>("git").optional(),
            Field::nested::<Webhook>("webhook").optional(),
            Field::bool("deployment_runtime"),
            Field::bool("pipeline_runtime"),
        ]
    }
}

impl Tabular for CodeRepoGit {
    fn fields() -> Vec<Field> {
        vec![Field::nested::<GitRepoDetails>("gitlab").optional()]
    }
}

impl Tabular for Webhook {
    fn fields() -> Vec<Field> {
        vec![Field::string("events").list().optional()]
    }
}

impl Tabular for GitRepoDetails {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name"),
            Field::string("path").column("path"),
            Field::string("visibility").column("visibility").merge_to("path"),
            Field::string("description"),
            Field::string("ssh_url_to_repo").column("ssh_url_to_repo"),
            Field::string("http_url_to_repo")
                .column("http_url_to_repo")
                .merge_to("ssh_url_to_repo"),
        ]
    }
}
