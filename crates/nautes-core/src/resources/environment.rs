use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

/// Deployment target of a product, bound to one cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub name: String,
    pub product: String,
    pub cluster: String,
    #[serde(alias = "envType")]
    pub env_type: String,
}

impl Resource for Environment {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "Environment",
        path_template: "/api/v1/products/{}/environments/{}",
        path_var_names: &["product", "name"],
        aliases: &["env", "envs"],
        apply_order: 2,
        remove_order: 5,
        scope_field: Some("product"),
    };
}

impl Tabular for Environment {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("product").column("product"),
            Field::string("cluster").column("cluster"),
            Field::string("env_type").column("env_type"),
        ]
    }
}
