use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

/// Grants another product's projects access to a code repository
///
/// The binding lives under `product_name`; `product` names the product being
/// granted access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeRepoBinding {
    pub name: String,
    #[serde(alias = "productName")]
    pub product_name: String,
    pub product: String,
    pub coderepo: String,
    pub permissions: String,
    #[serde(deserialize_with = "super::null_default")]
    pub projects: Vec<String>,
}

impl Resource for CodeRepoBinding {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "CodeRepoBinding",
        path_template: "/api/v1/products/{}/coderepobindings/{}",
        path_var_names: &["product_name", "name"],
        aliases: &["crb", "crbs"],
        apply_order: 5,
        remove_order: 2,
        scope_field: Some("product_name"),
    };
}

impl Tabular for CodeRepoBinding {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("product_name"),
            Field::string("product").column("product"),
            Field::string("coderepo").column("coderepo"),
            Field::string("permissions").column("permissions"),
            Field::string("projects").list().column("projects"),
        ]
    }
}
