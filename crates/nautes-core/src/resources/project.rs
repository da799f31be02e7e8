use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub product: String,
    pub language: String,
}

impl Resource for Project {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "Project",
        path_template: "/api/v1/products/{}/projects/{}",
        path_var_names: &["product", "name"],
        aliases: &["pro", "proj", "pros"],
        apply_order: 3,
        remove_order: 4,
        scope_field: Some("product"),
    };
}

impl Tabular for Project {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("product").column("product"),
            Field::string("language").column("language"),
        ]
    }
}
