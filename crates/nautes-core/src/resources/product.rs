use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

/// Top-level tenant owning environments, projects and repositories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: String,
    pub git: Option<ProductGit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductGit {
    pub gitlab: Option<ProductGitRepo>,
}

/// GitLab group backing the product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductGitRepo {
    pub name: String,
    pub path: String,
    pub visibility: String,
    pub description: String,
    #[serde(alias = "parentID")]
    pub parent_id: i64,
}

impl Resource for Product {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "Product",
        path_template: "/api/v1/products/{}",
        path_var_names: &["name"],
        aliases: &["prod", "prods"],
        apply_order: 1,
        remove_order: 6,
        scope_field: None,
    };
}

impl Tabular for Product {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::nested::<ProductGit>("git").optional(),
        ]
    }
}

impl Tabular for ProductGit {
    fn fields() -> Vec<Field> {
        vec![Field::nested::<ProductGitRepo>("gitlab").optional()]
    }
}

impl Tabular for ProductGitRepo {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name"),
            Field::string("path").column("path"),
            Field::string("visibility").column("visibility"),
            Field::string("description").column("description"),
            Field::int("parent_id"),
        ]
    }
}
