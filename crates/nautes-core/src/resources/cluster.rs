use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kubernetes cluster registered with Nautes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub name: String,
    #[serde(alias = "apiServer")]
    pub api_server: String,
    #[serde(alias = "clusterKind")]
    pub cluster_kind: String,
    pub usage: String,
    #[serde(alias = "clusterType")]
    pub cluster_type: String,
    #[serde(alias = "workerType")]
    pub worker_type: String,
    #[serde(alias = "hostCluster")]
    pub host_cluster: String,
    #[serde(alias = "primaryDomain")]
    pub primary_domain: String,
    pub kubeconfig: String,
    #[serde(deserialize_with = "super::null_default")]
    pub vcluster: VCluster,
    /// Namespace name to the products allowed to use it.
    #[serde(alias = "reservedNamespacesAllowedProducts", deserialize_with = "super::null_default")]
    pub reserved_namespaces_allowed_products: BTreeMap<String, Vec<String>>,
    /// Product name to the cluster-scoped resources it may manage.
    #[serde(alias = "productAllowedClusterResources", deserialize_with = "super::null_default")]
    pub product_allowed_cluster_resources: BTreeMap<String, Vec<ClusterResourceInfo>>,
    #[serde(alias = "componentsList", deserialize_with = "super::null_default")]
    pub components_list: ComponentsList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterResourceInfo {
    pub kind: String,
    pub group: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VCluster {
    #[serde(alias = "httpsNodePort")]
    pub https_node_port: String,
}

/// Platform components installed on the cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsList {
    pub deployment: Option<Component>,
    #[serde(alias = "eventListener")]
    pub event_listener: Option<Component>,
    pub gateway: Option<Component>,
    #[serde(alias = "multiTenant")]
    pub multi_tenant: Option<Component>,
    pub pipeline: Option<Component>,
    #[serde(alias = "progressiveDelivery")]
    pub progressive_delivery: Option<Component>,
    #[serde(alias = "secretSync")]
    pub secret_sync: Option<Component>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    pub name: String,
    pub namespace: String,
    #[serde(deserialize_with = "super::null_default")]
    pub additions: BTreeMap<String, String>,
}

impl Resource for Cluster {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "Cluster",
        path_template: "/api/v1/clusters/{}",
        path_var_names: &["name"],
        aliases: &["cls"],
        apply_order: 0,
        remove_order: 7,
        scope_field: None,
    };
}

impl Tabular for Cluster {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("api_server").column("ApiServer"),
            Field::string("cluster_kind"),
            Field::string("usage").column("Usage").merge_to("ApiServer"),
            Field::string("cluster_type").column("CT").merge_to("ApiServer"),
            Field::string("worker_type").column("WT").merge_to("ApiServer"),
            Field::string("host_cluster"),
            Field::string("primary_domain").column("PrimaryDomain"),
            Field::string("kubeconfig"),
            Field::nested::<VCluster>("vcluster"),
            Field::map("reserved_namespaces_allowed_products"),
            Field::map("product_allowed_cluster_resources"),
            Field::nested::<ComponentsList>("components_list").column("ComponentsList:name"),
        ]
    }
}

impl Tabular for VCluster {
    fn fields() -> Vec<Field> {
        vec![Field::string("https_node_port")]
    }
}

impl Tabular for ComponentsList {
    fn fields() -> Vec<Field> {
        [
            "deployment",
            "event_listener",
            "gateway",
            "multi_tenant",
            "pipeline",
            "progressive_delivery",
            "secret_sync",
        ]
        .into_iter()
        .map(|name| Field::nested::<Component>(name).optional())
        .collect()
    }
}

impl Tabular for Component {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name"),
            Field::string("namespace"),
            Field::map("additions"),
        ]
    }
}
