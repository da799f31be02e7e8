//! Payload types of the Nautes API
//!
//! Field names are the JSON wire names; manifests may spell them in
//! camelCase, which every multi-word field accepts as an alias.

mod cluster;
mod code_repo;
mod code_repo_binding;
mod deployment_runtime;
mod environment;
mod pipeline_runtime;
mod product;
mod project;

pub use cluster::{Cluster, ClusterResourceInfo, Component, ComponentsList, VCluster};
pub use code_repo::{CodeRepo, CodeRepoGit, GitRepoDetails, Webhook};
pub use code_repo_binding::CodeRepoBinding;
pub use deployment_runtime::{DeploymentDestination, DeploymentRuntime, ManifestSource};
pub use environment::Environment;
pub use pipeline_runtime::{
    AdditionalGitResource, AdditionalResources, CalendarEventSource, EventSource,
    GitlabEventSource, Pipeline, PipelineDestination, PipelineTrigger, ProjectPipelineRuntime,
};
pub use product::{Product, ProductGit, ProductGitRepo};
pub use project::Project;

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the type's default.
///
/// The API server encodes empty lists, maps and sub-objects as `null`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
