use crate::schema::{Field, Resource, ResourceDescriptor, Tabular};
use serde::{Deserialize, Serialize};

/// Pipeline runtime of a project: event sources, triggers and destination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPipelineRuntime {
    pub name: String,
    pub project: String,
    pub destination: Option<PipelineDestination>,
    pub isolation: String,
    pub pipelines: Option<Vec<Pipeline>>,
    pub product: String,
    #[serde(alias = "pipelineSource")]
    pub pipeline_source: String,
    #[serde(alias = "eventSources")]
    pub event_sources: Option<Vec<EventSource>>,
    #[serde(alias = "pipelineTriggers")]
    pub pipeline_triggers: Option<Vec<PipelineTrigger>>,
    #[serde(alias = "additionalResources", deserialize_with = "super::null_default")]
    pub additional_resources: AdditionalResources,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub name: String,
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineDestination {
    pub environment: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSource {
    pub name: String,
    pub gitlab: Option<GitlabEventSource>,
    pub calendar: Option<CalendarEventSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitlabEventSource {
    #[serde(alias = "repoName")]
    pub repo_name: String,
    pub revision: String,
    #[serde(deserialize_with = "super::null_default")]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarEventSource {
    pub schedule: String,
    pub interval: String,
    #[serde(alias = "exclusionDates", deserialize_with = "super::null_default")]
    pub exclusion_dates: Vec<String>,
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTrigger {
    #[serde(alias = "eventSource")]
    pub event_source: String,
    pub pipeline: String,
    pub revision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalResources {
    #[serde(deserialize_with = "super::null_default")]
    pub git: AdditionalGitResource,
}

/// Extra repository checked out next to the pipeline
///
/// Public repositories are referenced by `url` instead of `coderepo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalGitResource {
    #[serde(alias = "codeRepo")]
    pub coderepo: String,
    pub url: String,
    pub revision: String,
    pub path: String,
}

impl Resource for ProjectPipelineRuntime {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        kind: "ProjectPipelineRuntime",
        path_template: "/api/v1/products/{}/projectpipelineruntimes/{}",
        path_var_names: &["product", "name"],
        aliases: &["ppr", "pprs"],
        apply_order: 6,
        remove_order: 1,
        scope_field: Some("product"),
    };
}

impl Tabular for ProjectPipelineRuntime {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name").column("name"),
            Field::string("project").column("project"),
            Field::nested::<PipelineDestination>("destination").optional(),
            Field::string("isolation"),
            Field::nested::<Pipeline>("pipelines").list().optional(),
            Field::string("product"),
            Field::string("pipeline_source").column("PipelineSource"),
            Field::nested::<EventSource>("event_sources").list().optional(),
            Field::nested::<PipelineTrigger>("pipeline_triggers").list().optional(),
            Field::nested::<AdditionalResources>("additional_resources"),
        ]
    }
}

impl Tabular for Pipeline {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name"),
            Field::string("label"),
            Field::string("path"),
        ]
    }
}

impl Tabular for PipelineDestination {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("environment").column("environment"),
            Field::string("namespace").column("namespace").merge_to("environment"),
        ]
    }
}

impl Tabular for EventSource {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("name"),
            Field::nested::<GitlabEventSource>("gitlab").optional(),
            Field::nested::<CalendarEventSource>("calendar").optional(),
        ]
    }
}

impl Tabular for GitlabEventSource {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("repo_name").column("RepoName"),
            Field::string("revision"),
            Field::string("events").list(),
        ]
    }
}

impl Tabular for CalendarEventSource {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("schedule"),
            Field::string("interval"),
            Field::string("exclusion_dates").list(),
            Field::string("timezone"),
        ]
    }
}

impl Tabular for PipelineTrigger {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("event_source")
                .column("EventSource")
                .merge_to("RepoName"),
            Field::string("pipeline"),
            Field::string("revision"),
        ]
    }
}

impl Tabular for AdditionalResources {
    fn fields() -> Vec<Field> {
        vec![Field::nested::<AdditionalGitResource>("git")]
    }
}

impl Tabular for AdditionalGitResource {
    fn fields() -> Vec<Field> {
        vec![
            Field::string("coderepo"),
            Field::string("url"),
            Field::string("revision"),
            Field::string("path"),
        ]
    }
}
