//! Manifest document source
//!
//! A source file holds any number of YAML documents separated by `---`.
//! Each document carries `apiVersion`, `kind` and a `spec` payload.

use crate::error::{NautesError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One parsed manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDocument {
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    pub kind: String,
    /// Untyped payload, decoded by the kind it belongs to.
    #[serde(default)]
    pub spec: serde_yaml::Value,
}

/// Parses every non-empty document of a multi-document YAML stream.
pub fn parse_documents(source: &str) -> Result<Vec<ResourceDocument>> {
    let mut documents = Vec::new();

    for (index, raw) in serde_yaml::Deserializer::from_str(source).enumerate() {
        let value = serde_yaml::Value::deserialize(raw)
            .map_err(|e| NautesError::decode(format!("document #{}", index + 1), e))?;
        if value.is_null() {
            continue;
        }

        let document: ResourceDocument = serde_yaml::from_value(value)
            .map_err(|e| NautesError::decode(format!("document #{}", index + 1), e))?;
        debug!(kind = %document.kind, index, "parsed document");
        documents.push(document);
    }

    Ok(documents)
}

/// Groups documents by declared kind, keeping source order inside each group.
pub fn group_by_kind(documents: &[ResourceDocument]) -> BTreeMap<&str, Vec<&ResourceDocument>> {
    let mut groups: BTreeMap<&str, Vec<&ResourceDocument>> = BTreeMap::new();
    for document in documents {
        groups.entry(document.kind.as_str()).or_default().push(document);
    }
    groups
}
