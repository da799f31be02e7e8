//! Registered resource kinds
//!
//! [`ResourceKind`] is the object-safe face of a [`Resource`] type. The
//! [`Registry`] holds one entry per kind and is the single table commands are
//! generated from.

use crate::error::{NautesError, Result};
use crate::resources;
use crate::schema::{Field, Resource, ResourceDescriptor};
use serde::Deserialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Response shape of a list GET
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub items: Option<Vec<T>>,
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// Type-erased operations on one resource kind
pub trait ResourceKind: Send + Sync {
    fn descriptor(&self) -> ResourceDescriptor;

    fn fields(&self) -> Vec<Field>;

    /// Zero-valued payload, used to address instances by name.
    fn blank(&self) -> Result<Value>;

    /// Decodes a manifest `spec` into the wire form of the payload.
    fn decode_manifest(&self, spec: &serde_yaml::Value) -> Result<Value>;

    /// Decodes a single-item response body.
    fn decode_item(&self, body: &[u8]) -> Result<Value>;

    /// Decodes a list response body.
    fn decode_list(&self, body: &[u8]) -> Result<Vec<Value>>;
}

/// [`ResourceKind`] implementation for a concrete payload type
pub struct Kind<R>(PhantomData<fn() -> R>);

impl<R: Resource> Kind<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    fn to_wire(payload: &R) -> Result<Value> {
        serde_json::to_value(payload)
            .map_err(|e| NautesError::decode(format!("{} payload", R::DESCRIPTOR.kind), e))
    }
}

impl<R: Resource> Default for Kind<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceKind for Kind<R> {
    fn descriptor(&self) -> ResourceDescriptor {
        R::DESCRIPTOR
    }

    fn fields(&self) -> Vec<Field> {
        R::fields()
    }

    fn blank(&self) -> Result<Value> {
        Self::to_wire(&R::default())
    }

    fn decode_manifest(&self, spec: &serde_yaml::Value) -> Result<Value> {
        let payload: R = if spec.is_null() {
            R::default()
        } else {
            serde_yaml::from_value(spec.clone()).map_err(|e| {
                NautesError::decode(format!("{} manifest", R::DESCRIPTOR.kind), e)
            })?
        };
        Self::to_wire(&payload)
    }

    fn decode_item(&self, body: &[u8]) -> Result<Value> {
        let payload: R = serde_json::from_slice(body)
            .map_err(|e| NautesError::decode(format!("{} response", R::DESCRIPTOR.kind), e))?;
        Self::to_wire(&payload)
    }

    fn decode_list(&self, body: &[u8]) -> Result<Vec<Value>> {
        let envelope: ListEnvelope<R> = serde_json::from_slice(body).map_err(|e| {
            NautesError::decode(format!("{} list response", R::DESCRIPTOR.kind), e)
        })?;
        envelope.into_items().iter().map(Self::to_wire).collect()
    }
}

/// All kinds known to the client
pub struct Registry {
    kinds: Vec<Box<dyn ResourceKind>>,
}

impl Registry {
    pub fn new(kinds: Vec<Box<dyn ResourceKind>>) -> Self {
        Self { kinds }
    }

    /// The eight kinds served by the Nautes API.
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(Kind::<resources::Cluster>::new()),
            Box::new(Kind::<resources::Product>::new()),
            Box::new(Kind::<resources::Environment>::new()),
            Box::new(Kind::<resources::Project>::new()),
            Box::new(Kind::<resources::CodeRepo>::new()),
            Box::new(Kind::<resources::CodeRepoBinding>::new()),
            Box::new(Kind::<resources::ProjectPipelineRuntime>::new()),
            Box::new(Kind::<resources::DeploymentRuntime>::new()),
        ])
    }

    pub fn kinds(&self) -> impl Iterator<Item = &dyn ResourceKind> {
        self.kinds.iter().map(|k| k.as_ref())
    }

    /// Looks a kind up by its manifest name (case-sensitive).
    pub fn by_kind(&self, kind: &str) -> Option<&dyn ResourceKind> {
        self.kinds().find(|k| k.descriptor().kind == kind)
    }

    /// Looks a kind up by any of its command names.
    pub fn resolve(&self, command_name: &str) -> Result<&dyn ResourceKind> {
        self.kinds()
            .find(|k| {
                k.descriptor()
                    .command_names()
                    .iter()
                    .any(|name| name == command_name)
            })
            .ok_or_else(|| NautesError::UnknownKind(command_name.to_string()))
    }

    /// Kind names sorted by create/update priority.
    pub fn apply_order(&self) -> Vec<&'static str> {
        self.ordered_by(|d| d.apply_order)
    }

    /// Kind names sorted by deletion priority.
    pub fn remove_order(&self) -> Vec<&'static str> {
        self.ordered_by(|d| d.remove_order)
    }

    fn ordered_by(&self, priority: impl Fn(&ResourceDescriptor) -> u32) -> Vec<&'static str> {
        let mut descriptors: Vec<ResourceDescriptor> =
            self.kinds().map(|k| k.descriptor()).collect();
        descriptors.sort_by_key(priority);
        descriptors.into_iter().map(|d| d.kind).collect()
    }
}
