//! Declarative resource schema
//!
//! Every payload type describes its own shape once through [`Tabular`];
//! commands, URLs and display tables are all derived from that description
//! instead of being written per resource kind.
//!
//! ```text
//! ClusterSpec ──fields()──▶ [Field { name, kind, column, merge_to }, ...]
//!      │                              │
//!      │ DESCRIPTOR                   ├─▶ projector  (columns + merges)
//!      ▼                              └─▶ table      (cell extraction)
//! ResourceDescriptor ──▶ request builder (path template + path vars)
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Leaf value types that can be rendered into a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Str,
    Bool,
    Int,
    Float,
}

/// Shape of a declared field
#[derive(Debug, Clone)]
pub enum FieldKind {
    Scalar(Scalar),
    /// Nested structure; the function returns its field list.
    Struct(fn() -> Vec<Field>),
    /// Nullable value (serialized as `null` when absent).
    Optional(Box<FieldKind>),
    List(Box<FieldKind>),
    /// Key/value mapping. Never projected into columns.
    Map,
}

impl FieldKind {
    /// Strips any number of `Optional` layers.
    pub fn unwrap_optional(&self) -> &FieldKind {
        match self {
            FieldKind::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }
}

/// One declared field of a payload type
#[derive(Debug, Clone)]
pub struct Field {
    /// Wire (JSON) name of the field.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Display annotation, optionally `Display:subfield`.
    pub column: Option<&'static str>,
    /// Display name of the column this field is folded into.
    pub merge_to: Option<&'static str>,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            column: None,
            merge_to: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Str))
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Bool))
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Int))
    }

    pub fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Float))
    }

    pub fn nested<T: Tabular>(name: &'static str) -> Self {
        Self::new(name, FieldKind::Struct(T::fields))
    }

    pub fn map(name: &'static str) -> Self {
        Self::new(name, FieldKind::Map)
    }

    /// Turns the field into a list of its current kind.
    pub fn list(mut self) -> Self {
        self.kind = FieldKind::List(Box::new(self.kind));
        self
    }

    /// Marks the field as nullable.
    pub fn optional(mut self) -> Self {
        self.kind = FieldKind::Optional(Box::new(self.kind));
        self
    }

    pub fn column(mut self, display: &'static str) -> Self {
        self.column = Some(display);
        self
    }

    pub fn merge_to(mut self, target: &'static str) -> Self {
        self.merge_to = Some(target);
        self
    }
}

/// Types whose shape can be walked for display
pub trait Tabular {
    fn fields() -> Vec<Field>;
}

/// Static, per-kind request metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Canonical kind as written in manifests, e.g. `CodeRepoBinding`.
    pub kind: &'static str,
    /// URL path with positional `{}` placeholders.
    pub path_template: &'static str,
    /// Payload fields filling the placeholders, in placeholder order.
    pub path_var_names: &'static [&'static str],
    pub aliases: &'static [&'static str],
    pub apply_order: u32,
    pub remove_order: u32,
    /// Payload field set from the product scope flag, if the kind is scoped.
    pub scope_field: Option<&'static str>,
}

impl ResourceDescriptor {
    /// Lowercased kind, used as the primary command name.
    pub fn command_name(&self) -> String {
        self.kind.to_lowercase()
    }

    /// Every name the kind answers to on the command line.
    pub fn command_names(&self) -> Vec<String> {
        let name = self.command_name();
        let plural = format!("{name}s");
        let mut names = vec![name, plural];
        names.extend(self.aliases.iter().map(|a| a.to_string()));
        names
    }

    /// Wire name of the field that identifies a single instance.
    pub fn name_field(&self) -> &'static str {
        self.path_var_names.last().copied().unwrap_or("name")
    }
}

/// A payload type bound to its kind descriptor
pub trait Resource:
    Tabular + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const DESCRIPTOR: ResourceDescriptor;
}
