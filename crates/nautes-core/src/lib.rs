//! Nautes core
//!
//! Resource schema, column projection, request building, table rendering and
//! command dispatch for the Nautes API client. Every resource kind is
//! described once in [`resources`]; everything else is derived from those
//! descriptions.

pub mod dispatcher;
pub mod document;
pub mod error;
pub mod output;
pub mod projector;
pub mod registry;
pub mod request;
pub mod resources;
pub mod schema;
pub mod table;
pub mod transport;

pub use dispatcher::{Answer, BatchReport, ClientOptions, Confirm, Dispatcher, Event, Failure};
pub use document::{ResourceDocument, group_by_kind, parse_documents};
pub use error::{NautesError, Result};
pub use output::{Listing, OutputFormat};
pub use projector::{ColumnProjection, FieldPath, MergeDirective, Projection, project};
pub use registry::{Kind, ListEnvelope, Registry, ResourceKind};
pub use request::{Method, Request};
pub use schema::{Field, FieldKind, Resource, ResourceDescriptor, Scalar, Tabular};
pub use table::Table;
pub use transport::{HttpTransport, Transport};
