//! Command dispatch
//!
//! Ties documents, descriptors, the request builder and a [`Transport`]
//! together for `apply`, `remove`, `get` and `delete`. Requests are sent one
//! at a time in the order given by the caller.
//!
//! ```text
//! documents ──group_by_kind──▶ for kind in order ──▶ for doc in group
//!                                                     │ decode_manifest
//!                                                     │ request::build
//!                                                     ▼
//!                                               Transport::send
//! ```

use crate::document::{ResourceDocument, group_by_kind};
use crate::error::{NautesError, Result};
use crate::output::Listing;
use crate::registry::{Registry, ResourceKind};
use crate::request::{self, Method};
use crate::transport::Transport;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// Connection settings shared by every request of one invocation
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub server: String,
    pub token: String,
    /// Ask the server to skip its compliance check.
    pub skip_check: bool,
}

/// Operator answer to a removal prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Yes, and stop asking for the rest of the batch.
    All,
}

impl Answer {
    /// Parses `y`/`yes`, `n`/`no` and `a`/`all`, ignoring case and padding.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            "a" | "all" => Some(Answer::All),
            _ => None,
        }
    }
}

/// Source of removal confirmations
pub trait Confirm {
    fn ask(&mut self, name: &str) -> Result<Answer>;
}

/// Progress notifications emitted while a batch runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Saved { kind: &'static str, name: String },
    Removed { kind: &'static str, name: String },
    /// The operator declined the removal.
    Cancelled { kind: &'static str, name: String },
    Failed { kind: &'static str, name: String, message: String },
    /// Documents of a kind the client does not handle.
    SkippedKind { kind: String, count: usize },
}

/// One failed item of a batch
#[derive(Debug)]
pub struct Failure {
    pub kind: &'static str,
    pub name: String,
    pub error: NautesError,
}

/// Outcome of a removal batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: usize,
    pub cancelled: usize,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Dispatcher<'a> {
    registry: &'a Registry,
    transport: &'a dyn Transport,
    options: ClientOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a Registry, transport: &'a dyn Transport, options: ClientOptions) -> Self {
        Self {
            registry,
            transport,
            options,
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Creates or updates every document, kind by kind in `order`.
    ///
    /// Stops at the first failure; documents after it are not sent.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn apply(
        &self,
        documents: &[ResourceDocument],
        order: &[&str],
        on_event: &mut dyn FnMut(Event),
    ) -> Result<usize> {
        let mut saved = 0;
        for (kind, document) in self.ordered(documents, order, on_event) {
            let (payload, name) = self.decode(kind, document)?;
            self.send(kind, Method::Post, &payload).await?;

            info!(kind = kind.descriptor().kind, %name, "resource saved");
            on_event(Event::Saved {
                kind: kind.descriptor().kind,
                name,
            });
            saved += 1;
        }
        Ok(saved)
    }

    /// Deletes every document, kind by kind in `order`.
    ///
    /// Transport and server failures are collected and the batch goes on;
    /// malformed documents abort it.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn remove(
        &self,
        documents: &[ResourceDocument],
        order: &[&str],
        on_event: &mut dyn FnMut(Event),
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for (kind, document) in self.ordered(documents, order, on_event) {
            let (payload, name) = self.decode(kind, document)?;
            self.delete_one(kind, &payload, name, &mut report, on_event)
                .await?;
        }
        Ok(report)
    }

    /// Retrieves the named instances, or every instance when `names` is empty.
    #[instrument(skip_all, fields(kind = kind.descriptor().kind, names = names.len()))]
    pub async fn get(
        &self,
        kind: &dyn ResourceKind,
        names: &[String],
        scope: Option<&str>,
    ) -> Result<Listing> {
        let descriptor = kind.descriptor();

        if names.is_empty() {
            let payload = self.addressed(kind, "", scope)?;
            let request = request::build_list(
                &self.options.server,
                &descriptor,
                &payload,
                self.options.skip_check,
            )?;
            let body = self.transport.send(&request, &self.options.token).await?;
            return Ok(Listing {
                items: kind.decode_list(&body)?,
                single: false,
            });
        }

        let mut items = Vec::with_capacity(names.len());
        for name in names {
            let payload = self.addressed(kind, name, scope)?;
            let body = self.send(kind, Method::Get, &payload).await?;
            items.push(kind.decode_item(&body)?);
        }
        Ok(Listing {
            items,
            single: names.len() == 1,
        })
    }

    /// Deletes instances by name, asking before each one unless
    /// `auto_confirm` is set or the operator answered "all".
    #[instrument(skip_all, fields(kind = kind.descriptor().kind, names = names.len()))]
    pub async fn delete_by_name(
        &self,
        kind: &dyn ResourceKind,
        names: &[String],
        scope: Option<&str>,
        auto_confirm: bool,
        confirm: &mut dyn Confirm,
        on_event: &mut dyn FnMut(Event),
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        let mut auto_yes = auto_confirm;

        for name in names {
            if !auto_yes {
                match confirm.ask(name)? {
                    Answer::Yes => {}
                    Answer::All => auto_yes = true,
                    Answer::No => {
                        report.cancelled += 1;
                        on_event(Event::Cancelled {
                            kind: kind.descriptor().kind,
                            name: name.clone(),
                        });
                        continue;
                    }
                }
            }

            let payload = self.addressed(kind, name, scope)?;
            self.delete_one(kind, &payload, name.clone(), &mut report, on_event)
                .await?;
        }
        Ok(report)
    }

    async fn delete_one(
        &self,
        kind: &dyn ResourceKind,
        payload: &Value,
        name: String,
        report: &mut BatchReport,
        on_event: &mut dyn FnMut(Event),
    ) -> Result<()> {
        let kind_name = kind.descriptor().kind;
        match self.send(kind, Method::Delete, payload).await {
            Ok(_) => {
                info!(kind = kind_name, %name, "resource removed");
                report.succeeded += 1;
                on_event(Event::Removed {
                    kind: kind_name,
                    name,
                });
                Ok(())
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!(kind = kind_name, %name, error = %err, "failed to remove resource");
                on_event(Event::Failed {
                    kind: kind_name,
                    name: name.clone(),
                    message: err.to_string(),
                });
                report.failures.push(Failure {
                    kind: kind_name,
                    name,
                    error: err,
                });
                Ok(())
            }
        }
    }

    async fn send(&self, kind: &dyn ResourceKind, method: Method, payload: &Value) -> Result<Vec<u8>> {
        let request = request::build(
            method,
            &self.options.server,
            &kind.descriptor(),
            payload,
            self.options.skip_check,
        )?;
        self.transport.send(&request, &self.options.token).await
    }

    /// Pairs documents with their kinds, following `order`.
    ///
    /// Kinds that are unknown or missing from `order` are reported once and
    /// skipped.
    fn ordered<'d>(
        &self,
        documents: &'d [ResourceDocument],
        order: &[&str],
        on_event: &mut dyn FnMut(Event),
    ) -> Vec<(&'a dyn ResourceKind, &'d ResourceDocument)> {
        let groups = group_by_kind(documents);
        let wanted: BTreeSet<&str> = order.iter().copied().collect();

        for (declared, group) in &groups {
            if !wanted.contains(declared) || self.registry.by_kind(declared).is_none() {
                warn!(kind = %declared, count = group.len(), "skipping documents of unknown kind");
                on_event(Event::SkippedKind {
                    kind: declared.to_string(),
                    count: group.len(),
                });
            }
        }

        let mut pairs = Vec::new();
        for declared in order {
            let (Some(kind), Some(group)) = (self.registry.by_kind(declared), groups.get(declared))
            else {
                continue;
            };
            pairs.extend(group.iter().map(|document| (kind, *document)));
        }
        pairs
    }

    fn decode(&self, kind: &dyn ResourceKind, document: &ResourceDocument) -> Result<(Value, String)> {
        let payload = kind.decode_manifest(&document.spec)?;
        let name = payload
            .get(kind.descriptor().name_field())
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok((payload, name))
    }

    /// Zero-valued payload carrying only the name and the product scope.
    fn addressed(&self, kind: &dyn ResourceKind, name: &str, scope: Option<&str>) -> Result<Value> {
        let descriptor = kind.descriptor();
        let mut payload = kind.blank()?;
        if let Value::Object(map) = &mut payload {
            map.insert(descriptor.name_field().to_string(), Value::from(name));
            if let (Some(field), Some(scope)) = (descriptor.scope_field, scope) {
                map.insert(field.to_string(), Value::from(scope));
            }
        }
        Ok(payload)
    }
}
