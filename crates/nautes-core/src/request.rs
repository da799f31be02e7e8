//! Request building
//!
//! Turns a payload and its kind descriptor into a fully resolved request.
//! Nothing here touches the network.

use crate::error::{NautesError, Result};
use crate::schema::ResourceDescriptor;
use serde_json::Value;
use std::fmt;

/// Query parameter asking the server to skip its compliance check.
pub const SKIP_CHECK_QUERY: &str = "insecure_skip_check=true";

/// HTTP verbs used against the API server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }

    /// Only POST carries a body on the wire.
    pub fn sends_body(&self) -> bool {
        matches!(self, Method::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved request, ready for a [`crate::transport::Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Kind the request operates on, surfaced in error messages.
    pub kind: &'static str,
    pub method: Method,
    pub url: String,
    /// Serialized payload. Transports drop it for GET and DELETE.
    pub body: Vec<u8>,
}

impl Request {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trims a single trailing `/` from the API server base.
pub fn normalize_server(server: &str) -> &str {
    server.strip_suffix('/').unwrap_or(server)
}

/// Builds the request for one payload.
///
/// Placeholders in the path template are filled strictly in the order of
/// `descriptor.path_var_names`; the template text is never searched by name.
pub fn build(
    method: Method,
    server: &str,
    descriptor: &ResourceDescriptor,
    payload: &Value,
    skip_check: bool,
) -> Result<Request> {
    let path = fill_template(descriptor, payload)?;
    let mut url = format!("{}{}", normalize_server(server), path);
    if skip_check {
        url = format!("{url}?{SKIP_CHECK_QUERY}");
    }

    let body = serde_json::to_vec(payload)
        .map_err(|e| NautesError::decode(format!("{} payload", descriptor.kind), e))?;

    Ok(Request {
        kind: descriptor.kind,
        method,
        url,
        body,
    })
}

/// Builds the list GET for a kind.
///
/// The name placeholder is filled with an empty string and the resulting
/// trailing `/` is dropped, so `/api/v1/products/{}` becomes
/// `/api/v1/products`.
pub fn build_list(
    server: &str,
    descriptor: &ResourceDescriptor,
    payload: &Value,
    skip_check: bool,
) -> Result<Request> {
    let mut payload = payload.clone();
    if let Value::Object(map) = &mut payload {
        map.insert(descriptor.name_field().to_string(), Value::from(""));
    }

    let path = fill_template(descriptor, &payload)?;
    let path = path.strip_suffix('/').unwrap_or(&path);
    let mut url = format!("{}{}", normalize_server(server), path);
    if skip_check {
        url = format!("{url}?{SKIP_CHECK_QUERY}");
    }

    Ok(Request {
        kind: descriptor.kind,
        method: Method::Get,
        url,
        body: Vec::new(),
    })
}

fn fill_template(descriptor: &ResourceDescriptor, payload: &Value) -> Result<String> {
    let mut path = descriptor.path_template.to_string();
    for name in descriptor.path_var_names {
        let value = path_var(descriptor, payload, name)?;
        path = path.replacen("{}", value, 1);
    }
    Ok(path)
}

fn path_var<'a>(
    descriptor: &ResourceDescriptor,
    payload: &'a Value,
    name: &str,
) -> Result<&'a str> {
    let field = payload
        .get(name)
        .ok_or_else(|| NautesError::FieldNotFound {
            kind: descriptor.kind.to_string(),
            field: name.to_string(),
        })?;

    field.as_str().ok_or_else(|| NautesError::TypeMismatch {
        kind: descriptor.kind.to_string(),
        field: name.to_string(),
        found: json_type_name(field).to_string(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ENVIRONMENT: ResourceDescriptor = ResourceDescriptor {
        kind: "Environment",
        path_template: "/api/v1/products/{}/environments/{}",
        path_var_names: &["product", "name"],
        aliases: &["env", "envs"],
        apply_order: 2,
        remove_order: 5,
        scope_field: Some("product"),
    };

    #[test]
    fn test_placeholders_follow_var_order() {
        let payload = json!({ "name": "dev", "product": "shop", "cluster": "c1" });
        let request = build(Method::Post, "http://api:8000/", &ENVIRONMENT, &payload, false)
            .expect("build request");

        assert_eq!(request.url, "http://api:8000/api/v1/products/shop/environments/dev");
        assert_eq!(request.kind, "Environment");
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, payload);
    }

    #[test]
    fn test_skip_check_query() {
        let payload = json!({ "name": "dev", "product": "shop" });
        let request = build(Method::Delete, "http://api", &ENVIRONMENT, &payload, true).unwrap();
        assert_eq!(
            request.url,
            "http://api/api/v1/products/shop/environments/dev?insecure_skip_check=true"
        );
        assert!(!request.method.sends_body());
    }

    #[test]
    fn test_missing_path_var() {
        let payload = json!({ "name": "dev" });
        let err = build(Method::Get, "http://api", &ENVIRONMENT, &payload, false).unwrap_err();
        assert!(matches!(err, NautesError::FieldNotFound { ref field, .. } if field == "product"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_non_string_path_var() {
        let payload = json!({ "name": 42, "product": "shop" });
        let err = build(Method::Get, "http://api", &ENVIRONMENT, &payload, false).unwrap_err();
        assert!(matches!(err, NautesError::TypeMismatch { ref found, .. } if found == "number"));
    }

    #[test]
    fn test_list_url_drops_name_segment() {
        let payload = json!({ "name": "ignored", "product": "shop" });
        let request = build_list("http://api/", &ENVIRONMENT, &payload, false).unwrap();
        assert_eq!(request.url, "http://api/api/v1/products/shop/environments");
        assert_eq!(request.method, Method::Get);
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_normalize_server_trims_one_slash() {
        assert_eq!(normalize_server("http://api/"), "http://api");
        assert_eq!(normalize_server("http://api"), "http://api");
        assert_eq!(normalize_server("http://api//"), "http://api/");
    }
}
