use async_trait::async_trait;
use nautes_core::{Answer, Confirm, Method, NautesError, Request, Result, Transport};
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Mutex;

/// In-memory stand-in for the Nautes API server
///
/// POST stores the body under the request path, GET returns it (or a list
/// envelope for collection paths) and DELETE drops it.
#[derive(Default)]
pub struct FakeServer {
    store: Mutex<BTreeMap<String, Vec<u8>>>,
    log: Mutex<Vec<(Method, String)>>,
    failing: Mutex<BTreeSet<String>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request seen so far, as (method, full url).
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.log.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn bodies(&self) -> BTreeMap<String, Value> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .map(|(path, body)| (path.clone(), serde_json::from_slice(body).unwrap()))
            .collect()
    }

    /// Makes every request to `path` answer with status 500.
    #[allow(dead_code)]
    pub fn fail_on(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    #[allow(dead_code)]
    pub fn seed(&self, path: &str, item: Value) {
        self.store
            .lock()
            .unwrap()
            .insert(path.to_string(), serde_json::to_vec(&item).unwrap());
    }

    fn path_of(url: &str) -> String {
        let without_query = url.split('?').next().unwrap_or(url);
        match without_query.find("/api/") {
            Some(at) => without_query[at..].to_string(),
            None => without_query.to_string(),
        }
    }

    /// `/api/v1/clusters` and `/api/v1/products/p/environments` are
    /// collections; paths ending in an instance name are not.
    fn is_collection(path: &str) -> bool {
        let segments = path.trim_start_matches("/api/v1/").split('/').count();
        segments % 2 == 1
    }

    fn rejected(request: &Request, status: u16, body: &str) -> NautesError {
        NautesError::RemoteRejected {
            kind: request.kind.to_string(),
            method: request.method.to_string(),
            url: request.url.clone(),
            status,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl Transport for FakeServer {
    async fn send(&self, request: &Request, token: &str) -> Result<Vec<u8>> {
        assert_eq!(token, "test-token");
        self.log
            .lock()
            .unwrap()
            .push((request.method, request.url.clone()));

        let path = Self::path_of(&request.url);
        if self.failing.lock().unwrap().contains(&path) {
            return Err(Self::rejected(request, 500, "{\"message\":\"internal error\"}"));
        }

        let mut store = self.store.lock().unwrap();
        match request.method {
            Method::Post => {
                store.insert(path, request.body.clone());
                Ok(b"{}".to_vec())
            }
            Method::Delete => match store.remove(&path) {
                Some(_) => Ok(b"{}".to_vec()),
                None => Err(Self::rejected(request, 404, "not found")),
            },
            Method::Get if Self::is_collection(&path) => {
                let prefix = format!("{path}/");
                let items: Vec<Value> = store
                    .iter()
                    .filter(|(key, _)| key.starts_with(&prefix) && !key[prefix.len()..].contains('/'))
                    .map(|(_, body)| serde_json::from_slice(body).unwrap())
                    .collect();
                Ok(serde_json::to_vec(&json!({ "items": items })).unwrap())
            }
            Method::Get => match store.get(&path) {
                Some(body) => Ok(body.clone()),
                None => Err(Self::rejected(request, 404, "not found")),
            },
        }
    }
}

/// Answers prompts from a fixed script and records what was asked
pub struct ScriptedConfirm {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[Answer]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn ask(&mut self, name: &str) -> Result<Answer> {
        self.asked.push(name.to_string());
        Ok(self.answers.pop_front().expect("unexpected prompt"))
    }
}
