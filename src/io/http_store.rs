use reqwest::Method;
use reqwest::blocking::{Client, Response};
use serde_json::Value;

use super::store::{DocumentStore, StoreError};

/// REST-over-HTTP JSON document store (Firebase realtime database style).
///
/// A logical path `tasks/3` maps to `GET/PUT/PATCH/DELETE {base}/tasks/3.json`.
/// Bodies are raw JSON; no auth headers, no retry, no timeout.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.host_str().is_none() {
            return Err(StoreError::InvalidUrl(format!("{base_url}: missing host")));
        }
        Ok(HttpStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    /// Full URL for a logical path
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        let path = path.strip_suffix(".json").unwrap_or(path);
        format!("{}/{}.json", self.base_url, path)
    }

    fn send(
        &self,
        method: Method,
        method_name: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, StoreError> {
        let url = self.url_for(path);
        tracing::debug!(method = method_name, %url, "store request");
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().map_err(|source| StoreError::Transport {
            url: url.clone(),
            source,
        })?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                method: method_name,
                url,
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}

impl DocumentStore for HttpStore {
    fn get(&self, path: &str) -> Result<Value, StoreError> {
        let response = self.send(Method::GET, "GET", path, None)?;
        let url = self.url_for(path);
        let text = response
            .text()
            .map_err(|source| StoreError::Transport { url, source })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn put(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        self.send(Method::PUT, "PUT", path, Some(value)).map(|_| ())
    }

    fn patch(&self, path: &str, partial: &Value) -> Result<(), StoreError> {
        self.send(Method::PATCH, "PATCH", path, Some(partial))
            .map(|_| ())
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.send(Method::DELETE, "DELETE", path, None).map(|_| ())
    }
}
