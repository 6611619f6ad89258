use reqwest::Method;
use serde_json::Value;

use crate::models::Page;

/// A single logical call to the backend.
///
/// The descriptor is what gets replayed after a session refresh. `retried`
/// records that the refresh has already been spent on this call, so a second
/// 401 is returned to the caller instead of triggering another refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the backend's `skip`/`limit` pagination parameters.
    pub fn page(self, page: Page) -> Self {
        self.query("skip", page.skip()).query("limit", page.limit())
    }

    /// Opts this call out of the refresh-and-replay cycle.
    pub fn mark_retried(mut self) -> Self {
        self.retried = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_collects_query_in_order() {
        let req = ApiRequest::get("/jobs/search/image/")
            .query("query", "rust")
            .page(Page::new(3, 20));

        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.query,
            vec![
                ("query".to_string(), "rust".to_string()),
                ("skip".to_string(), "40".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
        assert!(!req.retried);
    }

    #[test]
    fn test_mark_retried_keeps_body() {
        let req = ApiRequest::post("/auth/login")
            .json(json!({"identifier": "a"}))
            .mark_retried();
        assert!(req.retried);
        assert_eq!(req.body, Some(json!({"identifier": "a"})));
    }
}
