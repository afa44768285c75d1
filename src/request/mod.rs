//! Request description handed to a [`Transport`](crate::transport::Transport).

mod params;

pub use params::{ParamValue, ParameterSet};
pub use reqwest::Method;

/// A single call to the exchange, independent of how it is delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path relative to the base URL (e.g. `/products/BTC-USD/ticker`).
    pub path: String,
    /// Query parameters.
    pub query: ParameterSet,
    /// JSON body parameters, for writes.
    pub body: Option<ParameterSet>,
}

impl ApiRequest {
    /// Create a GET request without parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: ParameterSet::new(),
            body: None,
        }
    }

    /// Create a POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: ParameterSet) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: ParameterSet::new(),
            body: Some(body),
        }
    }

    /// Create a PUT request with a JSON body.
    pub fn put(path: impl Into<String>, body: ParameterSet) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            query: ParameterSet::new(),
            body: Some(body),
        }
    }

    /// Set the query parameters.
    pub fn query(mut self, query: ParameterSet) -> Self {
        self.query = query;
        self
    }

    /// Path including the rendered query string.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.query.to_query_string("?"))
    }

    /// Serialized JSON body, if this request carries one.
    pub fn body_json(&self) -> Option<String> {
        self.body.as_ref().map(|body| body.to_body().to_string())
    }

    /// Parameter keys outside the endpoint's documented allow-lists.
    pub fn unknown_keys(&self) -> Vec<&str> {
        let mut keys = self.query.unknown_keys();
        if let Some(body) = &self.body {
            keys.extend(body.unknown_keys());
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        let request = ApiRequest::get("/products/BTC-USD/trades")
            .query(ParameterSet::new().with("limit", 2));
        assert_eq!(request.path_and_query(), "/products/BTC-USD/trades?limit=2");
        assert!(request.body_json().is_none());
    }

    #[test]
    fn test_body_json() {
        let request = ApiRequest::post("/profiles", ParameterSet::new().with("name", "bot"));
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body_json().unwrap(), r#"{"name":"bot"}"#);
        assert_eq!(request.path_and_query(), "/profiles");
    }
}
