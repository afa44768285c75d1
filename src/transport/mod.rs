//! Delivery of requests to the exchange.
//!
//! The resource managers only describe calls ([`ApiRequest`]); a [`Transport`]
//! turns one into the raw response body. [`HttpTransport`] is the default,
//! built on `reqwest` with tracing and transient-failure retries.
//!
//! Authentication is delegated to a [`RequestSigner`], which supplies the
//! headers for each request.

mod http;

use std::future::Future;

use reqwest::header::HeaderMap;

use crate::error::CoinbaseError;
use crate::request::{ApiRequest, Method};

pub use http::{HttpTransport, HttpTransportBuilder};

/// Performs a request and returns the raw response body.
///
/// Implementations own authentication, retries and timeouts. Failures are
/// returned as-is and propagate unchanged to the caller.
pub trait Transport: Send + Sync {
    /// Perform the request.
    fn perform(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<String, CoinbaseError>> + Send;
}

/// Supplies authentication headers for a request.
pub trait RequestSigner: Send + Sync {
    /// Headers to attach, computed from the method, the path including its
    /// query string, and the JSON body (empty for reads).
    fn sign(
        &self,
        method: &Method,
        path_and_query: &str,
        body: &str,
    ) -> Result<HeaderMap, CoinbaseError>;
}
