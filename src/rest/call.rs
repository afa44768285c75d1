//! A prepared endpoint call whose output representation is chosen last.

use std::future::{Future, IntoFuture};
use std::pin::Pin;

use serde_json::Value;

use crate::error::{CoinbaseError, MalformedResponse};
use crate::request::ApiRequest;
use crate::response::{Materialized, OutputMode, materialize_with, parse_structured};
use crate::rest::CoinbaseClient;
use crate::transport::Transport;

/// Entity parser applied to the structured body in [`OutputMode::Typed`].
pub type EntityParser<R> = fn(Value) -> Result<R, MalformedResponse>;

/// A prepared call to one endpoint.
///
/// Nothing is sent until the call is consumed. Awaiting it directly yields the
/// typed value; [`Call::raw`], [`Call::structured`] and [`Call::output`] pick
/// another representation of the same response.
///
/// ```rust,no_run
/// use coinbase_exchange_client::rest::CoinbaseClient;
/// use coinbase_exchange_client::response::OutputMode;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseClient::new()?;
///     let ticker = client.products().ticker("BTC-USD").await?;
///     let raw = client.products().ticker("BTC-USD").raw().await?;
///     let value = client.products().ticker("BTC-USD").output(OutputMode::Structured).await?;
///     println!("{} / {} / {:?}", ticker.price, raw, value);
///     Ok(())
/// }
/// ```
#[must_use = "a call does nothing until it is awaited"]
pub struct Call<'a, R, T> {
    client: &'a CoinbaseClient<T>,
    request: ApiRequest,
    parser: EntityParser<R>,
}

impl<'a, R, T: Transport> Call<'a, R, T> {
    pub(crate) fn new(
        client: &'a CoinbaseClient<T>,
        request: ApiRequest,
        parser: EntityParser<R>,
    ) -> Self {
        Self {
            client,
            request,
            parser,
        }
    }

    /// The request this call will send.
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Send the request and materialize the response in the given mode.
    pub async fn output(self, mode: OutputMode) -> Result<Materialized<R>, CoinbaseError> {
        let raw = self.client.transport().perform(&self.request).await?;
        Ok(materialize_with(raw, mode, self.parser)?)
    }

    /// Send the request and return the body unchanged.
    pub async fn raw(self) -> Result<String, CoinbaseError> {
        self.client.transport().perform(&self.request).await
    }

    /// Send the request and return the body as a JSON tree.
    pub async fn structured(self) -> Result<Value, CoinbaseError> {
        let raw = self.raw().await?;
        Ok(parse_structured(&raw)?)
    }

    /// Send the request and return domain types.
    pub async fn typed(self) -> Result<R, CoinbaseError> {
        let parser = self.parser;
        let value = self.structured().await?;
        Ok(parser(value)?)
    }
}

impl<'a, R, T> IntoFuture for Call<'a, R, T>
where
    R: Send + 'a,
    T: Transport + 'a,
{
    type Output = Result<R, CoinbaseError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.typed())
    }
}

impl<R, T> std::fmt::Debug for Call<'_, R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.request.method)
            .field("path", &self.request.path)
            .finish_non_exhaustive()
    }
}
