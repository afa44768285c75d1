//! Report endpoints (authentication required).

mod types;

pub use types::*;

use crate::request::{ApiRequest, ParameterSet};
use crate::rest::endpoints::{self, REPORTS};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;

/// Parameters accepted by the report list.
pub const LIST_PARAMS: &[&str] = &["portfolio_id", "after", "limit", "type", "ignore_expired"];
/// Body of a report creation.
pub const CREATE_PARAMS: &[&str] = &[
    "type",
    "format",
    "product_id",
    "account_id",
    "start_date",
    "end_date",
    "year",
    "email",
    "profile_id",
];

/// Report endpoints.
pub struct Reports<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Reports<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List reports.
    pub fn list(&self, options: Option<&ParameterSet>) -> Call<'a, Vec<Report>, T> {
        let query = ParameterSet::allowing(LIST_PARAMS).merged(options);
        self.client.list(ApiRequest::get(REPORTS).query(query))
    }

    /// Get a single report.
    pub fn get(&self, report_id: &str) -> Call<'a, Report, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(REPORTS, &[report_id])))
    }

    /// Request a report. The result is pending until the exchange builds it.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinbase_exchange_client::rest::CoinbaseClient;
    /// use coinbase_exchange_client::rest::reports::{ReportFormat, ReportRequest};
    ///
    /// # async fn run(client: CoinbaseClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let request = ReportRequest::fills("BTC-USD", "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")
    ///     .format(ReportFormat::Csv);
    /// let report = client.reports().create(&request).await?;
    /// println!("report {} is {}", report.id, report.status);
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(&self, request: &ReportRequest) -> Call<'a, Report, T> {
        self.client.single(ApiRequest::post(REPORTS, request.into()))
    }
}
