//! Types for report endpoints.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::{ParamValue, ParameterSet};
use crate::types::serde_helpers::{empty_string_as_none, flexible_datetime};

/// Kind of report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    /// Fills.
    Fills,
    /// Account activity.
    Account,
    /// Balances.
    Balance,
    /// Tax invoice.
    #[serde(rename = "1099k-transaction-history")]
    TransactionHistory1099k,
    /// Tax invoice.
    TaxInvoice,
    /// Anything the crate does not know yet.
    #[serde(other)]
    Other,
}

impl ReportType {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Fills => "fills",
            ReportType::Account => "account",
            ReportType::Balance => "balance",
            ReportType::TransactionHistory1099k => "1099k-transaction-history",
            ReportType::TaxInvoice => "tax-invoice",
            ReportType::Other => "other",
        }
    }
}

impl From<ReportType> for ParamValue {
    fn from(kind: ReportType) -> Self {
        ParamValue::Str(kind.as_str().to_string())
    }
}

/// Output format of a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated values.
    Csv,
    /// PDF.
    Pdf,
}

impl From<ReportFormat> for ParamValue {
    fn from(format: ReportFormat) -> Self {
        ParamValue::Str(
            match format {
                ReportFormat::Csv => "csv",
                ReportFormat::Pdf => "pdf",
            }
            .to_string(),
        )
    }
}

/// A generated or pending report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    /// Report ID.
    pub id: String,
    /// Kind of report.
    #[serde(rename = "type")]
    pub kind: ReportType,
    /// "pending", "creating", "ready" or "failed".
    pub status: String,
    /// Creation time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub created_at: Option<OffsetDateTime>,
    /// Completion time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub completed_at: Option<OffsetDateTime>,
    /// Time the file link expires.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub expires_at: Option<OffsetDateTime>,
    /// Download link once ready.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub file_url: Option<String>,
    /// Parameters the report was created with.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl Report {
    /// True once the file can be downloaded.
    pub fn is_ready(&self) -> bool {
        self.status == "ready" && self.file_url.is_some()
    }
}

/// Request to create a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    /// Kind of report.
    pub kind: ReportType,
    /// Output format.
    pub format: Option<ReportFormat>,
    /// Product, for fill reports.
    pub product_id: Option<String>,
    /// Account, for account reports.
    pub account_id: Option<String>,
    /// Start of the reported period (RFC 3339).
    pub start_date: Option<String>,
    /// End of the reported period (RFC 3339).
    pub end_date: Option<String>,
    /// Year, for tax reports.
    pub year: Option<String>,
    /// Address notified when the report is ready.
    pub email: Option<String>,
    /// Profile to report on.
    pub profile_id: Option<String>,
}

impl ReportRequest {
    /// Create a request for the given kind of report.
    pub fn new(kind: ReportType) -> Self {
        Self {
            kind,
            format: None,
            product_id: None,
            account_id: None,
            start_date: None,
            end_date: None,
            year: None,
            email: None,
            profile_id: None,
        }
    }

    /// Fill report of one product over a period.
    pub fn fills(
        product_id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            product_id: Some(product_id.into()),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            ..Self::new(ReportType::Fills)
        }
    }

    /// Set the output format.
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the notification address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl From<&ReportRequest> for ParameterSet {
    fn from(request: &ReportRequest) -> Self {
        let mut params = ParameterSet::allowing(super::CREATE_PARAMS);
        params
            .add("type", request.kind)
            .add_opt("format", request.format)
            .add_opt("product_id", request.product_id.as_deref())
            .add_opt("account_id", request.account_id.as_deref())
            .add_opt("start_date", request.start_date.as_deref())
            .add_opt("end_date", request.end_date.as_deref())
            .add_opt("year", request.year.as_deref())
            .add_opt("email", request.email.as_deref())
            .add_opt("profile_id", request.profile_id.as_deref());
        params
    }
}
