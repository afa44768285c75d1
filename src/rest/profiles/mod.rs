//! Profile endpoints (authentication required).

mod types;

pub use types::*;

use serde_json::Value;

use crate::request::{ApiRequest, ParameterSet};
use crate::rest::endpoints::{self, PROFILES, PROFILES_TRANSFER};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;

/// Parameters accepted by the profile list.
pub const LIST_PARAMS: &[&str] = &["active"];
/// Body of a profile creation.
pub const CREATE_PARAMS: &[&str] = &["name"];
/// Body of a profile rename.
pub const RENAME_PARAMS: &[&str] = &["profile_id", "name"];
/// Body of a transfer between profiles.
pub const TRANSFER_PARAMS: &[&str] = &["from", "to", "currency", "amount"];
/// Body of a profile deactivation.
pub const DEACTIVATE_PARAMS: &[&str] = &["profile_id", "to"];

/// Profile endpoints.
pub struct Profiles<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Profiles<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List profiles.
    ///
    /// # Arguments
    ///
    /// * `options` - `active` to return only active profiles.
    pub fn list(&self, options: Option<&ParameterSet>) -> Call<'a, Vec<Profile>, T> {
        let query = ParameterSet::allowing(LIST_PARAMS).merged(options);
        self.client.list(ApiRequest::get(PROFILES).query(query))
    }

    /// Get a single profile.
    pub fn get(&self, profile_id: &str) -> Call<'a, Profile, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(PROFILES, &[profile_id])))
    }

    /// Create a profile.
    pub fn create(&self, name: &str) -> Call<'a, Profile, T> {
        let body = ParameterSet::allowing(CREATE_PARAMS).with("name", name);
        self.client.single(ApiRequest::post(PROFILES, body))
    }

    /// Rename a profile.
    pub fn rename(&self, profile_id: &str, name: &str) -> Call<'a, Profile, T> {
        let body = ParameterSet::allowing(RENAME_PARAMS)
            .with("profile_id", profile_id)
            .with("name", name);
        self.client
            .single(ApiRequest::put(endpoints::path(PROFILES, &[profile_id]), body))
    }

    /// Move funds between two profiles.
    ///
    /// The exchange acknowledges a transfer without a body of interest, so the
    /// typed result is the JSON tree as returned.
    pub fn transfer(&self, transfer: &ProfileTransfer) -> Call<'a, Value, T> {
        self.client
            .call_with(ApiRequest::post(PROFILES_TRANSFER, transfer.into()), Ok)
    }

    /// Deactivate a profile, moving its funds to another one.
    pub fn deactivate(&self, profile_id: &str, to_profile_id: &str) -> Call<'a, Value, T> {
        let body = ParameterSet::allowing(DEACTIVATE_PARAMS)
            .with("profile_id", profile_id)
            .with("to", to_profile_id);
        self.client.call_with(
            ApiRequest::put(endpoints::path(PROFILES, &[profile_id, "deactivate"]), body),
            Ok,
        )
    }
}
