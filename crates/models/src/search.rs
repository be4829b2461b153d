use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{null_as_empty, Address, Alt, DeniedPerson, Sdn};

/// Body of `GET /search`. Which lists are filled depends on the query
/// parameters; the others come back empty (or `null`). A rejected search
/// carries only `error`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    #[serde(rename = "SDNs", deserialize_with = "null_as_empty")]
    pub sdns: Vec<Sdn>,
    #[serde(deserialize_with = "null_as_empty")]
    pub alt_names: Vec<Alt>,
    #[serde(deserialize_with = "null_as_empty")]
    pub addresses: Vec<Address>,
    #[serde(deserialize_with = "null_as_empty")]
    pub denied_persons: Vec<DeniedPerson>,
    /// When the backend last refreshed its lists.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Problem message the backend sends instead of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.sdns.is_empty()
            && self.alt_names.is_empty()
            && self.addresses.is_empty()
            && self.denied_persons.is_empty()
    }
}
