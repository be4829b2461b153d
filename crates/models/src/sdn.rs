use serde::{Deserialize, Serialize};

use crate::null_as_empty;

/// Specially Designated National record.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sdn {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    pub sdn_name: String,
    pub sdn_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub programs: Vec<String>,
    pub title: String,
    pub call_sign: String,
    pub vessel_type: String,
    pub tonnage: String,
    pub gross_registered_tonnage: String,
    pub vessel_flag: String,
    pub vessel_owner: String,
    pub remarks: String,
    /// Similarity score, present on search results.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

/// Alternate name of an SDN.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alt {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(rename = "alternateID")]
    pub alternate_id: String,
    pub alternate_type: String,
    pub alternate_name: String,
    pub alternate_remarks: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

/// Physical address linked to an SDN.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(rename = "addressID")]
    pub address_id: String,
    pub address: String,
    pub city_state_province_postal_code: String,
    pub country: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}
