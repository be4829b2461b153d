use serde::{Deserialize, Serialize};

/// Entry of the BIS Denied Persons List.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeniedPerson {
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub effective_date: String,
    pub expiration_date: String,
    pub standard_order: String,
    pub last_update: String,
    pub action: String,
    pub fr_citation: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}
