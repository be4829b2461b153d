//! Response schemas of the OFAC search backend.
//!
//! Fields default when absent so a partial record still decodes; list
//! fields the backend encodes as `null` come back empty.

use serde::{Deserialize, Deserializer};

pub mod dpl;
pub mod sdn;
pub mod search;

pub use dpl::DeniedPerson;
pub use sdn::{Address, Alt, Sdn};
pub use search::SearchResponse;

/// Values listed by `GET /ui/values/{key}`.
pub type UiValues = Vec<String>;

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
