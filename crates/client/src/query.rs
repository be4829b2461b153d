//! Builder for the `/search` query string.
//!
//! The backend looks at `q`, then `id`, `name`, `altName` and finally the
//! address fields, answering with the first kind of search that has a
//! value. `limit` caps how many hits each list returns.

use url::form_urlencoded;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub alt_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub providence: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search over names, alt names, addresses and denied persons at once.
    pub fn q(mut self, value: impl Into<String>) -> Self {
        self.q = Some(value.into());
        self
    }

    /// Match against the ID found in an SDN's remarks.
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn alt_name(mut self, value: impl Into<String>) -> Self {
        self.alt_name = Some(value.into());
        self
    }

    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    pub fn providence(mut self, value: impl Into<String>) -> Self {
        self.providence = Some(value.into());
        self
    }

    pub fn zip(mut self, value: impl Into<String>) -> Self {
        self.zip = Some(value.into());
        self
    }

    pub fn country(mut self, value: impl Into<String>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn limit(mut self, value: u32) -> Self {
        self.limit = Some(value);
        self
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("q", &self.q),
            ("id", &self.id),
            ("name", &self.name),
            ("altName", &self.alt_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("providence", &self.providence),
            ("zip", &self.zip),
            ("country", &self.country),
        ];
        let mut out: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(k, v)| non_blank(v).map(|v| (k, v)))
            .collect();
        if let Some(limit) = self.limit {
            out.push(("limit", limit.to_string()));
        }
        out
    }

    /// Form-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.pairs() {
            serializer.append_pair(k, &v);
        }
        serializer.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_search_with_limit() {
        let qs = SearchQuery::new().limit(5).name("nicolas maduro").to_query_string();
        assert_eq!(qs, "name=nicolas+maduro&limit=5");
    }

    #[test]
    fn address_fields_keep_backend_order() {
        let qs = SearchQuery::new()
            .country("Cuba")
            .city("Havana")
            .address("Ave 5ta")
            .to_query_string();
        assert_eq!(qs, "address=Ave+5ta&city=Havana&country=Cuba");
    }

    #[test]
    fn blank_values_are_skipped() {
        let query = SearchQuery::new().q("   ").alt_name("");
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let qs = SearchQuery::new().q("AL-QA'IDA & co/ltd").to_query_string();
        assert_eq!(qs, "q=AL-QA%27IDA+%26+co%2Fltd");
    }
}
