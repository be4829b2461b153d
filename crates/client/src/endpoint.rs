//! Backend routes and how their paths are rendered.

/// Keys served under `/ui/values/{key}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKey {
    SdnType,
    Program,
}

impl ValueKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKey::SdnType => "sdnType",
            ValueKey::Program => "program",
        }
    }
}

/// One backend route. Query strings and identifiers are inserted verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Search(&'a str),
    SdnAlts(&'a str),
    SdnAddresses(&'a str),
    UiValues(ValueKey),
}

impl Endpoint<'_> {
    pub fn path_and_query(&self) -> String {
        match self {
            Endpoint::Search(qs) => format!("/search?{qs}"),
            Endpoint::SdnAlts(id) => format!("/sdn/{id}/alts"),
            Endpoint::SdnAddresses(id) => format!("/sdn/{id}/addresses"),
            Endpoint::UiValues(key) => format!("/ui/values/{}", key.as_str()),
        }
    }

    /// Operation name for logs and metrics.
    pub fn operation(&self) -> &'static str {
        match self {
            Endpoint::Search(_) => "search",
            Endpoint::SdnAlts(_) => "sdn_alts",
            Endpoint::SdnAddresses(_) => "sdn_addresses",
            Endpoint::UiValues(ValueKey::SdnType) => "sdn_types",
            Endpoint::UiValues(ValueKey::Program) => "programs",
        }
    }
}
