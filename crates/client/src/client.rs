use std::sync::Arc;
use std::time::Instant;

use common::observability;
use configs::{ClientConfig, StatusPolicy};
use models::{Address, Alt, SearchResponse, UiValues};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoint::{Endpoint, ValueKey};
use crate::errors::ClientError;
use crate::transport::{HttpTransport, Transport};

/// Read-only client for the OFAC search backend.
///
/// Every call issues exactly one GET and decodes the body; nothing is
/// retried or cached, and calls share no state beyond the transport's
/// connection pool.
#[derive(Clone)]
pub struct RemoteDataClient {
    base_url: String,
    status_policy: StatusPolicy,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for RemoteDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteDataClient")
            .field("base_url", &self.base_url)
            .field("status_policy", &self.status_policy)
            .finish_non_exhaustive()
    }
}

impl RemoteDataClient {
    /// Build a client over HTTP from validated config.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(&config.base_url, Arc::new(transport))
            .with_status_policy(config.status_policy))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            status_policy: StatusPolicy::default(),
            transport,
        }
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    pub fn url_for(&self, endpoint: &Endpoint<'_>) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, endpoint.path_and_query());
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Fetch `endpoint` and decode its body as `T`.
    ///
    /// `T = serde_json::Value` gives the untyped body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
    ) -> Result<T, ClientError> {
        let operation = endpoint.operation();
        let result = match self.url_for(&endpoint) {
            Ok(url) => {
                // Only counted once there is something to send.
                observability::record_request(operation);
                let started = Instant::now();
                let res = self.send_and_decode(operation, &url).await;
                observability::observe_duration(operation, started.elapsed().as_secs_f64());
                res
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            observability::record_failure(operation, e.kind());
            debug!(operation, kind = e.kind(), error = %e, "request failed");
        }
        result
    }

    async fn send_and_decode<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &Url,
    ) -> Result<T, ClientError> {
        let resp = self.transport.get(url).await?;
        debug!(
            operation,
            %url,
            status = resp.status,
            bytes = resp.body.len(),
            "response received"
        );

        if self.status_policy == StatusPolicy::RequireSuccess && !resp.is_success() {
            return Err(ClientError::Status {
                status: resp.status,
                body: String::from_utf8_lossy(&resp.body).into_owned(),
            });
        }
        serde_json::from_slice(&resp.body).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// `GET /search?{qs}` with `qs` appended as given; see [`crate::SearchQuery`]
    /// for building one.
    pub async fn search(&self, qs: &str) -> Result<SearchResponse, ClientError> {
        self.fetch(Endpoint::Search(qs)).await
    }

    /// `GET /sdn/{sdn_id}/alts`
    pub async fn get_sdn_alts(&self, sdn_id: &str) -> Result<Vec<Alt>, ClientError> {
        self.fetch(Endpoint::SdnAlts(sdn_id)).await
    }

    /// `GET /sdn/{sdn_id}/addresses`
    pub async fn get_sdn_addresses(&self, sdn_id: &str) -> Result<Vec<Address>, ClientError> {
        self.fetch(Endpoint::SdnAddresses(sdn_id)).await
    }

    /// `GET /ui/values/sdnType`. The argument is ignored and never sent.
    pub async fn get_sdn_types(&self, _qs: &str) -> Result<UiValues, ClientError> {
        self.fetch(Endpoint::UiValues(ValueKey::SdnType)).await
    }

    /// `GET /ui/values/program`. The argument is ignored and never sent.
    pub async fn get_programs(&self, _qs: &str) -> Result<UiValues, ClientError> {
        self.fetch(Endpoint::UiValues(ValueKey::Program)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requested URLs and replays one canned outcome.
    struct RecordingTransport {
        calls: Mutex<Vec<String>>,
        reply: Result<RawResponse, String>,
    }

    impl RecordingTransport {
        fn ok(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply: Ok(RawResponse { status, body: body.as_bytes().to_vec() }),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), reply: Err(msg.to_string()) })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn get(&self, url: &Url) -> Result<RawResponse, ClientError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.reply.clone().map_err(ClientError::Network)
        }
    }

    fn client(transport: Arc<RecordingTransport>) -> RemoteDataClient {
        RemoteDataClient::with_transport("http://ofac.test/", transport)
    }

    #[tokio::test]
    async fn alts_hits_path_once_and_decodes() {
        let t = RecordingTransport::ok(
            200,
            r#"[{"entityID":"306","alternateID":"220","alternateName":"NATIONAL BANK OF CUBA"}]"#,
        );
        let alts = client(t.clone()).get_sdn_alts("306").await.unwrap();
        assert_eq!(t.calls(), vec!["http://ofac.test/sdn/306/alts"]);
        assert_eq!(alts.len(), 1);
        assert_eq!(alts[0].alternate_name, "NATIONAL BANK OF CUBA");
    }

    #[tokio::test]
    async fn addresses_hits_path_once() {
        let t = RecordingTransport::ok(200, "[]");
        let addrs = client(t.clone()).get_sdn_addresses("173").await.unwrap();
        assert!(addrs.is_empty());
        assert_eq!(t.calls(), vec!["http://ofac.test/sdn/173/addresses"]);
    }

    #[tokio::test]
    async fn search_forwards_encoded_query_untouched() {
        let t =
            RecordingTransport::ok(200, r#"{"SDNs":null,"refreshedAt":"2019-01-01T00:00:00Z"}"#);
        client(t.clone()).search("name=al%20qaida&limit=2").await.unwrap();
        assert_eq!(t.calls(), vec!["http://ofac.test/search?name=al%20qaida&limit=2"]);
    }

    #[tokio::test]
    async fn value_lists_ignore_their_argument() {
        let t = RecordingTransport::ok(200, r#"["individual","entity","vessel","aircraft"]"#);
        let c = client(t.clone());
        let types = c.get_sdn_types("name=ignored").await.unwrap();
        c.get_programs("anything at all").await.unwrap();
        c.get_programs("").await.unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(
            t.calls(),
            vec![
                "http://ofac.test/ui/values/sdnType",
                "http://ofac.test/ui/values/program",
                "http://ofac.test/ui/values/program",
            ]
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let t = RecordingTransport::ok(200, "<html>gateway</html>");
        let err = client(t).get_sdn_alts("1").await.unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn network_failure_is_not_retried() {
        let t = RecordingTransport::failing("connection refused");
        let err = client(t.clone()).search("q=x").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(ref m) if m.contains("refused")));
        assert_eq!(t.calls().len(), 1);
    }

    #[tokio::test]
    async fn error_status_passes_through_by_default() {
        let t = RecordingTransport::ok(500, r#"["fallback"]"#);
        let values = client(t).get_programs("").await.unwrap();
        assert_eq!(values, vec!["fallback".to_string()]);
    }

    #[tokio::test]
    async fn rejected_search_keeps_backend_error() {
        let t = RecordingTransport::ok(400, r#"{"error":"missing search parameter(s)"}"#);
        let resp = client(t).search("").await.unwrap();
        assert_eq!(resp.error.as_deref(), Some("missing search parameter(s)"));
        assert!(resp.is_empty());
    }

    #[tokio::test]
    async fn require_success_maps_error_status() {
        let t = RecordingTransport::ok(400, r#"{"error":"missing search parameter(s)"}"#);
        let c = client(t).with_status_policy(StatusPolicy::RequireSuccess);
        match c.search("").await.unwrap_err() {
            ClientError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("missing search parameter"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generic_fetch_returns_untyped_json() {
        let t = RecordingTransport::ok(200, r#"{"SDNs":[],"extra":42}"#);
        let v: serde_json::Value = client(t).fetch(Endpoint::Search("q=x")).await.unwrap();
        assert_eq!(v["extra"], 42);
    }

    #[tokio::test]
    async fn bad_base_url_is_reported() {
        let t = RecordingTransport::ok(200, "[]");
        let c = RemoteDataClient::with_transport("not a url", t.clone());
        let err = c.url_for(&Endpoint::SdnAlts("1")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));

        let err = c.get_sdn_alts("1").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
        assert!(t.calls().is_empty());
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let c = RemoteDataClient::with_transport(
            "http://ofac.test/api/v1/",
            RecordingTransport::ok(200, "[]"),
        );
        let url = c.url_for(&Endpoint::SdnAddresses("9")).unwrap();
        assert_eq!(url.as_str(), "http://ofac.test/api/v1/sdn/9/addresses");
    }
}
