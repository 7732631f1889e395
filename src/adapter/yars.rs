//! YarsAdapter: HTTP client for a Yars triple store
//!
//! Writes are N3 statements sent with `PUT /{context}`, deletions are N3
//! select/where queries sent with `DELETE /{context}?q=...`, and reads are
//! `GET /{context}?q=...` answered with N3 triples.
//!
//! By default the transport keeps no idle connections: each call opens its own
//! connection and drops it once the response is read. `pool_connections` opts
//! into connection reuse; it never batches requests.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, warn, Instrument, Span};

use super::config::YarsConfig;
use super::{verify_resource, Adapter};
use crate::error::{ActiveRdfError, ActiveRdfResult};
use crate::n3;
use crate::query::deletion_query;
use crate::rdf::{Node, Resource, Triple};

/// Media type for N3 request and response bodies
pub const N3_MEDIA_TYPE: &str = "application/rdf+n3";

/// Characters kept as-is in query strings, matching form encoding
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Adapter for a Yars store reachable at `http://{host}:{port}/{context}`
#[derive(Debug)]
pub struct YarsAdapter {
    config: YarsConfig,
    base_url: String,
    client: Client,
    span: Span,
}

impl YarsAdapter {
    /// Create an adapter. No connection is opened until the first call.
    ///
    /// # Example
    /// ```no_run
    /// # use activerdf::{YarsAdapter, YarsConfig};
    /// let adapter = YarsAdapter::new(YarsConfig::new("localhost").with_context("people")).unwrap();
    /// assert_eq!(adapter.context(), "people");
    /// ```
    pub fn new(config: YarsConfig) -> ActiveRdfResult<Self> {
        let host = config.host.trim();
        if host.is_empty() {
            return Err(ActiveRdfError::ConfigurationError(
                "Yars adapter requires a host".to_string(),
            ));
        }

        let base_url = format!("http://{}:{}", host, config.port);
        let url = Url::parse(&base_url).map_err(|e| {
            ActiveRdfError::ConfigurationError(format!("invalid store address {}: {}", base_url, e))
        })?;
        let host_matches = url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(host));
        if !host_matches || url.path() != "/" {
            return Err(ActiveRdfError::ConfigurationError(format!(
                "invalid store host '{}'",
                host
            )));
        }

        let client = build_client(&config)?;
        let span = tracing::debug_span!(
            "yars",
            host = %host,
            port = config.port,
            context = %config.normalized_context()
        );

        info!(
            "opened YARS connection on {}/{}",
            base_url,
            config.normalized_context()
        );

        Ok(Self {
            config,
            base_url,
            client,
            span,
        })
    }

    /// Replace the span every request is recorded under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn host(&self) -> &str {
        self.config.host.trim()
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn context(&self) -> &str {
        self.config.normalized_context()
    }

    pub fn config(&self) -> &YarsConfig {
        &self.config
    }

    /// Count triples by parsing the response, unlike `query_count`, which
    /// counts newline characters in the raw body.
    pub async fn count_triples(&self, qs: &str) -> ActiveRdfResult<usize> {
        Ok(self.query(qs).await?.len())
    }

    fn context_url(&self) -> String {
        format!("{}/{}", self.base_url, self.context())
    }

    fn query_url(&self, qs: &str) -> String {
        format!("{}?q={}", self.context_url(), escape_query(qs))
    }

    /// Send a request, retrying only when the connection could not be made
    async fn send<F>(&self, build: F) -> ActiveRdfResult<Response>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() && attempt < self.config.retries => {
                    attempt += 1;
                    warn!("connection to YARS failed (attempt {}): {}", attempt, e);
                    tokio::time::sleep(RETRY_DELAY * attempt).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Add N3 data to the store
    async fn put(&self, data: String) -> ActiveRdfResult<bool> {
        debug!("putting data to yars (in context /{}): {}", self.context(), data);

        let url = self.context_url();
        let response = self
            .send(|| {
                self.client
                    .put(&url)
                    .header(CONTENT_TYPE, N3_MEDIA_TYPE)
                    .body(data.clone())
            })
            .await?;

        debug!("PUT - response from yars: {}", response.status());
        Ok(response.status() == StatusCode::CREATED)
    }

    /// Delete the results of a query from the store
    async fn delete(&self, qs: &str) -> ActiveRdfResult<bool> {
        debug!("DELETE - query: {}", qs);

        let url = self.query_url(qs);
        let response = self.send(|| self.client.delete(&url)).await?;

        debug!("DELETE - response from yars: {}", response.status());
        Ok(response.status() == StatusCode::OK)
    }

    /// Run a query; `None` when the store answers 204 No Content
    async fn get(&self, qs: &str) -> ActiveRdfResult<Option<String>> {
        if qs.trim().is_empty() {
            return Err(ActiveRdfError::query(qs, "query string is empty"));
        }
        debug!("querying yars in context /{}:\n{}", self.context(), qs);

        let url = self.query_url(qs);
        let response = self
            .send(|| self.client.get(&url).header(ACCEPT, N3_MEDIA_TYPE))
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            StatusCode::OK => Ok(Some(response.text().await?)),
            status => {
                let body = response.text().await.unwrap_or_default();
                let detail = if body.trim().is_empty() {
                    format!("bad request ({})", status)
                } else {
                    format!("bad request ({}): {}", status, body.trim())
                };
                Err(ActiveRdfError::query(qs, detail))
            }
        }
    }
}

#[async_trait]
impl Adapter for YarsAdapter {
    fn adapter_type(&self) -> &'static str {
        "yars"
    }

    fn query_language(&self) -> &str {
        &self.config.query_language
    }

    async fn add(
        &self,
        subject: &Resource,
        predicate: &Resource,
        object: &Node,
    ) -> ActiveRdfResult<bool> {
        let statement = format!(
            "{} {} {} .",
            n3::resource_to_n3(subject),
            n3::resource_to_n3(predicate),
            n3::node_to_n3(object)
        );
        self.put(statement).instrument(self.span.clone()).await
    }

    async fn remove(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> ActiveRdfResult<bool> {
        let subject = verify_resource("subject", subject)?;
        let predicate = verify_resource("predicate", predicate)?;

        let qs = deletion_query(subject, predicate, object)?;
        self.delete(&qs).instrument(self.span.clone()).await
    }

    async fn query(&self, qs: &str) -> ActiveRdfResult<Vec<Triple>> {
        let span = self.span.clone();
        async move {
            match self.get(qs).await? {
                None => Ok(Vec::new()),
                Some(body) => {
                    debug!("parsing YARS response");
                    n3::parse_triples(&body)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn query_count(&self, qs: &str) -> ActiveRdfResult<usize> {
        let body = self.get(qs).instrument(self.span.clone()).await?;
        Ok(body.map_or(0, |b| b.matches('\n').count()))
    }
}

fn build_client(config: &YarsConfig) -> ActiveRdfResult<Client> {
    let mut builder = Client::builder();

    builder = match config.proxy.as_deref() {
        Some(proxy) => builder.proxy(parse_proxy(proxy)?),
        None => builder.no_proxy(),
    };

    if !config.pool_connections {
        builder = builder.pool_max_idle_per_host(0);
    }

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| ActiveRdfError::ConfigurationError(e.to_string()))
}

fn parse_proxy(proxy: &str) -> ActiveRdfResult<reqwest::Proxy> {
    let invalid = |reason: String| {
        ActiveRdfError::ConfigurationError(format!(
            "provided proxy '{}' is not a valid HTTP proxy: {}",
            proxy, reason
        ))
    };

    let url = Url::parse(proxy.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    reqwest::Proxy::http(url.as_str()).map_err(|e| invalid(e.to_string()))
}

/// Form-style query encoding: spaces become `+`
fn escape_query(qs: &str) -> String {
    utf8_percent_encode(qs, QUERY_ESCAPE)
        .to_string()
        .replace(' ', "+")
}
