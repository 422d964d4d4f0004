//! Secure transport layer for controller communication.
//!
//! This module builds the preconfigured HTTPS client (mutual TLS, pinned
//! hostname verification, JSON support) and provides the generic call
//! wrapper every resource method is layered on.

pub mod tls;

use bytes::Bytes;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::response::HubResponse;
use crate::storage::CertificateStorage;

pub use tls::{TrustPolicy, hostname_matches};

/// Port of the public, unauthenticated endpoint.
pub const PUBLIC_PORT: u16 = 8446;

/// Port of the common, certificate-authenticated endpoint.
pub const COMMON_PORT: u16 = 8444;

/// Port of the pairing endpoint.
pub const PAIR_PORT: u16 = 8443;

/// Logical endpoint classes of the controller.
///
/// The controller serves different access tiers on fixed ports of the same
/// host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Public endpoint, reachable without client authentication.
    Public,
    /// Common endpoint, requires the paired client certificate.
    Common,
    /// Pairing endpoint.
    Pairing,
}

impl Endpoint {
    /// Returns the fixed port number of this endpoint.
    #[must_use]
    pub const fn port(self) -> u16 {
        match self {
            Self::Public => PUBLIC_PORT,
            Self::Common => COMMON_PORT,
            Self::Pairing => PAIR_PORT,
        }
    }
}

/// Per-call customization hook for the outgoing request.
///
/// Lets a caller add headers or other request metadata without widening the
/// call wrapper's signature. The default is the identity: the request is
/// sent unchanged.
pub struct CallOptions {
    configure: Box<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>,
}

impl CallOptions {
    /// Creates options from a request-mutation function.
    #[must_use]
    pub fn new<F>(configure: F) -> Self
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    {
        Self {
            configure: Box::new(configure),
        }
    }

    /// Convenience constructor adding a single header to the request.
    #[must_use]
    pub fn header(name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(move |builder| builder.header(name, value.clone()))
    }

    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        (self.configure)(builder)
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::new(|builder| builder)
    }
}

impl std::fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallOptions").finish_non_exhaustive()
    }
}

/// Builds the request URL from scheme, host, endpoint port and path segments.
///
/// Each segment is percent-encoded on its own, so identifiers containing
/// reserved characters cannot break out of their path position.
pub(crate) fn build_url(host: &str, endpoint: Endpoint, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(&format!("https://{host}:{}/", endpoint.port())).map_err(|e| {
        Error::Url {
            reason: format!("cannot build base URL for host {host}: {e}"),
        }
    })?;

    url.path_segments_mut()
        .map_err(|()| Error::Url {
            reason: "base URL does not accept path segments".into(),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Assembles one outgoing request: URL, JSON accept header, per-call
/// options, and the optional JSON body, in that order.
pub(crate) fn build_request<D: Serialize + ?Sized>(
    client: &reqwest::Client,
    host: &str,
    endpoint: Endpoint,
    method: Method,
    segments: &[&str],
    body: Option<&D>,
    options: &CallOptions,
) -> Result<RequestBuilder> {
    let url = build_url(host, endpoint, segments)?;
    tracing::debug!("{method} {url}");

    let mut builder = client
        .request(method, url)
        .header(ACCEPT, HeaderValue::from_static("application/json"));
    builder = options.apply(builder);

    if let Some(body) = body {
        builder = builder.json(body);
    }

    Ok(builder)
}

/// The preconfigured HTTPS transport shared by all calls of one client.
///
/// Constructed once with the TLS context from [`tls`], then treated as
/// immutable. The underlying `reqwest` client is safe for concurrent reuse;
/// each call builds its own request against it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    host: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for the given host.
    ///
    /// `configure` is the extension hook receiving the partially configured
    /// client builder; use it for timeouts, proxies or extra middleware.
    ///
    /// # Errors
    ///
    /// Fails if the TLS context cannot be constructed (unsupported protocol
    /// version, rejected certificate material) or if the final client
    /// configuration is invalid. These are construction-time errors; no
    /// network traffic is involved.
    pub fn new(
        host: impl Into<String>,
        policy: TrustPolicy,
        storage: &dyn CertificateStorage,
        configure: impl FnOnce(reqwest::ClientBuilder) -> reqwest::ClientBuilder,
    ) -> Result<Self> {
        let host = host.into();
        let tls = tls::client_config(&host, policy, storage)?;

        let builder = reqwest::Client::builder().use_preconfigured_tls(tls);
        let client = configure(builder).build().map_err(Error::Transport)?;

        Ok(Self { host, client })
    }

    /// Returns the configured host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Executes exactly one HTTPS request and returns exactly one response
    /// envelope or one error.
    ///
    /// The returned future is lazy: no request is made before it is polled,
    /// and dropping it before completion abandons the call. The body, when
    /// present, is serialized as JSON; without a body the request is sent
    /// empty. The full response body is buffered before the envelope is
    /// returned, so decoding never observes a partial payload.
    pub async fn call<D: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        method: Method,
        segments: &[&str],
        body: Option<&D>,
        options: &CallOptions,
    ) -> Result<HubResponse> {
        let builder = build_request(
            &self.client,
            &self.host,
            endpoint,
            method,
            segments,
            body,
            options,
        )?;

        let response = builder.send().await.map_err(Error::Transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let payload: Bytes = response.bytes().await.map_err(Error::Transport)?;

        tracing::debug!("{status} from {url} ({} body bytes)", payload.len());
        if status != StatusCode::OK {
            tracing::trace!("non-OK response body: {:?}", payload);
        }

        Ok(HubResponse::new(status, headers, url, payload))
    }
}
