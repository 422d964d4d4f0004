//! Main [`BshcClient`] implementation.
//!
//! The client binds the secure transport to the controller's resource
//! paths. Each method performs exactly one HTTPS round trip and returns the
//! raw [`HubResponse`] envelope; use [`TypedBshcClient`](crate::typed::TypedBshcClient)
//! for decoded records.

use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::response::HubResponse;
use crate::storage::CertificateStorage;
use crate::transport::{CallOptions, Endpoint, HttpTransport, TrustPolicy};

type ConfigureHook = Box<dyn FnOnce(reqwest::ClientBuilder) -> reqwest::ClientBuilder>;

/// Builder for [`BshcClient`].
///
/// The host and the [`TrustPolicy`] are mandatory; accepting arbitrary
/// server certificates is not an option this library offers.
pub struct BshcClientBuilder {
    host: String,
    policy: TrustPolicy,
    configure: Option<ConfigureHook>,
}

impl BshcClientBuilder {
    /// Creates a builder for the given controller host and trust policy.
    #[must_use]
    pub fn new(host: impl Into<String>, policy: TrustPolicy) -> Self {
        Self {
            host: host.into(),
            policy,
            configure: None,
        }
    }

    /// Registers an extension hook over the underlying HTTP client builder.
    ///
    /// The hook runs once, after the TLS context has been installed and
    /// before the client is finalized; use it for timeouts, proxies or
    /// connection-pool settings.
    #[must_use]
    pub fn configure_transport<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(reqwest::ClientBuilder) -> reqwest::ClientBuilder + 'static,
    {
        self.configure = Some(Box::new(configure));
        self
    }

    /// Builds the client, borrowing the certificate material from `storage`.
    ///
    /// # Errors
    ///
    /// Fails if the TLS context or the HTTP client cannot be constructed;
    /// see [`Error`](crate::error::Error) for the construction-time error
    /// kinds.
    pub fn build(self, storage: &dyn CertificateStorage) -> Result<BshcClient> {
        let configure = self.configure.unwrap_or_else(|| Box::new(|builder| builder));
        let transport = HttpTransport::new(self.host, self.policy, storage, configure)?;
        Ok(BshcClient { transport })
    }
}

/// Client for communicating with a Bosch Smart Home Controller.
///
/// The transport (TLS context included) is created once at construction and
/// shared, immutably, by all calls. Independent calls may run concurrently;
/// none of them is retried or replayed internally.
#[derive(Debug, Clone)]
pub struct BshcClient {
    transport: HttpTransport,
}

impl BshcClient {
    /// Creates a builder for the given controller host and trust policy.
    #[must_use]
    pub fn builder(host: impl Into<String>, policy: TrustPolicy) -> BshcClientBuilder {
        BshcClientBuilder::new(host, policy)
    }

    /// Returns the configured controller host.
    #[must_use]
    pub fn host(&self) -> &str {
        self.transport.host()
    }

    /// Executes a single request against the controller.
    ///
    /// This is the generic wrapper the resource methods are layered on; it
    /// is public so callers can reach paths this client does not bind.
    /// `segments` are percent-encoded individually.
    pub async fn call<D: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        method: Method,
        segments: &[&str],
        body: Option<&D>,
        options: &CallOptions,
    ) -> Result<HubResponse> {
        self.transport
            .call(endpoint, method, segments, body, options)
            .await
    }

    async fn get(&self, endpoint: Endpoint, segments: &[&str]) -> Result<HubResponse> {
        self.call::<()>(endpoint, Method::GET, segments, None, &CallOptions::default())
            .await
    }

    /// Gets controller information from the authenticated endpoint.
    pub async fn get_information(&self) -> Result<HubResponse> {
        self.get(Endpoint::Common, &["smarthome", "information"]).await
    }

    /// Gets controller information from the public endpoint.
    ///
    /// This works before pairing; the controller does not require a client
    /// certificate on the public port.
    pub async fn get_public_information(&self) -> Result<HubResponse> {
        self.get(Endpoint::Public, &["smarthome", "public", "information"])
            .await
    }

    /// Gets all rooms.
    pub async fn get_rooms(&self) -> Result<HubResponse> {
        self.get(Endpoint::Common, &["smarthome", "rooms"]).await
    }

    /// Gets all devices.
    pub async fn get_devices(&self) -> Result<HubResponse> {
        self.get(Endpoint::Common, &["smarthome", "devices"]).await
    }

    /// Gets a single device by identifier.
    pub async fn get_device(&self, device_id: &str) -> Result<HubResponse> {
        self.get(Endpoint::Common, &["smarthome", "devices", device_id])
            .await
    }

    /// Gets the services of all devices.
    pub async fn get_devices_services(&self) -> Result<HubResponse> {
        self.get(Endpoint::Common, &["smarthome", "services"]).await
    }

    /// Gets the services of a single device.
    pub async fn get_device_services(&self, device_id: &str) -> Result<HubResponse> {
        self.get(
            Endpoint::Common,
            &["smarthome", "devices", device_id, "services"],
        )
        .await
    }

    /// Gets one service of a device by service identifier.
    pub async fn get_device_service(
        &self,
        device_id: &str,
        service_id: &str,
    ) -> Result<HubResponse> {
        self.get(
            Endpoint::Common,
            &["smarthome", "devices", device_id, "services", service_id],
        )
        .await
    }
}
