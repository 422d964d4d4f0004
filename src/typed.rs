//! Typed facade over [`BshcClient`].
//!
//! Each method fixes one controller resource, performs the call through the
//! generic wrapper and decodes the body into its typed record (or ordered
//! list of records). Decode failures surface as errors; they are never
//! swallowed or defaulted.

use crate::client::BshcClient;
use crate::error::Result;
use crate::response::TypedResponse;
use crate::types::{Device, DeviceService, Information, PublicInformation, Room};

/// Typed client for the controller's resource model.
#[derive(Debug, Clone)]
pub struct TypedBshcClient {
    client: BshcClient,
}

impl TypedBshcClient {
    /// Creates a typed facade over the given client.
    #[must_use]
    pub const fn new(client: BshcClient) -> Self {
        Self { client }
    }

    /// Returns the underlying raw client.
    #[must_use]
    pub const fn client(&self) -> &BshcClient {
        &self.client
    }

    /// Gets controller information from the authenticated endpoint.
    pub async fn get_information(&self) -> Result<TypedResponse<Information>> {
        let response = self.client.get_information().await?;
        let payload = response.decode()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets controller information from the public endpoint.
    pub async fn get_public_information(&self) -> Result<TypedResponse<PublicInformation>> {
        let response = self.client.get_public_information().await?;
        let payload = response.decode()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets all rooms, in the order the controller lists them.
    pub async fn get_rooms(&self) -> Result<TypedResponse<Vec<Room>>> {
        let response = self.client.get_rooms().await?;
        let payload = response.decode_list()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets all devices.
    pub async fn get_devices(&self) -> Result<TypedResponse<Vec<Device>>> {
        let response = self.client.get_devices().await?;
        let payload = response.decode_list()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets a single device by identifier.
    pub async fn get_device(&self, device_id: &str) -> Result<TypedResponse<Device>> {
        let response = self.client.get_device(device_id).await?;
        let payload = response.decode()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets the services of all devices.
    pub async fn get_devices_services(&self) -> Result<TypedResponse<Vec<DeviceService>>> {
        let response = self.client.get_devices_services().await?;
        let payload = response.decode_list()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets the services of a single device.
    pub async fn get_device_services(
        &self,
        device_id: &str,
    ) -> Result<TypedResponse<Vec<DeviceService>>> {
        let response = self.client.get_device_services(device_id).await?;
        let payload = response.decode_list()?;
        Ok(TypedResponse::new(response, payload))
    }

    /// Gets one service of a device by service identifier.
    pub async fn get_device_service(
        &self,
        device_id: &str,
        service_id: &str,
    ) -> Result<TypedResponse<DeviceService>> {
        let response = self.client.get_device_service(device_id, service_id).await?;
        let payload = response.decode()?;
        Ok(TypedResponse::new(response, payload))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rcgen::{CertifiedKey, generate_simple_self_signed};
    use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio_rustls::TlsAcceptor;

    use crate::client::BshcClient;
    use crate::error::Error;
    use crate::storage::MemoryCertificateStorage;
    use crate::transport::{COMMON_PORT, TrustPolicy};

    use super::TypedBshcClient;

    struct Identity {
        certificate: CertificateDer<'static>,
        key: PrivateKeyDer<'static>,
    }

    fn self_signed(names: &[&str]) -> Identity {
        let names: Vec<String> = names.iter().map(ToString::to_string).collect();
        let CertifiedKey { cert, key_pair } = generate_simple_self_signed(names).unwrap();
        Identity {
            certificate: cert.der().clone(),
            key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der())),
        }
    }

    fn canned_response(path: &str) -> (&'static str, &'static str) {
        match path {
            "/smarthome/rooms" => ("200 OK", r#"[{"id":"r1"},{"id":"r2"}]"#),
            "/smarthome/devices/d1" => ("200 OK", r#"{"@type":"device","id":"d1"}"#),
            "/smarthome/devices/bad" => ("200 OK", "this is not json"),
            _ => ("404 Not Found", "{}"),
        }
    }

    /// Minimal HTTPS hub: answers one canned JSON body per request path.
    async fn run_stub_hub(listener: TcpListener, acceptor: TlsAcceptor) {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let acceptor = acceptor.clone();
            let _handle = tokio::spawn(async move {
                // Handshake failures are expected in the wrong-pin scenario.
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match tls.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => {
                            head.extend_from_slice(&buf[..n]);
                            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let request = String::from_utf8_lossy(&head);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = canned_response(&path);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );

                let _ = tls.write_all(response.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    }

    fn acceptor_for(identity: &Identity) -> TlsAcceptor {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = rustls::ServerConfig::builder_with_provider(provider)
            .with_protocol_versions(&[&rustls::version::TLS12])
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![identity.certificate.clone()], identity.key.clone_key())
            .unwrap();
        TlsAcceptor::from(Arc::new(config))
    }

    fn client_with_pin(pinned: CertificateDer<'static>) -> TypedBshcClient {
        let client_identity = self_signed(&["bshc-client"]);
        let storage = MemoryCertificateStorage::from_der(
            vec![client_identity.certificate],
            client_identity.key,
        );

        let client = BshcClient::builder("127.0.0.1", TrustPolicy::PinnedCertificate(pinned))
            .build(&storage)
            .unwrap();
        TypedBshcClient::new(client)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stub_hub_scenarios() {
        let hub_identity = self_signed(&["127.0.0.1"]);
        let listener = TcpListener::bind(("127.0.0.1", COMMON_PORT))
            .await
            .expect("common port free for stub hub");
        let hub = tokio::spawn(run_stub_hub(listener, acceptor_for(&hub_identity)));

        let typed = client_with_pin(hub_identity.certificate.clone());

        // Rooms decode as an ordered list.
        let rooms = typed.get_rooms().await.unwrap();
        assert_eq!(rooms.response().status(), reqwest::StatusCode::OK);
        let ids: Vec<&str> = rooms.payload().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2"]);

        // A single device decodes with its identifier.
        let device = typed.get_device("d1").await.unwrap();
        assert_eq!(device.payload().id, "d1");

        // A malformed body is a decode failure, not a transport failure.
        let err = typed.get_device("bad").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        // A client pinned to a different certificate never gets a response.
        let wrong_pin = self_signed(&["127.0.0.1"]);
        let rejected = client_with_pin(wrong_pin.certificate);
        let err = rejected.get_rooms().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));

        hub.abort();
    }
}
