//! TLS context construction for the controller connection.
//!
//! The controller requires mutual TLS: the client presents the certificate
//! obtained during pairing, and the controller presents a self-signed
//! certificate that standard chain validation would reject. Instead of
//! disabling validation altogether, the server side is checked against an
//! explicit [`TrustPolicy`] chosen by the caller, plus a hostname check
//! pinned to the configured host.

use std::sync::Arc;

use rustls::client::WebPkiServerVerifier;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};

use crate::error::{Error, Result};
use crate::storage::CertificateStorage;

/// Trust policy for the certificate presented by the controller.
///
/// There is deliberately no default and no accept-everything variant: the
/// caller has to make an explicit decision about which server certificates
/// the client accepts.
#[derive(Debug, Clone)]
pub enum TrustPolicy {
    /// Accept exactly one certificate, compared byte-for-byte against the
    /// DER encoding of the certificate the controller presents.
    ///
    /// This is the usual choice: the controller certificate is self-signed
    /// and can be captured once (e.g. during pairing) and pinned.
    PinnedCertificate(CertificateDer<'static>),

    /// Validate the presented chain against the given root certificates
    /// using standard webpki rules.
    TrustedRoots(Vec<CertificateDer<'static>>),
}

impl TrustPolicy {
    /// Creates a policy pinning the given DER-encoded certificate.
    pub fn pinned_certificate(der: impl Into<Vec<u8>>) -> Self {
        Self::PinnedCertificate(CertificateDer::from(der.into()))
    }

    /// Creates a policy trusting chains rooted in the given DER certificates.
    #[must_use]
    pub fn trusted_roots(roots: Vec<CertificateDer<'static>>) -> Self {
        Self::TrustedRoots(roots)
    }
}

/// Returns true if the server-presented name matches the configured host.
///
/// The comparison is a plain ASCII case-insensitive equality check; no
/// wildcard or subdomain logic is applied.
#[must_use]
pub fn hostname_matches(presented: &str, configured: &str) -> bool {
    presented.eq_ignore_ascii_case(configured)
}

/// Server certificate verifier implementing the [`TrustPolicy`] and the
/// pinned hostname check.
pub(crate) struct HubServerVerifier {
    host: String,
    policy: TrustPolicy,
    /// Chain verifier for the `TrustedRoots` policy, built up front so
    /// invalid roots fail at construction instead of at handshake time.
    webpki: Option<Arc<WebPkiServerVerifier>>,
    provider: Arc<CryptoProvider>,
}

impl std::fmt::Debug for HubServerVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubServerVerifier")
            .field("host", &self.host)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl HubServerVerifier {
    pub(crate) fn new(
        host: impl Into<String>,
        policy: TrustPolicy,
        provider: Arc<CryptoProvider>,
    ) -> Result<Self> {
        let webpki = match &policy {
            TrustPolicy::PinnedCertificate(_) => None,
            TrustPolicy::TrustedRoots(roots) => {
                let mut store = RootCertStore::empty();
                for root in roots {
                    store.add(root.clone()).map_err(Error::Tls)?;
                }
                let verifier =
                    WebPkiServerVerifier::builder_with_provider(Arc::new(store), Arc::clone(&provider))
                        .build()
                        .map_err(|e| Error::Certificate {
                            reason: format!("failed to build root verifier: {e}"),
                        })?;
                Some(verifier)
            }
        };

        Ok(Self {
            host: host.into(),
            policy,
            webpki,
            provider,
        })
    }
}

/// Renders the name rustls resolved for the connection as a plain string.
fn server_name_str(name: &ServerName<'_>) -> String {
    match name {
        ServerName::DnsName(dns) => dns.as_ref().to_string(),
        ServerName::IpAddress(ip) => std::net::IpAddr::from(*ip).to_string(),
        _ => String::new(),
    }
}

impl ServerCertVerifier for HubServerVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        let presented = server_name_str(server_name);
        if !hostname_matches(&presented, &self.host) {
            tracing::warn!("rejecting connection: hostname {presented} does not match configured host");
            return Err(rustls::Error::InvalidCertificate(
                CertificateError::NotValidForName,
            ));
        }

        match &self.policy {
            TrustPolicy::PinnedCertificate(pinned) => {
                if end_entity.as_ref() == pinned.as_ref() {
                    Ok(ServerCertVerified::assertion())
                } else {
                    tracing::warn!("rejecting connection: presented certificate does not match pin");
                    Err(rustls::Error::InvalidCertificate(
                        CertificateError::ApplicationVerificationFailure,
                    ))
                }
            }
            TrustPolicy::TrustedRoots(_) => {
                // Constructed in new() whenever the policy has roots.
                let webpki = self.webpki.as_ref().ok_or(rustls::Error::General(
                    "root verifier missing".into(),
                ))?;
                webpki.verify_server_cert(end_entity, intermediates, server_name, ocsp_response, now)
            }
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Builds the client TLS context: fixed protocol version, client identity
/// from the certificate storage, server trust from the policy.
pub(crate) fn client_config(
    host: &str,
    policy: TrustPolicy,
    storage: &dyn CertificateStorage,
) -> Result<ClientConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let verifier = HubServerVerifier::new(host, policy, Arc::clone(&provider))?;

    let certificates = storage.client_certificate()?;
    let key = storage.client_private_key()?;

    // The protocol version must match the controller firmware, so it is
    // pinned instead of negotiated.
    let config = ClientConfig::builder_with_provider(provider)
        .with_protocol_versions(&[&rustls::version::TLS12])
        .map_err(Error::Tls)?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_client_auth_cert(certificates, key)
        .map_err(Error::Tls)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier(host: &str, policy: TrustPolicy) -> HubServerVerifier {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        HubServerVerifier::new(host, policy, provider).unwrap()
    }

    #[test]
    fn test_hostname_matches_case_insensitive() {
        assert!(hostname_matches("bshc.local", "bshc.local"));
        assert!(hostname_matches("BSHC.Local", "bshc.LOCAL"));
        assert!(hostname_matches("", ""));
    }

    #[test]
    fn test_hostname_matches_every_case_variant() {
        let host = "bshc.local";
        let letters: Vec<usize> = host
            .bytes()
            .enumerate()
            .filter(|(_, b)| b.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .collect();

        // All 2^9 upper/lower combinations of the letters in the host.
        for mask in 0u32..(1 << letters.len()) {
            let mut variant = host.as_bytes().to_vec();
            for (bit, &i) in letters.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    variant[i] = variant[i].to_ascii_uppercase();
                }
            }
            let variant = String::from_utf8(variant).unwrap();

            assert!(hostname_matches(&variant, host));
            assert!(hostname_matches(host, &variant));
            assert!(!hostname_matches(&variant, "other.local"));
        }
    }

    #[test]
    fn test_hostname_matches_rejects_different_names() {
        assert!(!hostname_matches("bshc.local", "other.local"));
        assert!(!hostname_matches("bshc.local", "bshc.local."));
        assert!(!hostname_matches("bshc", "bshc.local"));
    }

    #[test]
    fn test_pinned_certificate_accepted() {
        let pinned = CertificateDer::from(b"pinned-der".to_vec());
        let verifier = verifier("bshc.local", TrustPolicy::PinnedCertificate(pinned.clone()));

        let name = ServerName::try_from("BSHC.LOCAL").unwrap();
        let result =
            verifier.verify_server_cert(&pinned, &[], &name, &[], UnixTime::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_pinned_certificate_mismatch_rejected() {
        let pinned = CertificateDer::from(b"pinned-der".to_vec());
        let other = CertificateDer::from(b"other-der".to_vec());
        let verifier = verifier("bshc.local", TrustPolicy::PinnedCertificate(pinned));

        let name = ServerName::try_from("bshc.local").unwrap();
        let result = verifier.verify_server_cert(&other, &[], &name, &[], UnixTime::now());
        assert!(matches!(
            result,
            Err(rustls::Error::InvalidCertificate(
                CertificateError::ApplicationVerificationFailure
            ))
        ));
    }

    #[test]
    fn test_hostname_mismatch_rejected_before_pin_check() {
        let pinned = CertificateDer::from(b"pinned-der".to_vec());
        let verifier = verifier("bshc.local", TrustPolicy::PinnedCertificate(pinned.clone()));

        let name = ServerName::try_from("intruder.local").unwrap();
        let result = verifier.verify_server_cert(&pinned, &[], &name, &[], UnixTime::now());
        assert!(matches!(
            result,
            Err(rustls::Error::InvalidCertificate(CertificateError::NotValidForName))
        ));
    }

    #[test]
    fn test_ip_server_name_matches_configured_ip() {
        let pinned = CertificateDer::from(b"pinned-der".to_vec());
        let verifier = verifier("192.168.0.10", TrustPolicy::PinnedCertificate(pinned.clone()));

        let name = ServerName::try_from("192.168.0.10").unwrap();
        let result = verifier.verify_server_cert(&pinned, &[], &name, &[], UnixTime::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_trusted_roots_requires_parseable_root() {
        // An opaque blob is not a valid root certificate.
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let policy = TrustPolicy::trusted_roots(vec![CertificateDer::from(b"junk".to_vec())]);
        let result = HubServerVerifier::new("bshc.local", policy, provider);
        assert!(result.is_err());
    }
}
