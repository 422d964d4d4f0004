//! # bshc
//!
//! A Rust client library for Bosch Smart Home Controller devices.
//!
//! This library talks to a controller on the local network over
//! mutually-authenticated TLS: the client presents the certificate obtained
//! during pairing, and the controller's self-signed certificate is checked
//! against an explicit [`TrustPolicy`] instead of standard chain validation.
//!
//! ## Features
//!
//! - Async/await based API using Tokio
//! - Mutual TLS with an explicit, reviewed server trust policy
//! - Type-safe decoding of the controller's resource model
//! - Comprehensive error handling
//!
//! ## Quick Start
//!
//! ```no_run
//! use bshc::{BshcClient, MemoryCertificateStorage, TrustPolicy, TypedBshcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bshc::Error> {
//!     // Certificate material comes from the pairing workflow.
//!     let cert_pem = std::fs::read("client-cert.pem").expect("client certificate");
//!     let key_pem = std::fs::read("client-key.pem").expect("client key");
//!     let storage = MemoryCertificateStorage::from_pem(&cert_pem, &key_pem)?;
//!
//!     // Pin the controller's own certificate (DER), captured once.
//!     let controller_der = std::fs::read("controller.der").expect("controller certificate");
//!     let policy = TrustPolicy::pinned_certificate(controller_der);
//!
//!     let client = BshcClient::builder("bshc.local", policy).build(&storage)?;
//!     let typed = TypedBshcClient::new(client);
//!
//!     for room in typed.get_rooms().await?.payload() {
//!         println!("{}: {:?}", room.id, room.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`transport`] - Secure transport bootstrap and the generic call wrapper
//! - [`storage`] - The certificate storage collaborator
//! - [`response`] - Raw and typed response envelopes
//! - [`types`] - Typed records of the controller's resource model
//! - [`client`] - Raw [`BshcClient`] bound to the controller's paths
//! - [`typed`] - Decoding facade [`TypedBshcClient`]

pub mod client;
pub mod error;
pub mod response;
pub mod storage;
pub mod transport;
pub mod typed;
pub mod types;

// Re-exports for convenience
pub use client::{BshcClient, BshcClientBuilder};
pub use error::{Error, Result};
pub use response::{HubResponse, TypedResponse};
pub use storage::{CertificateStorage, MemoryCertificateStorage};
pub use transport::{CallOptions, Endpoint, TrustPolicy, hostname_matches};
pub use typed::TypedBshcClient;
pub use types::{Device, DeviceService, Information, PublicInformation, Room};
