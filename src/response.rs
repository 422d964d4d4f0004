//! Response envelopes returned by controller calls.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Raw response envelope of a single controller call.
///
/// Exactly one envelope is produced per call. The body is fully buffered,
/// so it can be inspected and decoded without touching the connection
/// again; the envelope is not reused across calls.
#[derive(Debug, Clone)]
pub struct HubResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Bytes,
}

impl HubResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, url: Url, body: Bytes) -> Self {
        Self {
            status,
            headers,
            url,
            body,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the URL the response was received from.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the raw response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decodes the body into a single typed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is malformed JSON or does not
    /// match the expected shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    /// Decodes the body into an ordered list of typed records.
    ///
    /// The resulting order is exactly the order of the JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a JSON array of the
    /// expected element shape.
    pub fn decode_list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.decode()
    }
}

/// A raw response envelope paired with its successfully decoded payload.
#[derive(Debug, Clone)]
pub struct TypedResponse<T> {
    response: HubResponse,
    payload: T,
}

impl<T> TypedResponse<T> {
    pub(crate) fn new(response: HubResponse, payload: T) -> Self {
        Self { response, payload }
    }

    /// Returns the raw response envelope the payload was decoded from.
    #[must_use]
    pub const fn response(&self) -> &HubResponse {
        &self.response
    }

    /// Returns the decoded payload.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Consumes the envelope and returns the decoded payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}
