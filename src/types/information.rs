//! Controller information records.

use serde::{Deserialize, Serialize};

/// Controller information from the authenticated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Information {
    /// Software version of the controller.
    pub version: Option<String>,
    /// Update state (e.g. `NO_UPDATE_AVAILABLE`).
    pub update_state: Option<String>,
    /// Connectivity service version.
    pub connectivity_version: Option<String>,
}

/// Controller information from the public, unauthenticated endpoint.
///
/// Available before pairing; used to identify a controller on the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicInformation {
    /// API versions supported by the controller.
    pub api_versions: Option<Vec<String>>,
    /// IP address the controller reports for itself.
    pub shc_ip_address: Option<String>,
    /// Hardware generation (e.g. `SHC_1`, `SHC_2`).
    pub shc_generation: Option<String>,
    /// MAC address of the controller.
    pub mac_address: Option<String>,
    /// Software update state.
    pub software_update_state: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_information_decodes_known_fields() {
        let json = r#"{
            "apiVersions": ["2.9", "3.2"],
            "shcIpAddress": "192.168.0.10",
            "shcGeneration": "SHC_2",
            "macAddress": "64-da-a0-00-00-00",
            "someFutureField": true
        }"#;

        let info: PublicInformation = serde_json::from_str(json).unwrap();
        assert_eq!(info.shc_generation.as_deref(), Some("SHC_2"));
        assert_eq!(
            info.api_versions.as_deref(),
            Some(&["2.9".to_string(), "3.2".to_string()][..])
        );
    }

    #[test]
    fn test_information_tolerates_missing_fields() {
        let info: Information = serde_json::from_str("{}").unwrap();
        assert!(info.version.is_none());
        assert!(info.update_state.is_none());
    }
}
