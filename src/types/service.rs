//! Device service records.

use serde::{Deserialize, Serialize};

/// A service of a device, together with its current state.
///
/// State shapes are service-specific (temperature level, shutter contact,
/// ...), so the state is kept as raw JSON; callers that know the service
/// type can decode it further with `serde_json::from_value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceService {
    /// Record type marker (`DeviceServiceData`).
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Service identifier (e.g. `TemperatureLevel`).
    pub id: String,
    /// Identifier of the device the service belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Resource path of the service on the controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Current state of the service, shape depends on the service type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
    /// Operations the service supports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_state_is_kept_raw() {
        let json = r#"{
            "@type": "DeviceServiceData",
            "id": "TemperatureLevel",
            "deviceId": "hdm:ZigBee:000d6f000f12345a",
            "path": "/devices/hdm:ZigBee:000d6f000f12345a/services/TemperatureLevel",
            "state": {
                "@type": "temperatureLevelState",
                "temperature": 21.5
            }
        }"#;

        let service: DeviceService = serde_json::from_str(json).unwrap();
        assert_eq!(service.id, "TemperatureLevel");

        let state = service.state.unwrap();
        assert_eq!(state["@type"], "temperatureLevelState");
        assert!((state["temperature"].as_f64().unwrap() - 21.5).abs() < f64::EPSILON);
    }
}
