//! Device records.

use serde::{Deserialize, Serialize};

/// A device paired with the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Record type marker (`device`).
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Device identifier (e.g. `hdm:HomeMaticIP:3014F711A00004953859F31B`).
    pub id: String,
    /// Identifier of the owning controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_device_id: Option<String>,
    /// Identifiers of the services the device exposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_service_ids: Option<Vec<String>>,
    /// Manufacturer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Identifier of the room the device is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Device model code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    /// Serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// Device profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Availability status (e.g. `AVAILABLE`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Identifiers of child devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_device_ids: Option<Vec<String>>,
}
