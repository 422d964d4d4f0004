//! Room records.

use serde::{Deserialize, Serialize};

/// A room configured on the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Record type marker (`room`).
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Room identifier (e.g. `hz_1`).
    pub id: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Icon identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
}
