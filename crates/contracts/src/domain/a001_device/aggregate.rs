use crate::enums::DeviceType;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// Canonical device record as consumed by the console.
///
/// `uuid` is assigned by the backend and never changes; `name` and
/// `description` are the only fields the operator can edit. `version` and
/// `status` mirror backend state and may be absent on the wire, in which
/// case they map to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub uuid: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: String,
}

impl DeviceRecord {
    /// Empty draft of a new device of the given type
    pub fn draft(device_type: DeviceType) -> Self {
        Self {
            uuid: String::new(),
            device_type,
            name: String::new(),
            description: String::new(),
            version: String::new(),
            status: String::new(),
        }
    }

    /// Copy with every string field trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            uuid: self.uuid.trim().to_string(),
            device_type: self.device_type,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            version: self.version.trim().to_string(),
            status: self.status.trim().to_string(),
        }
    }

    /// True when no string field is blank
    pub fn is_complete(&self) -> bool {
        [
            &self.uuid,
            &self.name,
            &self.description,
            &self.version,
            &self.status,
        ]
        .iter()
        .all(|v| !v.trim().is_empty())
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Which slice of the device collection a list request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFilter {
    All,
    Type(DeviceType),
}

impl DeviceFilter {
    pub fn code(&self) -> &'static str {
        match self {
            DeviceFilter::All => "all",
            DeviceFilter::Type(t) => t.code(),
        }
    }
}

impl From<DeviceType> for DeviceFilter {
    fn from(t: DeviceType) -> Self {
        DeviceFilter::Type(t)
    }
}
