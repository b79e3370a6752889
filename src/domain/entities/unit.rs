use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        UnitId(value.to_string())
    }
}

impl From<String> for UnitId {
    fn from(value: String) -> Self {
        UnitId(value)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Enabled,
    Disabled,
}

impl UnitStatus {
    pub const ALL: [UnitStatus; 2] = [UnitStatus::Enabled, UnitStatus::Disabled];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitStatus::Enabled => "Enabled",
            UnitStatus::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit types offered by the filter panel. Data may carry other values.
pub const KNOWN_UNIT_TYPES: [&str; 6] = [
    "Patrol Vehicle",
    "Emergency Response",
    "Traffic Control",
    "SWAT Vehicle",
    "Motorcycle Unit",
    "K9 Unit",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: UnitId,
    pub unit_name: String,
    pub unit_type: String,
    pub location: String,
    pub vehicle_reg: String,
    pub status: UnitStatus,
}

impl Unit {
    pub fn is_enabled(&self) -> bool {
        self.status == UnitStatus::Enabled
    }
}

/// Loose JSON object as accepted and echoed by the mutation routes.
pub type UnitFields = serde_json::Map<String, serde_json::Value>;

/// Editable fields of a unit. The id is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDraft {
    pub unit_name: String,
    pub unit_type: String,
    pub location: String,
    pub vehicle_reg: String,
    pub status: UnitStatus,
}

impl Default for UnitDraft {
    fn default() -> Self {
        Self {
            unit_name: String::new(),
            unit_type: KNOWN_UNIT_TYPES[0].to_string(),
            location: String::new(),
            vehicle_reg: String::new(),
            status: UnitStatus::Enabled,
        }
    }
}

impl From<&Unit> for UnitDraft {
    fn from(unit: &Unit) -> Self {
        Self {
            unit_name: unit.unit_name.clone(),
            unit_type: unit.unit_type.clone(),
            location: unit.location.clone(),
            vehicle_reg: unit.vehicle_reg.clone(),
            status: unit.status,
        }
    }
}

impl UnitDraft {
    pub fn into_fields(self) -> UnitFields {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => fields,
            _ => UnitFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationReceipt {
    pub message: String,
    pub data: UnitFields,
}

impl MutationReceipt {
    pub fn unit_id(&self) -> Option<&str> {
        self.data.get("id").and_then(|id| id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReceipt {
    pub message: String,
    pub deleted_id: UnitId,
}

fn sample(
    id: &str,
    unit_name: &str,
    unit_type: &str,
    location: &str,
    vehicle_reg: &str,
    status: UnitStatus,
) -> Unit {
    Unit {
        id: UnitId::from(id),
        unit_name: unit_name.to_string(),
        unit_type: unit_type.to_string(),
        location: location.to_string(),
        vehicle_reg: vehicle_reg.to_string(),
        status,
    }
}

static SAMPLE_UNITS: LazyLock<Vec<Unit>> = LazyLock::new(|| {
    vec![
        sample("UNIT-001", "Alpha Team", "Patrol Vehicle", "Downtown Station", "ABC-1234", UnitStatus::Enabled),
        sample("UNIT-002", "Bravo Squad", "Emergency Response", "North Precinct", "XYZ-5678", UnitStatus::Enabled),
        sample("UNIT-003", "Charlie Unit", "Traffic Control", "Highway Division", "DEF-9012", UnitStatus::Disabled),
        sample("UNIT-004", "Delta Force", "SWAT Vehicle", "Central Command", "GHI-3456", UnitStatus::Enabled),
        sample("UNIT-005", "Echo Team", "Motorcycle Unit", "East District", "JKL-7890", UnitStatus::Enabled),
        sample("UNIT-006", "Foxtrot Division", "K9 Unit", "South Station", "MNO-2468", UnitStatus::Disabled),
        sample("UNIT-007", "Golf Squad", "Patrol Vehicle", "West Precinct", "PQR-1357", UnitStatus::Enabled),
    ]
});

/// The fixed fleet served by the mock backend. Read-only for the life of the process.
pub fn sample_units() -> &'static [Unit] {
    &SAMPLE_UNITS
}
