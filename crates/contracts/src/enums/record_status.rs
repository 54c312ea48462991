use serde::{Deserialize, Serialize};

/// Activity status shared by master-data records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn code(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Inactive => "Inactive",
        }
    }

    pub fn all() -> Vec<RecordStatus> {
        vec![RecordStatus::Active, RecordStatus::Inactive]
    }

    /// Backends send "active"/"inactive", "1"/"0" or booleans rendered as strings.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "active" | "1" | "true" => Some(RecordStatus::Active),
            "inactive" | "0" | "false" => Some(RecordStatus::Inactive),
            _ => None,
        }
    }

    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        }
    }
}
