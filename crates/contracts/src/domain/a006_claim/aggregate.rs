use serde::{Deserialize, Serialize};

use crate::domain::common::{RecordId, Resource};
use crate::enums::ClaimStatus;
use crate::shared::pagination::{FilterValue, Filters};
use crate::shared::projection::{deserialize_lenient_f64, deserialize_nested_ref, NestedRef};
use crate::shared::validation::FieldErrors;

/// Customer claim raised from the field. `reason` is often stored as a
/// JSON-encoded object string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: i64,
    #[serde(alias = "code")]
    pub claim_code: String,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub customer: Option<NestedRef>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub reason: Option<NestedRef>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Claim {
    pub fn status(&self) -> Option<ClaimStatus> {
        ClaimStatus::from_code(&self.status)
    }

    /// Unknown statuses are treated as final.
    pub fn allowed_transitions(&self) -> Vec<ClaimStatus> {
        self.status().map(|s| s.next_allowed()).unwrap_or_default()
    }

    pub fn status_path(id: &i64) -> String {
        format!("{}/{}/status", Self::api_path(), id.as_string())
    }
}

impl Resource for Claim {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.claim_code
    }

    fn entity_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "claims"
    }

    fn element_name() -> &'static str {
        "Claim"
    }

    fn list_name() -> &'static str {
        "Claims"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimStatusUpdate {
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ClaimStatusUpdate {
    /// Rejections must say why; the move has to be legal from `current`.
    pub fn validate(&self, current: &Claim) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !current.allowed_transitions().contains(&self.status) {
            errors.add(
                "status",
                format!(
                    "Cannot move a claim from {} to {}",
                    ClaimStatus::label(&current.status),
                    self.status.display_name()
                ),
            );
        }
        if self.status == ClaimStatus::Rejected {
            errors.require("note", "Note", self.note.as_deref().unwrap_or_default());
        }
        errors.max_len("note", "Note", self.note.as_deref().unwrap_or_default(), 500);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFilter {
    pub status: Option<ClaimStatus>,
    pub customer_id: Option<String>,
}

impl ClaimFilter {
    pub fn to_filters(&self) -> Filters {
        let mut filters = Filters::new();
        if let Some(status) = self.status {
            filters.insert("status".into(), FilterValue::Text(status.code().into()));
        }
        if let Some(id) = self.customer_id.as_deref().filter(|s| !s.trim().is_empty()) {
            filters.insert("customer_id".into(), FilterValue::Text(id.trim().into()));
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::projection::{code_name, name_only};
    use serde_json::json;

    fn claim(status: &str) -> Claim {
        serde_json::from_value(json!({
            "id": 11,
            "claim_code": "CL-0011",
            "customer": { "code": "C-7", "name": "Corner Shop" },
            "reason": "{\"code\":\"DMG\",\"name\":\"Damaged goods\"}",
            "amount": 120,
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn decodes_json_encoded_reason() {
        let c = claim("open");
        assert_eq!(name_only(c.reason.as_ref()), "Damaged goods");
        assert_eq!(code_name(c.customer.as_ref()), "C-7 - Corner Shop");
        assert_eq!(Claim::status_path(&c.id), "/api/claims/11/status");
    }

    #[test]
    fn rejection_needs_a_note_and_a_legal_move() {
        let open = claim("open");
        let reject = ClaimStatusUpdate {
            status: ClaimStatus::Rejected,
            note: None,
        };
        assert_eq!(
            reject.validate(&open).unwrap_err().get("note"),
            Some("Note is required")
        );

        let settle = ClaimStatusUpdate {
            status: ClaimStatus::Settled,
            note: None,
        };
        assert!(settle.validate(&open).unwrap_err().get("status").is_some());
        assert!(settle.validate(&claim("approved")).is_ok());
    }

    #[test]
    fn unknown_status_allows_nothing() {
        assert!(claim("escalated").allowed_transitions().is_empty());
    }
}
