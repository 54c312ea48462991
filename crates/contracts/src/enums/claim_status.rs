use serde::{Deserialize, Serialize};

/// Customer claim workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Open,
    InReview,
    Approved,
    Rejected,
    Settled,
}

impl ClaimStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ClaimStatus::Open => "open",
            ClaimStatus::InReview => "in_review",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Settled => "settled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClaimStatus::Open => "Open",
            ClaimStatus::InReview => "In review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Settled => "Settled",
        }
    }

    pub fn all() -> Vec<ClaimStatus> {
        vec![
            ClaimStatus::Open,
            ClaimStatus::InReview,
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
            ClaimStatus::Settled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "open" | "new" => Some(ClaimStatus::Open),
            "in_review" | "in review" | "review" => Some(ClaimStatus::InReview),
            "approved" => Some(ClaimStatus::Approved),
            "rejected" => Some(ClaimStatus::Rejected),
            "settled" | "closed" => Some(ClaimStatus::Settled),
            _ => None,
        }
    }

    /// Statuses a reviewer may move the claim to next.
    pub fn next_allowed(&self) -> Vec<ClaimStatus> {
        match self {
            ClaimStatus::Open => vec![ClaimStatus::InReview, ClaimStatus::Rejected],
            ClaimStatus::InReview => vec![ClaimStatus::Approved, ClaimStatus::Rejected],
            ClaimStatus::Approved => vec![ClaimStatus::Settled],
            ClaimStatus::Rejected | ClaimStatus::Settled => vec![],
        }
    }

    pub fn label(code: &str) -> String {
        Self::from_code(code)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_and_labels_unknown_codes_verbatim() {
        assert_eq!(ClaimStatus::from_code("In Review"), Some(ClaimStatus::InReview));
        assert_eq!(ClaimStatus::from_code("closed"), Some(ClaimStatus::Settled));
        assert_eq!(ClaimStatus::label("escalated"), "escalated");
    }

    #[test]
    fn terminal_statuses_have_no_successors() {
        assert!(ClaimStatus::Rejected.next_allowed().is_empty());
        assert!(ClaimStatus::Settled.next_allowed().is_empty());
        assert_eq!(ClaimStatus::Approved.next_allowed(), vec![ClaimStatus::Settled]);
    }
}
