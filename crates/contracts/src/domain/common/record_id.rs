use std::hash::Hash;

/// Identifier of a backend record. Ids travel as path segments, so they
/// round-trip through strings.
pub trait RecordId: Clone + PartialEq + Eq + Hash + std::fmt::Debug + 'static {
    fn as_string(&self) -> String;

    fn from_string(s: &str) -> Result<Self, String>;
}

impl RecordId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

impl RecordId for String {
    fn as_string(&self) -> String {
        self.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("Empty id".to_string())
        } else {
            Ok(s.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_round_trip() {
        assert_eq!(i64::from_string(" 42 "), Ok(42));
        assert_eq!(42i64.as_string(), "42");
        assert!(i64::from_string("abc").is_err());
    }

    #[test]
    fn string_ids_reject_blank() {
        assert!(String::from_string("  ").is_err());
        assert_eq!(String::from_string("ab-1"), Ok("ab-1".to_string()));
    }
}
