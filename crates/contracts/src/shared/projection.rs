//! Null-safe projections from backend records to table cells.
//!
//! Renderers return `Option<String>`; `None` (missing object, missing
//! sub-field, unparseable value) always renders as [`PLACEHOLDER`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const PLACEHOLDER: &str = "-";

/// Reference to a related record as embedded in a row, e.g. `{ "warehouse": { "code", "name" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NestedRef {
    /// Accepts `null`, `{}`, a full object, a flat string, or a JSON-encoded object string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(obj) => {
                let field = |keys: &[&str]| keys.iter().find_map(|k| obj.get(*k).and_then(scalar_text));
                Some(Self {
                    id: field(&["id", "uuid"]),
                    code: field(&["code"]),
                    name: field(&["name", "title", "description"]),
                })
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.starts_with('{') {
                    if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
                        if parsed.is_object() {
                            return Self::from_value(&parsed);
                        }
                    }
                }
                Some(Self {
                    name: Some(trimmed.to_string()),
                    ..Self::default()
                })
            }
            Value::Number(n) => Some(Self {
                id: Some(n.to_string()),
                ..Self::default()
            }),
            Value::Bool(_) | Value::Array(_) => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        non_blank(self.code.as_deref())
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        non_blank(self.id.as_deref())
    }
}

/// `#[serde(default, deserialize_with = "deserialize_nested_ref")]`
pub fn deserialize_nested_ref<'de, D>(deserializer: D) -> Result<Option<NestedRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(NestedRef::from_value(&value))
}

/// Deserializes a number or numeric string; anything else becomes `None`.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `true`/`false`, `1`/`0`, or `"active"`/`"inactive"`. `null` reads as active.
pub fn deserialize_active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "inactive" | "disabled" | "no"
        ),
        _ => true,
    })
}

pub fn default_active() -> bool {
    true
}

/// Ids arrive as numbers from some endpoints and as strings from others.
pub fn deserialize_id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| serde::de::Error::custom("expected a string or numeric id"))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Renderers
// ============================================================================

pub fn render_cell(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// "CODE - NAME", "CODE", "NAME", or "-".
pub fn code_name(reference: Option<&NestedRef>) -> String {
    render_cell(reference.and_then(|r| match (r.code(), r.name()) {
        (Some(code), Some(name)) => Some(format!("{} - {}", code, name)),
        (Some(code), None) => Some(code.to_string()),
        (None, Some(name)) => Some(name.to_string()),
        (None, None) => None,
    }))
}

pub fn name_only(reference: Option<&NestedRef>) -> String {
    render_cell(reference.and_then(NestedRef::name).map(str::to_string))
}

pub fn text_or_placeholder(value: Option<&str>) -> String {
    render_cell(non_blank(value).map(str::to_string))
}

/// Fixed decimals with thousands separators: `1234567.5` -> `"1,234,567.50"`.
pub fn number_or_placeholder(value: Option<f64>, decimals: usize) -> String {
    render_cell(value.filter(|v| v.is_finite()).map(|v| format_number(v, decimals)))
}

pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted.clone(), None),
    };
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// `YYYY-MM-DD` from a date, an RFC 3339 timestamp, or a `YYYY-MM-DD HH:MM:SS` string.
pub fn date_or_placeholder(value: Option<&str>) -> String {
    render_cell(non_blank(value).and_then(parse_date).map(|d| d.format("%Y-%m-%d").to_string()))
}

/// `YYYY-MM-DD HH:MM`; a bare date renders without time.
pub fn datetime_or_placeholder(value: Option<&str>) -> String {
    render_cell(non_blank(value).map(|s| {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            dt.format("%Y-%m-%d %H:%M").to_string()
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            dt.format("%Y-%m-%d %H:%M").to_string()
        } else if let Some(date) = parse_date(s) {
            date.format("%Y-%m-%d").to_string()
        } else {
            s.to_string()
        }
    }))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok().map(|dt| dt.date()))
        .or_else(|| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok())
}

pub fn flag_label(value: bool, yes: &str, no: &str) -> String {
    let label = if value { yes } else { no };
    label.to_string()
}

/// Reads a dotted path (`"warehouse.code"`) from a raw JSON row. String
/// values holding JSON objects are parsed on the way down.
pub fn json_field(row: &Value, path: &str) -> Option<String> {
    let mut current = row.clone();
    for key in path.split('.') {
        if let Value::String(s) = &current {
            current = serde_json::from_str(s).ok()?;
        }
        current = current.get(key)?.clone();
    }
    scalar_text(&current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct WarehouseRow {
        #[serde(default, deserialize_with = "deserialize_nested_ref")]
        warehouse: Option<NestedRef>,
    }

    fn row(value: Value) -> WarehouseRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn code_name_is_null_safe() {
        assert_eq!(code_name(row(json!({ "warehouse": null })).warehouse.as_ref()), "-");
        assert_eq!(code_name(row(json!({ "warehouse": {} })).warehouse.as_ref()), "-");
        assert_eq!(
            code_name(row(json!({ "warehouse": { "code": "W1" } })).warehouse.as_ref()),
            "W1"
        );
        assert_eq!(code_name(row(json!({})).warehouse.as_ref()), "-");
    }

    #[test]
    fn code_name_joins_both_parts() {
        let r = row(json!({ "warehouse": { "code": "W1", "name": "Central" } }));
        assert_eq!(code_name(r.warehouse.as_ref()), "W1 - Central");
        let r = row(json!({ "warehouse": { "code": " ", "name": "Central" } }));
        assert_eq!(code_name(r.warehouse.as_ref()), "Central");
    }

    #[test]
    fn flat_and_json_encoded_strings() {
        let flat = row(json!({ "warehouse": "Main store" }));
        assert_eq!(code_name(flat.warehouse.as_ref()), "Main store");

        let encoded = row(json!({ "warehouse": "{\"code\":\"W9\",\"name\":\"North\"}" }));
        assert_eq!(code_name(encoded.warehouse.as_ref()), "W9 - North");

        let broken = row(json!({ "warehouse": "{not json" }));
        assert_eq!(code_name(broken.warehouse.as_ref()), "{not json");
    }

    #[test]
    fn numeric_ids_and_codes_become_text() {
        let r = row(json!({ "warehouse": { "id": 12, "code": 501 } }));
        let w = r.warehouse.unwrap();
        assert_eq!(w.id(), Some("12"));
        assert_eq!(code_name(Some(&w)), "501");
    }

    #[test]
    fn numbers_and_dates() {
        assert_eq!(number_or_placeholder(Some(1234567.5), 2), "1,234,567.50");
        assert_eq!(number_or_placeholder(Some(-999.0), 0), "-999");
        assert_eq!(number_or_placeholder(Some(-0.001), 2), "0.00");
        assert_eq!(number_or_placeholder(None, 2), "-");
        assert_eq!(number_or_placeholder(Some(f64::NAN), 2), "-");

        assert_eq!(date_or_placeholder(Some("2024-03-15T14:02:26Z")), "2024-03-15");
        assert_eq!(date_or_placeholder(Some("2024-03-15")), "2024-03-15");
        assert_eq!(date_or_placeholder(Some("garbage")), "-");
        assert_eq!(datetime_or_placeholder(Some("2024-03-15 08:30:00")), "2024-03-15 08:30");
        assert_eq!(datetime_or_placeholder(None), "-");
    }

    #[test]
    fn text_helpers() {
        assert_eq!(text_or_placeholder(Some("  ")), "-");
        assert_eq!(text_or_placeholder(Some(" ok ")), "ok");
        assert_eq!(flag_label(true, "Active", "Inactive"), "Active");
        assert_eq!(name_only(None), "-");
    }

    #[test]
    fn json_field_walks_encoded_objects() {
        let raw = json!({
            "customer": "{\"name\":\"Acme\",\"address\":{\"city\":\"Lagos\"}}",
            "amount": 15
        });
        assert_eq!(json_field(&raw, "customer.name").as_deref(), Some("Acme"));
        assert_eq!(json_field(&raw, "customer.address.city").as_deref(), Some("Lagos"));
        assert_eq!(json_field(&raw, "amount").as_deref(), Some("15"));
        assert_eq!(json_field(&raw, "customer.phone"), None);
        assert_eq!(json_field(&raw, "warehouse.code"), None);
    }

    #[test]
    fn lenient_numbers() {
        #[derive(Deserialize)]
        struct Amount {
            #[serde(default, deserialize_with = "deserialize_lenient_f64")]
            amount: Option<f64>,
        }
        let parse = |v: Value| serde_json::from_value::<Amount>(v).unwrap().amount;
        assert_eq!(parse(json!({ "amount": "12.5" })), Some(12.5));
        assert_eq!(parse(json!({ "amount": 3 })), Some(3.0));
        assert_eq!(parse(json!({ "amount": null })), None);
        assert_eq!(parse(json!({})), None);
    }

    #[test]
    fn active_flag_spellings() {
        #[derive(Deserialize)]
        struct Flag {
            #[serde(default = "default_active", deserialize_with = "deserialize_active_flag")]
            is_active: bool,
        }
        let parse = |v: Value| serde_json::from_value::<Flag>(v).unwrap().is_active;
        assert!(parse(json!({ "is_active": 1 })));
        assert!(!parse(json!({ "is_active": 0 })));
        assert!(!parse(json!({ "is_active": "Inactive" })));
        assert!(parse(json!({ "is_active": null })));
        assert!(parse(json!({})));
    }
}
