//! Export descriptors (`/export?format=csv|xlsx&...filters`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::api_envelope::ApiError;
use super::pagination::Filters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn all() -> [ExportFormat; 2] {
        [ExportFormat::Csv, ExportFormat::Xlsx]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub filters: Filters,
    pub search: Option<String>,
}

impl ExportRequest {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            filters: Filters::new(),
            search: None,
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("format".to_string(), self.format.as_str().to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.trim().to_string()));
        }
        for (key, value) in &self.filters {
            if let Some(param) = value.as_param() {
                pairs.push((key.clone(), param));
            }
        }
        pairs
    }
}

/// What the backend handed back for an export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    DownloadUrl(String),
    Payload {
        bytes: Vec<u8>,
        mime: String,
        file_name: String,
    },
}

impl ExportOutcome {
    /// JSON bodies carry either `download_url` (top level or under `data`) or the
    /// file content as a string; any other body is the file itself.
    pub fn from_response(
        content_type: Option<&str>,
        body: Vec<u8>,
        format: ExportFormat,
        file_name: String,
    ) -> Result<Self, ApiError> {
        let is_json = content_type.map_or(false, |ct| ct.contains("application/json"));
        if !is_json {
            let mime = content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or(format.mime())
                .to_string();
            return Ok(ExportOutcome::Payload {
                bytes: body,
                mime,
                file_name,
            });
        }

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = ["download_url", "url"].iter().find_map(|key| {
            value
                .get(*key)
                .or_else(|| value.get("data").and_then(|d| d.get(*key)))
                .and_then(Value::as_str)
                .map(str::to_string)
        });
        if let Some(url) = url {
            return Ok(ExportOutcome::DownloadUrl(url));
        }
        let inline = value
            .get("data")
            .and_then(Value::as_str)
            .or_else(|| value.as_str());
        match inline {
            Some(content) => Ok(ExportOutcome::Payload {
                bytes: content.as_bytes().to_vec(),
                mime: format.mime().to_string(),
                file_name,
            }),
            None => Err(ApiError::from_response(200, &value)),
        }
    }
}

/// `distributors_2024-05-01.xlsx`
pub fn file_name(collection: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!("{}_{}.{}", collection, date.format("%Y-%m-%d"), format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::FilterValue;
    use serde_json::json;

    fn name() -> String {
        "orders_2024-05-01.csv".to_string()
    }

    #[test]
    fn url_in_json_body() {
        let body = serde_json::to_vec(&json!({ "data": { "download_url": "/files/x.xlsx" } })).unwrap();
        let outcome =
            ExportOutcome::from_response(Some("application/json"), body, ExportFormat::Xlsx, name())
                .unwrap();
        assert_eq!(outcome, ExportOutcome::DownloadUrl("/files/x.xlsx".into()));
    }

    #[test]
    fn raw_body_is_payload() {
        let outcome = ExportOutcome::from_response(
            Some("text/csv"),
            b"id,code\n1,A".to_vec(),
            ExportFormat::Csv,
            name(),
        )
        .unwrap();
        match outcome {
            ExportOutcome::Payload { bytes, mime, file_name } => {
                assert_eq!(bytes, b"id,code\n1,A".to_vec());
                assert_eq!(mime, "text/csv");
                assert_eq!(file_name, "orders_2024-05-01.csv");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn csv_string_inside_json() {
        let body = serde_json::to_vec(&json!({ "data": "a,b\n1,2" })).unwrap();
        let outcome =
            ExportOutcome::from_response(Some("application/json; charset=utf-8"), body, ExportFormat::Csv, name())
                .unwrap();
        assert!(matches!(outcome, ExportOutcome::Payload { ref mime, .. } if mime == ExportFormat::Csv.mime()));
    }

    #[test]
    fn json_error_body() {
        let body = serde_json::to_vec(&json!({ "error": true, "message": "Nothing to export" })).unwrap();
        let err = ExportOutcome::from_response(Some("application/json"), body, ExportFormat::Csv, name())
            .unwrap_err();
        assert_eq!(err.user_message(), "Nothing to export");
    }

    #[test]
    fn query_pairs_include_format_search_and_filters() {
        let mut filters = Filters::new();
        filters.insert("status".into(), FilterValue::Text("pending".into()));
        let request = ExportRequest::new(ExportFormat::Xlsx)
            .with_filters(filters)
            .with_search(Some("acme".into()));
        assert_eq!(
            request.to_query_pairs(),
            vec![
                ("format".to_string(), "xlsx".to_string()),
                ("search".to_string(), "acme".to_string()),
                ("status".to_string(), "pending".to_string()),
            ]
        );
    }

    #[test]
    fn file_name_includes_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(file_name("distributors", ExportFormat::Xlsx, date), "distributors_2024-05-01.xlsx");
    }
}
