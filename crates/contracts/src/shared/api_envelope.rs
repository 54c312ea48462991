//! Response envelope normalization and the API error taxonomy.
//!
//! Observed response shapes:
//! - bare array: `[ {...}, ... ]`
//! - `{ data: [...], pagination: {...} }`
//! - `{ data: { data: [...], current_page, last_page, per_page, total } }`
//! - `{ data: { items: [...] }, meta: {...} }`
//! - errors: `{ error: true, data: { message } }`, `{ errors: { field: [..] } }`, `{ message }`

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::pagination::{ListResult, PageRequest, RawPagination};
use super::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("not authenticated")]
    NotAuthenticated,
}

impl ApiError {
    /// Builds the error for a non-success response (or a success response flagged `error: true`).
    pub fn from_response(status: u16, body: &Value) -> Self {
        if let Some(errors) = body.get("errors").and_then(FieldErrors::from_value) {
            return ApiError::Validation(errors);
        }
        if status == 401 {
            return ApiError::NotAuthenticated;
        }
        let message = extract_message(body)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Api { status, message }
    }

    /// One line for the notification snackbar.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => match errors.first() {
                Some((_, message)) => message.to_string(),
                None => "Please correct the highlighted fields".to_string(),
            },
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Network(_) => "Unable to reach the server. Please try again.".to_string(),
            ApiError::Decode(_) => "The server returned an unexpected response".to_string(),
            ApiError::NotAuthenticated => "Your session has expired. Please sign in again.".to_string(),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn extract_message(body: &Value) -> Option<String> {
    let candidates = [
        body.get("data").and_then(|d| d.get("message")),
        body.get("message"),
        body.get("error").filter(|e| e.is_string()),
        body.get("detail"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    pub data: Value,
    pub pagination: Option<RawPagination>,
    pub error: bool,
    pub message: Option<String>,
    pub errors: Option<FieldErrors>,
}

impl ApiEnvelope {
    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut obj) = body else {
            return Self {
                data: body,
                pagination: None,
                error: false,
                message: None,
                errors: None,
            };
        };

        let error = obj.get("error").and_then(Value::as_bool).unwrap_or(false);
        let message = obj.get("message").and_then(Value::as_str).map(str::to_string);
        let errors = obj.get("errors").and_then(FieldErrors::from_value);
        let mut pagination = obj
            .get("pagination")
            .or_else(|| obj.get("meta"))
            .and_then(RawPagination::from_value);

        let data = match obj.remove("data") {
            // paginator object nested inside `data`
            Some(Value::Object(mut inner))
                if inner.get("data").map_or(false, Value::is_array)
                    || inner.get("items").map_or(false, Value::is_array) =>
            {
                if pagination.is_none() {
                    pagination = RawPagination::from_value(&Value::Object(inner.clone()));
                }
                let key = if inner.get("data").map_or(false, Value::is_array) {
                    "data"
                } else {
                    "items"
                };
                inner.remove(key).unwrap_or(Value::Null)
            }
            Some(other) => other,
            None => match obj.remove("items") {
                Some(items) => {
                    if pagination.is_none() {
                        pagination = RawPagination::from_value(&Value::Object(obj.clone()));
                    }
                    items
                }
                None => Value::Object(obj),
            },
        };

        Self {
            data,
            pagination,
            error,
            message,
            errors,
        }
    }

    /// Turns a 2xx body flagged `error: true` into an error.
    pub fn check(self, status: u16) -> Result<Self, ApiError> {
        if !self.error && self.errors.is_none() {
            return Ok(self);
        }
        let mut body = serde_json::Map::new();
        body.insert("data".to_string(), self.data);
        if let Some(message) = self.message {
            body.insert("message".to_string(), Value::String(message));
        }
        if let Some(errors) = self.errors {
            let value = serde_json::to_value(errors).map_err(|e| ApiError::Decode(e.to_string()))?;
            body.insert("errors".to_string(), value);
        }
        let status = if (200..300).contains(&status) { 422 } else { status };
        Err(ApiError::from_response(status, &Value::Object(body)))
    }

    /// Any row that fails to deserialize fails the whole page.
    pub fn into_list<T: DeserializeOwned>(self, requested: PageRequest) -> Result<ListResult<T>, ApiError> {
        let rows = match self.data {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            other => {
                return Err(ApiError::Decode(format!(
                    "expected a list of records, got {}",
                    type_name(&other)
                )))
            }
        };
        let data = rows
            .into_iter()
            .map(serde_json::from_value::<T>)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(ListResult::from_envelope(data, self.pagination.as_ref(), requested))
    }

    pub fn into_item<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn bare_array_has_no_pagination() {
        let env = ApiEnvelope::from_value(json!([{ "id": 1 }, { "id": 2 }]));
        let list: ListResult<Row> = env.into_list(PageRequest::first(10)).unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.total, 2);
        assert_eq!(list.current_page, 1);
    }

    #[test]
    fn data_with_pagination_block() {
        let env = ApiEnvelope::from_value(json!({
            "data": [{ "id": 7 }],
            "pagination": { "page": 2, "limit": 1, "totalPages": 9, "total": 9 }
        }));
        let list: ListResult<Row> = env.into_list(PageRequest::new(2, 1)).unwrap();
        assert_eq!(list.data, vec![Row { id: 7 }]);
        assert_eq!((list.current_page, list.page_size, list.total), (2, 1, 9));
    }

    #[test]
    fn nested_paginator_inside_data() {
        let env = ApiEnvelope::from_value(json!({
            "data": {
                "current_page": 3, "per_page": 2, "last_page": 4, "total": 8,
                "data": [{ "id": 5 }, { "id": 6 }]
            }
        }));
        let list: ListResult<Row> = env.into_list(PageRequest::first(2)).unwrap();
        assert_eq!((list.current_page, list.page_size, list.total), (3, 2, 4));
        assert_eq!(list.total_records, Some(8));
    }

    #[test]
    fn items_with_meta() {
        let env = ApiEnvelope::from_value(json!({
            "items": [{ "id": 1 }],
            "meta": { "current_page": 1, "per_page": 50, "last_page": 1 }
        }));
        let list: ListResult<Row> = env.into_list(PageRequest::first(50)).unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.total, 1);
    }

    #[test]
    fn error_flag_with_message_becomes_api_error() {
        let env = ApiEnvelope::from_value(json!({
            "error": true,
            "data": { "message": "Brand code already exists" }
        }));
        let err = env.check(200).unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 422,
                message: "Brand code already exists".into()
            }
        );
    }

    #[test]
    fn errors_object_becomes_validation_error() {
        let err = ApiError::from_response(
            422,
            &json!({ "message": "Invalid", "errors": { "name": ["Name is required"] } }),
        );
        assert_eq!(err.user_message(), "Name is required");
        assert_eq!(err.field_errors().and_then(|e| e.get("name")), Some("Name is required"));
    }

    #[test]
    fn status_only_errors() {
        assert_eq!(ApiError::from_response(401, &Value::Null), ApiError::NotAuthenticated);
        assert_eq!(
            ApiError::from_response(500, &Value::Null).to_string(),
            "Request failed with status 500"
        );
    }

    #[test]
    fn non_list_data_is_a_decode_error() {
        let env = ApiEnvelope::from_value(json!({ "data": "nope" }));
        let err = env.into_list::<Row>(PageRequest::first(10)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn single_item_from_data() {
        let env = ApiEnvelope::from_value(json!({ "data": { "id": 42 } }));
        assert_eq!(env.into_item::<Row>().unwrap(), Row { id: 42 });
    }
}
