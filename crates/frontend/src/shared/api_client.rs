//! REST client for the dashboard backend.
//!
//! Every call attaches the bearer token from local storage, turns non-2xx
//! responses into [`ApiError`] and hands successful bodies over as a
//! normalized [`ApiEnvelope`].

use contracts::shared::api_envelope::{ApiEnvelope, ApiError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use super::api_utils::api_url;
use crate::system::auth::storage;

thread_local! {
    static ON_UNAUTHORIZED: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Registered by the auth provider; runs whenever the backend answers 401.
pub fn set_unauthorized_handler(handler: impl Fn() + 'static) {
    ON_UNAUTHORIZED.with(|slot| *slot.borrow_mut() = Some(Rc::new(handler)));
}

fn handle_unauthorized() {
    let handler = ON_UNAUTHORIZED.with(|slot| slot.borrow().clone());
    if let Some(handler) = handler {
        handler();
    }
}

/// Body of a call whose result is a file rather than JSON.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Accept", "application/json");
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn network_error(path: &str, err: gloo_net::Error) -> ApiError {
    log::warn!("request to {} failed: {}", path, err);
    ApiError::Network(err.to_string())
}

fn encode_error(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(format!("failed to serialize request: {}", err))
}

fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

fn failure(path: &str, status: u16, body: &Value) -> ApiError {
    if status == 401 {
        handle_unauthorized();
    }
    let err = ApiError::from_response(status, body);
    log::warn!("{} -> {}: {}", path, status, err);
    err
}

async fn read_envelope(path: &str, response: Response) -> Result<ApiEnvelope, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    if !(200..300).contains(&status) {
        let body = parse_body(&text).unwrap_or(Value::Null);
        return Err(failure(path, status, &body));
    }

    let body = parse_body(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
    ApiEnvelope::from_value(body).check(status)
}

pub async fn get_json(path: &str) -> Result<ApiEnvelope, ApiError> {
    let response = authorized(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_envelope(path, response).await
}

pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<ApiEnvelope, ApiError> {
    let response = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_envelope(path, response).await
}

pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<ApiEnvelope, ApiError> {
    let response = authorized(Request::put(&api_url(path)))
        .json(body)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_envelope(path, response).await
}

pub async fn delete(path: &str) -> Result<ApiEnvelope, ApiError> {
    let response = authorized(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_envelope(path, response).await
}

/// GET whose 2xx body is returned untouched (exports).
pub async fn get_raw(path: &str) -> Result<RawResponse, ApiError> {
    let response = authorized(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| network_error(path, e))?;

    let status = response.status();
    if !(200..300).contains(&status) {
        let text = response.text().await.unwrap_or_default();
        let body = parse_body(&text).unwrap_or(Value::Null);
        return Err(failure(path, status, &body));
    }

    let content_type = response.headers().get("content-type");
    let body = response
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(RawResponse { content_type, body })
}
