//! Response envelope normalization
//!
//! The service does not answer with one consistent wire shape. Success bodies
//! are either `{code, message, data}` with the payload nested under `data`,
//! or the payload itself. Error bodies carry their message as
//! `{detail: {message, errors}}`, `{detail: "..."}`, or `{message: "..."}`.
//! The functions here turn all of that into either the inner payload or a
//! single [`ApiError`] with a human-readable message.

use serde_json::Value;

use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE};

/// Envelope business code for a successful call
const CODE_OK: i64 = 200;

/// Message fragments the service uses for authentication failures. A match
/// anywhere in an error message means the session is invalid, regardless of
/// the HTTP status that carried it.
const AUTH_FRAGMENTS: &[&str] = &[
    "not authenticated",
    "invalid token",
    "token expired",
    "无效的认证令牌",
    "认证令牌已过期",
    "未认证",
];

/// Unwrap a success body: an enveloped `{code, message, data}` yields its
/// `data`, anything else is the payload itself. An envelope whose business
/// code is not 200 is a failure even though the HTTP status was 2xx.
pub(crate) fn unwrap_success(mut body: Value) -> Result<Value, ApiError> {
    let code = body.get("code").and_then(Value::as_i64);
    match code {
        Some(CODE_OK) => Ok(body
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null)),
        Some(_) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string();
            if is_auth_fragment(&message) {
                Err(ApiError::unauthenticated())
            } else {
                Err(ApiError::api(None, message))
            }
        }
        None => Ok(body),
    }
}

/// Classify a non-2xx response into an authentication failure or a resource
/// error carrying the most specific message the body offers.
pub(crate) fn classify_failure(status: u16, body: &Value) -> ApiError {
    if status == 401 || candidate_messages(body).any(|m| is_auth_fragment(m)) {
        return ApiError::unauthenticated();
    }
    ApiError::api(Some(status), error_message(status, body))
}

/// Extract an error message in fixed precedence: the nested `detail.message`,
/// then a top-level `message`, then `detail` as a bare string, then a
/// fallback keyed on the status.
pub(crate) fn error_message(status: u16, body: &Value) -> String {
    candidate_messages(body)
        .next()
        .unwrap_or_else(|| status_fallback(status))
        .to_string()
}

/// The message fields an error body may carry, in precedence order.
fn candidate_messages(body: &Value) -> impl Iterator<Item = &str> {
    let detail_message = body
        .get("detail")
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str);
    let message = body.get("message").and_then(Value::as_str);
    let detail = body.get("detail").and_then(Value::as_str);
    [detail_message, message, detail].into_iter().flatten()
}

fn status_fallback(status: u16) -> &'static str {
    match status {
        403 => "没有权限访问",
        404 => "请求的资源不存在",
        500 => "服务器错误",
        _ => GENERIC_FAILURE_MESSAGE,
    }
}

fn is_auth_fragment(message: &str) -> bool {
    let lowered = message.to_lowercase();
    AUTH_FRAGMENTS.iter().any(|f| lowered.contains(f))
}
