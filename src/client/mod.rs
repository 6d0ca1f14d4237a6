//! HTTP client wrapper
//!
//! The single choke point for every outbound call. [`ApiClient::send`]
//! attaches the bearer credential when one exists, dispatches exactly once
//! (no retry), and normalizes the response: success yields the inner payload,
//! failure yields one [`ApiError`]. An authentication failure additionally
//! expires the session, which the expiry handler turns into the login
//! redirect.

pub mod descriptor;
pub mod envelope;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::session::SessionContext;

pub use descriptor::{Part, RequestBody, RequestDescriptor};

/// API client over the configured service.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
    session: SessionContext,
}

impl ApiClient {
    /// Create a client. The per-request timeout comes from the configuration
    /// and is enforced by the transport; a timed-out call surfaces as a
    /// network failure.
    pub fn new(config: Config, session: SessionContext) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ApiError::Network {
                message: format!("Failed to create HTTP client: {}", err),
            })?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    /// The session this client reads its credential from
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatch a descriptor and return the unwrapped payload.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<Value, ApiError> {
        let url = self.config.api_url(descriptor.path());
        tracing::debug!(method = %descriptor.method(), path = descriptor.path(), "dispatching");

        let mut builder = self.http.request(descriptor.method().clone(), &url);
        if !descriptor.query_params().is_empty() {
            builder = builder.query(descriptor.query_params());
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder = match descriptor.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        let outcome = if (200..300).contains(&status) {
            envelope::unwrap_success(body)
        } else {
            Err(envelope::classify_failure(status, &body))
        };

        match outcome {
            Err(err) if err.is_unauthenticated() => {
                tracing::warn!(status, path = descriptor.path(), "authentication failure");
                self.session.expire();
                Err(err)
            }
            other => other,
        }
    }

    /// Dispatch a descriptor and decode the payload into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        let data = self.send(descriptor).await?;
        serde_json::from_value(data)
            .map_err(|err| ApiError::decode(format!("Failed to parse response: {}", err)))
    }
}

fn build_form(parts: &[Part]) -> multipart::Form {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name.clone(), value.clone()),
            Part::File {
                name,
                file_name,
                mime,
                data,
            } => {
                let file_part = match multipart::Part::bytes(data.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)
                {
                    Ok(part) => part,
                    Err(err) => {
                        tracing::warn!("invalid mime type {:?}: {}", mime, err);
                        multipart::Part::bytes(data.clone()).file_name(file_name.clone())
                    }
                };
                form.part(name.clone(), file_part)
            }
        };
    }
    form
}
