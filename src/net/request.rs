//! Shared request pipeline for every API call.
//!
//! SYSTEM CONTEXT
//! ==============
//! API wrappers in `net::api` hand a path, method, and JSON body to
//! `RequestPipeline`. The pipeline owns the two cross-cutting stages:
//!
//! - outbound: base URL, JSON content type, and `Authorization: Bearer`
//!   when a token is stored
//! - inbound: envelope interpretation, error notification, and session
//!   teardown when the server reports code 401
//!
//! Navigation after auth expiry is not done here. The pipeline emits
//! `SessionEvent::AuthExpired`; the app controller that owns the router
//! decides where to go.
//!
//! ERROR HANDLING
//! ==============
//! Every failure notifies exactly once and is returned to the caller. There
//! are no retries.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use super::types::{AUTH_EXPIRED_CODE, Envelope};
use crate::config::{ApiConfig, ResponseShape};
use crate::state::notify::{Notification, Notifier};
use crate::state::session::Session;

/// Session lifecycle signals raised by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Stored identity was cleared because the server rejected the token.
    AuthExpired,
}

pub struct RequestPipeline<T> {
    config: ApiConfig,
    transport: Rc<T>,
    session: Session,
    notifier: Rc<dyn Notifier>,
    on_session_event: Rc<dyn Fn(SessionEvent)>,
}

impl<T> Clone for RequestPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Rc::clone(&self.transport),
            session: self.session.clone(),
            notifier: Rc::clone(&self.notifier),
            on_session_event: Rc::clone(&self.on_session_event),
        }
    }
}

impl<T: Transport> RequestPipeline<T> {
    pub fn new(config: ApiConfig, transport: T, session: Session, notifier: impl Notifier + 'static) -> Self {
        Self {
            config,
            transport: Rc::new(transport),
            session,
            notifier: Rc::new(notifier),
            on_session_event: Rc::new(|_| {}),
        }
    }

    /// Register the consumer of session events (replaces any previous one).
    #[must_use]
    pub fn on_session_event(mut self, handler: impl Fn(SessionEvent) + 'static) -> Self {
        self.on_session_event = Rc::new(handler);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `POST` a serializable body to `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for encoding, transport, or envelope failures.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| {
            log::warn!("request error: {path}: {e}");
            ApiError::Encode(e.to_string())
        })?;
        self.request(Method::Post, path, Some(&body)).await
    }

    /// `GET` `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport or envelope failures.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, path, None).await
    }

    /// Run one call through both pipeline stages.
    ///
    /// Resolves with the whole envelope or its `data`, per
    /// [`ApiConfig::response_shape`].
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport or envelope failures.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let outbound = self.outbound(method, path, body);
        let result = self.transport.send(outbound).await;
        self.inbound(result)
    }

    /// Prepare the outgoing request. Never fails.
    pub fn outbound(&self, method: Method, path: &str, body: Option<&Value>) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            url: self.config.url_for(path),
            headers,
            body: body.map(Value::to_string),
            timeout: self.config.timeout,
            with_credentials: self.config.with_credentials,
        }
    }

    /// Interpret a transport result as a resolved value or an error.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for every non-success outcome, after
    /// notifying and, for code 401, clearing the session.
    pub fn inbound(&self, result: Result<HttpResponse, TransportError>) -> Result<Value, ApiError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e.into())),
        };

        let body = serde_json::from_str::<Value>(&response.body).ok();
        let envelope = body.as_ref().and_then(Envelope::parse);

        if response.status == 401 || envelope.as_ref().is_some_and(Envelope::is_auth_expired) {
            self.expire_session();
            let message = envelope.as_ref().and_then(|e| e.message.as_deref());
            return Err(self.fail(ApiError::auth_expired(message)));
        }
        if !response.is_ok_status() {
            return Err(self.fail(TransportError::Status(response.status).into()));
        }

        let (Some(body), Some(envelope)) = (body, envelope) else {
            log::warn!("response error: body is not an API envelope");
            return Err(self.fail(ApiError::application(None, None)));
        };
        if envelope.is_success() {
            return Ok(match self.config.response_shape {
                ResponseShape::Envelope => body,
                ResponseShape::Data => envelope.data,
            });
        }
        Err(self.fail(ApiError::application(Some(envelope.code), envelope.message.as_deref())))
    }

    fn expire_session(&self) {
        log::info!("session expired (code {AUTH_EXPIRED_CODE}); clearing stored identity");
        self.session.clear();
        (self.on_session_event)(SessionEvent::AuthExpired);
    }

    fn fail(&self, err: ApiError) -> ApiError {
        log::warn!("response error: {err}");
        self.notifier.show(Notification::error(err.user_message()));
        err
    }
}
