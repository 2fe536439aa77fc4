//! HTTP transport seam under the request pipeline.
//!
//! Client-side (csr): real fetch calls via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Elsewhere: `Transport` is implemented by test doubles.

#![allow(clippy::unused_async)]

use std::future::Future;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Fully prepared outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
    pub with_credentials: bool,
}

impl HttpRequest {
    /// First header value matching `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen before envelope interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure before a usable response reached the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No response within the configured ceiling.
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// Fetch failed (offline, DNS, CORS, aborted).
    #[error("{0}")]
    Network(String),

    /// A response arrived with a non-2xx HTTP status.
    #[error("Request failed with status code {0}")]
    Status(u16),
}

/// Sends one prepared request and returns the raw response.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// `fetch`-backed transport for the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "csr")]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use futures::future::{Either, select};
        use gloo_net::http::{Method as FetchMethod, RequestBuilder};

        let method = match request.method {
            Method::Get => FetchMethod::GET,
            Method::Post => FetchMethod::POST,
        };
        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if request.with_credentials {
            builder = builder.credentials(web_sys::RequestCredentials::Include);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let exchange = Box::pin(async move {
            let resp = prepared.send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, gloo_net::Error>(HttpResponse { status, body })
        });
        let millis = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
        let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));

        match select(exchange, timer).await {
            Either::Left((result, _)) => result.map_err(|e| TransportError::Network(e.to_string())),
            Either::Right(((), _)) => Err(TransportError::Timeout(request.timeout)),
        }
    }
}

#[cfg(not(feature = "csr"))]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let _ = request;
        Err(TransportError::Network("not available outside the browser".to_owned()))
    }
}
