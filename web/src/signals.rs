//! Client-side signals delivered after an htmx swap.
//!
//! Handlers never touch response headers directly. They wrap their body in
//! [`Signaled`], which records a [`ClientSignals`] set in the response
//! extensions. [`ClientSignalLayer`] then turns that set into the
//! `HX-Trigger-After-Swap` header, and only for successful responses.
//!
//! # Example
//!
//! ```ignore
//! use hxtodo_web::signals::{ClientSignal, Signaled, client_signal_layer};
//!
//! async fn create() -> Signaled<Html<String>> {
//!     Signaled::new(Html(fragment), ClientSignal::RequestFocus)
//! }
//!
//! let app = Router::new()
//!     .route("/todo", post(create))
//!     .layer(client_signal_layer());
//! ```

use axum::{
    extract::Request,
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use std::fmt;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Header htmx reads to dispatch events once the new content is swapped in.
pub const TRIGGER_AFTER_SWAP_HEADER: &str = "HX-Trigger-After-Swap";

/// A named event the browser dispatches after swapping a fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientSignal {
    /// Put the cursor back in the text input.
    RequestFocus,
    /// Return the form to "create new" mode.
    ResetForm,
}

impl ClientSignal {
    /// DOM event name the page script listens for.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::RequestFocus => "requestFocus",
            Self::ResetForm => "resetForm",
        }
    }
}

impl fmt::Display for ClientSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Ordered set of signals attached to one response.
///
/// Adding a signal twice keeps the first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientSignals(Vec<ClientSignal>);

impl ClientSignals {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add `signal` unless it is already present.
    pub fn insert(&mut self, signal: ClientSignal) {
        if !self.0.contains(&signal) {
            self.0.push(signal);
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, signal: ClientSignal) -> Self {
        self.insert(signal);
        self
    }

    /// Whether no signal has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ClientSignal> + '_ {
        self.0.iter().copied()
    }

    /// Header value: event names joined by `", "`, or `None` when empty.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        if self.is_empty() {
            return None;
        }
        let joined = self
            .iter()
            .map(ClientSignal::event_name)
            .collect::<Vec<_>>()
            .join(", ");
        HeaderValue::from_str(&joined).ok()
    }
}

impl From<ClientSignal> for ClientSignals {
    fn from(signal: ClientSignal) -> Self {
        Self::new().with(signal)
    }
}

/// A response body paired with the signals to emit if it succeeds.
#[derive(Debug)]
pub struct Signaled<T> {
    body: T,
    signals: ClientSignals,
}

impl<T> Signaled<T> {
    /// Pair `body` with one or more signals.
    pub fn new(body: T, signals: impl Into<ClientSignals>) -> Self {
        Self {
            body,
            signals: signals.into(),
        }
    }

    /// Add another signal.
    #[must_use]
    pub fn and(mut self, signal: ClientSignal) -> Self {
        self.signals.insert(signal);
        self
    }
}

impl<T: IntoResponse> IntoResponse for Signaled<T> {
    fn into_response(self) -> Response {
        let mut response = self.body.into_response();
        if !self.signals.is_empty() {
            response.extensions_mut().insert(self.signals);
        }
        response
    }
}

/// Create a layer that emits `HX-Trigger-After-Swap` from handler signals.
#[must_use]
pub const fn client_signal_layer() -> ClientSignalLayer {
    ClientSignalLayer
}

/// Layer translating [`ClientSignals`] into the htmx trigger header.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientSignalLayer;

impl<S> Layer<S> for ClientSignalLayer {
    type Service = ClientSignalMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientSignalMiddleware { inner }
    }
}

/// Middleware service for [`ClientSignalLayer`].
#[derive(Clone, Debug)]
pub struct ClientSignalMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for ClientSignalMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.await?;

            let Some(signals) = response.extensions_mut().remove::<ClientSignals>() else {
                return Ok(response);
            };

            if !response.status().is_success() {
                tracing::debug!(
                    status = %response.status(),
                    "Dropping client signals on unsuccessful response"
                );
                return Ok(response);
            }

            if let Some(value) = signals.header_value() {
                response
                    .headers_mut()
                    .insert(TRIGGER_AFTER_SWAP_HEADER, value);
            }

            Ok(response)
        })
    }
}
