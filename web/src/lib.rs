//! Axum shell for the hxtodo application.
//!
//! This crate holds the HTTP plumbing that is not specific to any one page:
//!
//! - [`AppError`]: handler error type, rendered as a JSON `{code, message}` body
//! - [`signals`]: client signals delivered through `HX-Trigger-After-Swap`
//! - [`middleware`]: correlation ids and request spans
//! - [`extractors`]: htmx request metadata
//! - [`html`]: escaping for `format!`-built markup
//!
//! # Request Flow
//!
//! 1. **Correlation layer** assigns an id and opens the request span
//! 2. **Signal layer** waits for the handler's response
//! 3. **Handler** calls the repository and returns a fragment, possibly
//!    wrapped in [`Signaled`]
//! 4. **Signal layer** turns the signals into a response header if the
//!    response succeeded
//! 5. **Correlation layer** stamps `X-Correlation-ID` on the way out

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod html;
pub mod middleware;
pub mod signals;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::HtmxRequest;
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use signals::{
    ClientSignal, ClientSignalLayer, ClientSignals, Signaled, TRIGGER_AFTER_SWAP_HEADER,
    client_signal_layer,
};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
