//! Custom Axum extractors.
//!
//! [`HtmxRequest`] exposes the `HX-*` headers htmx sends with every request
//! it issues. It cannot fail.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// What htmx told us about the request.
///
/// `is_htmx` is false for plain browser navigation, in which case the other
/// fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmxRequest {
    /// `HX-Request: true` was present.
    pub is_htmx: bool,
    /// `HX-Target`: id of the element the response will be swapped into.
    pub target: Option<String>,
    /// `HX-Trigger`: id of the element that issued the request.
    pub trigger: Option<String>,
    /// `HX-Current-URL`: the browser's location when the request was made.
    pub current_url: Option<String>,
}

impl HtmxRequest {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            is_htmx: header("HX-Request").is_some_and(|v| v == "true"),
            target: header("HX-Target"),
            trigger: header("HX-Trigger"),
            current_url: header("HX-Current-URL"),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for HtmxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
