//! # hxtodo
//!
//! A server-rendered to-do list driven by htmx.
//!
//! The browser loads one page (`GET /`). Every later interaction is an htmx
//! request that returns an HTML fragment to swap into that page, sometimes
//! with an `HX-Trigger-After-Swap` header that tells the page script to
//! refocus the input or reset the form.
//!
//! ## Modules
//!
//! - [`config`]: environment-driven configuration
//! - [`state`]: [`AppState`], the repository handle shared by handlers
//! - [`handlers`]: page, fragment and health endpoints
//! - [`views`]: HTML rendering
//! - [`routes`]: [`build_router`]
//!
//! ## Example
//!
//! ```ignore
//! let repo = TodoRepository::new(
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(UuidV7Generator::new()),
//! );
//! let app = build_router(AppState::new(repo), "public");
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use config::{Config, ConfigError, StoreBackend};
pub use routes::build_router;
pub use state::AppState;
