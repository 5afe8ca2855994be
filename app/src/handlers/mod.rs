//! HTTP request handlers.

pub mod health;
pub mod todos;

pub use health::{health_check, readiness_check};
pub use todos::{TodoForm, create_todo, delete_todo, edit_form, render_page, reset_form, update_todo};
