//! Todo endpoints.
//!
//! Every handler returns HTML: the full page for `GET /` and fragments for
//! everything else. Handlers that should move the client's focus or reset
//! its form wrap the fragment in [`Signaled`].

use crate::state::AppState;
use crate::views::{self, FormMode};
use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use hxtodo_core::{TodoId, TodoText};
use hxtodo_web::{AppError, ClientSignal, HtmxRequest, Signaled, WebResult};
use serde::Deserialize;

/// Body of `POST /todo` and `PUT /todo/{id}`.
///
/// Unknown fields are ignored. A missing `text` is treated as empty and
/// rejected like one.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    /// The todo text as typed.
    #[serde(default)]
    pub text: String,
}

/// Parse the `{id}` path segment.
///
/// Ids that could never have been issued are a 400; they would not survive
/// being rendered back into `hx-*` URLs and `#todo{id}` selectors.
fn parse_id(raw: String) -> WebResult<TodoId> {
    TodoId::new(raw).map_err(|e| AppError::bad_request(e.to_string()))
}

/// `GET /`: the full page with the 30 most recent todos.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn render_page(State(state): State<AppState>) -> WebResult<Html<String>> {
    let todos = state.repo.list_recent().await?;
    tracing::debug!(count = todos.len(), "Rendering page");
    Ok(Html(views::page(&todos)))
}

/// `POST /todo`: create a todo and return its item fragment.
///
/// # Errors
///
/// - 422 if `text` is empty or whitespace
/// - 500 if the write is not acknowledged
pub async fn create_todo(
    State(state): State<AppState>,
    htmx: HtmxRequest,
    Form(form): Form<TodoForm>,
) -> WebResult<Signaled<Html<String>>> {
    let text = TodoText::new(form.text)?;
    let todo = state.repo.create(text).await?;

    tracing::info!(
        todo_id = %todo.id,
        htmx = htmx.is_htmx,
        target = htmx.target.as_deref().unwrap_or("-"),
        "Todo created"
    );
    Ok(Signaled::new(
        Html(views::todo_item(&todo)),
        ClientSignal::RequestFocus,
    ))
}

/// `GET /todo/reset-form`: the empty create-mode form.
#[allow(clippy::unused_async)]
pub async fn reset_form() -> Html<String> {
    Html(views::todo_form(FormMode::Create))
}

/// `GET /todo/{id}`: the form in edit mode for `id`.
///
/// A missing todo yields an edit form with empty text still bound to `id`.
///
/// # Errors
///
/// - 400 if `id` is malformed
/// - 500 if the store cannot be read
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Signaled<Html<String>>> {
    let id = parse_id(id)?;
    let todo = state.repo.get(&id).await?;
    if todo.is_none() {
        tracing::debug!(todo_id = %id, "Editing missing todo");
    }

    let text = todo.as_ref().map_or("", |t| t.text.as_str());
    Ok(Signaled::new(
        Html(views::todo_form(FormMode::Edit { id: &id, text })),
        ClientSignal::RequestFocus,
    ))
}

/// `PUT /todo/{id}`: replace the text of `id` and return its item fragment.
///
/// The fragment echoes the submitted text even when `id` does not exist
/// and nothing was written.
///
/// # Errors
///
/// - 400 if `id` is malformed
/// - 422 if `text` is empty or whitespace
/// - 500 if the store cannot be read or the write is not acknowledged
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> WebResult<Signaled<Html<String>>> {
    let id = parse_id(id)?;
    let text = TodoText::new(form.text)?;
    let todo = state.repo.update(&id, text).await?;

    Ok(Signaled::new(
        Html(views::todo_item(&todo)),
        ClientSignal::ResetForm,
    ))
}

/// `DELETE /todo/{id}`: remove `id` if it exists. Empty body.
///
/// # Errors
///
/// - 400 if `id` is malformed
/// - 500 if the store cannot be read or the delete fails
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Signaled<()>> {
    let id = parse_id(id)?;
    state.repo.delete(&id).await?;
    tracing::info!(todo_id = %id, "Todo deleted");
    Ok(Signaled::new((), ClientSignal::ResetForm))
}
