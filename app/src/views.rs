//! HTML rendering.
//!
//! Three pieces make up the UI: the full [`page`], the [`todo_form`] at the
//! top of it and one [`todo_item`] per todo. Every fragment is a plain
//! string; interpolated values are escaped with [`escape`].
//!
//! The form and the items carry the `hx-*` attributes that drive the page:
//!
//! - create form: `POST /todo`, new item prepended to `#todo-list`
//! - edit form: `PUT /todo/{id}`, response replaces `#todo{id}`
//! - item buttons: `DELETE /todo/{id}` and `GET /todo/{id}` (load edit form)
//! - hidden `#reset-form` button: `GET /todo/reset-form`, clicked by the page
//!   script on `resetForm`

use hxtodo_core::{Todo, TodoId};
use hxtodo_web::html::escape;

/// Which request the form submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode<'a> {
    /// Empty form posting a new todo.
    Create,
    /// Form prefilled with `text`, updating `id` in place.
    Edit {
        /// Todo being edited.
        id: &'a TodoId,
        /// Current text; empty when the todo no longer exists.
        text: &'a str,
    },
}

const HTMX_SCRIPT: &str = "https://unpkg.com/htmx.org@1.9.12";

const PAGE_SCRIPT: &str = r#"(() => {
  const focus = () => {
    const input = document.getElementById("todo-text");
    if (input) input.focus();
  };
  focus();
  document.addEventListener("requestFocus", () => {
    focus();
  });
  document.addEventListener("resetForm", () => {
    const btn = document.getElementById("reset-form");
    if (btn) btn.click();
    focus();
  });
})();"#;

const INPUT_CLASS: &str = "block w-full rounded-md border-0 py-1.5 text-gray-900 shadow-sm \
ring-1 ring-inset ring-gray-300 placeholder:text-gray-400 focus:ring-2 focus:ring-inset \
focus:ring-indigo-600 sm:text-sm sm:leading-6 mr-2";

const SUBMIT_CLASS: &str = "rounded-md bg-indigo-600 px-6 py-1.5 text-sm font-semibold \
leading-6 text-white shadow-sm hover:bg-indigo-500 focus-visible:outline focus-visible:outline-2 \
focus-visible:outline-offset-2 focus-visible:outline-indigo-600";

/// The whole document: heading, create form and the given todos in order.
#[must_use]
pub fn page(todos: &[Todo]) -> String {
    let mut items = String::new();
    for todo in todos {
        items.push_str(&todo_item(todo));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>To Do List</title>
<link rel="stylesheet" href="/assets/css/style.css">
<script src="{HTMX_SCRIPT}"></script>
</head>
<body class="bg-gray-100">
<div class="container mx-auto my-10" id="todo">
<h1 class="text-center text-3xl font-semibold mb-4">To Do List</h1>
<div class="md:w-1/2 mx-auto">
<div class="bg-white shadow-md rounded-lg p-6">
{form}
<ul id="todo-list">{items}</ul>
</div>
</div>
</div>
<script>{PAGE_SCRIPT}</script>
</body>
</html>
"#,
        form = todo_form(FormMode::Create),
    )
}

/// The `#todo-form` element in create or edit mode.
#[must_use]
pub fn todo_form(mode: FormMode<'_>) -> String {
    let (action, value, button) = match mode {
        FormMode::Create => (
            r##"hx-post="/todo" hx-on--after-request="this.reset()" hx-swap="afterbegin" hx-target="#todo-list""##
                .to_string(),
            String::new(),
            "Add",
        ),
        FormMode::Edit { id, text } => {
            let path_id = escape(id.as_str());
            let dom_id = escape(&id.dom_id()).into_owned();
            (
                format!(r##"hx-put="/todo/{path_id}" hx-swap="outerHTML" hx-target="#{dom_id}""##),
                escape(text).into_owned(),
                "Update",
            )
        },
    };

    format!(
        r##"<form id="todo-form" autocomplete="off" {action}><div class="flex mb-4"><input id="todo-text" type="text" name="text" class="{INPUT_CLASS}" placeholder="Add new task" value="{value}" required><button type="submit" class="{SUBMIT_CLASS}">{button}</button><button style="display: none" id="reset-form" hx-get="/todo/reset-form" hx-swap="outerHTML" hx-target="#todo-form"></button></div></form>"##
    )
}

/// One todo: checkbox, text, Delete and Edit buttons.
///
/// [`TodoId`] only admits `[A-Za-z0-9_-]`, so the id goes into the
/// `/todo/{id}` URLs and the `#todo{id}` selector without further encoding.
#[must_use]
pub fn todo_item(todo: &Todo) -> String {
    let path_id = escape(todo.id.as_str());
    let dom_id = todo.id.dom_id();
    let dom_id = escape(&dom_id);
    let text = escape(&todo.text);

    format!(
        r##"<div class="m-2" id="{dom_id}"><label class="flex items-center"><input type="checkbox" class="mr-2"><span>{text}</span></label><div><button hx-delete="/todo/{path_id}" hx-swap="delete" hx-target="#{dom_id}" hx-confirm="Are you sure ?" class="text-red-500 hover:text-red-700 mr-2 delete-btn">Delete</button><button hx-get="/todo/{path_id}" hx-target="#todo-form" hx-swap="outerHTML" class="text-blue-500 hover:text-blue-700 edit-btn">Edit</button></div><hr></div>"##
    )
}
