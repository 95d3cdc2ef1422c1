//! Server-rendered HTML pages.
//!
//! Pages are small enough to build with `format!`; every interpolated value
//! goes through [`escape_html`].

use formgate_core::csrf::TOKEN_FIELD;
use formgate_core::validation::ErrorBag;

/// Values needed to render the login form.
#[derive(Debug, Default)]
pub struct FormView<'a> {
    /// Username echoed back after a failed submission. The password is never echoed.
    pub username: &'a str,
    pub errors: Option<&'a ErrorBag>,
    pub token: &'a str,
    /// Submission target (`/form` or the legacy `/form/login`).
    pub action: &'a str,
}

pub fn render_form(view: &FormView<'_>) -> String {
    let errors = match view.errors {
        Some(bag) if bag.any() => {
            let items: String = bag
                .all()
                .map(|message| format!("      <li>{}</li>\n", escape_html(message)))
                .collect();
            format!("    <div class=\"alert alert-danger\">\n    <ul>\n{items}    </ul>\n    </div>\n")
        }
        _ => String::new(),
    };

    let body = format!(
        r#"  <h1>Login</h1>
{errors}    <form method="POST" action="{action}">
      <input type="hidden" name="{token_field}" value="{token}">
      <label for="username">Username</label>
      <input type="text" id="username" name="username" value="{username}">
      <label for="password">Password</label>
      <input type="password" id="password" name="password">
      <button type="submit">Login</button>
    </form>
"#,
        action = escape_html(view.action),
        token_field = TOKEN_FIELD,
        token = escape_html(view.token),
        username = escape_html(view.username),
    );
    layout("Login", &body)
}

pub fn render_home() -> String {
    layout(
        "Home",
        "  <h1>Welcome</h1>\n  <p><a href=\"/form\">Go to the login form</a></p>\n",
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
