use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::{models::user::Principal, AppState};

/// Minimal sign-in page. The form posts to the resolved API base and then
/// follows `callbackUrl`, falling back to `/`.
#[axum::debug_handler]
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_login_page(&state.config.api_base_url()))
}

#[axum::debug_handler]
pub async fn home(principal: Principal) -> impl IntoResponse {
    Html(format!(
        "<!doctype html><html><body><p>Ingelogd als {} ({})</p></body></html>",
        escape_html(&principal.name),
        principal.role
    ))
}

fn render_login_page(api_base: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="nl">
<head><meta charset="utf-8"><title>Inloggen</title></head>
<body>
<form id="login">
  <input name="email" type="email" placeholder="E-mail" required>
  <input name="password" type="password" placeholder="Wachtwoord" required>
  <button type="submit">Inloggen</button>
  <p id="error" hidden></p>
</form>
<script>
const apiBase = "{api_base}";
document.getElementById("login").addEventListener("submit", async (event) => {{
  event.preventDefault();
  const form = new FormData(event.target);
  const response = await fetch(apiBase + "/api/auth/login", {{
    method: "POST",
    credentials: "include",
    headers: {{ "Content-Type": "application/json" }},
    body: JSON.stringify({{ email: form.get("email"), password: form.get("password") }}),
  }});
  if (!response.ok) {{
    const error = document.getElementById("error");
    error.textContent = "Onjuist e-mailadres of wachtwoord";
    error.hidden = false;
    return;
  }}
  const target = new URLSearchParams(window.location.search).get("callbackUrl");
  window.location.assign(target && target.startsWith("/") && !target.startsWith("//") ? target : "/");
}});
</script>
</body>
</html>"#,
        api_base = escape_html(api_base)
    )
}

fn escape_html(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_embeds_api_base() {
        let page = render_login_page("https://admin.vacatures.nl");
        assert!(page.contains(r#"const apiBase = "https://admin.vacatures.nl";"#));
    }

    #[test]
    fn api_base_is_escaped() {
        let page = render_login_page(r#"x"</script>"#);
        assert!(!page.contains(r#"x"</script>"#));
    }
}
