//! HTML escaping and the shared layout.

/// Application name shown in the header and page titles.
pub const APP_NAME: &str = "Tracking";

/// Escape text for use in element content and quoted attribute values.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let needs_escaping = value
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\''));
    if !needs_escaping {
        return value.to_string();
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap `body` in the site layout.
///
/// `title` is escaped; `body` is inserted as-is and must already be safe.
#[must_use]
pub fn layout(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{title} - {APP_NAME}</title>
</head>
<body>
<header>
<nav>
<a class="brand" href="/">{APP_NAME}</a>
<ul>
<li><a href="/">Home</a></li>
<li><a href="/Issue">Issues</a></li>
<li><a href="/Home/Privacy">Privacy</a></li>
</ul>
</nav>
</header>
<main role="main">
{body}
</main>
<footer>
<p>&copy; {APP_NAME} - <a href="/Home/Privacy">Privacy</a></p>
</footer>
</body>
</html>
"#
    )
}

/// Hidden anti-forgery input.
#[must_use]
pub fn token_input(token: &str) -> String {
    format!(
        r#"<input type="hidden" name="{}" value="{}" />"#,
        crate::model::TOKEN_FIELD,
        escape_html(token)
    )
}
