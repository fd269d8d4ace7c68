//! HTML pages served by the login flow.

const WIDGET_SCRIPT: &str = "https://telegram.org/js/telegram-widget.js?22";

pub const LOGIN_FAILED: &str = "Authorization failed. Please try again.";

/// Landing page embedding the Telegram login widget.
#[must_use]
pub fn index(bot_username: &str, auth_url: &str) -> String {
    let body = format!(
        r#"<h1>Sign in</h1>
    <p>Use your Telegram account to continue.</p>
    <script async src="{WIDGET_SCRIPT}"
        data-telegram-login="{bot_username}"
        data-size="large"
        data-auth-url="{auth_url}"
        data-request-access="write"></script>"#,
        bot_username = html_escape(bot_username),
        auth_url = html_escape(auth_url),
    );

    layout("Sign in with Telegram", &body)
}

/// Greeting shown once the login assertion is verified.
#[must_use]
pub fn success(display_name: &str) -> String {
    let body = format!(
        r#"<h1>Welcome, {name}!</h1>
    <p>You are signed in with Telegram.</p>
    <p><a href="/">Back</a></p>"#,
        name = html_escape(display_name),
    );

    layout("Signed in", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
        body {{ font-family: sans-serif; max-width: 480px; margin: 80px auto; text-align: center; }}
    </style>
</head>
<body>
    {body}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_index_embeds_widget() {
        let html = index("my_bot", "/login/telegram");
        assert!(html.contains(r#"data-telegram-login="my_bot""#));
        assert!(html.contains(r#"data-auth-url="/login/telegram""#));
        assert!(html.contains(WIDGET_SCRIPT));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_success_escapes_name() {
        let html = success("<script>alert(1)</script>");
        assert!(html.contains("Welcome, &lt;script&gt;alert(1)&lt;/script&gt;!"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
