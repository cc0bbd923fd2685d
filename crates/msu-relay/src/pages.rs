//! HTML documents served by `/auth3d`.
//!
//! Every request-derived value goes through [`escape_html`] before it is
//! embedded. Templates are plain `format!` strings and contain nothing
//! time- or state-dependent, so identical inputs render identical bytes.

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Form action the shopper's browser posts `encryptedData` to.
///
/// The token is embedded as given, except `/`, `?` and `#`, which are
/// percent-encoded so the token stays one path segment. Base64 characters
/// such as `=` and `+` remain literal.
pub fn auth3d_action(msu_base_url: &str, token: &str) -> String {
    let mut segment = String::with_capacity(token.len());
    for c in token.chars() {
        match c {
            '/' => segment.push_str("%2F"),
            '?' => segment.push_str("%3F"),
            '#' => segment.push_str("%23"),
            other => segment.push(other),
        }
    }
    format!(
        "{}/post/auth3d/{segment}",
        msu_base_url.trim_end_matches('/')
    )
}

/// Page that auto-submits the 3DS form on load.
pub fn render_auth3d_page(msu_base_url: &str, token: &str, encrypted_data: &str) -> String {
    let action = escape_html(&auth3d_action(msu_base_url, token));
    let encrypted_data = escape_html(encrypted_data);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>3D Secure Authentication</title>
  </head>
  <body>
    <p>Redirecting to 3D Secure...</p>
    <form id="pay3D" action="{action}" method="post">
      <input type="hidden" name="encryptedData" value="{encrypted_data}" />
    </form>
    <script>
      document.getElementById("pay3D").submit();
    </script>
  </body>
</html>"#
    )
}

pub fn render_error_page(message: &str) -> String {
    let message = escape_html(message);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Error</title>
    <style>
      * {{ margin: 0; padding: 0; box-sizing: border-box; }}
      body {{
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        background: #f5f5f5;
        display: flex;
        align-items: center;
        justify-content: center;
        min-height: 100vh;
        padding: 1rem;
      }}
      .error-card {{
        background: #fff;
        border-radius: 12px;
        box-shadow: 0 2px 12px rgba(0,0,0,0.1);
        padding: 2.5rem 2rem;
        max-width: 420px;
        width: 100%;
        text-align: center;
      }}
      .error-icon {{ font-size: 3rem; color: #dc3545; margin-bottom: 1rem; }}
      h1 {{ font-size: 1.25rem; color: #333; margin-bottom: 0.75rem; }}
      p {{ color: #666; line-height: 1.5; }}
    </style>
  </head>
  <body>
    <div class="error-card">
      <div class="error-icon">&#x26A0;</div>
      <h1>Something went wrong</h1>
      <p>{message}</p>
    </div>
  </body>
</html>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://msu.example.com/msu/api/v2";

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain-Token_123"), "plain-Token_123");
    }

    #[test]
    fn test_auth3d_page_embeds_values() {
        let html = render_auth3d_page(BASE, "TOKEN123", "ENCRYPTED==");
        assert!(html.contains(r#"action="https://msu.example.com/msu/api/v2/post/auth3d/TOKEN123""#));
        assert!(html.contains(r#"name="encryptedData" value="ENCRYPTED==""#));
        assert!(html.contains(r#"document.getElementById("pay3D").submit();"#));
    }

    #[test]
    fn test_auth3d_page_escapes_injection() {
        let html = render_auth3d_page(BASE, "tok", r#""/><script>alert(1)</script>"#);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&quot;/&gt;&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_auth3d_action_keeps_token_one_segment() {
        assert_eq!(
            auth3d_action(BASE, "../a?b=c#d"),
            "https://msu.example.com/msu/api/v2/post/auth3d/..%2Fa%3Fb=c%23d"
        );
        assert_eq!(
            auth3d_action("https://msu.example.com/", "t"),
            "https://msu.example.com/post/auth3d/t"
        );
    }

    #[test]
    fn test_auth3d_page_keeps_base64_token_literal() {
        assert_eq!(
            auth3d_action(BASE, "ab+c/d=="),
            "https://msu.example.com/msu/api/v2/post/auth3d/ab+c%2Fd=="
        );
        let html = render_auth3d_page(BASE, "abc==", "payload");
        assert!(html.contains(r#"action="https://msu.example.com/msu/api/v2/post/auth3d/abc==""#));
    }

    #[test]
    fn test_auth3d_page_is_deterministic() {
        assert_eq!(
            render_auth3d_page(BASE, "abc", "def"),
            render_auth3d_page(BASE, "abc", "def")
        );
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error_page("<b>bad</b>");
        assert!(html.contains("<p>&lt;b&gt;bad&lt;/b&gt;</p>"));
        assert!(html.contains("Something went wrong"));
    }
}
