//! Status page rendering

use std::fmt::Write;

use crate::platform::StatusIndex;

/// Escape text for an HTML body or attribute
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

/// Render the `/` page
pub fn render(index: &StatusIndex) -> String {
    let mut services = String::new();
    for svc in &index.services {
        let _ = writeln!(
            services,
            "        <tr><td>{}</td><td>{}</td></tr>",
            escape_html(&svc.name),
            escape_html(&svc.label)
        );
    }
    if services.is_empty() {
        services.push_str("        <tr><td colspan=\"2\">No bound services</td></tr>\n");
    }

    let mut envars = String::new();
    for envar in &index.envars {
        let _ = writeln!(envars, "        <li><code>{}</code></li>", escape_html(envar));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{app}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <h1>{app}</h1>
  <dl>
    <dt>Instance index</dt><dd>{instance_index}</dd>
    <dt>Instance GUID</dt><dd>{instance_guid}</dd>
    <dt>Space</dt><dd>{space}</dd>
  </dl>
  <h2>Services</h2>
  <table>
    <thead><tr><th>Name</th><th>Label</th></tr></thead>
    <tbody>
{services}    </tbody>
  </table>
  <h2>Environment</h2>
  <ul>
{envars}  </ul>
  <h2>Diagnostics</h2>
  <ul>
    <li><a href="/ping">/ping</a></li>
    <li><a href="/warn">/warn</a></li>
    <li><a href="/error">/error</a></li>
    <li><a href="/kill">/kill</a></li>
  </ul>
</body>
</html>
"#,
        app = escape_html(&index.app_name),
        instance_index = index.instance_index,
        instance_guid = escape_html(&index.instance_guid),
        space = escape_html(&index.space_name),
        services = services,
        envars = envars,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Service;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b a="1">Tom & 'Jerry'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_defaults() {
        let html = render(&StatusIndex::default());
        assert!(html.contains("<h1>Unknown</h1>"));
        assert!(html.contains("<dd>-1</dd>"));
        assert!(html.contains("No bound services"));
    }

    #[test]
    fn test_render_escapes_platform_values() {
        let index = StatusIndex {
            app_name: "<script>alert(1)</script>".to_string(),
            services: vec![Service {
                name: "orders-db".to_string(),
                label: "p.mysql".to_string(),
            }],
            envars: vec!["TRAINING_NOTE=a&b".to_string()],
            ..StatusIndex::default()
        };

        let html = render(&index);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<tr><td>orders-db</td><td>p.mysql</td></tr>"));
        assert!(html.contains("<code>TRAINING_NOTE=a&amp;b</code>"));
    }
}
