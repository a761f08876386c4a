//! Human-readable index page served at `GET /` in simple mode.
//!
//! Rendered once from [`Config`] when the state is built; the page only
//! changes on restart.

use std::fmt::Write as _;

use regsearch_core::Config;

use crate::Mode;

const STYLE: &str = "\
body { font-family: sans-serif; line-height: 1.5; max-width: 860px; margin: 0 auto; padding: 20px; }
h1 { border-bottom: 3px solid #c0392b; padding-bottom: 8px; }
.badge { display: inline-block; padding: 3px 8px; background: #c0392b; color: #fff; border-radius: 3px; }
.endpoint { background: #ecf0f1; padding: 8px; border-left: 4px solid #c0392b; margin: 8px 0; }
pre { background: #2c3e50; color: #ecf0f1; padding: 12px; border-radius: 4px; overflow-x: auto; }
ul { list-style: none; padding-left: 0; }";

/// Render the index page for `config` running in `mode`.
pub fn render(config: &Config, mode: Mode) -> String {
    let agent = &config.agent;
    let port = config.server.port;
    let metadata = escape(&config.server.metadata_endpoint);

    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{name} - {mode} mode</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h1>{name}</h1>\n<p>{description}</p>\n\
         <p><span class=\"badge\">Version {version}</span> \
         <span class=\"badge\">{mode} mode</span></p>\n",
        name = escape(&agent.display_name),
        description = escape(&agent.description),
        version = escape(&agent.version),
    );

    html.push_str("<h2>Searchable fields</h2>\n");
    field_list(&mut html, config.fields.searchable.iter());
    html.push_str("<h2>Returned fields</h2>\n");
    field_list(&mut html, config.fields.exposed.iter());

    html.push_str("<h2>Endpoints</h2>\n");
    for (method, path, link, what) in [
        ("GET", metadata.as_str(), true, "Agent card (JSON)"),
        ("GET", "/health", true, "Health check and record count"),
        ("POST", "/send_message", false, "Substring search with a flat JSON object"),
        ("POST", "/lookup", false, "Exact match on one field"),
    ] {
        let target = if link {
            format!("<a href=\"{path}\">{path}</a>")
        } else {
            path.to_string()
        };
        let _ = writeln!(
            html,
            "<div class=\"endpoint\"><strong>{method}</strong> {target}<br>{what}</div>"
        );
    }

    html.push_str("<h2>Examples</h2>\n");
    for body in [
        r#"{"name": "João"}"#,
        r#"{"surname": "Silva", "state": "SP"}"#,
    ] {
        let _ = writeln!(
            html,
            "<pre>curl -X POST http://localhost:{port}/send_message \\\n  \
             -H \"Content-Type: application/json\" \\\n  -d '{}'</pre>",
            escape(body)
        );
    }
    let _ = writeln!(
        html,
        "<pre>curl -X POST http://localhost:{port}/lookup \\\n  \
         -H \"Content-Type: application/json\" \\\n  -d '{}'</pre>",
        escape(r#"{"field": "state", "value": "SP"}"#)
    );

    html.push_str("</body>\n</html>\n");
    html
}

fn field_list<'a>(html: &mut String, fields: impl Iterator<Item = &'a str>) {
    html.push_str("<ul>\n");
    for field in fields {
        let _ = writeln!(html, "<li><code>{}</code></li>", escape(field));
    }
    html.push_str("</ul>\n");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
