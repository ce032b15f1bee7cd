//! The single HTML page: the input form plus an optional result line.

use renewal_core::FORM_FIELDS;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Insurance Renewal Predictor</title>
<style>
body { font-family: monospace; max-width: 40rem; margin: 2rem auto; }
label { display: block; margin-top: 0.75rem; }
.result { margin-top: 1.5rem; font-weight: bold; }
.prob-accent { color: #c0392b; }
</style>
</head>
<body>
<h1>INSURANCE RENEWAL PREDICTOR</h1>
<form action="/predict" method="post">
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Renders the page. `result` is trusted markup produced by the server.
pub fn render_page(result: Option<&str>) -> String {
    let mut html = String::from(PAGE_HEAD);

    for field in FORM_FIELDS {
        html.push_str(&format!(
            "<label for=\"{field}\">{field}</label>\n<input id=\"{field}\" name=\"{field}\" type=\"number\" step=\"any\" required>\n"
        ));
    }
    html.push_str("<button type=\"submit\">PREDICT</button>\n</form>\n");

    if let Some(text) = result {
        html.push_str(&format!("<div class=\"result\">{text}</div>\n"));
    }

    html.push_str(PAGE_TAIL);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_every_field() {
        let html = render_page(None);
        for field in FORM_FIELDS {
            assert!(html.contains(&format!("name=\"{field}\"")));
        }
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_page_embeds_result() {
        let html = render_page(Some("PROBABLE RENEWAL"));
        assert!(html.contains("<div class=\"result\">PROBABLE RENEWAL</div>"));
    }
}
