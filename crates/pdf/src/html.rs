//! HTML page building for the PDF exporter.

use quick_xml::escape::escape;

/// Heading used when the content has no `:` separator.
pub const DEFAULT_HEADING: &str = "Template";

/// Split content on its first `:` into heading and body.
///
/// The colon itself belongs to neither part. Without a colon the heading is
/// [`DEFAULT_HEADING`] and the whole content is the body.
pub fn split_heading(content: &str) -> (&str, &str) {
    match content.split_once(':') {
        Some((heading, body)) => (heading, body),
        None => (DEFAULT_HEADING, content),
    }
}

/// Build the HTML page for a template: bold heading, body with line breaks.
pub fn template_html(content: &str) -> String {
    let (heading, body) = split_heading(content);
    let heading = escape(heading);
    let body = escape(body).replace('\n', "<br>\n");

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{heading}</title>\n</head>\n<body>\n<h1><b>{heading}</b></h1>\n<p>{body}</p>\n</body>\n</html>\n",
        heading = heading,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_colon() {
        assert_eq!(
            split_heading("Business Plan:\n\n1. Point A"),
            ("Business Plan", "\n\n1. Point A")
        );
        assert_eq!(
            split_heading("Pitch Deck:\n\n1. Problem: churn"),
            ("Pitch Deck", "\n\n1. Problem: churn")
        );
    }

    #[test]
    fn test_split_without_colon() {
        assert_eq!(split_heading("Just notes"), ("Template", "Just notes"));
        assert_eq!(split_heading(""), ("Template", ""));
    }

    #[test]
    fn test_html_bold_heading_and_breaks() {
        let html = template_html("Business Plan:\n\n1. Point A");
        assert!(html.contains("<h1><b>Business Plan</b></h1>"));
        assert!(html.contains("<p><br>\n<br>\n1. Point A</p>"));
    }

    #[test]
    fn test_html_escapes_content() {
        let html = template_html("R&D <plan>:\n1. Ship <fast>");
        assert!(html.contains("<b>R&amp;D &lt;plan&gt;</b>"));
        assert!(html.contains("1. Ship &lt;fast&gt;"));
    }
}
