//! CSS ingestion: color values, stylesheet parsing, document style discovery.

mod color;
mod stylesheet;

pub use color::{parse_color, parse_hex_color, Color};
pub use stylesheet::{
    parse_inline_style, CssRule, Declaration, Display, Length, Origin, PropertyValue, Specificity,
    Stylesheet,
};

use crate::dom::{Dom, NodeData};

/// User-agent stylesheet with browser default styles.
///
/// Applied at lowest cascade origin before document styles. Restricted to
/// the properties the analyzer evaluates; heading sizes matter because
/// large text gets a lower required contrast ratio.
const USER_AGENT_CSS: &str = r#"
h1 { font-size: 2em; font-weight: bold; }
h2 { font-size: 1.5em; font-weight: bold; }
h3 { font-size: 1.17em; font-weight: bold; }
h4 { font-size: 1em; font-weight: bold; }
h5 { font-size: 0.83em; font-weight: bold; }
h6 { font-size: 0.67em; font-weight: bold; }
b, strong { font-weight: bold; }
small { font-size: 0.83em; }
a { color: #0000ee; text-decoration: underline; }
"#;

/// Build the user-agent stylesheet.
pub fn user_agent_stylesheet() -> Stylesheet {
    Stylesheet::parse(USER_AGENT_CSS)
}

/// Style sources discovered inside a parsed document.
#[derive(Debug, Default)]
pub struct DocumentStyles {
    /// Contents of `<style>` elements, in document order.
    pub inline_sheets: Vec<String>,
    /// `href` values of `<link rel="stylesheet">` elements. The analyzer
    /// performs no I/O; callers fetch these and pass them back in.
    pub linked: Vec<String>,
}

/// Extract stylesheet sources from a parsed document.
pub fn document_styles(dom: &Dom) -> DocumentStyles {
    let mut styles = DocumentStyles::default();

    for id in dom.descendants() {
        let Some(node) = dom.get(id) else { continue };
        let NodeData::Element { name, attrs, .. } = &node.data else {
            continue;
        };

        match name.local.as_ref() {
            "link" => {
                let is_stylesheet = attrs.iter().any(|a| {
                    a.name.local.as_ref() == "rel"
                        && a.value.split_whitespace().any(|v| v.eq_ignore_ascii_case("stylesheet"))
                });
                if is_stylesheet {
                    if let Some(href) = attrs
                        .iter()
                        .find(|a| a.name.local.as_ref() == "href")
                        .map(|a| a.value.clone())
                    {
                        styles.linked.push(href);
                    }
                }
            }
            "style" => {
                let mut text = String::new();
                for child in dom.children(id) {
                    if let Some(t) = dom.text_content(child) {
                        text.push_str(t);
                    }
                }
                if !text.trim().is_empty() {
                    styles.inline_sheets.push(text);
                }
            }
            _ => {}
        }
    }

    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_document_styles() {
        let html = r#"
            <html>
            <head>
                <link rel="stylesheet" href="styles.css">
                <link rel="stylesheet" href="theme.css">
                <style>p { color: red; }</style>
            </head>
            <body><p>Content</p></body>
            </html>
        "#;

        let dom = parse_html(html);
        let styles = document_styles(&dom);

        assert_eq!(styles.linked.len(), 2);
        assert!(styles.linked.contains(&"styles.css".to_string()));
        assert!(styles.linked.contains(&"theme.css".to_string()));

        assert_eq!(styles.inline_sheets.len(), 1);
        assert!(styles.inline_sheets[0].contains("color: red"));
    }

    #[test]
    fn test_user_agent_stylesheet_parses() {
        let ua = user_agent_stylesheet();
        // h1..h6, b+strong, small, a
        assert_eq!(ua.rules.len(), 9);
    }
}
