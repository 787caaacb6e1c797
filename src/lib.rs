//! # accesslint
//!
//! Static WCAG-style accessibility analysis for HTML documents.
//!
//! Given a document's markup and associated styling, the analyzer resolves
//! the effective (cascade-resolved) presentation of every element,
//! evaluates presentation and structure against a fixed set of
//! accessibility rules, and produces a deterministic, scored report.
//!
//! ## Quick Start
//!
//! ```
//! let html = r#"<html><body><img src="logo.png"><p>Readable text</p></body></html>"#;
//! let report = accesslint::analyze(html).unwrap();
//!
//! // One critical finding (missing alt), penalty 12
//! assert_eq!(report.summary.score, 88);
//! assert_eq!(report.summary.grade, "AA");
//! assert_eq!(report.critical[0].rule, "img-alt");
//! ```
//!
//! ## Supplying external stylesheets
//!
//! The analyzer performs no I/O. Stylesheets linked via
//! `<link rel="stylesheet">` are surfaced by [`stylesheet_links`]; fetch
//! them yourself and pass the contents to [`analyze_with_css`]:
//!
//! ```
//! let html = r#"<p class="note">fine print</p>"#;
//! let css = ".note { color: #767676; }";
//! let report = accesslint::analyze_with_css(html, &[css]).unwrap();
//! assert_eq!(report.summary.score, 100);
//! ```

pub mod contrast;
pub mod css;
pub mod dom;
pub mod error;
pub mod report;
pub mod rules;
pub mod style;
pub(crate) mod util;

pub use error::{Error, Result};
pub use report::{Finding, Report, ReportedFinding, Severity, Summary};

use css::{Origin, Stylesheet};

/// Analyze an HTML document and produce a scored report.
///
/// Style information is taken from `<style>` elements and `style`
/// attributes inside the document. Input must be non-empty; size bounding
/// and timeouts are the caller's responsibility.
///
/// The analysis is a pure function of the input: identical input always
/// yields an identical report, and no state carries over between calls.
pub fn analyze(html: &str) -> Result<Report> {
    analyze_with_css(html, &[])
}

/// Analyze an HTML document with additional externally-fetched stylesheets.
///
/// `extra_css` entries join the cascade as author stylesheets after the
/// document's own `<style>` elements.
pub fn analyze_with_css(html: &str, extra_css: &[&str]) -> Result<Report> {
    if html.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    // An unexpected engine fault must fail the whole call atomically,
    // without leaking partial results.
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_analysis(html, extra_css)))
        .unwrap_or(Err(Error::Internal))
}

/// Analyze raw bytes, decoding UTF-8 with Windows-1252 fallback.
pub fn analyze_bytes(bytes: &[u8]) -> Result<Report> {
    analyze_bytes_with_css(bytes, &[])
}

/// Byte-input variant of [`analyze_with_css`].
pub fn analyze_bytes_with_css(bytes: &[u8], extra_css: &[&str]) -> Result<Report> {
    let html = util::decode_text(bytes);
    analyze_with_css(&html, extra_css)
}

/// List the `href` values of `<link rel="stylesheet">` elements.
///
/// The analyzer never fetches these itself; callers that want linked
/// styles in the cascade fetch them and pass the contents to
/// [`analyze_with_css`].
pub fn stylesheet_links(html: &str) -> Vec<String> {
    let dom = dom::parse_html(html);
    css::document_styles(&dom).linked
}

fn run_analysis(html: &str, extra_css: &[&str]) -> Result<Report> {
    let dom = dom::parse_html(html);
    if dom.is_empty() {
        return Err(Error::NoDocument);
    }

    let doc_styles = css::document_styles(&dom);

    let mut stylesheets: Vec<(Stylesheet, Origin)> =
        vec![(css::user_agent_stylesheet(), Origin::UserAgent)];
    for sheet in &doc_styles.inline_sheets {
        stylesheets.push((Stylesheet::parse(sheet), Origin::Author));
    }
    for sheet in extra_css {
        stylesheets.push((Stylesheet::parse(sheet), Origin::Author));
    }

    let styles = style::resolve(&dom, &stylesheets);
    let findings = rules::evaluate(&dom, &styles);
    Ok(report::aggregate(findings))
}
