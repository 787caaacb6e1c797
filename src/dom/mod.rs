//! HTML ingestion: arena DOM, html5ever tree sink, selector matching glue.

mod arena;
mod element_ref;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, DescendantsIter, Dom, Node, NodeData, NodeId};
pub use element_ref::{ElementRef, LintSelectors};
pub use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document into an arena [`Dom`].
///
/// Recovery from malformed markup follows standard HTML parsing rules
/// (unclosed tags are auto-closed, stray fragments are skipped); parse
/// errors never abort ingestion.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}
