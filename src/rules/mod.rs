//! Accessibility checks.
//!
//! Each check is independent and order-insensitive in its own logic, but
//! the registry order is fixed so reports stay stable. Checks get
//! read-only access to the tree and resolved styles and return findings;
//! scoring happens later in the aggregation step.

mod attributes;
mod contrast;
mod headings;
mod images;
mod labels;
mod landmarks;

pub use attributes::RequiredAttributes;
pub use contrast::ColorContrast;
pub use headings::HeadingHierarchy;
pub use images::ImgAlt;
pub use labels::LabelAssociation;
pub use landmarks::Landmarks;

use crate::css::Display;
use crate::dom::{Dom, NodeId};
use crate::report::{Finding, Locator};
use crate::style::StyleMap;

/// Read-only inputs shared by all checks.
pub struct CheckContext<'a> {
    pub dom: &'a Dom,
    pub styles: &'a StyleMap,
}

/// One accessibility check.
pub trait Check: Sync {
    /// Stable identifier used in reports and for deterministic ordering.
    fn id(&self) -> &'static str;

    /// Evaluate the document, appending zero or more findings.
    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>);
}

/// Fixed evaluation order; read-only after startup.
static CHECKS: &[&dyn Check] = &[
    &ColorContrast,
    &ImgAlt,
    &RequiredAttributes,
    &HeadingHierarchy,
    &Landmarks,
    &LabelAssociation,
];

/// Run every registered check over a resolved document.
pub fn evaluate(dom: &Dom, styles: &StyleMap) -> Vec<Finding> {
    let ctx = CheckContext { dom, styles };
    let mut findings = Vec::new();
    for check in CHECKS {
        check.run(&ctx, &mut findings);
    }
    findings
}

/// Tags whose subtrees never produce rendered text.
const NON_RENDERED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Visit every rendered element in document order.
///
/// Skips subtrees that never paint: `<head>` and friends, plus anything
/// resolved to `display: none`.
pub(crate) fn for_each_rendered_element<F>(ctx: &CheckContext<'_>, mut visit: F)
where
    F: FnMut(NodeId),
{
    let mut stack = vec![ctx.dom.document()];
    while let Some(id) = stack.pop() {
        if ctx.dom.is_element(id) {
            let tag = ctx
                .dom
                .element_name(id)
                .map(|n| n.as_ref().to_string())
                .unwrap_or_default();
            if NON_RENDERED_TAGS.contains(&tag.as_str()) {
                continue;
            }
            if ctx
                .styles
                .get(id)
                .is_some_and(|s| s.display.value == Display::None)
            {
                continue;
            }
            visit(id);
        }

        let mut children: Vec<_> = ctx.dom.children(id).collect();
        children.reverse();
        stack.extend(children);
    }
}

/// Build the element locator for a finding.
pub(crate) fn locate(dom: &Dom, id: NodeId) -> Locator {
    Locator {
        tag: dom
            .element_name(id)
            .map(|n| n.as_ref().to_string())
            .unwrap_or_default(),
        line: dom.element_line(id),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::css::{user_agent_stylesheet, Origin, Stylesheet};
    use crate::dom::{parse_html, Dom};
    use crate::report::Finding;
    use crate::style::{resolve, StyleMap};

    use super::{Check, CheckContext};

    pub fn analyze_with(check: &dyn Check, html: &str, css: &str) -> Vec<Finding> {
        let (dom, styles) = resolve_doc(html, css);
        let ctx = CheckContext {
            dom: &dom,
            styles: &styles,
        };
        let mut findings = Vec::new();
        check.run(&ctx, &mut findings);
        findings
    }

    pub fn resolve_doc(html: &str, css: &str) -> (Dom, StyleMap) {
        let dom = parse_html(html);
        let sheets = vec![
            (user_agent_stylesheet(), Origin::UserAgent),
            (Stylesheet::parse(css), Origin::Author),
        ];
        let styles = resolve(&dom, &sheets);
        (dom, styles)
    }
}
