//! Heading hierarchy check.

use crate::dom::NodeId;
use crate::report::{Finding, Severity};

use super::{locate, Check, CheckContext};

/// Score penalty for a skipped heading level.
pub const SKIPPED_LEVEL_PENALTY: u32 = 5;

/// Score penalty for each additional top-level heading.
pub const EXTRA_H1_PENALTY: u32 = 3;

/// Checks that heading levels descend without gaps and that the document
/// has at most one `h1`.
///
/// A document without headings produces no findings; only headings that
/// are present are judged.
pub struct HeadingHierarchy;

impl Check for HeadingHierarchy {
    fn id(&self) -> &'static str {
        "heading-hierarchy"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>) {
        let headings: Vec<(NodeId, u8)> = ctx
            .dom
            .descendants()
            .filter_map(|id| {
                let tag = ctx.dom.element_name(id)?;
                heading_level(tag.as_ref()).map(|level| (id, level))
            })
            .collect();

        let mut prev_level: Option<u8> = None;
        let mut h1_seen = false;

        for (id, level) in headings {
            if let Some(prev) = prev_level {
                if level > prev + 1 {
                    findings.push(Finding {
                        rule: self.id(),
                        severity: Severity::Warning,
                        message: format!(
                            "heading level jumps from h{prev} to h{level}, skipping a level"
                        ),
                        element: Some(locate(ctx.dom, id)),
                        ratio: None,
                        penalty: SKIPPED_LEVEL_PENALTY,
                        suggestion: Some(format!(
                            "Use h{} here, or restructure the surrounding headings",
                            prev + 1
                        )),
                        node: Some(id),
                    });
                }
            }
            prev_level = Some(level);

            if level == 1 {
                if h1_seen {
                    findings.push(Finding {
                        rule: self.id(),
                        severity: Severity::Warning,
                        message: "document has more than one h1 element".to_string(),
                        element: Some(locate(ctx.dom, id)),
                        ratio: None,
                        penalty: EXTRA_H1_PENALTY,
                        suggestion: Some(
                            "Keep a single h1 and demote the others to h2".to_string(),
                        ),
                        node: Some(id),
                    });
                }
                h1_seen = true;
            }
        }
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::analyze_with;
    use super::*;

    #[test]
    fn test_well_formed_outline_passes() {
        let findings = analyze_with(
            &HeadingHierarchy,
            "<h1>Title</h1><h2>Section</h2><h3>Sub</h3><h2>Next</h2>",
            "",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_skipped_level_is_reported() {
        let findings = analyze_with(&HeadingHierarchy, "<h2>Section</h2><h4>Deep</h4>", "");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].penalty, SKIPPED_LEVEL_PENALTY);
        assert!(findings[0].message.contains("h2"));
        assert!(findings[0].message.contains("h4"));
    }

    #[test]
    fn test_stepping_back_up_is_fine() {
        let findings = analyze_with(
            &HeadingHierarchy,
            "<h1>Title</h1><h2>A</h2><h3>A.1</h3><h2>B</h2>",
            "",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_multiple_h1_reported_once_per_extra() {
        let findings = analyze_with(
            &HeadingHierarchy,
            "<h1>First</h1><h1>Second</h1><h1>Third</h1>",
            "",
        );
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.penalty == EXTRA_H1_PENALTY));
    }

    #[test]
    fn test_no_headings_no_findings() {
        let findings = analyze_with(&HeadingHierarchy, "<p>just prose</p>", "");
        assert!(findings.is_empty());
    }
}
