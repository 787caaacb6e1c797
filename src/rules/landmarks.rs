//! Landmark uniqueness and labelling check.

use crate::dom::NodeId;
use crate::report::{Finding, Severity};

use super::{locate, Check, CheckContext};

/// Score penalty for each main landmark beyond the first.
pub const DUPLICATE_MAIN_PENALTY: u32 = 5;

/// Score penalty for an unlabelled navigation landmark when several exist.
pub const UNLABELLED_NAV_PENALTY: u32 = 3;

/// Checks landmark usage: at most one `main`, and navigation landmarks
/// must be distinguishable by label when more than one is present.
///
/// Absence of landmarks is not reported; only misuse of landmarks that
/// exist is.
pub struct Landmarks;

impl Check for Landmarks {
    fn id(&self) -> &'static str {
        "landmarks"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>) {
        let mains: Vec<NodeId> = ctx
            .dom
            .descendants()
            .filter(|&id| has_landmark_role(ctx, id, "main", "main"))
            .collect();

        for &id in mains.iter().skip(1) {
            findings.push(Finding {
                rule: self.id(),
                severity: Severity::Warning,
                message: "document has more than one main landmark".to_string(),
                element: Some(locate(ctx.dom, id)),
                ratio: None,
                penalty: DUPLICATE_MAIN_PENALTY,
                suggestion: Some("Keep a single main landmark per page".to_string()),
                node: Some(id),
            });
        }

        let navs: Vec<NodeId> = ctx
            .dom
            .descendants()
            .filter(|&id| has_landmark_role(ctx, id, "nav", "navigation"))
            .collect();

        if navs.len() > 1 {
            for &id in &navs {
                let labelled = ctx
                    .dom
                    .get_attr(id, "aria-label")
                    .is_some_and(|v| !v.trim().is_empty())
                    || ctx
                        .dom
                        .get_attr(id, "aria-labelledby")
                        .is_some_and(|v| !v.trim().is_empty());
                if labelled {
                    continue;
                }

                findings.push(Finding {
                    rule: self.id(),
                    severity: Severity::Warning,
                    message: "multiple navigation landmarks exist but this one has no label"
                        .to_string(),
                    element: Some(locate(ctx.dom, id)),
                    ratio: None,
                    penalty: UNLABELLED_NAV_PENALTY,
                    suggestion: Some(
                        "Add aria-label so screen reader users can tell the navigation regions apart"
                            .to_string(),
                    ),
                    node: Some(id),
                });
            }
        }
    }
}

fn has_landmark_role(ctx: &CheckContext<'_>, id: NodeId, tag: &str, role: &str) -> bool {
    let tag_matches = ctx.dom.element_name(id).is_some_and(|n| n.as_ref() == tag);
    let role_matches = ctx
        .dom
        .get_attr(id, "role")
        .is_some_and(|r| r.eq_ignore_ascii_case(role));
    tag_matches || role_matches
}
