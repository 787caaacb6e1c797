//! Form control label association check.

use std::collections::HashSet;

use crate::dom::NodeId;
use crate::report::{Finding, Severity};

use super::{locate, Check, CheckContext};

/// Score penalty for an unlabelled form control.
pub const UNLABELLED_CONTROL_PENALTY: u32 = 8;

/// Input types that take no user-visible value and need no label.
const UNLABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// Form control tags that require an accessible label.
const CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];

/// Checks that every form control has an accessible label: a `label[for]`
/// referencing its id, a wrapping `label` element, or an
/// `aria-label`/`aria-labelledby` attribute.
pub struct LabelAssociation;

impl Check for LabelAssociation {
    fn id(&self) -> &'static str {
        "label-association"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>) {
        // Collect every id a label points at
        let label_targets: HashSet<&str> = ctx
            .dom
            .descendants()
            .filter(|&id| {
                ctx.dom
                    .element_name(id)
                    .is_some_and(|n| n.as_ref() == "label")
            })
            .filter_map(|id| ctx.dom.get_attr(id, "for"))
            .collect();

        for id in ctx.dom.descendants() {
            let Some(tag) = ctx.dom.element_name(id) else {
                continue;
            };
            let tag = tag.as_ref();
            if !CONTROL_TAGS.contains(&tag) {
                continue;
            }

            if tag == "input" {
                let input_type = ctx.dom.get_attr(id, "type").unwrap_or("text");
                if UNLABELLED_INPUT_TYPES
                    .iter()
                    .any(|t| input_type.eq_ignore_ascii_case(t))
                {
                    continue;
                }
            }

            if is_labelled(ctx, id, &label_targets) {
                continue;
            }

            findings.push(Finding {
                rule: self.id(),
                severity: Severity::Critical,
                message: format!("{tag} element has no associated label"),
                element: Some(locate(ctx.dom, id)),
                ratio: None,
                penalty: UNLABELLED_CONTROL_PENALTY,
                suggestion: Some(format!(
                    "Associate a label with this {tag} via label[for], a wrapping label, or aria-label"
                )),
                node: Some(id),
            });
        }
    }
}

fn is_labelled(ctx: &CheckContext<'_>, id: NodeId, label_targets: &HashSet<&str>) -> bool {
    if let Some(elem_id) = ctx.dom.element_id(id) {
        if label_targets.contains(elem_id) {
            return true;
        }
    }

    if ctx
        .dom
        .get_attr(id, "aria-label")
        .is_some_and(|v| !v.trim().is_empty())
        || ctx
            .dom
            .get_attr(id, "aria-labelledby")
            .is_some_and(|v| !v.trim().is_empty())
    {
        return true;
    }

    // Wrapped in a label element
    let mut current = ctx.dom.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE);
    while current.is_some() {
        if ctx
            .dom
            .element_name(current)
            .is_some_and(|n| n.as_ref() == "label")
        {
            return true;
        }
        current = ctx
            .dom
            .get(current)
            .map(|n| n.parent)
            .unwrap_or(NodeId::NONE);
    }

    false
}
