//! Image alternative text check.

use crate::report::{Finding, Severity};

use super::{locate, Check, CheckContext};

/// Score penalty for an image without alternative text.
pub const MISSING_ALT_PENALTY: u32 = 12;

/// Checks that every `img` element carries an `alt` attribute.
///
/// An empty `alt=""` counts as provided: it is the standard way to mark
/// a decorative image.
pub struct ImgAlt;

impl Check for ImgAlt {
    fn id(&self) -> &'static str {
        "img-alt"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>) {
        for id in ctx.dom.descendants() {
            let is_img = ctx
                .dom
                .element_name(id)
                .is_some_and(|n| n.as_ref() == "img");
            if !is_img || ctx.dom.has_attr(id, "alt") {
                continue;
            }

            findings.push(Finding {
                rule: self.id(),
                severity: Severity::Critical,
                message: "img element is missing the alt attribute".to_string(),
                element: Some(locate(ctx.dom, id)),
                ratio: None,
                penalty: MISSING_ALT_PENALTY,
                suggestion: Some(
                    "Add an alt attribute describing the image, or alt=\"\" if it is decorative"
                        .to_string(),
                ),
                node: Some(id),
            });
        }
    }
}
