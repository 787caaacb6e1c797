//! Color contrast check.

use crate::contrast::contrast_ratio;
use crate::report::{Finding, Severity};

use super::{for_each_rendered_element, locate, Check, CheckContext};

/// Score penalty for a failed contrast check.
pub const CONTRAST_PENALTY: u32 = 10;

/// Required ratio for normal-size text (WCAG AA).
const NORMAL_TEXT_RATIO: f64 = 4.5;

/// Required ratio for large text (WCAG AA).
const LARGE_TEXT_RATIO: f64 = 3.0;

/// Large text is at least this many pixels...
const LARGE_TEXT_PX: f32 = 18.0;

/// ...or at least this many pixels when bold.
const LARGE_BOLD_PX: f32 = 14.0;

const BOLD_WEIGHT: u16 = 700;

/// Checks that every element bearing visible text meets the contrast
/// ratio its resolved font size and weight require.
pub struct ColorContrast;

impl Check for ColorContrast {
    fn id(&self) -> &'static str {
        "color-contrast"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>) {
        for_each_rendered_element(ctx, |id| {
            if !ctx.dom.has_own_text(id) {
                return;
            }
            let Some(style) = ctx.styles.get(id) else {
                return;
            };

            // Fully transparent text is indeterminate; skip the element
            // rather than guessing.
            if style.color.value.is_transparent() {
                return;
            }

            let fg = style.color.value.over(style.backdrop);
            let bg = style.backdrop;
            let observed = contrast_ratio(fg, bg);

            let large = style.font_size.value >= LARGE_TEXT_PX
                || (style.font_size.value >= LARGE_BOLD_PX
                    && style.font_weight.value >= BOLD_WEIGHT);
            let required = if large {
                LARGE_TEXT_RATIO
            } else {
                NORMAL_TEXT_RATIO
            };

            if observed < required {
                let locator = locate(ctx.dom, id);
                findings.push(Finding {
                    rule: self.id(),
                    severity: Severity::Critical,
                    message: format!(
                        "text {} on {} has contrast ratio {:.2}:1, below the required {:.2}:1",
                        fg.to_css_string(),
                        bg.to_css_string(),
                        observed,
                        required
                    ),
                    element: Some(locator),
                    ratio: Some((observed, required)),
                    penalty: CONTRAST_PENALTY,
                    suggestion: Some(format!(
                        "Darken the text or lighten the background until the ratio reaches {required:.1}:1"
                    )),
                    node: Some(id),
                });
            }
        });
    }
}
