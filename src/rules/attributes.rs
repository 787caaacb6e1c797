//! Required attribute check.

use crate::report::{Finding, Severity};

use super::{locate, Check, CheckContext};

/// Fixed table of mandatory attributes per tag, with per-entry severity
/// and penalty. `img`/`alt` is owned by the dedicated image check and is
/// deliberately absent here.
static REQUIRED_ATTRS: &[(&str, &str, Severity, u32)] = &[
    ("input", "type", Severity::Critical, 8),
    ("input", "id", Severity::Warning, 5),
    ("label", "for", Severity::Critical, 8),
];

/// Checks that elements carry the attributes the table mandates; each
/// missing attribute is one finding.
pub struct RequiredAttributes;

impl Check for RequiredAttributes {
    fn id(&self) -> &'static str {
        "required-attributes"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Vec<Finding>) {
        for id in ctx.dom.descendants() {
            let Some(tag) = ctx.dom.element_name(id) else {
                continue;
            };
            let tag = tag.as_ref();

            for (req_tag, attr, severity, penalty) in REQUIRED_ATTRS {
                if tag != *req_tag || ctx.dom.has_attr(id, attr) {
                    continue;
                }

                findings.push(Finding {
                    rule: self.id(),
                    severity: *severity,
                    message: format!("{tag} element is missing the {attr} attribute"),
                    element: Some(locate(ctx.dom, id)),
                    ratio: None,
                    penalty: *penalty,
                    suggestion: Some(format!("Add a {attr} attribute to the {tag} element")),
                    node: Some(id),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::analyze_with;
    use super::*;

    #[test]
    fn test_bare_input_reports_type_and_id() {
        let findings = analyze_with(&RequiredAttributes, "<input>", "");
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().any(|f| f.message.contains("type")
            && f.severity == Severity::Critical
            && f.penalty == 8));
        assert!(findings.iter().any(|f| f.message.contains("id")
            && f.severity == Severity::Warning
            && f.penalty == 5));
    }

    #[test]
    fn test_complete_input_passes() {
        let findings = analyze_with(&RequiredAttributes, r#"<input type="text" id="name">"#, "");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_label_requires_for() {
        let findings = analyze_with(&RequiredAttributes, "<label>Name</label>", "");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[0].message.contains("for"));
    }

    #[test]
    fn test_img_is_not_covered_here() {
        // img/alt belongs to the image check; no double-reporting
        let findings = analyze_with(&RequiredAttributes, r#"<img src="a.png">"#, "");
        assert!(findings.is_empty());
    }
}
