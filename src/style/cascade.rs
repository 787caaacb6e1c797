//! CSS cascade implementation.
//!
//! Resolves which style declarations apply to each element based on
//! importance, origin, inline position, specificity, and source order.

use std::cmp::Ordering;

use selectors::context::{MatchingContext, SelectorCaches};

use crate::css::{parse_inline_style, Color, CssRule, Declaration, Origin, Specificity, Stylesheet};
use crate::dom::{Dom, ElementRef, NodeId};

use super::resolved::{Provenance, ResolvedStyle, ROOT_FONT_SIZE};
use super::StyleMap;

/// A matched declaration with ordering information for the cascade.
#[derive(Debug)]
struct MatchedDecl<'a> {
    declaration: &'a Declaration,
    origin: Origin,
    specificity: Specificity,
    /// True for declarations from the element's `style` attribute, which
    /// outrank any matched rule of the same importance.
    inline: bool,
    order: usize,
}

/// Cascade ordering for last-write-wins application.
///
/// Declarations are applied in sorted order and later writes overwrite
/// earlier ones, so the strongest declaration must sort last: `!important`
/// after normal, author after user-agent, inline after matched rules, then
/// specificity, then source order.
fn cascade_order(a: &MatchedDecl<'_>, b: &MatchedDecl<'_>) -> Ordering {
    a.declaration
        .important
        .cmp(&b.declaration.important)
        .then(a.origin.cmp(&b.origin))
        .then(a.inline.cmp(&b.inline))
        .then(a.specificity.cmp(&b.specificity))
        .then(a.order.cmp(&b.order))
}

/// Resolve effective styles for every element in the document.
///
/// Parents are resolved before children (pre-order walk), so inherited
/// values and painted backdrops are always available when a child is
/// processed.
pub fn resolve(dom: &Dom, stylesheets: &[(Stylesheet, Origin)]) -> StyleMap {
    let mut styles: Vec<Option<ResolvedStyle>> = (0..dom.len()).map(|_| None).collect();

    // Reuse selector caches across all rule matching for this document
    let mut caches = SelectorCaches::default();

    let mut stack: Vec<(NodeId, NodeId)> = vec![(dom.document(), NodeId::NONE)];
    while let Some((id, parent)) = stack.pop() {
        let is_element = dom.is_element(id);
        if is_element {
            let resolved = resolve_element(dom, id, parent, stylesheets, &styles, &mut caches);
            styles[id.0 as usize] = Some(resolved);
        }

        let next_parent = if is_element { id } else { parent };
        let mut children: Vec<_> = dom.children(id).collect();
        children.reverse();
        for child in children {
            stack.push((child, next_parent));
        }
    }

    StyleMap::from_vec(styles)
}

fn resolve_element(
    dom: &Dom,
    id: NodeId,
    parent: NodeId,
    stylesheets: &[(Stylesheet, Origin)],
    styles: &[Option<ResolvedStyle>],
    caches: &mut SelectorCaches,
) -> ResolvedStyle {
    let parent_style = if parent.is_some() {
        styles.get(parent.0 as usize).and_then(|s| s.as_ref())
    } else {
        None
    };

    let mut style = match parent_style {
        Some(p) => ResolvedStyle::inherit_from(p),
        None => ResolvedStyle::root_default(),
    };
    let parent_font_size = parent_style
        .map(|p| p.font_size.value)
        .unwrap_or(ROOT_FONT_SIZE);
    let parent_backdrop = parent_style.map(|p| p.backdrop).unwrap_or(Color::WHITE);

    // Pre-allocate with typical capacity (most elements match few declarations)
    let mut matched: Vec<MatchedDecl> = Vec::with_capacity(16);
    let mut order = 0;

    let elem = ElementRef::new(dom, id);
    for (stylesheet, origin) in stylesheets {
        for rule in &stylesheet.rules {
            if rule_matches(elem, rule, caches) {
                for decl in &rule.declarations {
                    matched.push(MatchedDecl {
                        declaration: decl,
                        origin: *origin,
                        specificity: rule.specificity,
                        inline: false,
                        order,
                    });
                    order += 1;
                }
            }
        }
    }

    // Inline declarations apply after all matched rules of the same
    // importance class.
    let inline_decls = dom
        .get_attr(id, "style")
        .map(parse_inline_style)
        .unwrap_or_default();
    for decl in &inline_decls {
        matched.push(MatchedDecl {
            declaration: decl,
            origin: Origin::Author,
            specificity: Specificity::default(),
            inline: true,
            order,
        });
        order += 1;
    }

    if matched.len() > 1 {
        matched.sort_by(cascade_order);
    }

    for m in &matched {
        let source = if m.inline {
            Provenance::Inline
        } else if m.origin == Origin::UserAgent {
            Provenance::UserAgent
        } else {
            Provenance::Rule(m.order as u32)
        };
        style.apply(m.declaration, source, parent_font_size);
    }

    style.finish_background(parent_backdrop);
    style
}

/// Check if a rule matches an element.
fn rule_matches(elem: ElementRef<'_>, rule: &CssRule, caches: &mut SelectorCaches) -> bool {
    let mut context = MatchingContext::new(
        selectors::matching::MatchingMode::Normal,
        None,
        caches,
        selectors::context::QuirksMode::NoQuirks,
        selectors::matching::NeedsSelectorFlags::No,
        selectors::matching::MatchingForInvalidation::No,
    );

    rule.selectors.iter().any(|selector| {
        selectors::matching::matches_selector(selector, 0, None, &elem, &mut context)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::{user_agent_stylesheet, Display};
    use crate::dom::parse_html;
    use crate::style::resolved::Provenance;

    fn resolve_tag(html: &str, css: &str, tag: &str) -> ResolvedStyle {
        let dom = parse_html(html);
        let sheets = vec![
            (user_agent_stylesheet(), Origin::UserAgent),
            (Stylesheet::parse(css), Origin::Author),
        ];
        let styles = resolve(&dom, &sheets);
        let id = dom.find_by_tag(tag).expect("element not found");
        styles.get(id).expect("element should have a style").clone()
    }

    #[test]
    fn test_higher_specificity_wins() {
        let style = resolve_tag(
            r#"<p class="note">x</p>"#,
            "p { color: #111111; } .note { color: #222222; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x22, 0x22, 0x22));
    }

    #[test]
    fn test_source_order_breaks_specificity_ties() {
        let style = resolve_tag(
            "<p>x</p>",
            "p { color: #111111; } p { color: #222222; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x22, 0x22, 0x22));
    }

    #[test]
    fn test_important_beats_higher_specificity() {
        let style = resolve_tag(
            r#"<p class="note" id="first">x</p>"#,
            "p { color: #111111 !important; } #first.note { color: #222222; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x11, 0x11, 0x11));
    }

    #[test]
    fn test_important_ties_resolve_by_specificity() {
        let style = resolve_tag(
            r#"<p class="note">x</p>"#,
            "p { color: #111111 !important; } .note { color: #222222 !important; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x22, 0x22, 0x22));
    }

    #[test]
    fn test_inline_beats_matched_rules() {
        let style = resolve_tag(
            r#"<p id="x" style="color: #333333">x</p>"#,
            "#x { color: #111111; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x33, 0x33, 0x33));
        assert_eq!(style.color.source, Provenance::Inline);
    }

    #[test]
    fn test_important_rule_beats_inline() {
        let style = resolve_tag(
            r#"<p style="color: #333333">x</p>"#,
            "p { color: #111111 !important; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x11, 0x11, 0x11));
    }

    #[test]
    fn test_inline_important_beats_rule_important() {
        let style = resolve_tag(
            r#"<p style="color: #333333 !important">x</p>"#,
            "p { color: #111111 !important; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_color_inherits_from_ancestor() {
        let style = resolve_tag(
            "<div><span><p>x</p></span></div>",
            "div { color: #444444; }",
            "p",
        );
        assert_eq!(style.color.value, Color::rgb(0x44, 0x44, 0x44));
        assert_eq!(style.color.source, Provenance::Inherited);
    }

    #[test]
    fn test_unstyled_resolves_to_document_default() {
        let style = resolve_tag("<p>x</p>", "", "p");
        assert_eq!(style.color.value, Color::BLACK);
        assert_eq!(style.font_size.value, 16.0);
        assert_eq!(style.backdrop, Color::WHITE);
    }

    #[test]
    fn test_background_does_not_inherit_but_backdrop_walks() {
        let style = resolve_tag(
            "<div><p>x</p></div>",
            "div { background-color: #123456; }",
            "p",
        );
        assert!(style.background_color.value.is_transparent());
        assert_eq!(style.backdrop, Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_em_font_size_relative_to_parent() {
        let style = resolve_tag(
            "<div><p>x</p></div>",
            "div { font-size: 20px; } p { font-size: 1.5em; }",
            "p",
        );
        assert_eq!(style.font_size.value, 30.0);
    }

    #[test]
    fn test_pt_and_rem_font_sizes() {
        let style = resolve_tag("<p>x</p>", "p { font-size: 12pt; }", "p");
        assert!((style.font_size.value - 15.996).abs() < 0.01);

        let style = resolve_tag(
            "<div><p>x</p></div>",
            "div { font-size: 20px; } p { font-size: 2rem; }",
            "p",
        );
        assert_eq!(style.font_size.value, 32.0);
    }

    #[test]
    fn test_invalid_value_falls_through_to_inherited() {
        let style = resolve_tag(
            "<div><p>x</p></div>",
            "div { font-size: 20px; } p { font-size: 2vw; }",
            "p",
        );
        // Unsupported unit is ignored; the inherited value stands
        assert_eq!(style.font_size.value, 20.0);
        assert_eq!(style.font_size.source, Provenance::Inherited);
    }

    #[test]
    fn test_user_agent_heading_defaults() {
        let style = resolve_tag("<h1>Title</h1>", "", "h1");
        assert_eq!(style.font_size.value, 32.0);
        assert_eq!(style.font_weight.value, 700);
        assert_eq!(style.font_size.source, Provenance::UserAgent);
    }

    #[test]
    fn test_display_none_resolves() {
        let style = resolve_tag("<p>x</p>", "p { display: none; }", "p");
        assert_eq!(style.display.value, Display::None);
    }
}
