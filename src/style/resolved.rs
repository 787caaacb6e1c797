//! Cascade-resolved style values with provenance.

use crate::css::{Color, Declaration, Display, Length, PropertyValue};

/// Baseline font size at the document root, in pixels.
pub const ROOT_FONT_SIZE: f32 = 16.0;

/// Fixed conversion factor from points to pixels.
pub const PT_TO_PX: f32 = 1.333;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The engine's fixed baseline.
    Default,
    /// Copied from the parent's resolved value.
    Inherited,
    /// A user-agent stylesheet rule.
    UserAgent,
    /// An author rule; carries the winning declaration's source order.
    Rule(u32),
    /// The element's `style` attribute.
    Inline,
}

/// A resolved value together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Provenance,
}

impl<T> Sourced<T> {
    fn new(value: T, source: Provenance) -> Self {
        Self { value, source }
    }
}

/// Text decoration flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextDecoration {
    pub underline: bool,
    pub line_through: bool,
}

/// The effective style of one element after the cascade.
///
/// Computed once per element and never mutated afterward. `background_color`
/// is the element's own resolved value (possibly transparent or translucent);
/// `backdrop` is the painted background: the nearest opaque ancestor
/// background with any translucent layers composited over it, defaulting to
/// white at the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub color: Sourced<Color>,
    pub background_color: Sourced<Color>,
    pub backdrop: Color,
    pub font_size: Sourced<f32>,
    pub font_weight: Sourced<u16>,
    pub text_decoration: Sourced<TextDecoration>,
    pub display: Sourced<Display>,
}

impl ResolvedStyle {
    /// The fixed baseline at the document root: black 16px regular text on
    /// a transparent background that paints as white.
    pub fn root_default() -> Self {
        Self {
            color: Sourced::new(Color::BLACK, Provenance::Default),
            background_color: Sourced::new(Color::TRANSPARENT, Provenance::Default),
            backdrop: Color::WHITE,
            font_size: Sourced::new(ROOT_FONT_SIZE, Provenance::Default),
            font_weight: Sourced::new(400, Provenance::Default),
            text_decoration: Sourced::new(TextDecoration::default(), Provenance::Default),
            display: Sourced::new(Display::default(), Provenance::Default),
        }
    }

    /// Start a child style from a parent's resolved values.
    ///
    /// Only color, font-size and font-weight inherit. Background does not;
    /// the painted backdrop is carried separately so a transparent child
    /// still knows what it sits on.
    pub fn inherit_from(parent: &ResolvedStyle) -> Self {
        Self {
            color: Sourced::new(parent.color.value, Provenance::Inherited),
            background_color: Sourced::new(Color::TRANSPARENT, Provenance::Default),
            backdrop: parent.backdrop,
            font_size: Sourced::new(parent.font_size.value, Provenance::Inherited),
            font_weight: Sourced::new(parent.font_weight.value, Provenance::Inherited),
            text_decoration: Sourced::new(TextDecoration::default(), Provenance::Default),
            display: Sourced::new(Display::default(), Provenance::Default),
        }
    }

    /// Apply one winning declaration.
    ///
    /// Declarations whose value failed to parse carry `PropertyValue::None`
    /// and are ignored here, so the property falls through to inheritance
    /// or the default.
    pub(crate) fn apply(&mut self, decl: &Declaration, source: Provenance, parent_font_size: f32) {
        match decl.property.as_str() {
            "color" => {
                if let PropertyValue::Color(c) = &decl.value {
                    self.color = Sourced::new(*c, source);
                }
            }
            "background-color" => {
                if let PropertyValue::Color(c) = &decl.value {
                    self.background_color = Sourced::new(*c, source);
                }
            }
            "font-size" => {
                if let PropertyValue::Length(l) = &decl.value {
                    let px = length_to_px(*l, parent_font_size);
                    if px.is_finite() && px >= 0.0 {
                        self.font_size = Sourced::new(px, source);
                    }
                }
            }
            "font-weight" => {
                if let PropertyValue::FontWeight(w) = &decl.value {
                    self.font_weight = Sourced::new(*w, source);
                }
            }
            "text-decoration" | "text-decoration-line" => {
                if let PropertyValue::Keyword(k) = &decl.value {
                    self.text_decoration = Sourced::new(
                        TextDecoration {
                            underline: k.contains("underline"),
                            line_through: k.contains("line-through"),
                        },
                        source,
                    );
                }
            }
            "display" => {
                if let PropertyValue::Display(d) = &decl.value {
                    self.display = Sourced::new(*d, source);
                }
            }
            _ => {}
        }
    }

    /// Resolve the painted background once all declarations are applied.
    ///
    /// An opaque own background paints as-is; a translucent one composites
    /// over the parent's backdrop; a transparent one exposes it unchanged.
    pub(crate) fn finish_background(&mut self, parent_backdrop: Color) {
        let own = self.background_color.value;
        self.backdrop = if own.is_opaque() {
            own
        } else {
            own.over(parent_backdrop)
        };
    }
}

/// Normalize a length to pixels.
///
/// `em` is relative to the parent's resolved font size; `rem` to the root
/// baseline; `pt` uses the fixed conversion factor.
pub fn length_to_px(length: Length, parent_font_size: f32) -> f32 {
    match length {
        Length::Px(v) => v,
        Length::Pt(v) => v * PT_TO_PX,
        Length::Em(v) => v * parent_font_size,
        Length::Rem(v) => v * ROOT_FONT_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_default_baseline() {
        let style = ResolvedStyle::root_default();
        assert_eq!(style.color.value, Color::BLACK);
        assert_eq!(style.font_size.value, 16.0);
        assert_eq!(style.font_weight.value, 400);
        assert!(style.background_color.value.is_transparent());
        assert_eq!(style.backdrop, Color::WHITE);
    }

    #[test]
    fn test_inheritance_copies_text_properties() {
        let mut parent = ResolvedStyle::root_default();
        parent.color = Sourced::new(Color::rgb(10, 20, 30), Provenance::Inline);
        parent.font_size = Sourced::new(20.0, Provenance::Inline);
        parent.background_color = Sourced::new(Color::rgb(1, 2, 3), Provenance::Inline);
        parent.backdrop = Color::rgb(1, 2, 3);

        let child = ResolvedStyle::inherit_from(&parent);
        assert_eq!(child.color.value, Color::rgb(10, 20, 30));
        assert_eq!(child.color.source, Provenance::Inherited);
        assert_eq!(child.font_size.value, 20.0);
        // Background does not inherit, but the backdrop carries through
        assert!(child.background_color.value.is_transparent());
        assert_eq!(child.backdrop, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_length_to_px() {
        assert_eq!(length_to_px(Length::Px(18.0), 16.0), 18.0);
        assert!((length_to_px(Length::Pt(12.0), 16.0) - 15.996).abs() < 0.001);
        assert_eq!(length_to_px(Length::Rem(2.0), 20.0), 32.0);
        assert_eq!(length_to_px(Length::Em(1.5), 20.0), 30.0);
    }

    #[test]
    fn test_translucent_background_composites() {
        let mut style = ResolvedStyle::root_default();
        style.background_color = Sourced::new(Color::rgba(0, 0, 0, 128), Provenance::Inline);
        style.finish_background(Color::WHITE);
        assert!(style.backdrop.is_opaque());
        assert!(style.backdrop.r > 120 && style.backdrop.r < 135);
    }
}
