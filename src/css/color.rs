//! Color values and parsing.
//!
//! Colors arrive as CSS tokens (hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
//! named colors) and are normalized to 8-bit RGBA. Unparseable values are
//! rejected at this layer so the resolver can treat them as unset.

use std::fmt::Write;

use cssparser::{ParseError, Parser, Token};

/// RGBA color (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Create a new opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with alpha.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Composite this color over an opaque backdrop (source-over blend).
    pub fn over(self, backdrop: Color) -> Color {
        if self.a == 255 {
            return self;
        }
        if self.a == 0 {
            return Color::rgb(backdrop.r, backdrop.g, backdrop.b);
        }
        let alpha = self.a as f32 / 255.0;
        let blend = |s: u8, d: u8| {
            (s as f32 * alpha + d as f32 * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color::rgb(
            blend(self.r, backdrop.r),
            blend(self.g, backdrop.g),
            blend(self.b, backdrop.b),
        )
    }

    /// Format as a CSS color string (`#rrggbb`, `transparent`, or `rgba()`).
    pub fn to_css_string(&self) -> String {
        let mut buf = String::new();
        if self.a == 255 {
            write!(buf, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b).unwrap();
        } else if self.a == 0 {
            buf.push_str("transparent");
        } else {
            let alpha = self.a as f32 / 255.0;
            write!(buf, "rgba({},{},{},{:.2})", self.r, self.g, self.b, alpha).unwrap();
        }
        buf
    }
}

/// Parse a color value from a CSS parser.
///
/// Returns `None` for unrecognized forms; the caller treats that as an
/// unset declaration rather than an error.
pub fn parse_color(input: &mut Parser<'_, '_>) -> Option<Color> {
    // Named colors and keywords
    if let Ok(token) = input.try_parse(|i| i.expect_ident_cloned()) {
        return named_color(token.as_ref());
    }

    // Hash tokens (how cssparser tokenizes hex colors like #ff0000)
    if let Ok(color) = input.try_parse(parse_hash_color) {
        return Some(color);
    }

    // rgb()/rgba()/hsl()/hsla()
    if let Ok(color) = input.try_parse(parse_color_function) {
        return Some(color);
    }

    None
}

/// Parse a hex color body (without the leading `#`).
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Color::rgba(r, g, b, a))
        }
        _ => None,
    }
}

fn parse_hash_color<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::IDHash(hash) | Token::Hash(hash) => {
            parse_hex_color(hash.as_ref()).ok_or_else(|| location.new_custom_error(()))
        }
        _ => Err(location.new_custom_error(())),
    }
}

fn parse_color_function<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let location = input.current_source_location();
    let name = input.expect_function()?.clone();

    if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") {
        input.parse_nested_block(|input| {
            let r = parse_color_component(input)?;
            input.expect_comma()?;
            let g = parse_color_component(input)?;
            input.expect_comma()?;
            let b = parse_color_component(input)?;
            let a = parse_optional_alpha(input)?;
            Ok(Color::rgba(r, g, b, a))
        })
    } else if name.eq_ignore_ascii_case("hsl") || name.eq_ignore_ascii_case("hsla") {
        input.parse_nested_block(|input| {
            let h = parse_hue(input)?;
            input.expect_comma()?;
            let s = input.expect_percentage()?;
            input.expect_comma()?;
            let l = input.expect_percentage()?;
            let a = parse_optional_alpha(input)?;
            let (r, g, b) = hsl_to_rgb(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
            Ok(Color::rgba(r, g, b, a))
        })
    } else {
        Err(location.new_custom_error(()))
    }
}

fn parse_color_component<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number { value, .. } => Ok(value.round().clamp(0.0, 255.0) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

/// Parse a trailing `, <alpha>` component; absent alpha means opaque.
fn parse_optional_alpha<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    if input.try_parse(|i| i.expect_comma()).is_err() {
        return Ok(255);
    }
    let location = input.current_source_location();
    match input.next()? {
        Token::Number { value, .. } => Ok((value.clamp(0.0, 1.0) * 255.0).round() as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value.clamp(0.0, 1.0) * 255.0).round() as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

fn parse_hue<'i>(input: &mut Parser<'i, '_>) -> Result<f32, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number { value, .. } => Ok(*value),
        Token::Dimension { value, unit, .. } if unit.eq_ignore_ascii_case("deg") => Ok(*value),
        _ => Err(location.new_custom_error(())),
    }
}

/// Convert HSL (hue in degrees, saturation/lightness in 0..1) to RGB.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = (h.rem_euclid(360.0)) / 360.0;

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    (
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    )
}

/// Look up a CSS named color.
fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
        "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
        "dimgray" | "dimgrey" => Color::rgb(105, 105, 105),
        "red" => Color::rgb(255, 0, 0),
        "darkred" => Color::rgb(139, 0, 0),
        "maroon" => Color::rgb(128, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "darkgreen" => Color::rgb(0, 100, 0),
        "lime" => Color::rgb(0, 255, 0),
        "olive" => Color::rgb(128, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "darkblue" => Color::rgb(0, 0, 139),
        "navy" => Color::rgb(0, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "aqua" | "cyan" => Color::rgb(0, 255, 255),
        "fuchsia" | "magenta" => Color::rgb(255, 0, 255),
        "purple" => Color::rgb(128, 0, 128),
        "yellow" => Color::rgb(255, 255, 0),
        "gold" => Color::rgb(255, 215, 0),
        "orange" => Color::rgb(255, 165, 0),
        "darkorange" => Color::rgb(255, 140, 0),
        "brown" => Color::rgb(165, 42, 42),
        "pink" => Color::rgb(255, 192, 203),
        "coral" => Color::rgb(255, 127, 80),
        "salmon" => Color::rgb(250, 128, 114),
        "beige" => Color::rgb(245, 245, 220),
        "ivory" => Color::rgb(255, 255, 240),
        "khaki" => Color::rgb(240, 230, 140),
        "indigo" => Color::rgb(75, 0, 130),
        "violet" => Color::rgb(238, 130, 238),
        "rebeccapurple" => Color::rgb(102, 51, 153),
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}
