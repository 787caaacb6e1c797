//! CSS parsing: stylesheets, rules, declarations, specificity.

use std::cmp::Ordering;

use cssparser::{
    AtRuleParser, DeclarationParser, ParseError, Parser, ParserInput, QualifiedRuleParser,
    RuleBodyItemParser, RuleBodyParser, StyleSheetParser, Token,
};
use selectors::parser::Selector;

use crate::dom::LintSelectors;

use super::color::{parse_color, Color};

/// A parsed CSS stylesheet.
#[derive(Debug, Default, Clone)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

/// A CSS rule with selectors and declarations.
#[derive(Debug, Clone)]
pub struct CssRule {
    pub selectors: Vec<Selector<LintSelectors>>,
    pub declarations: Vec<Declaration>,
    pub specificity: Specificity,
}

/// A CSS declaration (property: value).
#[derive(Debug, Clone)]
pub struct Declaration {
    pub property: String,
    pub value: PropertyValue,
    pub important: bool,
}

/// Parsed CSS property value.
///
/// Only the properties the analyzer evaluates are represented with typed
/// values; everything else parses to `None` and is ignored, which makes
/// invalid values fall through to inheritance or defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Color(Color),
    Length(Length),
    FontWeight(u16),
    Display(Display),
    Keyword(String),
    None,
}

/// Length value with unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Pt(f32),
    Em(f32),
    Rem(f32),
}

/// Display mode (only the distinctions the checks need).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    Block,
    #[default]
    Inline,
    None,
    ListItem,
}

/// CSS specificity for cascade ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Specificity {
    pub ids: u16,
    pub classes: u16,
    pub elements: u16,
}

impl Specificity {
    pub fn from_selector(selector: &Selector<LintSelectors>) -> Self {
        let spec = selector.specificity();
        // selectors crate packs specificity as (id << 20) | (class << 10) | elements
        Self {
            ids: ((spec >> 20) & 0x3FF) as u16,
            classes: ((spec >> 10) & 0x3FF) as u16,
            elements: (spec & 0x3FF) as u16,
        }
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ids
            .cmp(&other.ids)
            .then(self.classes.cmp(&other.classes))
            .then(self.elements.cmp(&other.elements))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Origin of a style (for cascade ordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    UserAgent = 0,
    Author = 1,
}

impl Stylesheet {
    /// Parse a CSS stylesheet from a string.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = Vec::new();

        let mut rule_parser = TopLevelRuleParser { rules: &mut rules };
        let stylesheet_parser = StyleSheetParser::new(&mut parser, &mut rule_parser);

        for result in stylesheet_parser {
            // Ignore errors - lenient parsing
            let _ = result;
        }

        Self { rules }
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse an inline style attribute (`style="..."`).
pub fn parse_inline_style(style_attr: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(style_attr);
    let mut parser = Parser::new(&mut input);
    let mut declarations = Vec::new();

    let mut decl_parser = DeclarationListParser {
        declarations: &mut declarations,
    };

    for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
        // Ignore errors - lenient parsing
        let _ = result;
    }

    declarations
}

/// Parser for top-level stylesheet rules.
struct TopLevelRuleParser<'a> {
    rules: &'a mut Vec<CssRule>,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: cssparser::CowRcStr<'i>,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // Skip at-rules (@media, @import, @font-face, ...)
        Err(_input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(_input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = Vec<Selector<LintSelectors>>;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        parse_selector_list(input)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let specificity = prelude
            .first()
            .map(Specificity::from_selector)
            .unwrap_or_default();

        let mut declarations = Vec::new();
        let mut decl_parser = DeclarationListParser {
            declarations: &mut declarations,
        };

        for result in RuleBodyParser::new(input, &mut decl_parser) {
            // Ignore errors - lenient parsing
            let _ = result;
        }

        self.rules.push(CssRule {
            selectors: prelude,
            declarations,
            specificity,
        });

        Ok(())
    }
}

/// Parse a comma-separated list of selectors.
fn parse_selector_list<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<Vec<Selector<LintSelectors>>, ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let selectors = selectors::parser::SelectorList::parse(
        &LintSelectors,
        parser,
        selectors::parser::ParseRelative::No,
    )
    .map_err(|_| location.new_custom_error(()))?;

    Ok(selectors.slice().to_vec())
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> cssparser::AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: cssparser::CowRcStr<'i>,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(_input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(_input.new_custom_error(()))
    }
}

impl<'i> cssparser::QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(_input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(_input.new_custom_error(()))
    }
}

impl<'i> DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &cssparser::ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let property = name.to_ascii_lowercase();
        let value = parse_property_value(&property, input);
        let important = input.try_parse(cssparser::parse_important).is_ok();

        self.declarations.push(Declaration {
            property,
            value,
            important,
        });

        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parse a property value based on the property name.
fn parse_property_value(property: &str, input: &mut Parser<'_, '_>) -> PropertyValue {
    let value = match property {
        "color" | "background-color" => parse_color(input).map(PropertyValue::Color),

        "font-size" => parse_length(input),

        "font-weight" => parse_font_weight(input),

        "display" => parse_display(input),

        "text-decoration" | "text-decoration-line" => parse_text_decoration(input),

        _ => None,
    };

    // Consume any remaining tokens up to `!important` or end of declaration
    // so the important flag can still be read, and so a half-parsed invalid
    // value never corrupts the next declaration.
    loop {
        let state = input.state();
        match input.next() {
            Ok(Token::Delim('!')) => {
                input.reset(&state);
                break;
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    value.unwrap_or(PropertyValue::None)
}

fn parse_length(input: &mut Parser<'_, '_>) -> Option<PropertyValue> {
    match input.next().ok()? {
        Token::Dimension { value, unit, .. } => {
            let length = match_unit(*value, unit.as_ref())?;
            Some(PropertyValue::Length(length))
        }
        // Unitless numbers are treated as pixels
        Token::Number { value, .. } if *value >= 0.0 => {
            Some(PropertyValue::Length(Length::Px(*value)))
        }
        Token::Ident(ident) => match ident.as_ref() {
            "inherit" | "initial" | "unset" => Some(PropertyValue::Keyword(ident.to_string())),
            _ => None,
        },
        _ => None,
    }
}

fn match_unit(value: f32, unit: &str) -> Option<Length> {
    if unit.eq_ignore_ascii_case("px") {
        Some(Length::Px(value))
    } else if unit.eq_ignore_ascii_case("pt") {
        Some(Length::Pt(value))
    } else if unit.eq_ignore_ascii_case("em") {
        Some(Length::Em(value))
    } else if unit.eq_ignore_ascii_case("rem") {
        Some(Length::Rem(value))
    } else {
        None
    }
}

fn parse_font_weight(input: &mut Parser<'_, '_>) -> Option<PropertyValue> {
    if let Ok(token) = input.try_parse(|i| i.expect_ident_cloned()) {
        let weight = match token.as_ref() {
            "normal" => 400,
            "bold" => 700,
            "lighter" => 300,
            "bolder" => 700,
            "inherit" | "initial" | "unset" => {
                return Some(PropertyValue::Keyword(token.to_string()))
            }
            _ => return None,
        };
        return Some(PropertyValue::FontWeight(weight));
    }

    if let Ok(Token::Number {
        int_value: Some(v), ..
    }) = input.next()
    {
        let v = *v;
        if (100..=900).contains(&v) && v % 100 == 0 {
            return Some(PropertyValue::FontWeight(v as u16));
        }
    }

    None
}

fn parse_display(input: &mut Parser<'_, '_>) -> Option<PropertyValue> {
    let token = input.expect_ident_cloned().ok()?;
    let display = match token.as_ref() {
        "block" | "flex" | "grid" | "table" => Display::Block,
        "inline" | "inline-block" | "inline-flex" => Display::Inline,
        "none" => Display::None,
        "list-item" => Display::ListItem,
        "inherit" | "initial" | "unset" => return Some(PropertyValue::Keyword(token.to_string())),
        _ => return None,
    };
    Some(PropertyValue::Display(display))
}

fn parse_text_decoration(input: &mut Parser<'_, '_>) -> Option<PropertyValue> {
    let mut keywords = Vec::new();
    while let Ok(token) = input.try_parse(|i| i.expect_ident_cloned()) {
        keywords.push(token.to_string());
    }
    if keywords.is_empty() {
        None
    } else {
        Some(PropertyValue::Keyword(keywords.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rule() {
        let css = "p { color: red; }";
        let stylesheet = Stylesheet::parse(css);

        assert_eq!(stylesheet.rules.len(), 1);
        let rule = &stylesheet.rules[0];
        assert_eq!(rule.selectors.len(), 1);
        assert_eq!(rule.declarations.len(), 1);
        assert_eq!(rule.declarations[0].property, "color");
    }

    #[test]
    fn test_parse_multiple_declarations() {
        let css = "p { color: blue; font-weight: bold; font-size: 18px; }";
        let stylesheet = Stylesheet::parse(css);

        assert_eq!(stylesheet.rules.len(), 1);
        assert_eq!(stylesheet.rules[0].declarations.len(), 3);
    }

    #[test]
    fn test_parse_hex_colors() {
        let css = "p { color: #ff0000; background-color: #0f0; }";
        let stylesheet = Stylesheet::parse(css);

        let decl = &stylesheet.rules[0].declarations[0];
        assert_eq!(decl.value, PropertyValue::Color(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_lengths() {
        let css = "p { font-size: 16px; } h1 { font-size: 2em; } small { font-size: 10pt; }";
        let stylesheet = Stylesheet::parse(css);

        assert_eq!(
            stylesheet.rules[0].declarations[0].value,
            PropertyValue::Length(Length::Px(16.0))
        );
        assert_eq!(
            stylesheet.rules[1].declarations[0].value,
            PropertyValue::Length(Length::Em(2.0))
        );
        assert_eq!(
            stylesheet.rules[2].declarations[0].value,
            PropertyValue::Length(Length::Pt(10.0))
        );
    }

    #[test]
    fn test_invalid_value_parses_to_none() {
        // Unsupported unit: the declaration is kept but carries no value,
        // so the cascade treats the property as unset.
        let css = "p { font-size: 2vw; color: blurple; }";
        let stylesheet = Stylesheet::parse(css);

        let decls = &stylesheet.rules[0].declarations;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, PropertyValue::None);
        assert_eq!(decls[1].value, PropertyValue::None);
    }

    #[test]
    fn test_specificity_ordering() {
        let spec1 = Specificity {
            ids: 1,
            classes: 0,
            elements: 0,
        };
        let spec2 = Specificity {
            ids: 0,
            classes: 10,
            elements: 0,
        };
        let spec3 = Specificity {
            ids: 0,
            classes: 0,
            elements: 100,
        };

        assert!(spec1 > spec2);
        assert!(spec2 > spec3);
    }

    #[test]
    fn test_important_flag() {
        let css = "p { color: red !important; } p { color: blue; }";
        let stylesheet = Stylesheet::parse(css);

        assert!(stylesheet.rules[0].declarations[0].important);
        assert!(!stylesheet.rules[1].declarations[0].important);
    }

    #[test]
    fn test_parse_inline_style() {
        let decls = parse_inline_style("color: #767676; font-size: 14px");
        assert_eq!(decls.len(), 2);
        assert_eq!(
            decls[0].value,
            PropertyValue::Color(Color::rgb(118, 118, 118))
        );
        assert_eq!(decls[1].value, PropertyValue::Length(Length::Px(14.0)));
    }

    #[test]
    fn test_at_rules_skipped() {
        let css = "@media screen { p { color: red; } } div { color: blue; }";
        let stylesheet = Stylesheet::parse(css);

        // Only the top-level div rule survives
        assert_eq!(stylesheet.rules.len(), 1);
    }
}
