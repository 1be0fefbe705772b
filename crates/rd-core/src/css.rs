//! Parsers for the handful of CSS values stored in templates.
//!
//! Built on `winnow` 0.7. Only the shapes the editor writes are accepted:
//! `14px` / `14` lengths, `bold` / `normal` / numeric font weights and the
//! width part of a `border` shorthand.

use winnow::ascii::space0;
use winnow::combinator::{alt, delimited, opt, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

/// Border width assumed when a shorthand carries none.
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

fn parse_number(input: &mut &str) -> ModalResult<f64> {
    (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(0.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)
}

fn parse_length_value(input: &mut &str) -> ModalResult<f64> {
    delimited(space0, terminated(parse_number, opt("px")), space0).parse_next(input)
}

fn parse_weight_value(input: &mut &str) -> ModalResult<u16> {
    delimited(
        space0,
        alt((
            "normal".value(400u16),
            "bolder".value(700u16),
            "bold".value(700u16),
            "lighter".value(300u16),
            take_while(1..=4, |c: char| c.is_ascii_digit()).try_map(str::parse::<u16>),
        )),
        space0,
    )
    .parse_next(input)
}

/// `"14px"` → 14.0. Bare numbers are accepted; other units are not.
pub fn parse_length(s: &str) -> Option<f64> {
    parse_length_value.parse(s).ok().filter(|v| v.is_finite())
}

/// `"bold"` → 700, `"normal"` → 400, `"600"` → 600.
pub fn parse_font_weight(s: &str) -> Option<u16> {
    parse_weight_value.parse(s).ok()
}

/// Whether a font weight string renders bold (numeric weight ≥ 600).
pub fn is_bold(weight: &str) -> bool {
    parse_font_weight(weight).is_some_and(|w| w >= 600)
}

/// Width of a `border` shorthand such as `"1px dashed #ccc"`.
///
/// `none` / `hidden` yield 0; keywords map to their usual widths; a
/// shorthand without a width falls back to [`DEFAULT_BORDER_WIDTH`].
pub fn border_width(shorthand: &str) -> f64 {
    let mut tokens = shorthand.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return 0.0;
    }
    for token in tokens {
        match token {
            "none" | "hidden" => return 0.0,
            "thin" => return 1.0,
            "medium" => return 3.0,
            "thick" => return 5.0,
            _ => {}
        }
        if let Some(width) = parse_length(token) {
            return width.max(0.0);
        }
    }
    DEFAULT_BORDER_WIDTH
}
