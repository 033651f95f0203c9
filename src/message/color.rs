//! `&`-style color codes
//!
//! `&0`-`&f` pick one of the sixteen chat colors, `&#rrggbb` a true color,
//! `&l &o &n &m` add bold, italic, underline and strikethrough, and `&r`
//! resets. A new color clears the formats, as in game chat.

use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    color: Option<Color>,
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
}

enum Code {
    Color(Color),
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Reset,
}

fn chat_color(code: char) -> Option<Color> {
    let color = match code.to_ascii_lowercase() {
        '0' => Color::Black,
        '1' => Color::Blue,
        '2' => Color::Green,
        '3' => Color::Cyan,
        '4' => Color::Red,
        '5' => Color::Magenta,
        '6' => Color::Yellow,
        '7' => Color::White,
        '8' => Color::BrightBlack,
        '9' => Color::BrightBlue,
        'a' => Color::BrightGreen,
        'b' => Color::BrightCyan,
        'c' => Color::BrightRed,
        'd' => Color::BrightMagenta,
        'e' => Color::BrightYellow,
        'f' => Color::BrightWhite,
        _ => return None,
    };
    Some(color)
}

/// Parse the code starting right after an `&`; returns it and its length in bytes
fn parse_code(rest: &str) -> Option<(Code, usize)> {
    let first = rest.chars().next()?;

    if first == '#' {
        let hex = rest.get(1..7)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        let color = Color::TrueColor {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        };
        return Some((Code::Color(color), 7));
    }

    let code = match first.to_ascii_lowercase() {
        'l' => Code::Bold,
        'o' => Code::Italic,
        'n' => Code::Underline,
        'm' => Code::Strikethrough,
        'r' => Code::Reset,
        other => Code::Color(chat_color(other)?),
    };
    Some((code, first.len_utf8()))
}

fn paint(text: &str, style: Style) -> String {
    let mut painted = text.normal();
    if let Some(color) = style.color {
        painted = painted.color(color);
    }
    if style.bold {
        painted = painted.bold();
    }
    if style.italic {
        painted = painted.italic();
    }
    if style.underline {
        painted = painted.underline();
    }
    if style.strikethrough {
        painted = painted.strikethrough();
    }
    painted.to_string()
}

/// Walk `text`, calling `segment` for every run of plain text with its style
fn for_each_segment(text: &str, mut segment: impl FnMut(&str, Style)) {
    let mut style = Style::default();
    let mut start = 0;
    let mut index = 0;

    while let Some(offset) = text[index..].find('&') {
        let amp = index + offset;
        match parse_code(&text[amp + 1..]) {
            Some((code, len)) => {
                if amp > start {
                    segment(&text[start..amp], style);
                }
                style = match code {
                    Code::Color(color) => Style {
                        color: Some(color),
                        ..Style::default()
                    },
                    Code::Bold => Style { bold: true, ..style },
                    Code::Italic => Style { italic: true, ..style },
                    Code::Underline => Style { underline: true, ..style },
                    Code::Strikethrough => Style { strikethrough: true, ..style },
                    Code::Reset => Style::default(),
                };
                index = amp + 1 + len;
                start = index;
            }
            None => index = amp + 1,
        }
    }

    if start < text.len() {
        segment(&text[start..], style);
    }
}

/// Render color codes as terminal styling
pub fn colorize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for_each_segment(text, |segment, style| out.push_str(&paint(segment, style)));
    out
}

/// Remove color codes, keeping only the text
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for_each_segment(text, |segment, _| out.push_str(segment));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_codes() {
        assert_eq!(strip_codes("&cPlayer not found!"), "Player not found!");
        assert_eq!(strip_codes("&4&l[&c&l!&4&l] &cNope"), "[!] Nope");
        assert_eq!(strip_codes("&#ff8800Orange &rplain"), "Orange plain");
    }

    #[test]
    fn test_unknown_codes_are_kept() {
        assert_eq!(strip_codes("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(strip_codes("&zoops"), "&zoops");
        assert_eq!(strip_codes("&#12zz34bad"), "&#12zz34bad");
        assert_eq!(strip_codes("trailing &"), "trailing &");
    }

    #[test]
    fn test_colorize_without_terminal_colors() {
        colored::control::set_override(false);
        assert_eq!(colorize("&aGave &f5 &avotes"), "Gave 5 votes");
    }

    #[test]
    fn test_chat_colors() {
        assert!(matches!(chat_color('c'), Some(Color::BrightRed)));
        assert!(matches!(chat_color('C'), Some(Color::BrightRed)));
        assert!(chat_color('g').is_none());
    }
}
