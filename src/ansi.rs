//! ANSI escape sequence composition
//!
//! Every function in this module is a pure mapping from a value to the
//! escape sequence that expresses it. Nothing here writes to a terminal;
//! see [`Printer`], [`Cursor`] and [`Screen`] for that.
//!
//! [`Printer`]: ../printer/struct.Printer.html
//! [`Cursor`]: ../screen/struct.Cursor.html
//! [`Screen`]: ../screen/struct.Screen.html

/// Resets all color and style attributes (SGR 0).
pub const RESET: &str = "\x1b[0m";

/// Hides the cursor (DECTCEM reset).
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Shows the cursor (DECTCEM set).
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Moves the cursor to the first line and column.
pub const CURSOR_HOME: &str = "\x1b[H";

/// Clears the visible screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Drops the scrollback buffer.
pub const CLEAR_SCROLLBACK: &str = "\x1b[3J";
/// Clears the current line and returns the cursor to its first column.
pub const CLEAR_LINE: &str = "\x1b[2K\r";

/// Switches to the alternate screen buffer.
pub const ENTER_ALTERNATE_SCREEN: &str = "\x1b[?1049h";
/// Switches back to the main screen buffer.
pub const EXIT_ALTERNATE_SCREEN: &str = "\x1b[?1049l";

/// Full terminal reset (RIS).
pub const FULL_RESET: &str = "\x1bc";

/// Represents a color attribute applied to text foreground or background.
///
/// # Notes
///
/// Names here correspond to possible default values for some systems.
/// Because users may reconfigure the set of colors available in their terminal,
/// these color values may correspond to different user-configured display colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    /// Black
    Black,
    /// Red
    Red,
    /// Green
    Green,
    /// Yellow
    Yellow,
    /// Blue
    Blue,
    /// Magenta
    Magenta,
    /// Cyan
    Cyan,
    /// White
    White,
    /// Index into the 256-color palette
    Indexed(u8),
    /// 24-bit color
    Rgb(u8, u8, u8),
    /// Terminal default colors and attributes
    Reset,
}

impl Color {
    /// Returns the escape sequence selecting this color.
    ///
    /// See [`color_to_ansi`](fn.color_to_ansi.html).
    pub fn to_ansi(self, background: bool) -> String {
        color_to_ansi(self, background)
    }

    // Foreground SGR code of a named color
    fn base_code(self) -> Option<u8> {
        match self {
            Color::Black =>   Some(30),
            Color::Red =>     Some(31),
            Color::Green =>   Some(32),
            Color::Yellow =>  Some(33),
            Color::Blue =>    Some(34),
            Color::Magenta => Some(35),
            Color::Cyan =>    Some(36),
            Color::White =>   Some(37),
            _ => None
        }
    }
}

impl From<u8> for Color {
    /// Returns a 256-color palette entry.
    fn from(index: u8) -> Color {
        Color::Indexed(index)
    }
}

impl From<(u8, u8, u8)> for Color {
    /// Returns a 24-bit color from an `(r, g, b)` tuple.
    fn from((r, g, b): (u8, u8, u8)) -> Color {
        Color::Rgb(r, g, b)
    }
}

/// Represents a style attribute applied to text.
///
/// The discriminant of each variant is its SGR parameter.
///
/// Some styles may not be supported on all systems.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Style {
    /// No style; emits no escape sequence
    Normal = 0,
    /// Bold
    Bold = 1,
    /// Dim, or faint
    Dim = 2,
    /// Italic
    Italic = 3,
    /// Underline
    Underline = 4,
    /// Slow blink
    Blink = 5,
    /// Reverse; foreground and background color swapped
    Reverse = 7,
    /// Hidden
    Hidden = 8,
    /// Strikethrough
    Strike = 9,
}

impl Style {
    /// Returns the escape sequence enabling this style.
    ///
    /// See [`style_to_ansi`](fn.style_to_ansi.html).
    pub fn to_ansi(self) -> String {
        style_to_ansi(self)
    }
}

impl Default for Style {
    fn default() -> Style {
        Style::Normal
    }
}

/// Represents the visual appearance of the cursor (DECSCUSR).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum CursorShape {
    /// Shape configured by the user
    Default = 0,
    /// Blinking block
    BlinkingBlock = 1,
    /// Steady block
    SteadyBlock = 2,
    /// Blinking underline
    BlinkingUnderline = 3,
    /// Steady underline
    SteadyUnderline = 4,
    /// Blinking vertical bar
    BlinkingBar = 5,
    /// Steady vertical bar
    SteadyBar = 6,
}

/// Returns the escape sequence selecting `color` as the text foreground,
/// or as the background if `background` is `true`.
///
/// `Color::Reset` always produces [`RESET`](constant.RESET.html),
/// whichever layer is requested.
///
/// # Examples
///
/// ```
/// # use termplus::ansi::{color_to_ansi, Color};
/// assert_eq!(color_to_ansi(Color::Red, false), "\x1b[31m");
/// assert_eq!(color_to_ansi(Color::Red, true), "\x1b[41m");
/// assert_eq!(color_to_ansi(Color::Indexed(208), false), "\x1b[38;5;208m");
/// assert_eq!(color_to_ansi(Color::Rgb(1, 2, 3), true), "\x1b[48;2;1;2;3m");
/// ```
pub fn color_to_ansi(color: Color, background: bool) -> String {
    let layer = if background { 48 } else { 38 };

    match color {
        Color::Reset => RESET.to_owned(),
        Color::Indexed(n) => format!("\x1b[{};5;{}m", layer, n),
        Color::Rgb(r, g, b) => format!("\x1b[{};2;{};{};{}m", layer, r, g, b),
        named => {
            let mut code = named.base_code().unwrap_or(39);
            if background {
                code += 10;
            }
            format!("\x1b[{}m", code)
        }
    }
}

/// Returns the escape sequence enabling `style`.
///
/// `Style::Normal` produces an empty string. Callers skip emission
/// entirely in that case, rather than emitting a reset that would clear
/// any active color.
pub fn style_to_ansi(style: Style) -> String {
    match style {
        Style::Normal => String::new(),
        style => format!("\x1b[{}m", style as u8),
    }
}

/// Returns the sequence moving the cursor to column `x`, line `y`.
///
/// Coordinates begin at `1`, with the origin at the top-left corner.
pub fn cursor_position(x: usize, y: usize) -> String {
    format!("\x1b[{};{}H", y, x)
}

/// Returns the sequence selecting a cursor shape.
pub fn cursor_shape(shape: CursorShape) -> String {
    format!("\x1b[{} q", shape as u8)
}

/// Returns the sequence setting the terminal window title.
///
/// Control characters are removed from `title`, as they would otherwise
/// terminate the sequence early.
pub fn set_title(title: &str) -> String {
    let title: String = title.chars().filter(|ch| !ch.is_control()).collect();
    format!("\x1b]2;{}\x07", title)
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reset_ignores_layer() {
        assert_eq!(color_to_ansi(Color::Reset, false), RESET);
        assert_eq!(color_to_ansi(Color::Reset, true), RESET);
    }

    #[test]
    fn test_named_colors() {
        let named = [
            (Color::Black, 30), (Color::Red, 31), (Color::Green, 32),
            (Color::Yellow, 33), (Color::Blue, 34), (Color::Magenta, 35),
            (Color::Cyan, 36), (Color::White, 37),
        ];

        for &(color, code) in &named {
            assert_eq!(color.to_ansi(false), format!("\x1b[{}m", code));
            assert_eq!(color.to_ansi(true), format!("\x1b[{}m", code + 10));
        }
    }

    #[test]
    fn test_color_conversions() {
        assert_eq!(Color::from(42), Color::Indexed(42));
        assert_eq!(Color::from((1, 2, 3)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_styles() {
        assert_eq!(style_to_ansi(Style::Normal), "");
        assert_eq!(Style::default(), Style::Normal);

        let styles = [
            (Style::Bold, "\x1b[1m"),
            (Style::Dim, "\x1b[2m"),
            (Style::Italic, "\x1b[3m"),
            (Style::Underline, "\x1b[4m"),
            (Style::Blink, "\x1b[5m"),
            (Style::Reverse, "\x1b[7m"),
            (Style::Hidden, "\x1b[8m"),
            (Style::Strike, "\x1b[9m"),
        ];

        for &(style, seq) in &styles {
            assert_eq!(style.to_ansi(), seq);
        }
    }

    #[test]
    fn test_cursor_sequences() {
        assert_eq!(cursor_position(1, 1), "\x1b[1;1H");
        // Column first in arguments, line first on the wire
        assert_eq!(cursor_position(10, 5), "\x1b[5;10H");
        assert_eq!(cursor_shape(CursorShape::SteadyBar), "\x1b[6 q");
        assert_eq!(cursor_shape(CursorShape::Default), "\x1b[0 q");
    }

    #[test]
    fn test_title() {
        assert_eq!(set_title("hello"), "\x1b]2;hello\x07");
        assert_eq!(set_title("a\x07b\x1bc"), "\x1b]2;abc\x07");
        assert_eq!(set_title("d\x7fe\u{9c}f\u{e9}"), "\x1b]2;def\u{e9}\x07");
    }

    proptest! {
        #[test]
        fn indexed_colors_encode(n in any::<u8>()) {
            prop_assert_eq!(color_to_ansi(Color::Indexed(n), false), format!("\x1b[38;5;{}m", n));
            prop_assert_eq!(color_to_ansi(Color::Indexed(n), true), format!("\x1b[48;5;{}m", n));
        }

        #[test]
        fn rgb_colors_encode(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(color_to_ansi(Color::Rgb(r, g, b), false),
                format!("\x1b[38;2;{};{};{}m", r, g, b));
            prop_assert_eq!(color_to_ansi(Color::Rgb(r, g, b), true),
                format!("\x1b[48;2;{};{};{}m", r, g, b));
        }
    }
}
