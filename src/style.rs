//! # ANSI SGR text styling.
//!
//! [`colorize`] wraps a piece of text in a single combined SGR escape
//! sequence built from the given [`Sgr`] attributes, resets the terminal
//! state at the end, and re-applies the sequence after every embedded line
//! break so background colors never "bleed" into the rest of the line or
//! into subsequent output.
//!
//! Support for the individual effects depends on the terminal and font;
//! the widely supported ones are bold, underline and reverse.
//!
//! ```
//! use menuflow::style::{colorize, AnsiColor, Sgr};
//!
//! let title = colorize("MAIN MENU", &[Sgr::Bold, Sgr::Fg(AnsiColor::Cyan)]);
//! assert_eq!(title, "\u{1b}[1;36mMAIN MENU\u{1b}[0m");
//! ```

const RESET: &str = "\u{1b}[0m";
const ESC: &str = "\u{1b}[";

/// A foreground or background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

impl AnsiColor {
    /// SGR parameter for this color as a foreground (`base = 38`) or
    /// background (`base = 48`) attribute.
    fn code(self, base: u8) -> String {
        // Named colors offset from the 30/40 rows, bright ones from 90/100.
        let named = |n: u8| (base - 8 + n).to_string();
        let bright = |n: u8| (base + 52 + n).to_string();
        match self {
            AnsiColor::Black => named(0),
            AnsiColor::Red => named(1),
            AnsiColor::Green => named(2),
            AnsiColor::Yellow => named(3),
            AnsiColor::Blue => named(4),
            AnsiColor::Magenta => named(5),
            AnsiColor::Cyan => named(6),
            AnsiColor::White => named(7),
            AnsiColor::BrightBlack => bright(0),
            AnsiColor::BrightRed => bright(1),
            AnsiColor::BrightGreen => bright(2),
            AnsiColor::BrightYellow => bright(3),
            AnsiColor::BrightBlue => bright(4),
            AnsiColor::BrightMagenta => bright(5),
            AnsiColor::BrightCyan => bright(6),
            AnsiColor::BrightWhite => bright(7),
            AnsiColor::Indexed(index) => format!("{base};5;{index}"),
            AnsiColor::Rgb(r, g, b) => format!("{base};2;{r};{g};{b}"),
        }
    }
}

/// One SGR attribute: an effect, a foreground color, or a background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sgr {
    /// Placeholder producing no code; useful with conditional assignments.
    None,
    /// Resets all attributes (the `0` parameter).
    Clear,
    Bold,
    Dim,
    Italic,
    Underline,
    /// Rarely supported.
    SlowBlink,
    /// Rarely supported.
    RapidBlink,
    /// Swaps foreground and background colors.
    Reverse,
    /// Rarely supported.
    Hidden,
    Strikethrough,
    /// Rarely supported.
    Framed,
    /// Rarely supported.
    Encircled,
    /// Rarely supported.
    Overlined,
    /// Foreground color.
    Fg(AnsiColor),
    /// Background color.
    Bg(AnsiColor),
}

impl Sgr {
    /// The SGR parameter string for this attribute; empty for [`Sgr::None`].
    fn code(self) -> String {
        match self {
            Sgr::None => String::new(),
            Sgr::Clear => "0".to_owned(),
            Sgr::Bold => "1".to_owned(),
            Sgr::Dim => "2".to_owned(),
            Sgr::Italic => "3".to_owned(),
            Sgr::Underline => "4".to_owned(),
            Sgr::SlowBlink => "5".to_owned(),
            Sgr::RapidBlink => "6".to_owned(),
            Sgr::Reverse => "7".to_owned(),
            Sgr::Hidden => "8".to_owned(),
            Sgr::Strikethrough => "9".to_owned(),
            Sgr::Framed => "51".to_owned(),
            Sgr::Encircled => "52".to_owned(),
            Sgr::Overlined => "53".to_owned(),
            Sgr::Fg(color) => color.code(38),
            Sgr::Bg(color) => color.code(48),
        }
    }
}

/// Applies the given SGR attributes to `text`.
///
/// All attributes are combined into one escape sequence. The returned
/// string resets the terminal state at the end, and re-applies the
/// sequence after every embedded `\n` to prevent background spilling.
/// With no effective attributes (empty slice, or only [`Sgr::None`]) the
/// text is returned unchanged.
pub fn colorize(text: &str, attributes: &[Sgr]) -> String {
    let params: Vec<String> = attributes
        .iter()
        .map(|attr| attr.code())
        .filter(|code| !code.is_empty())
        .collect();
    if params.is_empty() {
        return text.to_owned();
    }

    let sequence = format!("{ESC}{}m", params.join(";"));
    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&sequence);
    out.push_str(&text.replace('\n', &format!("{RESET}\n{sequence}")));
    out.push_str(RESET);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_attributes_leaves_text_alone() {
        assert_eq!(colorize("plain", &[]), "plain");
        assert_eq!(colorize("plain", &[Sgr::None]), "plain");
    }

    #[test]
    fn attributes_are_joined_with_semicolons() {
        let s = colorize("x", &[Sgr::Bold, Sgr::Underline, Sgr::Fg(AnsiColor::Red)]);
        assert_eq!(s, "\u{1b}[1;4;31mx\u{1b}[0m");
    }

    #[test]
    fn none_attributes_are_skipped_in_combination() {
        let s = colorize("x", &[Sgr::None, Sgr::Bold, Sgr::None]);
        assert_eq!(s, "\u{1b}[1mx\u{1b}[0m");
    }

    #[test]
    fn line_breaks_reset_and_reapply() {
        let s = colorize("a\nb", &[Sgr::Bg(AnsiColor::Blue)]);
        assert_eq!(s, "\u{1b}[44ma\u{1b}[0m\n\u{1b}[44mb\u{1b}[0m");
    }

    #[test]
    fn bright_and_named_color_rows() {
        assert_eq!(
            colorize("x", &[Sgr::Fg(AnsiColor::BrightWhite)]),
            "\u{1b}[97mx\u{1b}[0m"
        );
        assert_eq!(
            colorize("x", &[Sgr::Bg(AnsiColor::BrightBlack)]),
            "\u{1b}[100mx\u{1b}[0m"
        );
        assert_eq!(
            colorize("x", &[Sgr::Bg(AnsiColor::White)]),
            "\u{1b}[47mx\u{1b}[0m"
        );
    }

    #[test]
    fn indexed_and_rgb_colors() {
        assert_eq!(
            colorize("x", &[Sgr::Fg(AnsiColor::Indexed(208))]),
            "\u{1b}[38;5;208mx\u{1b}[0m"
        );
        assert_eq!(
            colorize("x", &[Sgr::Bg(AnsiColor::Rgb(12, 34, 56))]),
            "\u{1b}[48;2;12;34;56mx\u{1b}[0m"
        );
    }
}
