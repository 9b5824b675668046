//! Level labels use the classic 16-color ANSI palette so they render on any
//! terminal, including ones without true-color support.

use std::fmt;
use std::str::FromStr;

/// The eight foreground colors the level table draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Bright black; most terminals show it as grey.
    Grey,
}

impl AnsiColor {
    /// SGR foreground code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Grey => 90,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Grey => "grey",
        }
    }
}

/// A color plus an optional bold attribute, e.g. `bold red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub color: AnsiColor,
    pub bold: bool,
}

impl Style {
    #[must_use]
    pub const fn plain(color: AnsiColor) -> Self {
        Self { color, bold: false }
    }

    #[must_use]
    pub const fn bold(color: AnsiColor) -> Self {
        Self { color, bold: true }
    }

    /// Terminates any active SGR styling.
    pub const RESET: &'static str = "\x1b[0m";

    /// Opening escape sequence for this style.
    #[must_use]
    pub fn ansi(self) -> String {
        if self.bold {
            format!("\x1b[1;{}m", self.color.code())
        } else {
            format!("\x1b[{}m", self.color.code())
        }
    }

    /// Wraps `text` in this style and a reset.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}{}", self.ansi(), Self::RESET)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            write!(f, "bold {}", self.color.as_str())
        } else {
            f.write_str(self.color.as_str())
        }
    }
}

/// Returned when a style string names an unknown color or modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStyleError(String);

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style: '{}'", self.0)
    }
}

impl std::error::Error for ParseStyleError {}

impl FromStr for Style {
    type Err = ParseStyleError;

    /// Parses the `"bold red"` / `"grey"` notation used in the level table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bold = false;
        let mut color = None;

        for word in s.split_whitespace() {
            match word.to_lowercase().as_str() {
                "bold" => bold = true,
                "red" => color = Some(AnsiColor::Red),
                "green" => color = Some(AnsiColor::Green),
                "yellow" => color = Some(AnsiColor::Yellow),
                "blue" => color = Some(AnsiColor::Blue),
                "magenta" => color = Some(AnsiColor::Magenta),
                "cyan" => color = Some(AnsiColor::Cyan),
                "white" => color = Some(AnsiColor::White),
                "grey" | "gray" => color = Some(AnsiColor::Grey),
                _ => return Err(ParseStyleError(s.to_string())),
            }
        }

        color
            .map(|color| Self { color, bold })
            .ok_or_else(|| ParseStyleError(s.to_string()))
    }
}
