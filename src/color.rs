//! ANSI color annotation.
//!
//! [`ColorAnnotator`] is handed to every renderer instead of consulting a
//! global switch. A disabled annotator is the identity on all of its
//! wrapping methods, which is also how plain-text widths are measured.
//!
//! Each wrap closes with a full reset, so nesting is only well-formed one
//! level deep: an inner wrap's reset ends the outer style as well. Renderers
//! only ever nest `bright` around a single `fg`.

use regex::Regex;
use std::io::IsTerminal;
use std::sync::OnceLock;

/// Raw ANSI SGR codes.
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const BLACK: &str = "\x1b[30m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[97m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Named foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Black => codes::BLACK,
            Color::Red => codes::RED,
            Color::Green => codes::GREEN,
            Color::Yellow => codes::YELLOW,
            Color::Blue => codes::BLUE,
            Color::Magenta => codes::MAGENTA,
            Color::Cyan => codes::CYAN,
            Color::White => codes::WHITE,
            Color::Gray => codes::GRAY,
        }
    }
}

/// When to emit escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against the current stdout and `NO_COLOR`.
    pub fn resolve(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "unknown color mode '{}' (expected auto, always or never)",
                other
            )),
        }
    }
}

/// Wraps text in ANSI styles, or passes it through untouched when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAnnotator {
    enabled: bool,
}

impl ColorAnnotator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled() -> Self {
        Self::new(true)
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn from_mode(mode: ColorMode) -> Self {
        Self::new(mode.resolve())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Foreground color.
    pub fn fg(&self, color: Color, text: &str) -> String {
        self.wrap(color.code(), text)
    }

    /// Background from a 6-hex-digit color, with a black or white
    /// foreground picked for contrast. An unparseable color leaves the text
    /// unstyled.
    pub fn bg(&self, hex: &str, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match parse_hex_color(hex) {
            Some((r, g, b)) => {
                let fg = if luminance(r, g, b) > 150.0 {
                    codes::BLACK
                } else {
                    codes::WHITE
                };
                format!("\x1b[48;2;{};{};{}m{}{}{}", r, g, b, fg, text, codes::RESET)
            }
            None => text.to_string(),
        }
    }

    /// Bold/bright intensity.
    pub fn bright(&self, text: &str) -> String {
        self.wrap(codes::BOLD, text)
    }

    /// Run `f` with annotation switched off, e.g. to measure plain widths.
    pub fn no_color<R>(&self, f: impl FnOnce(&ColorAnnotator) -> R) -> R {
        f(&ColorAnnotator::disabled())
    }

    /// Brighten every match of `pattern` in `text`.
    pub fn highlight(&self, text: &str, pattern: &Regex) -> String {
        if !self.enabled {
            return text.to_string();
        }
        pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                self.bright(&self.fg(Color::Yellow, &caps[0]))
            })
            .into_owned()
    }

    fn wrap(&self, start: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", start, text, codes::RESET)
        } else {
            text.to_string()
        }
    }
}

impl Default for ColorAnnotator {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Parse `rrggbb` (no leading `#`) into components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("valid ANSI pattern"))
}

/// Remove all ANSI CSI sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    ansi_pattern().replace_all(text, "").into_owned()
}
