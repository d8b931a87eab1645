//! ANSI styling for the text plan

pub mod colors {
    pub const GREY: u8 = 102;      // #7D7D7D - Separators
    pub const AQUA: u8 = 109;      // #7A9EB5 - HEAD, info
    pub const ORANGE: u8 = 208;    // #F2913D - PUT/PATCH
    pub const RED: u8 = 167;       // #E34F45 - DELETE
    pub const BLUE: u8 = 68;       // #426BD1 - Operation labels
    pub const PINK: u8 = 176;      // #DE85DE - Keys
    pub const GREEN: u8 = 71;      // #63C27A - GET
    pub const YELLOW: u8 = 185;    // #CCCC3D - POST
}

/// ANSI escape code constants
pub const RESET: &str = "\x1b[0m";

/// Generate foreground color escape code
#[inline]
pub fn fg(color: u8) -> String {
    format!("\x1b[38;5;{}m", color)
}

/// Generate bold foreground color escape code
#[inline]
pub fn bold_fg(color: u8) -> String {
    format!("\x1b[1;38;5;{}m", color)
}

/// Styles text when color is enabled, passes it through otherwise
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colorize text with a foreground color
    pub fn colorize(&self, text: &str, color: u8) -> String {
        if self.enabled {
            format!("{}{}{}", fg(color), text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Colorize text with bold foreground color
    pub fn bold(&self, text: &str, color: u8) -> String {
        if self.enabled {
            format!("{}{}{}", bold_fg(color), text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn label(&self, text: &str) -> String {
        self.bold(text, colors::BLUE)
    }

    pub fn key(&self, text: &str) -> String {
        self.colorize(text, colors::PINK)
    }

    pub fn muted(&self, text: &str) -> String {
        self.colorize(text, colors::GREY)
    }

    pub fn method(&self, method: &str) -> String {
        self.bold(method, method_color(method))
    }
}

/// Color for an HTTP method name
pub fn method_color(method: &str) -> u8 {
    match method.to_ascii_uppercase().as_str() {
        "GET" => colors::GREEN,
        "POST" => colors::YELLOW,
        "PUT" | "PATCH" => colors::ORANGE,
        "DELETE" => colors::RED,
        "HEAD" => colors::AQUA,
        _ => colors::PINK,
    }
}
