use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub done: Color,
    pub red: Color,
    pub green: Color,
    pub gauge_fill: Color,
    pub gauge_empty: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0F, 0x17, 0x2A),
            text: Color::Rgb(0xE2, 0xE8, 0xF0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x0E, 0xA5, 0xE9),
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            done: Color::Rgb(0x94, 0xA3, 0xB8),
            red: Color::Rgb(0xEF, 0x44, 0x44),
            green: Color::Rgb(0x22, 0xC5, 0x5E),
            gauge_fill: Color::Rgb(0xE2, 0xE8, 0xF0),
            gauge_empty: Color::Rgb(0x33, 0x41, 0x55),
            selection_bg: Color::Rgb(0x1E, 0x29, 0x3B),
            selection_border: Color::Rgb(0x0E, 0xA5, 0xE9),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "done" => theme.done = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "gauge_fill" => theme.gauge_fill = color,
                "gauge_empty" => theme.gauge_empty = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_border" => theme.selection_border = color,
                _ => {}
            }
        }

        theme
    }
}
