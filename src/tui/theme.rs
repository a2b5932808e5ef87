use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Indexed(252),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Indexed(245),
            border: Color::Indexed(238),
            selection_bg: Color::Indexed(90),
            selection_fg: Color::Indexed(252),
        }
    }
}

/// Styles the table widget draws with. Built once from the theme and
/// handed to the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyles {
    pub header: Style,
    pub selected: Style,
    pub normal: Style,
    pub border: Style,
    pub footer: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        Theme::default().table_styles()
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
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
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "border" => theme.border = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_fg" => theme.selection_fg = color,
                    _ => {}
                }
            }
        }

        theme
    }

    pub fn table_styles(&self) -> TableStyles {
        TableStyles {
            header: Style::default()
                .fg(self.text_bright)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(self.selection_fg)
                .bg(self.selection_bg)
                .add_modifier(Modifier::BOLD),
            normal: Style::default().fg(self.text),
            border: Style::default().fg(self.border),
            footer: Style::default().fg(self.dim),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("border".into(), "#000000".into());
        ui.colors.insert("selection_bg".into(), "#112233".into());
        ui.colors.insert("unknown_slot".into(), "#FFFFFF".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.border, Color::Rgb(0, 0, 0));
        assert_eq!(theme.selection_bg, Color::Rgb(0x11, 0x22, 0x33));
        // Unchanged defaults still present
        assert_eq!(theme.text, Color::Indexed(252));
    }

    #[test]
    fn test_non_ascii_hex_rejected() {
        // Six bytes, but not six hex digits
        assert_eq!(parse_hex_color("#a\u{e9}\u{e9}b"), None);

        let mut ui = UiConfig::default();
        ui.colors.insert("border".into(), "#a\u{e9}\u{e9}b".into());
        assert_eq!(Theme::from_config(&ui).border, Theme::default().border);
    }

    #[test]
    fn test_bad_hex_ignored() {
        let mut ui = UiConfig::default();
        ui.colors.insert("border".into(), "grey".into());
        assert_eq!(Theme::from_config(&ui).border, Theme::default().border);
    }

    #[test]
    fn test_selected_style_uses_selection_colors() {
        let theme = Theme::default();
        let styles = theme.table_styles();
        assert_eq!(styles.selected.bg, Some(theme.selection_bg));
        assert_eq!(styles.selected.fg, Some(theme.selection_fg));
        assert_eq!(styles.normal.bg, None);
    }
}
