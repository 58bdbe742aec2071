use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::contact::CONTACT_PALETTE_SIZE;
use crate::model::task::{Priority, TaskStatus};

/// Badge colors, indexed by a contact's sorted position
const CONTACT_PALETTE: [Color; CONTACT_PALETTE_SIZE] = [
    Color::Rgb(0xFF, 0x7A, 0x00),
    Color::Rgb(0xFF, 0x5E, 0xB3),
    Color::Rgb(0x65, 0x77, 0xF7),
    Color::Rgb(0x94, 0x27, 0xFF),
    Color::Rgb(0x00, 0xBE, 0xE8),
    Color::Rgb(0x1F, 0xD7, 0xC1),
    Color::Rgb(0xFF, 0x74, 0x5E),
    Color::Rgb(0xFF, 0xA3, 0x5E),
    Color::Rgb(0xFC, 0x71, 0xFF),
    Color::Rgb(0xFF, 0xC7, 0x01),
    Color::Rgb(0x04, 0x38, 0xFF),
    Color::Rgb(0xC3, 0xFF, 0x2B),
    Color::Rgb(0xFF, 0xE6, 0x2B),
    Color::Rgb(0xFF, 0x46, 0x46),
    Color::Rgb(0xFF, 0xBB, 0x2B),
];

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Background of the card being dragged and of a freshly moved card
    pub drag_bg: Color,
    /// Border of the column under the pointer while dragging
    pub drop_target: Color,
    pub contact_palette: [Color; CONTACT_PALETTE_SIZE],
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x29, 0xAB, 0xE2),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x3D, 0x00),
            yellow: Color::Rgb(0xFF, 0xA8, 0x00),
            green: Color::Rgb(0x7A, 0xE2, 0x29),
            cyan: Color::Rgb(0x1F, 0xD7, 0xC1),
            purple: Color::Rgb(0x00, 0x38, 0xFF),
            blue: Color::Rgb(0x29, 0xAB, 0xE2),
            selection_bg: Color::Rgb(0x2A, 0x36, 0x47),
            selection_border: Color::Rgb(0x29, 0xAB, 0xE2),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            drag_bg: Color::Rgb(0x3D, 0x14, 0x38),
            drop_target: Color::Rgb(0xFF, 0xFF, 0xFF),
            contact_palette: CONTACT_PALETTE,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from `[ui.colors]`, falling back to defaults.
    ///
    /// Palette slots are named `contact_0` .. `contact_14`.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(%key, %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "purple" => theme.purple = color,
                "blue" => theme.blue = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_border" => theme.selection_border = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                "drag_bg" => theme.drag_bg = color,
                "drop_target" => theme.drop_target = color,
                other => {
                    if let Some(slot) = other
                        .strip_prefix("contact_")
                        .and_then(|n| n.parse::<usize>().ok())
                        .filter(|n| *n < CONTACT_PALETTE_SIZE)
                    {
                        theme.contact_palette[slot] = color;
                    }
                }
            }
        }

        theme
    }

    /// Badge color for a palette slot; unmatched names get the dim color
    pub fn contact_color(&self, index: Option<usize>) -> Color {
        match index {
            Some(i) => self.contact_palette[i % CONTACT_PALETTE_SIZE],
            None => self.dim,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Urgent => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.green,
        }
    }

    /// Category label color
    pub fn category_color(&self, category: &str) -> Color {
        match category {
            "Technical Task" => self.cyan,
            "User Story" => self.purple,
            _ => self.dim,
        }
    }

    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::ToDo => self.text,
            TaskStatus::InProgress => self.highlight,
            TaskStatus::AwaitFeedback => self.yellow,
            TaskStatus::Done => self.green,
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
        assert_eq!(parse_hex_color("FF4444"), None);
        assert_eq!(parse_hex_color("#FF44"), None);
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("contact_3".into(), "#112233".into());
        ui.colors.insert("contact_99".into(), "#445566".into());
        ui.colors.insert("text".into(), "nope".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.contact_palette[3], Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.text, Theme::default().text);
    }

    #[test]
    fn test_contact_color_wraps_and_falls_back() {
        let theme = Theme::default();
        assert_eq!(theme.contact_color(Some(0)), CONTACT_PALETTE[0]);
        assert_eq!(
            theme.contact_color(Some(CONTACT_PALETTE_SIZE + 2)),
            CONTACT_PALETTE[2]
        );
        assert_eq!(theme.contact_color(None), theme.dim);
    }

    #[test]
    fn test_priority_color() {
        let theme = Theme::default();
        assert_eq!(theme.priority_color(Priority::Urgent), theme.red);
        assert_eq!(theme.priority_color(Priority::Low), theme.green);
    }
}
