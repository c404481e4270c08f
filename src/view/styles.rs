//! Colors and text styles.

use crate::model::Category;
use ratatui::style::{Color, Modifier, Style};

/// Muted secondary text (hints, metadata).
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Section headers in the help overlay and detail pane.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Row under the cursor.
pub const SELECTED_ROW: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// The "↓ more" / "Loading more…" row at the end of an infinite list.
pub const SENTINEL_ROW: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::ITALIC);

/// Status-bar message.
pub const STATUS_TEXT: Style = Style::new().fg(Color::Yellow);

/// Key names in hints and help.
pub const KEY_HINT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Whether colors are enabled.
///
/// Disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }

    /// `style` when colors are on, plain otherwise.
    pub fn apply(self, style: Style) -> Style {
        if self.enabled {
            style
        } else {
            Style::default().add_modifier(style.add_modifier)
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Badge color for a category.
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Jobs => Color::Green,
        Category::Events => Color::Magenta,
        Category::Dining => Color::LightRed,
        Category::Rentals => Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_have_distinct_colors() {
        let colors: std::collections::HashSet<_> =
            Category::ALL.iter().map(|c| category_color(*c)).collect();
        assert_eq!(colors.len(), Category::ALL.len());
    }

    #[test]
    fn disabled_colors_keep_modifiers_only() {
        let plain = ColorConfig::new(false).apply(SELECTED_ROW);
        assert_eq!(plain.fg, None);
        assert_eq!(plain.bg, None);
        assert!(plain.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn enabled_colors_pass_style_through() {
        assert_eq!(ColorConfig::new(true).apply(SELECTED_ROW), SELECTED_ROW);
    }
}
