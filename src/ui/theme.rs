//! Terminal colors for the light and dark themes

use crate::core::theme::ThemeMode;
use colored::{Color, ColoredString, Colorize};

/// Set to `always` or `never` to override terminal detection.
pub const COLOR_ENV_VAR: &str = "CODEFACE_COLOR";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    color: Option<Color>,
    bold: bool,
    dimmed: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        bold: false,
        dimmed: false,
    };

    const fn fg(color: Color) -> Self {
        Style {
            color: Some(color),
            bold: false,
            dimmed: false,
        }
    }

    const fn bold(self) -> Self {
        Style { bold: true, ..self }
    }

    const fn dimmed(self) -> Self {
        Style {
            dimmed: true,
            ..self
        }
    }

    pub fn paint(&self, text: &str) -> String {
        if *self == Style::PLAIN {
            return text.to_string();
        }
        let mut styled: ColoredString = text.normal();
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.dimmed {
            styled = styled.dimmed();
        }
        styled.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub user_prefix_style: Style,
    pub assistant_prefix_style: Style,
    pub system_text_style: Style,
    pub error_style: Style,
    pub hint_style: Style,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            user_prefix_style: Style::fg(Color::Blue).bold(),
            assistant_prefix_style: Style::fg(Color::Magenta).bold(),
            system_text_style: Style::fg(Color::BrightBlack),
            error_style: Style::fg(Color::Red).bold(),
            hint_style: Style::PLAIN.dimmed(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            user_prefix_style: Style::fg(Color::BrightCyan).bold(),
            assistant_prefix_style: Style::fg(Color::BrightYellow).bold(),
            system_text_style: Style::fg(Color::White),
            error_style: Style::fg(Color::BrightRed).bold(),
            hint_style: Style::fg(Color::White).dimmed(),
        }
    }

    /// Same layout with every style plain; used for pipes and `NO_COLOR`.
    pub fn monochrome(mode: ThemeMode) -> Self {
        Theme {
            mode,
            user_prefix_style: Style::PLAIN,
            assistant_prefix_style: Style::PLAIN,
            system_text_style: Style::PLAIN,
            error_style: Style::PLAIN,
            hint_style: Style::PLAIN,
        }
    }

    pub fn for_mode(mode: ThemeMode, colors: bool) -> Self {
        match (mode, colors) {
            (mode, false) => Theme::monochrome(mode),
            (ThemeMode::Light, true) => Theme::light(),
            (ThemeMode::Dark, true) => Theme::dark(),
        }
    }
}

/// Parse a `CODEFACE_COLOR` value; `None` leaves detection to `colored`.
pub fn color_override(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "always" | "on" | "1" => Some(true),
        "never" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Whether stdout should receive colors. `CODEFACE_COLOR` wins; otherwise
/// `colored` decides from `NO_COLOR`, `CLICOLOR` and terminal detection.
pub fn colors_enabled() -> bool {
    let forced = std::env::var(COLOR_ENV_VAR)
        .ok()
        .and_then(|value| color_override(&value));
    match forced {
        Some(enabled) => {
            colored::control::set_override(enabled);
            enabled
        }
        None => colored::control::SHOULD_COLORIZE.should_colorize(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_leaves_text_alone() {
        assert_eq!(Style::PLAIN.paint("You"), "You");
        assert_eq!(Theme::monochrome(ThemeMode::Dark).error_style.paint("x"), "x");
    }

    #[test]
    fn colored_style_matches_colorize_output() {
        colored::control::set_override(true);
        let painted = Theme::dark().error_style.paint("Error");
        assert_eq!(painted, "Error".bright_red().bold().to_string());
        assert_ne!(painted, "Error");
    }

    #[test]
    fn override_values_parse() {
        assert_eq!(color_override("Always"), Some(true));
        assert_eq!(color_override(" never "), Some(false));
        assert_eq!(color_override("auto"), None);
    }

    #[test]
    fn themes_differ_by_mode() {
        assert_ne!(
            Theme::light().user_prefix_style,
            Theme::dark().user_prefix_style
        );
        assert_eq!(Theme::for_mode(ThemeMode::Dark, true), Theme::dark());
        assert_eq!(
            Theme::for_mode(ThemeMode::Dark, false),
            Theme::monochrome(ThemeMode::Dark)
        );
    }
}
