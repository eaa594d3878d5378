//! Fixed catalog of editor color themes.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub foreground: Color,
    pub accent: Color,
    pub dim: Color,
}

pub const THEMES: &[Theme] = &[
    Theme { name: "cobalt", foreground: Color::White, accent: Color::Blue, dim: Color::DarkGray },
    Theme { name: "oceanic-next", foreground: Color::Gray, accent: Color::Cyan, dim: Color::DarkGray },
    Theme { name: "vs-dark", foreground: Color::White, accent: Color::LightBlue, dim: Color::DarkGray },
    Theme { name: "light", foreground: Color::Black, accent: Color::Blue, dim: Color::Gray },
    Theme { name: "dracula", foreground: Color::White, accent: Color::Magenta, dim: Color::DarkGray },
    Theme { name: "monokai", foreground: Color::White, accent: Color::Green, dim: Color::DarkGray },
];

/// Index of a theme by name, case-insensitively.
pub fn find(name: &str) -> Option<usize> {
    THEMES.iter().position(|t| t.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_theme_by_name() {
        assert_eq!(find("cobalt"), Some(0));
        assert_eq!(find("Dracula"), find("dracula"));
        assert!(find("solarized").is_none());
    }
}
