use ratatui::style::{Color, Modifier, Style};

use crate::config::Config;

/// Theme configuration for the prompter
#[derive(Clone, Debug)]
pub struct Theme {
    /// Background of the prompter area
    pub background: Color,

    /// Colour for text whose segment doesn't carry its own
    pub text: Color,

    /// Foreground (text) color for the toolbar
    pub toolbar_fg: Color,

    /// Background color for the toolbar
    pub toolbar_bg: Color,

    /// Foreground for an enabled toolbar toggle
    pub toggle_on_fg: Color,

    /// Background for an enabled toolbar toggle
    pub toggle_on_bg: Color,

    /// Foreground color for active selection
    pub selection_fg: Color,

    /// Background color for active selection
    pub selection_bg: Color,

    /// Foreground color for the colour prompt
    pub prompt_fg: Color,

    /// Background color for the colour prompt
    pub prompt_bg: Color,

    /// Placeholder text on the input screen
    pub placeholder_fg: Color,

    /// Title of the input screen
    pub title_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            toolbar_fg: Color::White,
            toolbar_bg: Color::DarkGray,
            toggle_on_fg: Color::White,
            toggle_on_bg: Color::Blue,
            selection_fg: Color::White,
            selection_bg: Color::LightBlue,
            prompt_fg: Color::White,
            prompt_bg: Color::Blue,
            placeholder_fg: Color::DarkGray,
            title_fg: Color::LightYellow,
        }
    }
}

impl Theme {
    /// Default theme with the prompter colours taken from the config
    pub fn from_config(config: &Config) -> Self {
        Self {
            background: config.background_color.to_ratatui(),
            text: config.text_color.to_ratatui(),
            ..Self::default()
        }
    }

    /// Style of the prompter area
    pub fn prompter_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn toolbar_style(&self) -> Style {
        Style::default().fg(self.toolbar_fg).bg(self.toolbar_bg)
    }

    /// Style for a toolbar toggle, highlighted when enabled
    pub fn toggle_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.toggle_on_fg)
                .bg(self.toggle_on_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            self.toolbar_style()
        }
    }

    /// Get the style for selected text
    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    pub fn prompt_style(&self) -> Style {
        Style::default().fg(self.prompt_fg).bg(self.prompt_bg)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(self.placeholder_fg)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title_fg)
            .add_modifier(Modifier::BOLD)
    }
}
