use ratatui::style::{Color, Modifier, Style};

use crate::core::schema::{AlertVariant, BadgeVariant};

/// Style bundle for rendering a component tree. A response's `theme` hint
/// selects one of the built-in bundles by name; embedders may also build
/// their own.
#[derive(Debug, Clone)]
pub struct Theme {
    pub heading_style: Style,
    pub body_style: Style,
    pub caption_style: Style,
    pub code_style: Style,

    pub button_style: Style,
    pub button_focused_style: Style,
    pub button_disabled_style: Style,

    pub input_label_style: Style,
    pub input_value_style: Style,
    pub input_error_style: Style,

    pub card_border_style: Style,
    pub card_title_style: Style,
    pub divider_style: Style,

    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    pub table_header_style: Style,
    pub table_cell_style: Style,

    pub chart_style: Style,

    pub alert_info_style: Style,
    pub alert_success_style: Style,
    pub alert_warning_style: Style,
    pub alert_error_style: Style,

    pub badge_neutral_style: Style,
    pub badge_success_style: Style,
    pub badge_warning_style: Style,
    pub badge_error_style: Style,

    /// Style for the unknown-component placeholder.
    pub placeholder_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            heading_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            body_style: Style::default().fg(Color::White),
            caption_style: Style::default().fg(Color::DarkGray),
            code_style: Style::default().fg(Color::LightGreen),

            button_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            button_focused_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            button_disabled_style: Style::default().fg(Color::DarkGray),

            input_label_style: Style::default().fg(Color::Gray),
            input_value_style: Style::default().fg(Color::White),
            input_error_style: Style::default().fg(Color::Red),

            card_border_style: Style::default().fg(Color::Gray),
            card_title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            divider_style: Style::default().fg(Color::DarkGray),

            tab_active_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive_style: Style::default().fg(Color::Gray),

            table_header_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            table_cell_style: Style::default().fg(Color::White),

            chart_style: Style::default().fg(Color::Cyan),

            alert_info_style: Style::default().fg(Color::Blue),
            alert_success_style: Style::default().fg(Color::Green),
            alert_warning_style: Style::default().fg(Color::Yellow),
            alert_error_style: Style::default().fg(Color::Red),

            badge_neutral_style: Style::default().fg(Color::Gray).add_modifier(Modifier::REVERSED),
            badge_success_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::REVERSED),
            badge_warning_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED),
            badge_error_style: Style::default().fg(Color::Red).add_modifier(Modifier::REVERSED),

            placeholder_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        }
    }

    pub fn light() -> Self {
        Theme {
            heading_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            body_style: Style::default().fg(Color::Black),
            caption_style: Style::default().fg(Color::Gray),
            code_style: Style::default().fg(Color::Green),

            button_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button_focused_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            button_disabled_style: Style::default().fg(Color::Gray),

            input_label_style: Style::default().fg(Color::DarkGray),
            input_value_style: Style::default().fg(Color::Black),
            input_error_style: Style::default().fg(Color::Red),

            card_border_style: Style::default().fg(Color::DarkGray),
            card_title_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            divider_style: Style::default().fg(Color::Gray),

            tab_active_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive_style: Style::default().fg(Color::DarkGray),

            table_header_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            table_cell_style: Style::default().fg(Color::Black),

            chart_style: Style::default().fg(Color::Blue),

            alert_info_style: Style::default().fg(Color::Blue),
            alert_success_style: Style::default().fg(Color::Green),
            alert_warning_style: Style::default().fg(Color::Yellow),
            alert_error_style: Style::default().fg(Color::Red),

            badge_neutral_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::REVERSED),
            badge_success_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::REVERSED),
            badge_warning_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED),
            badge_error_style: Style::default().fg(Color::Red).add_modifier(Modifier::REVERSED),

            placeholder_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        }
    }

    /// Resolves a theme hint by name. Unknown names fall back to the dark
    /// default.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark_default(),
        }
    }

    pub fn alert_style(&self, variant: AlertVariant) -> Style {
        match variant {
            AlertVariant::Info => self.alert_info_style,
            AlertVariant::Success => self.alert_success_style,
            AlertVariant::Warning => self.alert_warning_style,
            AlertVariant::Error => self.alert_error_style,
        }
    }

    pub fn badge_style(&self, variant: BadgeVariant) -> Style {
        match variant {
            BadgeVariant::Neutral => self.badge_neutral_style,
            BadgeVariant::Success => self.badge_success_style,
            BadgeVariant::Warning => self.badge_warning_style,
            BadgeVariant::Error => self.badge_error_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
