//! Centralized palette and style functions for consistent UI styling.
//!
//! Colors are resolved at render time from the active theme so the user
//! can flip between light and dark without restarting.

use crate::prefs::Theme;
use ratatui::style::{Color, Modifier, Style};

/// The resolved color set for one theme.
pub struct Palette {
    /// Default foreground text
    pub text: Color,
    /// Screen background
    pub background: Color,
    /// Color for credits (money in)
    pub positive: Color,
    /// Color for debits (money out)
    pub negative: Color,
    /// Color for zero amounts
    pub zero: Color,
    /// Background for selected/highlighted rows
    pub selection_bg: Color,
    /// Table headers
    pub header: Color,
    /// Help text and secondary information
    pub help_text: Color,
    /// Screen titles and accent text
    pub title: Color,
    /// Loading/status messages
    pub loading: Color,
    /// Border for danger/warning popups
    pub border_danger: Color,
    /// Border for informational popups
    pub border_info: Color,
    /// Background for focused form fields
    pub form_field_bg: Color,
    /// Border for success notifications
    pub success: Color,
}

pub const DARK: Palette = Palette {
    text: Color::White,
    background: Color::Reset,
    positive: Color::Green,
    negative: Color::Red,
    zero: Color::DarkGray,
    selection_bg: Color::DarkGray,
    header: Color::Yellow,
    help_text: Color::Gray,
    title: Color::Cyan,
    loading: Color::Yellow,
    border_danger: Color::Red,
    border_info: Color::Blue,
    form_field_bg: Color::DarkGray,
    success: Color::Green,
};

pub const LIGHT: Palette = Palette {
    text: Color::Black,
    background: Color::White,
    positive: Color::Indexed(28),
    negative: Color::Indexed(124),
    zero: Color::Gray,
    selection_bg: Color::Indexed(153),
    header: Color::Indexed(130),
    help_text: Color::DarkGray,
    title: Color::Indexed(25),
    loading: Color::Indexed(130),
    border_danger: Color::Indexed(124),
    border_info: Color::Indexed(25),
    form_field_bg: Color::Indexed(252),
    success: Color::Indexed(28),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of the lookup input when visible
pub const LOOKUP_INPUT_HEIGHT: u16 = 3;

/// Height of summary cards on the dashboard
pub const SUMMARY_CARD_HEIGHT: u16 = 5;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style(p: &Palette) -> Style {
    Style::default()
        .bg(p.selection_bg)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style(p: &Palette) -> Style {
    Style::default().fg(p.header).add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style(p: &Palette) -> Style {
    Style::default().fg(p.help_text)
}

/// Style for screen titles
pub fn title_style(p: &Palette) -> Style {
    Style::default().fg(p.title).add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style(p: &Palette) -> Style {
    Style::default().fg(p.loading)
}

/// Style for form fields when focused
pub fn form_field_focused_style(p: &Palette) -> Style {
    Style::default()
        .bg(p.form_field_bg)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when not focused
pub fn form_field_style(p: &Palette) -> Style {
    Style::default().fg(p.text)
}

/// Style for danger/warning borders (confirmations)
pub fn danger_border_style(p: &Palette) -> Style {
    Style::default()
        .fg(p.border_danger)
        .add_modifier(Modifier::BOLD)
}

/// Style for info borders
pub fn info_border_style(p: &Palette) -> Style {
    Style::default()
        .fg(p.border_info)
        .add_modifier(Modifier::BOLD)
}

/// Get the appropriate color for a balance or signed amount.
pub fn amount_color(p: &Palette, amount: f64) -> Color {
    if amount > 0.0 {
        p.positive
    } else if amount < 0.0 {
        p.negative
    } else {
        p.zero
    }
}
