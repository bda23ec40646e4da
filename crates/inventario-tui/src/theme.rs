//! Neon palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use inventario_core::BannerLevel;
use inventario_core::view::{StockLevel, Tone};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Empty-table placeholder text.
pub fn placeholder() -> Style {
    Style::default()
        .fg(BORDER_GRAY)
        .add_modifier(Modifier::ITALIC)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q salir").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

// ── Domain Styles ─────────────────────────────────────────────────────

/// Badge colour for a status or movement-type cell.
pub fn tone(tone: Tone) -> Style {
    let fg = match tone {
        Tone::Success => SUCCESS_GREEN,
        Tone::Warning => ELECTRIC_YELLOW,
        Tone::Danger => ERROR_RED,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Stock cell: low stock is flagged in coral.
pub fn stock_level(level: StockLevel) -> Style {
    match level {
        StockLevel::Low => Style::default().fg(CORAL).add_modifier(Modifier::BOLD),
        StockLevel::Ok => table_row(),
    }
}

pub fn banner(level: BannerLevel) -> Style {
    match level {
        BannerLevel::Error => Style::default().fg(ERROR_RED),
        BannerLevel::Success => Style::default().fg(SUCCESS_GREEN),
    }
}

pub fn banner_prefix(level: BannerLevel) -> Style {
    banner(level).add_modifier(Modifier::BOLD)
}
