//! Notification banners, newest on top.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use inventario_core::Banners;

use crate::theme;

/// Banners drawn in full; the rest are summarised on one extra line.
pub const MAX_VISIBLE: usize = 3;

/// Banners stacked below the visible ones.
pub fn hidden(banners: &Banners) -> usize {
    banners.len().saturating_sub(MAX_VISIBLE)
}

/// Rows needed to draw `banners`.
#[allow(clippy::cast_possible_truncation)]
pub fn height(banners: &Banners) -> u16 {
    let overflow = usize::from(hidden(banners) > 0);
    (banners.len().min(MAX_VISIBLE) + overflow) as u16
}

pub fn render(frame: &mut Frame, area: Rect, banners: &Banners) {
    let mut lines: Vec<Line> = banners
        .iter()
        .take(MAX_VISIBLE)
        .map(|b| {
            Line::from(vec![
                Span::styled(format!(" {} ", b.level.prefix()), theme::banner_prefix(b.level)),
                Span::styled(b.message.clone(), theme::banner(b.level)),
            ])
        })
        .collect();

    let hidden = hidden(banners);
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!(" +{hidden} más (x descarta)"),
            theme::key_hint(),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
