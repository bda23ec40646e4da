//! Statistics strip: product count, low-stock count, inventory value.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use inventario_core::view::StatisticsView;

use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, stats: &StatisticsView) {
    let block = Block::default()
        .title(" Inventario ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());

    let label = Style::default().fg(theme::DIM_WHITE);
    let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(" Productos ", label),
        Span::styled(stats.total_products.clone(), value(theme::NEON_CYAN)),
        Span::styled("   Stock bajo ", label),
        Span::styled(stats.low_stock_products.clone(), value(theme::CORAL)),
        Span::styled("   Valor total ", label),
        Span::styled(stats.total_value.clone(), value(theme::SUCCESS_GREEN)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
