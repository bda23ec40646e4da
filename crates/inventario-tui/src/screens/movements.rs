//! Movements screen: the most recent stock movements, newest first as
//! delivered by the backend.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use inventario_core::view::{self, MOVEMENT_COLUMNS, MovementRow, TableBody};
use inventario_core::{Movement, Product};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{header_row, render_placeholder};
use crate::theme;

const WIDTHS: [Constraint; 6] = [
    Constraint::Length(22), // fecha
    Constraint::Min(16),    // producto
    Constraint::Length(9),  // tipo
    Constraint::Length(9),  // cantidad
    Constraint::Min(12),    // motivo
    Constraint::Length(12), // usuario
];

pub struct MovementsScreen {
    focused: bool,
    movements: Arc<Vec<Movement>>,
    /// Needed to resolve product names in the table.
    products: Arc<Vec<Product>>,
    body: TableBody<MovementRow>,
    table_state: TableState,
}

impl MovementsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            movements: Arc::new(Vec::new()),
            products: Arc::new(Vec::new()),
            body: view::movements_view(&[], &[]),
            table_state: TableState::default(),
        }
    }

    fn rebuild(&mut self) {
        self.body = view::movements_view(&self.movements, &self.products);
        let len = self.body.row_count();
        match self.body {
            TableBody::Rows(_) => {
                let idx = self.table_state.selected().unwrap_or(0).min(len - 1);
                self.table_state.select(Some(idx));
            }
            TableBody::Placeholder { .. } => self.table_state.select(None),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let TableBody::Rows(ref rows) = self.body else {
            return;
        };
        let len = rows.len();
        #[allow(clippy::cast_possible_wrap)]
        let current = self.table_state.selected().unwrap_or(0) as isize;
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));
    }

    fn select_edge(&mut self, last: bool) {
        if let TableBody::Rows(ref rows) = self.body {
            let idx = if last { rows.len() - 1 } else { 0 };
            self.table_state.select(Some(idx));
        }
    }
}

impl Component for MovementsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.select_edge(false),
            KeyCode::Char('G') => self.select_edge(true),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::MovementsUpdated(movements) => {
                self.movements = Arc::clone(movements);
                self.rebuild();
            }
            Action::ProductsUpdated(products) => {
                self.products = Arc::clone(products);
                self.rebuild();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let shown = match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder { .. } => 0,
        };
        let title = if self.movements.len() > shown {
            format!(" Movimientos ({shown} de {}) ", self.movements.len())
        } else {
            format!(" Movimientos ({shown}) ")
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        let header = header_row(&MOVEMENT_COLUMNS);

        match &self.body {
            TableBody::Placeholder { message, .. } => {
                render_placeholder(frame, layout[0], header, &WIDTHS, message);
            }
            TableBody::Rows(rows) => {
                let rows: Vec<Row> = rows
                    .iter()
                    .map(|m| {
                        Row::new(vec![
                            Cell::from(m.date.clone()).style(Style::default().fg(theme::BORDER_GRAY)),
                            Cell::from(m.product.clone())
                                .style(Style::default().fg(theme::NEON_CYAN)),
                            Cell::from(m.kind.text.clone()).style(theme::tone(m.kind.tone)),
                            Cell::from(m.quantity.clone()),
                            Cell::from(m.reason.clone()),
                            Cell::from(m.user.clone()),
                        ])
                        .style(theme::table_row())
                    })
                    .collect();

                let table = Table::new(rows, WIDTHS)
                    .header(header)
                    .row_highlight_style(theme::table_selected());

                let mut state = self.table_state;
                frame.render_stateful_widget(table, layout[0], &mut state);
            }
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("mover  ", theme::key_hint()),
            Span::styled("m ", theme::key_hint_key()),
            Span::styled("nuevo movimiento", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Movements"
    }
}
