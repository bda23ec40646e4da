//! Products screen: the product table, either complete or filtered to
//! items at or below their minimum stock.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use inventario_core::Product;
use inventario_core::view::{self, PRODUCT_COLUMNS, ProductRow, TableBody};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{header_row, render_placeholder};
use crate::theme;

const WIDTHS: [Constraint; 8] = [
    Constraint::Length(10), // código
    Constraint::Min(16),    // nombre
    Constraint::Length(12), // categoría
    Constraint::Length(12), // stock
    Constraint::Length(8),  // mínimo
    Constraint::Length(10), // precio
    Constraint::Length(12), // ubicación
    Constraint::Length(9),  // estado
];

pub struct ProductsScreen {
    focused: bool,
    low_stock_only: bool,
    products: Arc<Vec<Product>>,
    body: TableBody<ProductRow>,
    table_state: TableState,
}

impl ProductsScreen {
    /// Every product.
    pub fn all() -> Self {
        Self::new(false)
    }

    /// Only products at or below their minimum stock.
    pub fn low_stock() -> Self {
        Self::new(true)
    }

    fn new(low_stock_only: bool) -> Self {
        let products = Arc::new(Vec::new());
        let body = Self::build_body(low_stock_only, &products);
        Self {
            focused: false,
            low_stock_only,
            products,
            body,
            table_state: TableState::default(),
        }
    }

    fn build_body(low_stock_only: bool, products: &[Product]) -> TableBody<ProductRow> {
        if low_stock_only {
            view::low_stock_view(products)
        } else {
            view::products_view(products)
        }
    }

    fn rows(&self) -> &[ProductRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder { .. } => &[],
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.rows().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(len - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.select(next);
    }

    fn selected_row(&self) -> Option<&ProductRow> {
        self.table_state
            .selected()
            .and_then(|idx| self.rows().get(idx))
    }

    fn title(&self) -> String {
        let count = self.rows().len();
        if self.low_stock_only {
            format!(" Stock bajo ({count}) ")
        } else {
            format!(" Productos ({count}) ")
        }
    }
}

impl Component for ProductsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                self.select(usize::MAX);
                Ok(None)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                Ok(None)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                Ok(None)
            }
            KeyCode::Enter => Ok(self.selected_row().map(|row| Action::NewMovementFor(row.id))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ProductsUpdated(products) = action {
            self.products = Arc::clone(products);
            self.body = Self::build_body(self.low_stock_only, &self.products);
            let len = self.rows().len();
            match self.table_state.selected() {
                None if len > 0 => self.select(0),
                Some(idx) => self.select(idx),
                None => {}
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.title())
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

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let header = header_row(&PRODUCT_COLUMNS);

        match &self.body {
            TableBody::Placeholder { message, .. } => {
                render_placeholder(frame, layout[0], header, &WIDTHS, message);
            }
            TableBody::Rows(rows) => {
                let rows: Vec<Row> = rows
                    .iter()
                    .map(|p| {
                        Row::new(vec![
                            Cell::from(p.code.clone())
                                .style(Style::default().fg(theme::NEON_CYAN)),
                            Cell::from(p.name.clone()).style(
                                Style::default()
                                    .fg(theme::DIM_WHITE)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Cell::from(p.category.clone()),
                            Cell::from(p.stock.clone()).style(theme::stock_level(p.stock_level)),
                            Cell::from(p.min_stock.clone()),
                            Cell::from(p.price.clone()).style(Style::default().fg(theme::CORAL)),
                            Cell::from(p.location.clone()),
                            Cell::from(p.status.text.clone()).style(theme::tone(p.status.tone)),
                        ])
                        .style(theme::table_row())
                    })
                    .collect();

                let table = Table::new(rows, WIDTHS)
                    .header(header)
                    .row_highlight_style(theme::table_selected())
                    .highlight_symbol("▸");

                let mut state = self.table_state;
                frame.render_stateful_widget(table, layout[0], &mut state);
            }
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("mover  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("movimiento  ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("nuevo producto", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        if self.low_stock_only {
            "LowStock"
        } else {
            "Products"
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use pretty_assertions::assert_eq;

    fn product(id: i64, stock: f64, min: f64) -> Product {
        Product {
            id,
            code: format!("P-{id}"),
            name: format!("Producto {id}"),
            category: None,
            stock,
            min_stock: min,
            unit: None,
            unit_price: None,
            location: None,
            notes: None,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn loaded(mut screen: ProductsScreen, products: Vec<Product>) -> ProductsScreen {
        screen
            .update(&Action::ProductsUpdated(Arc::new(products)))
            .unwrap();
        screen
    }

    #[test]
    fn low_stock_screen_filters_rows() {
        let screen = loaded(
            ProductsScreen::low_stock(),
            vec![product(1, 10.0, 2.0), product(2, 2.0, 2.0)],
        );
        let ids: Vec<i64> = screen.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn enter_opens_movement_for_selected_product() {
        let mut screen = loaded(
            ProductsScreen::all(),
            vec![product(1, 5.0, 1.0), product(7, 5.0, 1.0)],
        );
        screen.handle_key_event(press(KeyCode::Down)).unwrap();

        let action = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::NewMovementFor(7))));
    }

    #[test]
    fn empty_table_has_no_selection() {
        let mut screen = loaded(ProductsScreen::all(), Vec::new());
        assert!(matches!(screen.body, TableBody::Placeholder { .. }));
        assert!(screen.handle_key_event(press(KeyCode::Enter)).unwrap().is_none());
    }

    #[test]
    fn selection_is_clamped_when_rows_shrink() {
        let mut screen = loaded(
            ProductsScreen::all(),
            vec![product(1, 5.0, 1.0), product(2, 5.0, 1.0), product(3, 5.0, 1.0)],
        );
        screen.handle_key_event(press(KeyCode::Char('G'))).unwrap();
        assert_eq!(screen.selected_index(), 2);

        let screen = loaded(screen, vec![product(1, 5.0, 1.0)]);
        assert_eq!(screen.selected_index(), 0);
    }
}
