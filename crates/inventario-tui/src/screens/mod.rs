//! Tab panels. One component per [`Tab`].

pub mod movements;
pub mod products;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use inventario_core::Tab;

use crate::component::Component;
use crate::theme;

/// Build every tab panel, in tab-bar order.
pub fn create_screens() -> Vec<(Tab, Box<dyn Component>)> {
    Tab::ALL
        .into_iter()
        .map(|tab| {
            let screen: Box<dyn Component> = match tab {
                Tab::Products => Box::new(products::ProductsScreen::all()),
                Tab::LowStock => Box::new(products::ProductsScreen::low_stock()),
                Tab::Movements => Box::new(movements::MovementsScreen::new()),
            };
            (tab, screen)
        })
        .collect()
}

/// Header row with one styled cell per column title.
pub(crate) fn header_row(columns: &[&str]) -> Row<'static> {
    Row::new(
        columns
            .iter()
            .map(|c| Cell::from((*c).to_owned()).style(theme::table_header()))
            .collect::<Vec<_>>(),
    )
}

/// Draw an empty-table message centred under the header line.
pub(crate) fn render_placeholder(
    frame: &mut Frame,
    area: Rect,
    header: Row<'static>,
    widths: &[Constraint],
    message: &str,
) {
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);
    let table = Table::new(Vec::<Row>::new(), widths.to_vec()).header(header);
    frame.render_widget(table, layout[0]);
    frame.render_widget(
        Paragraph::new(message.to_owned())
            .style(theme::placeholder())
            .centered(),
        layout[1],
    );
}
