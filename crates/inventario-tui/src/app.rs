//! Application core: event loop, tab management, action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use inventario_core::view::{self, StatisticsView};
use inventario_core::{Banners, ConnectionState, Controller, Modal, Statistics, Tab, UiState};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::form::{FormOutcome, ModalForm};
use crate::widgets::{banners, stats_header};

/// Top-level application state and event loop.
pub struct App {
    controller: Controller,
    /// Mirror of the controller's navigation state.
    ui: UiState,
    /// Tab panels in tab-bar order.
    screens: Vec<(Tab, Box<dyn Component>)>,
    stats: StatisticsView,
    banners: Banners,
    connection: ConnectionState,
    /// Form for the front modal, if one is open.
    form: Option<ModalForm>,
    running: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            ui: controller.ui_state(),
            controller,
            screens: create_screens(),
            stats: view::statistics_view(&Statistics::default()),
            banners: Banners::default(),
            connection: ConnectionState::default(),
            form: None,
            running: true,
            terminal_size: (80, 24),
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
        };
        app.focus_current_tab();
        app
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));

        {
            let controller = self.controller.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(controller, tx, cancel).await;
            });
        }
        {
            let controller = self.controller.clone();
            tokio::spawn(async move { controller.start().await });
        }

        let mut events = EventReader::new(Duration::from_millis(33));

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse) {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────

    /// Global keys are handled here. While a modal is open every key goes
    /// to its form; otherwise unhandled keys go to the active tab.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if let Some(form) = self.form.as_mut() {
            return Ok(match form.handle_key(key) {
                FormOutcome::Continue => None,
                FormOutcome::Submit(action) => Some(action),
                FormOutcome::Close => Some(Action::CloseModal(form.modal())),
            });
        }

        let tab = self.ui.current_tab;
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Char(c @ '1'..='9') => Ok(c
                .to_digit(10)
                .and_then(|n| u8::try_from(n).ok())
                .and_then(Tab::from_number)
                .map(Action::SwitchTab)),
            KeyCode::Tab => Ok(Some(Action::SwitchTab(tab.next()))),
            KeyCode::BackTab => Ok(Some(Action::SwitchTab(tab.prev()))),
            KeyCode::Char('n') => Ok(Some(Action::OpenModal(Modal::NewProduct))),
            KeyCode::Char('m') => Ok(Some(Action::OpenModal(Modal::NewMovement))),
            KeyCode::Char('r') => Ok(Some(Action::Reload)),
            KeyCode::Char('x') => Ok(Some(Action::DismissBanner)),
            _ => match self.active_screen_mut() {
                Some(screen) => screen.handle_key_event(key),
                None => Ok(None),
            },
        }
    }

    /// A press outside the open form's box closes that modal.
    fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<Action> {
        let form = self.form.as_ref()?;
        let (w, h) = self.terminal_size;
        let screen = Rect::new(0, 0, w, h);
        (!form.contains(screen, mouse.column, mouse.row))
            .then_some(Action::ClickOutside(form.modal()))
    }

    // ── Dispatch ─────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(w, h) => self.terminal_size = (*w, *h),
            Action::Render => {}

            Action::SwitchTab(tab) => self.controller.switch_tab(*tab),
            Action::OpenModal(modal) => {
                if self.form.as_ref().map(ModalForm::modal) != Some(*modal) {
                    self.form = Some(ModalForm::new(*modal));
                }
                self.controller.open_modal(*modal);
            }
            Action::NewMovementFor(product_id) => {
                self.form = Some(ModalForm::movement_for(*product_id));
                self.controller.open_modal(Modal::NewMovement);
            }
            Action::CloseModal(modal) => self.controller.close_modal(*modal),
            Action::ClickOutside(modal) => self.controller.click_outside(*modal),

            Action::Reload => {
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.start().await });
            }
            Action::SubmitProduct(draft) => {
                self.set_submitting(true);
                let controller = self.controller.clone();
                let tx = self.action_tx.clone();
                let draft = draft.clone();
                tokio::spawn(async move {
                    // Failures are already shown as banners by the controller.
                    let _ = controller.submit_product(&draft).await;
                    let _ = tx.send(Action::SubmitFinished(Modal::NewProduct));
                });
            }
            Action::SubmitMovement(draft) => {
                self.set_submitting(true);
                let controller = self.controller.clone();
                let tx = self.action_tx.clone();
                let draft = draft.clone();
                tokio::spawn(async move {
                    let _ = controller.submit_movement(&draft).await;
                    let _ = tx.send(Action::SubmitFinished(Modal::NewMovement));
                });
            }
            Action::SubmitFinished(modal) => {
                if let Some(form) = self.form.as_mut().filter(|f| f.modal() == *modal) {
                    form.set_submitting(false);
                }
            }

            Action::ProductsUpdated(_) | Action::MovementsUpdated(_) => {
                for (_, screen) in &mut self.screens {
                    screen.update(action)?;
                }
            }
            Action::StatisticsUpdated(stats) => self.stats = view::statistics_view(stats),
            Action::UiUpdated(ui) => self.sync_ui(ui.clone()),
            Action::BannersUpdated(banners) => self.banners = banners.clone(),
            Action::ConnectionChanged(state) => {
                debug!(?state, "connection state changed");
                self.connection = *state;
            }
            Action::DismissBanner => {
                if let Some(id) = self.banners.iter().next().map(|b| b.id) {
                    self.controller.dismiss_banner(id);
                }
            }
        }
        Ok(())
    }

    fn sync_ui(&mut self, ui: UiState) {
        match ui.front_modal() {
            None => self.form = None,
            Some(modal) if self.form.as_ref().map(ModalForm::modal) != Some(modal) => {
                self.form = Some(ModalForm::new(modal));
            }
            Some(_) => {}
        }
        self.ui = ui;
        self.focus_current_tab();
    }

    fn set_submitting(&mut self, submitting: bool) {
        if let Some(form) = self.form.as_mut() {
            form.set_submitting(submitting);
        }
    }

    fn focus_current_tab(&mut self) {
        let current = self.ui.current_tab;
        for (tab, screen) in &mut self.screens {
            let focused = *tab == current;
            if focused {
                debug!(screen = screen.id(), "focus");
            }
            screen.set_focused(focused);
        }
    }

    fn active_screen_mut(&mut self) -> Option<&mut Box<dyn Component>> {
        let current = self.ui.current_tab;
        self.screens
            .iter_mut()
            .find(|(tab, _)| *tab == current)
            .map(|(_, screen)| screen)
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(3),                              // statistics
            Constraint::Length(banners::height(&self.banners)), // banners
            Constraint::Min(1),                                 // tab content
            Constraint::Length(1),                              // tab bar
            Constraint::Length(1),                              // status bar
        ])
        .split(area);

        stats_header::render(frame, layout[0], &self.stats);
        banners::render(frame, layout[1], &self.banners);

        let current = self.ui.current_tab;
        if let Some((_, screen)) = self.screens.iter().find(|(tab, _)| *tab == current) {
            screen.render(frame, layout[2]);
        }

        self.render_tab_bar(frame, layout[3]);
        self.render_status_bar(frame, layout[4]);

        if let Some(ref form) = self.form {
            form.render(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|&tab| {
                let style = if tab == self.ui.current_tab {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", tab.number(), tab.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                Tab::ALL
                    .iter()
                    .position(|&t| t == self.ui.current_tab)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = match self.connection {
            ConnectionState::Online => {
                Span::styled("● conectado", Style::default().fg(theme::SUCCESS_GREEN))
            }
            ConnectionState::Offline => {
                Span::styled("○ sin conexión", Style::default().fg(theme::ERROR_RED))
            }
            ConnectionState::Unknown => Span::styled(
                "◐ comprobando",
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ),
        };

        let refreshed = self
            .controller
            .store()
            .last_refresh()
            .map(|at| format!(" │ actualizado {} UTC", at.format("%H:%M:%S")))
            .unwrap_or_default();

        let line = Line::from(vec![
            Span::raw(" "),
            connection_indicator,
            Span::styled(refreshed, theme::key_hint()),
            Span::styled(
                " │ n producto  m movimiento  r recargar  x descartar  q salir",
                theme::key_hint(),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, MouseButton, MouseEventKind};
    use inventario_core::ClientConfig;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(Controller::new(ClientConfig::default()).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Dispatch `action` and mirror the resulting controller state, as the
    /// data bridge would.
    fn dispatch(app: &mut App, action: &Action) {
        app.process_action(action).unwrap();
        let ui = app.controller.ui_state();
        app.process_action(&Action::UiUpdated(ui)).unwrap();
    }

    #[tokio::test]
    async fn number_keys_switch_tabs() {
        let mut app = app();
        let action = app.handle_key_event(press(KeyCode::Char('3'))).unwrap();
        assert!(matches!(action, Some(Action::SwitchTab(Tab::LowStock))));

        dispatch(&mut app, &action.unwrap());
        assert_eq!(app.ui.current_tab, Tab::LowStock);
        assert!(app.handle_key_event(press(KeyCode::Char('7'))).unwrap().is_none());
    }

    #[tokio::test]
    async fn modal_captures_keys_until_escape() {
        let mut app = app();
        dispatch(&mut app, &Action::OpenModal(Modal::NewProduct));
        assert!(app.form.is_some());

        // 'q' is typed into the form, not treated as quit
        assert!(app.handle_key_event(press(KeyCode::Char('q'))).unwrap().is_none());

        let close = app.handle_key_event(press(KeyCode::Esc)).unwrap().unwrap();
        assert!(matches!(close, Action::CloseModal(Modal::NewProduct)));
        dispatch(&mut app, &close);
        assert!(app.form.is_none());
        assert!(!app.controller.ui_state().is_open(Modal::NewProduct));
    }

    #[tokio::test]
    async fn click_outside_closes_the_modal() {
        let mut app = app();
        app.terminal_size = (120, 40);
        dispatch(&mut app, &Action::OpenModal(Modal::NewMovement));

        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        assert!(app.handle_mouse_event(click(60, 20)).is_none());
        let action = app.handle_mouse_event(click(0, 0)).unwrap();
        dispatch(&mut app, &action);
        assert!(app.form.is_none());
    }

    #[tokio::test]
    async fn row_shortcut_prefills_the_movement_form() {
        let mut app = app();
        dispatch(&mut app, &Action::NewMovementFor(9));

        let action = app.handle_key_event(press(KeyCode::Enter)).unwrap();
        let Some(Action::SubmitMovement(draft)) = action else {
            panic!("expected movement submit");
        };
        assert_eq!(draft.product_id, "9");
    }

    #[tokio::test]
    async fn dismiss_removes_the_newest_banner() {
        let mut app = app();
        app.controller.show_error("viejo");
        app.controller.show_error("nuevo");
        app.process_action(&Action::BannersUpdated(app.controller.banners()))
            .unwrap();

        app.process_action(&Action::DismissBanner).unwrap();
        let left: Vec<String> = app
            .controller
            .banners()
            .iter()
            .map(|b| b.message.clone())
            .collect();
        assert_eq!(left, vec!["viejo".to_owned()]);
    }
}
