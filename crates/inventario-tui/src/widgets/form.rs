//! Modal creation forms for products and movements.
//!
//! Field text is edited in place; validation happens in the core drafts
//! when the form is submitted, so a rejected form keeps its input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use inventario_core::view::Tone;
use inventario_core::{FieldKind, FieldSpec, Modal, MovementDraft, MovementKind, ProductDraft};

use crate::action::Action;
use crate::theme;

const OVERLAY_WIDTH: u16 = 56;
const LABEL_WIDTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormDraft {
    Product(ProductDraft),
    Movement(MovementDraft),
}

/// What the app should do after a key went to the form.
#[derive(Debug)]
pub enum FormOutcome {
    Continue,
    Submit(Action),
    Close,
}

#[derive(Debug, Clone)]
pub struct ModalForm {
    modal: Modal,
    draft: FormDraft,
    field_idx: usize,
    submitting: bool,
}

impl ModalForm {
    /// An empty form for `modal`.
    pub fn new(modal: Modal) -> Self {
        let draft = match modal {
            Modal::NewProduct => FormDraft::Product(ProductDraft::default()),
            Modal::NewMovement => FormDraft::Movement(MovementDraft::default()),
        };
        Self {
            modal,
            draft,
            field_idx: 0,
            submitting: false,
        }
    }

    /// A movement form with the product already filled in; focus starts
    /// on the quantity.
    pub fn movement_for(product_id: i64) -> Self {
        Self {
            modal: Modal::NewMovement,
            draft: FormDraft::Movement(MovementDraft::for_product(product_id)),
            field_idx: 2,
            submitting: false,
        }
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    fn fields(&self) -> &'static [FieldSpec] {
        match self.draft {
            FormDraft::Product(_) => &ProductDraft::FIELDS,
            FormDraft::Movement(_) => &MovementDraft::FIELDS,
        }
    }

    fn value(&self, idx: usize) -> String {
        match &self.draft {
            FormDraft::Product(d) => d.field(idx).unwrap_or_default().to_owned(),
            FormDraft::Movement(d) if idx == 1 => kind_label(d.kind).to_owned(),
            FormDraft::Movement(d) => d.field(idx).unwrap_or_default().to_owned(),
        }
    }

    fn value_mut(&mut self) -> Option<&mut String> {
        let idx = self.field_idx;
        match &mut self.draft {
            FormDraft::Product(d) => d.field_mut(idx),
            FormDraft::Movement(d) => d.field_mut(idx),
        }
    }

    fn focused_kind(&self) -> FieldKind {
        self.fields()[self.field_idx].kind
    }

    fn toggle_choice(&mut self) {
        if let FormDraft::Movement(d) = &mut self.draft {
            d.toggle_kind();
        }
    }

    fn submit_action(&self) -> Action {
        match &self.draft {
            FormDraft::Product(d) => Action::SubmitProduct(d.clone()),
            FormDraft::Movement(d) => Action::SubmitMovement(d.clone()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        let count = self.fields().len();
        match key.code {
            KeyCode::Esc => return FormOutcome::Close,
            KeyCode::Enter if !self.submitting => {
                return FormOutcome::Submit(self.submit_action());
            }
            KeyCode::Tab | KeyCode::Down => {
                self.field_idx = (self.field_idx + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field_idx = (self.field_idx + count - 1) % count;
            }
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                if self.focused_kind() == FieldKind::Choice =>
            {
                self.toggle_choice();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(value) = self.value_mut() {
                    value.push(ch);
                }
            }
            KeyCode::Backspace => {
                if let Some(value) = self.value_mut() {
                    value.pop();
                }
            }
            _ => {}
        }
        FormOutcome::Continue
    }

    /// Screen rectangle the form occupies inside `screen`. Clicks outside
    /// it close the modal.
    pub fn area(&self, screen: Rect) -> Rect {
        #[allow(clippy::cast_possible_truncation)]
        let rows = self.fields().len() as u16;
        let w = OVERLAY_WIDTH.min(screen.width.saturating_sub(4));
        let h = (rows + 5).min(screen.height.saturating_sub(2));
        let x = screen.x + screen.width.saturating_sub(w) / 2;
        let y = screen.y + screen.height.saturating_sub(h) / 2;
        Rect::new(x, y, w, h)
    }

    pub fn contains(&self, screen: Rect, column: u16, row: u16) -> bool {
        self.area(screen).contains(Position::new(column, row))
    }

    pub fn render(&self, frame: &mut Frame, screen: Rect) {
        let overlay_area = self.area(screen);
        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .title(format!(" {} ", self.modal.title()))
            .title_style(
                Style::default()
                    .fg(theme::ELECTRIC_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(theme::ELECTRIC_PURPLE));

        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let label = Style::default().fg(theme::DIM_WHITE);
        let value_style = Style::default().fg(theme::NEON_CYAN);
        let focused_label = Style::default()
            .fg(theme::ELECTRIC_YELLOW)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for (idx, spec) in self.fields().iter().enumerate() {
            let is_focused = idx == self.field_idx;
            let lbl_style = if is_focused { focused_label } else { label };
            let marker = if is_focused { "▸ " } else { "  " };
            let required = if spec.required { "*" } else { "" };
            let field_label = format!("{}{required}", spec.label);

            let val_style = match (&self.draft, spec.kind) {
                (FormDraft::Movement(d), FieldKind::Choice) => theme::tone(match d.kind {
                    MovementKind::Entry => Tone::Success,
                    MovementKind::Exit => Tone::Warning,
                }),
                _ => value_style,
            };
            let cursor = if is_focused && spec.kind != FieldKind::Choice {
                "▎"
            } else {
                ""
            };

            lines.push(Line::from(vec![
                Span::styled(marker, lbl_style),
                Span::styled(format!("{field_label:<LABEL_WIDTH$}"), lbl_style),
                Span::styled(self.value(idx), val_style),
                Span::styled(cursor, Style::default().fg(theme::ELECTRIC_YELLOW)),
            ]));
        }

        lines.push(Line::from(""));
        let enter = if self.submitting {
            " enviando…  "
        } else {
            " guardar  "
        };
        lines.push(Line::from(vec![
            Span::styled(" Tab", theme::key_hint_key()),
            Span::styled(" siguiente  ", theme::key_hint()),
            Span::styled("Espacio", theme::key_hint_key()),
            Span::styled(" tipo  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(enter, theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" cancelar", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn kind_label(kind: MovementKind) -> &'static str {
    match kind {
        MovementKind::Entry => "Entrada",
        MovementKind::Exit => "Salida",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use pretty_assertions::assert_eq;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(form: &mut ModalForm, text: &str) {
        for ch in text.chars() {
            form.handle_key(press(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut form = ModalForm::new(Modal::NewProduct);
        type_text(&mut form, "TIN-001");
        form.handle_key(press(KeyCode::Tab));
        type_text(&mut form, "Tinta negrx");
        form.handle_key(press(KeyCode::Backspace));
        type_text(&mut form, "a");

        let FormOutcome::Submit(Action::SubmitProduct(draft)) =
            form.handle_key(press(KeyCode::Enter))
        else {
            panic!("expected product submit");
        };
        assert_eq!(draft.code, "TIN-001");
        assert_eq!(draft.name, "Tinta negra");
    }

    #[test]
    fn movement_form_toggles_kind_and_starts_on_quantity() {
        let mut form = ModalForm::movement_for(3);
        type_text(&mut form, "4");
        form.handle_key(press(KeyCode::BackTab));
        form.handle_key(press(KeyCode::Char(' ')));

        let FormOutcome::Submit(Action::SubmitMovement(draft)) =
            form.handle_key(press(KeyCode::Enter))
        else {
            panic!("expected movement submit");
        };
        assert_eq!(draft.product_id, "3");
        assert_eq!(draft.quantity, "4");
        assert_eq!(draft.kind, MovementKind::Exit);
    }

    #[test]
    fn enter_is_ignored_while_submitting() {
        let mut form = ModalForm::new(Modal::NewMovement);
        form.set_submitting(true);
        assert!(matches!(
            form.handle_key(press(KeyCode::Enter)),
            FormOutcome::Continue
        ));
        assert!(matches!(form.handle_key(press(KeyCode::Esc)), FormOutcome::Close));
    }

    #[test]
    fn clicks_are_tested_against_the_centred_box() {
        let form = ModalForm::new(Modal::NewProduct);
        let screen = Rect::new(0, 0, 100, 40);
        let area = form.area(screen);

        assert!(form.contains(screen, area.x + 1, area.y + 1));
        assert!(!form.contains(screen, 0, 0));
    }
}
