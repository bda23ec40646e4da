//! Component trait, implemented by every tab panel.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Lifecycle: (`handle_key_event` | `update` | `render`)*
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    fn set_focused(&mut self, _focused: bool) {}

    /// Identifier used in logs.
    fn id(&self) -> &'static str;
}
