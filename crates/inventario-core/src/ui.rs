// ── UI state ──
//
// Which tab is showing and which modals are open. Tabs and modals are
// closed enums: an unknown name fails when it is parsed, never later.

use strum::{Display, EnumIter, EnumString};

/// The tab panels, in tab-bar order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter,
)]
pub enum Tab {
    #[default]
    #[strum(serialize = "productos")]
    Products,
    #[strum(serialize = "movimientos")]
    Movements,
    #[strum(serialize = "stock-bajo")]
    LowStock,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::Products, Self::Movements, Self::LowStock];

    /// Numeric key (1-3) for this tab.
    pub fn number(self) -> u8 {
        match self {
            Self::Products => 1,
            Self::Movements => 2,
            Self::LowStock => 3,
        }
    }

    /// Tab from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Products),
            2 => Some(Self::Movements),
            3 => Some(Self::LowStock),
            _ => None,
        }
    }

    /// Next tab (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Products => Self::Movements,
            Self::Movements => Self::LowStock,
            Self::LowStock => Self::Products,
        }
    }

    /// Previous tab (wraps around).
    pub fn prev(self) -> Self {
        match self {
            Self::Products => Self::LowStock,
            Self::Movements => Self::Products,
            Self::LowStock => Self::Movements,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Productos",
            Self::Movements => "Movimientos",
            Self::LowStock => "Stock bajo",
        }
    }
}

/// The creation dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Modal {
    #[strum(serialize = "modal-nuevo-producto")]
    NewProduct,
    #[strum(serialize = "modal-nuevo-movimiento")]
    NewMovement,
}

impl Modal {
    pub fn title(self) -> &'static str {
        match self {
            Self::NewProduct => "Nuevo producto",
            Self::NewMovement => "Nuevo movimiento",
        }
    }
}

/// Navigation state owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub current_tab: Tab,
    /// Open modals, most recently opened last.
    open_modals: Vec<Modal>,
}

impl UiState {
    /// Show exactly `tab`. Returns `true` if the tab changed.
    pub fn switch_tab(&mut self, tab: Tab) -> bool {
        let changed = self.current_tab != tab;
        self.current_tab = tab;
        changed
    }

    /// Mark `modal` active, bringing it to the front if already open.
    pub fn open_modal(&mut self, modal: Modal) -> bool {
        let was_front = self.front_modal() == Some(modal);
        self.open_modals.retain(|m| *m != modal);
        self.open_modals.push(modal);
        !was_front
    }

    /// Mark `modal` inactive. Returns `true` if it was open.
    pub fn close_modal(&mut self, modal: Modal) -> bool {
        let before = self.open_modals.len();
        self.open_modals.retain(|m| *m != modal);
        before != self.open_modals.len()
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.open_modals.contains(&modal)
    }

    /// The modal drawn on top, if any.
    pub fn front_modal(&self) -> Option<Modal> {
        self.open_modals.last().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn tab_names_round_trip_through_strum() {
        for tab in Tab::iter() {
            assert_eq!(tab.to_string().parse::<Tab>().unwrap(), tab);
        }
        assert_eq!("stock-bajo".parse::<Tab>().unwrap(), Tab::LowStock);
    }

    #[test]
    fn unknown_tab_name_fails_at_parse_time() {
        assert!("proveedores".parse::<Tab>().is_err());
    }

    #[test]
    fn switch_tab_activates_exactly_one() {
        let mut ui = UiState::default();
        assert_eq!(ui.current_tab, Tab::Products);
        assert!(ui.switch_tab(Tab::Movements));
        assert_eq!(ui.current_tab, Tab::Movements);
        assert!(!ui.switch_tab(Tab::Movements));
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Tab::LowStock.next(), Tab::Products);
        assert_eq!(Tab::Products.prev(), Tab::LowStock);
        assert_eq!(Tab::from_number(2), Some(Tab::Movements));
        assert_eq!(Tab::from_number(4), None);
    }

    #[test]
    fn modals_toggle_independently() {
        let mut ui = UiState::default();
        ui.open_modal(Modal::NewProduct);
        ui.open_modal(Modal::NewMovement);
        assert_eq!(ui.front_modal(), Some(Modal::NewMovement));

        assert!(ui.close_modal(Modal::NewMovement));
        assert!(!ui.is_open(Modal::NewMovement));
        assert!(ui.is_open(Modal::NewProduct));
        assert!(!ui.close_modal(Modal::NewMovement));
    }
}
