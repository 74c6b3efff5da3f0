use serde::{Deserialize, Serialize};

use crate::core::RecordKey;

/// Two-state hover machine: nothing hovered, or exactly one cell hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(RecordKey),
}

impl HoverState {
    #[must_use]
    pub fn hovered(self) -> Option<RecordKey> {
        match self {
            Self::Idle => None,
            Self::Hovering(key) => Some(key),
        }
    }
}

/// Observable effect of one pointer event on the hover machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTransition {
    Unchanged,
    Entered(RecordKey),
    Left(RecordKey),
    /// Pointer moved straight from one cell into another.
    Switched { from: RecordKey, to: RecordKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    hover: HoverState,
    cursor: Option<(f64, f64)>,
}

impl InteractionState {
    #[must_use]
    pub fn hover(self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn hovered(self) -> Option<RecordKey> {
        self.hover.hovered()
    }

    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    pub fn on_cell_enter(&mut self, key: RecordKey) -> HoverTransition {
        let transition = match self.hover {
            HoverState::Hovering(current) if current == key => HoverTransition::Unchanged,
            HoverState::Hovering(current) => HoverTransition::Switched {
                from: current,
                to: key,
            },
            HoverState::Idle => HoverTransition::Entered(key),
        };
        self.hover = HoverState::Hovering(key);
        transition
    }

    pub fn on_cell_leave(&mut self) -> HoverTransition {
        match std::mem::take(&mut self.hover) {
            HoverState::Idle => HoverTransition::Unchanged,
            HoverState::Hovering(key) => HoverTransition::Left(key),
        }
    }

    /// Records the pointer position and resolves the cell under it.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, hit: Option<RecordKey>) -> HoverTransition {
        self.cursor = Some((x, y));
        match hit {
            Some(key) => self.on_cell_enter(key),
            None => self.on_cell_leave(),
        }
    }

    pub fn on_pointer_leave(&mut self) -> HoverTransition {
        self.cursor = None;
        self.on_cell_leave()
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverState, HoverTransition, InteractionState};
    use crate::core::RecordKey;

    #[test]
    fn enter_then_leave_returns_to_idle() {
        let mut state = InteractionState::default();
        let key = RecordKey::new(1900, 1);
        assert_eq!(state.on_cell_enter(key), HoverTransition::Entered(key));
        assert_eq!(state.hover(), HoverState::Hovering(key));
        assert_eq!(state.on_cell_leave(), HoverTransition::Left(key));
        assert_eq!(state, InteractionState::default());
    }

    #[test]
    fn reentering_same_cell_is_a_no_op() {
        let mut state = InteractionState::default();
        let key = RecordKey::new(1900, 1);
        state.on_cell_enter(key);
        assert_eq!(state.on_cell_enter(key), HoverTransition::Unchanged);
    }

    #[test]
    fn moving_between_cells_switches_directly() {
        let mut state = InteractionState::default();
        let from = RecordKey::new(1900, 1);
        let to = RecordKey::new(1900, 2);
        state.on_cell_enter(from);
        assert_eq!(
            state.on_pointer_move(5.0, 5.0, Some(to)),
            HoverTransition::Switched { from, to }
        );
        assert_eq!(state.hovered(), Some(to));
    }

    #[test]
    fn leaving_while_idle_is_unchanged() {
        let mut state = InteractionState::default();
        assert_eq!(state.on_pointer_leave(), HoverTransition::Unchanged);
    }
}
