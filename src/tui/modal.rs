// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return
// actions. App just holds Option<Modal>, input routing acts on the
// returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Scroll up in content
    ScrollUp,
    /// Scroll down in content
    ScrollDown,
    /// Copy the modal content to the clipboard
    Copy,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Country detail overlay
    /// Stores the index of the country being viewed
    Details(usize),
}

impl Modal {
    /// Create a help modal
    pub fn help() -> Self {
        Modal::Help
    }

    /// Create a detail modal for the given country index
    pub fn details(country_index: usize) -> Self {
        Modal::Details(country_index)
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Details(_) => match key {
                KeyCode::Esc | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp,
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown,
                KeyCode::Char('y') => ModalAction::Copy,
                _ => ModalAction::None,
            },
        }
    }

    /// Get the country index if this is a Details modal
    pub fn country_index(&self) -> Option<usize> {
        match self {
            Modal::Details(idx) => Some(*idx),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_modal_closes_on_esc() {
        let mut modal = Modal::details(3);
        assert!(matches!(modal.handle_input(KeyCode::Esc), ModalAction::Close));
    }

    #[test]
    fn details_modal_reports_its_index() {
        assert_eq!(Modal::details(7).country_index(), Some(7));
        assert_eq!(Modal::help().country_index(), None);
    }

    #[test]
    fn help_modal_ignores_scroll_keys() {
        let mut modal = Modal::help();
        assert!(matches!(modal.handle_input(KeyCode::Up), ModalAction::None));
        assert!(matches!(
            modal.handle_input(KeyCode::Char('?')),
            ModalAction::Close
        ));
    }
}
