//! Event Handling - Keyboard input processing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::algorithms::AlgorithmKind;

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Start,
    Cancel,
    Randomize,
    NextAlgorithm,
    PrevAlgorithm,
    SelectAlgorithm(AlgorithmKind),
    None,
}

/// Map a key press to an action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.modifiers, key.code) {
        // Quit: q or Ctrl+C
        (KeyModifiers::NONE, KeyCode::Char('q')) => Action::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Action::Quit,

        // Run control
        (KeyModifiers::NONE, KeyCode::Char('s')) | (KeyModifiers::NONE, KeyCode::Enter) => {
            Action::Start
        }
        (KeyModifiers::NONE, KeyCode::Char('c')) | (_, KeyCode::Esc) => Action::Cancel,
        (KeyModifiers::NONE, KeyCode::Char('r')) => Action::Randomize,

        // Algorithm selection
        (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Right) => {
            Action::NextAlgorithm
        }
        (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Left) => Action::PrevAlgorithm,
        (KeyModifiers::NONE, KeyCode::Char(digit @ '1'..='9')) => digit
            .to_digit(10)
            .and_then(|d| AlgorithmKind::from_ordinal(d as usize))
            .map_or(Action::None, Action::SelectAlgorithm),

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Action {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_action() {
        assert_eq!(press(KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), Action::Quit);
    }

    #[test]
    fn test_run_control_keys() {
        assert_eq!(press(KeyCode::Char('s')), Action::Start);
        assert_eq!(press(KeyCode::Enter), Action::Start);
        assert_eq!(press(KeyCode::Char('c')), Action::Cancel);
        assert_eq!(press(KeyCode::Esc), Action::Cancel);
        assert_eq!(press(KeyCode::Char('r')), Action::Randomize);
    }

    #[test]
    fn test_algorithm_keys() {
        assert_eq!(press(KeyCode::Tab), Action::NextAlgorithm);
        assert_eq!(press(KeyCode::Left), Action::PrevAlgorithm);
        let back = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(back), Action::PrevAlgorithm);
        assert_eq!(
            press(KeyCode::Char('5')),
            Action::SelectAlgorithm(AlgorithmKind::QuickSort)
        );
        assert_eq!(press(KeyCode::Char('7')), Action::None);
    }
}
