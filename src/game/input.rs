use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::config::KeyBindings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Rematch,
    Pause,
    ToggleHud,
    PaddleLeft,
    PaddleRight,
}

/// Poll for input events and return actions.
/// Each Press event generates an immediate action - no state tracking needed.
pub fn poll_input(bindings: &KeyBindings) -> Result<Vec<InputAction>, std::io::Error> {
    let mut actions = Vec::new();

    // Process all pending Press events
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(action) = action_for_key(bindings, key.code, key.modifiers) {
                    actions.push(action);
                }
            }
        }
    }

    Ok(actions)
}

/// Map a key to its bound action. Esc and Ctrl+C always quit.
pub fn action_for_key(
    bindings: &KeyBindings,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Option<InputAction> {
    if code == KeyCode::Esc
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
    {
        return Some(InputAction::Quit);
    }

    let table = [
        (&bindings.quit, InputAction::Quit),
        (&bindings.rematch, InputAction::Rematch),
        (&bindings.pause, InputAction::Pause),
        (&bindings.toggle_hud, InputAction::ToggleHud),
        (&bindings.paddle_left, InputAction::PaddleLeft),
        (&bindings.paddle_right, InputAction::PaddleRight),
    ];

    table
        .into_iter()
        .find(|(binding, _)| key_matches(binding, code))
        .map(|(_, action)| action)
}

/// Compare a key against a binding name like "Left", "Enter" or "W" (case-insensitive)
pub fn key_matches(binding: &str, code: KeyCode) -> bool {
    let binding = binding.trim();
    match code {
        KeyCode::Left => binding.eq_ignore_ascii_case("left"),
        KeyCode::Right => binding.eq_ignore_ascii_case("right"),
        KeyCode::Up => binding.eq_ignore_ascii_case("up"),
        KeyCode::Down => binding.eq_ignore_ascii_case("down"),
        KeyCode::Enter => binding.eq_ignore_ascii_case("enter"),
        KeyCode::Esc => binding.eq_ignore_ascii_case("esc"),
        KeyCode::Char(' ') => binding.eq_ignore_ascii_case("space"),
        KeyCode::Char(c) => {
            let mut chars = binding.chars();
            match (chars.next(), chars.next()) {
                (Some(b), None) => b.to_lowercase().eq(c.to_lowercase()),
                _ => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        let none = KeyModifiers::NONE;

        assert_eq!(
            action_for_key(&bindings, KeyCode::Left, none),
            Some(InputAction::PaddleLeft)
        );
        assert_eq!(
            action_for_key(&bindings, KeyCode::Right, none),
            Some(InputAction::PaddleRight)
        );
        assert_eq!(
            action_for_key(&bindings, KeyCode::Char('q'), none),
            Some(InputAction::Quit)
        );
        assert_eq!(
            action_for_key(&bindings, KeyCode::Char('R'), none),
            Some(InputAction::Rematch)
        );
        assert_eq!(
            action_for_key(&bindings, KeyCode::Char('f'), none),
            Some(InputAction::ToggleHud)
        );
        assert_eq!(action_for_key(&bindings, KeyCode::Char('x'), none), None);
    }

    #[test]
    fn test_escape_hatches_always_quit() {
        let bindings = KeyBindings {
            quit: "X".to_string(),
            ..KeyBindings::default()
        };

        assert_eq!(
            action_for_key(&bindings, KeyCode::Esc, KeyModifiers::NONE),
            Some(InputAction::Quit)
        );
        assert_eq!(
            action_for_key(&bindings, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(InputAction::Quit)
        );
        assert_eq!(
            action_for_key(&bindings, KeyCode::Char('x'), KeyModifiers::NONE),
            Some(InputAction::Quit)
        );
    }

    #[test]
    fn test_key_matches_names() {
        assert!(key_matches("a", KeyCode::Char('A')));
        assert!(key_matches(" Space ", KeyCode::Char(' ')));
        assert!(key_matches("ENTER", KeyCode::Enter));
        assert!(!key_matches("Left", KeyCode::Char('l')));
        assert!(!key_matches("", KeyCode::Char('a')));
    }
}
