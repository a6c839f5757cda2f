//! Keyboard mapping
//!
//! Raw `KeyboardEvent.code` strings map to a small set of game actions; the
//! session decides what each action means in the current phase.

/// A game-relevant key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    Shoot,
    Pause,
    /// Start from the menu / restart after game over
    Confirm,
}

/// Map a `KeyboardEvent.code` to an action
pub fn key_action(code: &str) -> Option<KeyAction> {
    match code {
        "ArrowLeft" => Some(KeyAction::MoveLeft),
        "ArrowRight" => Some(KeyAction::MoveRight),
        "Space" => Some(KeyAction::Shoot),
        "KeyP" => Some(KeyAction::Pause),
        "Enter" => Some(KeyAction::Confirm),
        _ => None,
    }
}
