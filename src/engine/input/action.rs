// Input action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Everything the player can ask the character to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Held: run while pressed
    Run,
    Attack,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Run, Action::Attack, Action::Jump];

    pub fn label(&self) -> &'static str {
        match self {
            Action::Run => "run",
            Action::Attack => "attack",
            Action::Jump => "jump",
        }
    }
}

/// A press or release of a bound action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::Run),
        (KeyCode::ArrowRight, Action::Run),
        (KeyCode::KeyA, Action::Attack),
        (KeyCode::Space, Action::Jump),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_both_arrows_run() {
        let bindings = default_bindings();
        let run_keys: Vec<_> = bindings
            .iter()
            .filter(|(_, action)| *action == Action::Run)
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(run_keys, vec![KeyCode::ArrowLeft, KeyCode::ArrowRight]);
    }

    #[test]
    fn test_every_action_has_a_default_key() {
        let bindings = default_bindings();
        for action in Action::ALL {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "{} has no default key",
                action.label()
            );
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut seen = HashSet::new();
        for (key, _) in default_bindings() {
            assert!(seen.insert(key), "Duplicate key {:?} in default bindings", key);
        }
    }
}
