// Key binding configuration and remapping

use super::action::{default_bindings, Action};
use crate::config::InputBindingsConfig;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps keys to actions. Several keys may share one action.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<KeyCode, Action>,

    /// Reverse mapping for quick lookups (action -> all keys)
    action_to_keys: HashMap<Action, Vec<KeyCode>>,
}

impl InputConfig {
    /// An empty configuration with nothing bound
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::empty();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Default bindings with the `[input]` overrides applied.
    ///
    /// An action listed in the config loses its default keys.
    pub fn from_config(config: &InputBindingsConfig) -> Self {
        let mut input = Self::default();
        let overrides = [
            (Action::Run, &config.run),
            (Action::Attack, &config.attack),
            (Action::Jump, &config.jump),
        ];
        for (action, keys) in overrides {
            if let Some(keys) = keys {
                input.unbind_action(action);
                for key in keys {
                    input.bind(*key, action);
                }
            }
        }
        input
    }

    /// Bind a key to an action, replacing whatever it was bound to
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.unbind_key(key);
        self.bindings.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.action_to_keys.get_mut(&action) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.action_to_keys.remove(&action);
                }
            }
        }
    }

    /// Remove every key bound to an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(keys) = self.action_to_keys.remove(&action) {
            for key in keys {
                self.bindings.remove(&key);
            }
        }
    }

    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InputConfig::default();
        assert_eq!(config.get_action(KeyCode::ArrowLeft), Some(Action::Run));
        assert_eq!(config.get_action(KeyCode::ArrowRight), Some(Action::Run));
        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::Attack));
        assert_eq!(config.get_action(KeyCode::Space), Some(Action::Jump));
        assert_eq!(config.get_action(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut config = InputConfig::default();
        config.bind(KeyCode::KeyA, Action::Jump);

        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::Jump));
        assert_eq!(config.get_action(KeyCode::Space), Some(Action::Jump));
        assert!(!config.action_to_keys.contains_key(&Action::Attack));
    }

    #[test]
    fn test_unbind_key_keeps_other_keys() {
        let mut config = InputConfig::default();
        config.unbind_key(KeyCode::ArrowLeft);

        assert_eq!(config.get_action(KeyCode::ArrowLeft), None);
        assert_eq!(config.get_action(KeyCode::ArrowRight), Some(Action::Run));
        assert_eq!(config.action_to_keys[&Action::Run], vec![KeyCode::ArrowRight]);
    }

    #[test]
    fn test_unbind_action() {
        let mut config = InputConfig::default();
        config.unbind_action(Action::Run);

        assert_eq!(config.get_action(KeyCode::ArrowLeft), None);
        assert_eq!(config.get_action(KeyCode::ArrowRight), None);
        assert!(!config.action_to_keys.contains_key(&Action::Run));
    }

    #[test]
    fn test_config_overrides_replace_default_keys() {
        let overrides = InputBindingsConfig {
            run: Some(vec![KeyCode::KeyD]),
            attack: None,
            jump: Some(vec![KeyCode::KeyW, KeyCode::ArrowUp]),
        };
        let config = InputConfig::from_config(&overrides);

        assert_eq!(config.get_action(KeyCode::KeyD), Some(Action::Run));
        assert_eq!(config.get_action(KeyCode::ArrowLeft), None);
        assert_eq!(config.get_action(KeyCode::ArrowRight), None);
        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::Attack));
        assert_eq!(config.get_action(KeyCode::ArrowUp), Some(Action::Jump));
        assert_eq!(config.get_action(KeyCode::Space), None);
    }

    #[test]
    fn test_empty_override_unbinds_action() {
        let overrides = InputBindingsConfig {
            attack: Some(Vec::new()),
            ..Default::default()
        };
        let config = InputConfig::from_config(&overrides);
        assert_eq!(config.get_action(KeyCode::KeyA), None);
        assert_eq!(config.get_action(KeyCode::Space), Some(Action::Jump));
    }

    #[test]
    fn test_no_overrides_is_default() {
        let config = InputConfig::from_config(&InputBindingsConfig::default());
        assert_eq!(config.get_action(KeyCode::ArrowLeft), Some(Action::Run));
        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::Attack));
    }
}
