//! Persisted light/dark preference

use crate::core::storage::{self, SharedStore, THEME_KEY};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Presentation state shared by the whole session.
pub struct UiState {
    theme: ThemeMode,
    store: SharedStore,
}

impl UiState {
    /// Read the persisted theme, defaulting to light when absent or unknown.
    pub fn load(store: SharedStore) -> Self {
        let theme = match store.load(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|err: String| {
                warn!(error = %err, "ignoring stored theme");
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        };
        Self { theme, store }
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        storage::save_or_warn(self.store.as_ref(), THEME_KEY, theme.as_str());
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.set_theme(self.theme.toggled());
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn defaults_to_light_without_stored_value() {
        let ui = UiState::load(MemoryStore::shared());
        assert_eq!(ui.theme(), ThemeMode::Light);
    }

    #[test]
    fn toggle_persists_across_loads() {
        let backing = MemoryStore::shared();
        let mut ui = UiState::load(backing.clone());
        assert_eq!(ui.toggle_theme(), ThemeMode::Dark);
        assert_eq!(backing.load(THEME_KEY).as_deref(), Some("dark"));

        let reloaded = UiState::load(backing.clone());
        assert_eq!(reloaded.theme(), ThemeMode::Dark);

        let mut ui = reloaded;
        assert_eq!(ui.toggle_theme(), ThemeMode::Light);
        assert_eq!(backing.load(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn unknown_stored_theme_falls_back_to_light() {
        let backing = MemoryStore::shared();
        backing.save(THEME_KEY, "solarized").unwrap();
        assert_eq!(UiState::load(backing).theme(), ThemeMode::Light);
    }
}
