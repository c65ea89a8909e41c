//! `codeface theme`: show or change the saved theme

use crate::cli::ThemeAction;
use crate::core::theme::{ThemeMode, UiState};

pub fn run_theme(ui: UiState, action: Option<ThemeAction>) {
    let (theme, changed) = apply_theme_action(ui, action);
    if changed {
        println!("✅ Theme set to: {theme}");
    } else {
        println!("Theme: {theme}");
    }
}

/// Returns the resulting theme and whether anything was written.
pub fn apply_theme_action(mut ui: UiState, action: Option<ThemeAction>) -> (ThemeMode, bool) {
    match action {
        None => (ui.theme(), false),
        Some(ThemeAction::Toggle) => (ui.toggle_theme(), true),
        Some(ThemeAction::Light) => {
            ui.set_theme(ThemeMode::Light);
            (ThemeMode::Light, true)
        }
        Some(ThemeAction::Dark) => {
            ui.set_theme(ThemeMode::Dark);
            (ThemeMode::Dark, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{KeyValueStore, MemoryStore, THEME_KEY};

    #[test]
    fn actions_persist_theme() {
        let store = MemoryStore::shared();

        let (theme, changed) = apply_theme_action(UiState::load(store.clone()), None);
        assert_eq!((theme, changed), (ThemeMode::Light, false));
        assert_eq!(store.load(THEME_KEY), None);

        let (theme, _) = apply_theme_action(UiState::load(store.clone()), Some(ThemeAction::Toggle));
        assert_eq!(theme, ThemeMode::Dark);
        assert_eq!(store.load(THEME_KEY).as_deref(), Some("dark"));

        let (theme, _) = apply_theme_action(UiState::load(store.clone()), Some(ThemeAction::Light));
        assert_eq!(theme, ThemeMode::Light);
        assert_eq!(UiState::load(store).theme(), ThemeMode::Light);
    }
}
