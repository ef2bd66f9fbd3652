//! Dark/light theme resolution and the toggle control.
//!
//! The effective mode is the stored preference when one exists, otherwise the
//! system preference. Clicking the toggle flips whatever the page currently
//! shows and writes the result back as `"dark"` or `"light"`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
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

    pub fn from_dark(dark: bool) -> Self {
        if dark { ThemeMode::Dark } else { ThemeMode::Light }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

/// What the preference store says about the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Dark,
    Light,
    Unset,
}

impl ThemePreference {
    /// Anything stored other than exactly `"dark"` counts as light. An empty
    /// value is the same as no value at all.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None | Some("") => ThemePreference::Unset,
            Some("dark") => ThemePreference::Dark,
            Some(_) => ThemePreference::Light,
        }
    }

    pub fn resolve(self, system_prefers_dark: bool) -> ThemeMode {
        match self {
            ThemePreference::Dark => ThemeMode::Dark,
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Unset => ThemeMode::from_dark(system_prefers_dark),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Theme,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::Theme => "theme",
        }
    }
}

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<String>;
    fn set(&mut self, key: PreferenceKey, value: &str) -> anyhow::Result<()>;
}

/// The platform's dark-mode media query.
pub trait SystemTheme {
    /// `None` when the platform cannot answer the query.
    fn prefers_dark(&self) -> Option<bool>;
}

/// The page root that carries the dark styling and, optionally, the toggle.
pub trait ThemeTarget {
    fn is_dark(&self) -> bool;
    fn set_dark(&mut self, dark: bool);
    fn has_toggle(&self) -> bool;
}

pub struct ThemeController<S> {
    store: S,
    toggle_enabled: bool,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn initialize<Y, T>(system: &Y, store: S, target: &mut T) -> Self
    where
        Y: SystemTheme + ?Sized,
        T: ThemeTarget + ?Sized,
    {
        let system_dark = system.prefers_dark().unwrap_or(false);
        let stored = store.get(PreferenceKey::Theme);
        let preference = ThemePreference::from_stored(stored.as_deref());
        let mode = preference.resolve(system_dark);
        tracing::debug!(
            ?preference,
            system_dark,
            mode = mode.as_str(),
            "resolved initial theme"
        );

        if mode.is_dark() {
            target.set_dark(true);
        }

        let toggle_enabled = target.has_toggle();
        if !toggle_enabled {
            tracing::trace!("no theme toggle on page");
        }

        Self {
            store,
            toggle_enabled,
        }
    }

    pub fn toggle_enabled(&self) -> bool {
        self.toggle_enabled
    }

    /// Handles a click on the toggle control. Returns the mode now applied, or
    /// `None` when the page has no toggle.
    pub fn on_toggle_click<T>(&mut self, target: &mut T) -> Option<ThemeMode>
    where
        T: ThemeTarget + ?Sized,
    {
        if !self.toggle_enabled {
            return None;
        }

        target.set_dark(!target.is_dark());
        let mode = ThemeMode::from_dark(target.is_dark());
        if let Err(err) = self.store.set(PreferenceKey::Theme, mode.as_str()) {
            tracing::warn!(error = %format!("{err:#}"), "failed to persist theme");
        }
        Some(mode)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
