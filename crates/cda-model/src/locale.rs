//! Locales and the space-wide context that lists them.

use serde::{Deserialize, Serialize};

/// A locale configured for a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    /// Locale code (e.g. `en-US`)
    pub code: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Whether this is the space's default locale
    #[serde(default)]
    pub default: bool,

    /// Code of the locale consulted when this one has no value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_code: Option<String>,
}

impl Locale {
    /// Create a non-default locale whose name is its code.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            default: false,
            fallback_code: None,
        }
    }

    /// Builder: Mark as the default locale.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Builder: Set display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: Set fallback locale code.
    pub fn with_fallback(mut self, code: impl Into<String>) -> Self {
        self.fallback_code = Some(code.into());
        self
    }
}

/// Read-only snapshot of space metadata shared by resolution passes.
///
/// Built once before any pass starts and handed out behind an `Arc`; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceContext {
    /// Space id
    pub id: String,

    /// Space name
    #[serde(default)]
    pub name: String,

    /// Locales, in the order the space lists them
    pub locales: Vec<Locale>,
}

impl SpaceContext {
    /// Create a context for `id` with the given locales.
    pub fn new(id: impl Into<String>, locales: Vec<Locale>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            locales,
        }
    }

    /// The default locale, falling back to the first listed one.
    pub fn default_locale(&self) -> Option<&Locale> {
        self.locales
            .iter()
            .find(|locale| locale.default)
            .or_else(|| self.locales.first())
    }

    /// Look up a locale by code.
    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Locale codes in order.
    pub fn locale_codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|locale| locale.code.as_str())
    }
}
