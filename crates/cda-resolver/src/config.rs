//! Resolver configuration from environment variables.
//!
//! | Variable                 | Default           |
//! |--------------------------|-------------------|
//! | `CDA_SPACE_ID`           | `local`           |
//! | `CDA_LOCALES`            | `en-US`           |
//! | `CDA_DEFAULT_LOCALE`     | first of locales  |
//! | `CDA_NULLIFY_UNRESOLVED` | `false`           |

use crate::context::ResolveContext;
use crate::error::{Error, Result};
use cda_model::{Locale, SpaceContext};
use std::sync::Arc;
use tracing::warn;

const DEFAULT_SPACE_ID: &str = "local";
const DEFAULT_LOCALE: &str = "en-US";

/// Configuration for resolution passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Space id recorded in the space snapshot
    pub space_id: String,

    /// Locale codes, in order
    pub locales: Vec<String>,

    /// Locale used for query responses that do not name one
    pub default_locale: String,

    /// Drop unresolvable links
    pub nullify_unresolved: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ResolverConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Invalid values are logged and replaced by their defaults; use
    /// [`ResolverConfig::try_from_env`] to reject them instead.
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "invalid resolver environment, using defaults");
                Self::builtin()
            }
        }
    }

    /// Create config from environment variables, failing on invalid values.
    pub fn try_from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn builtin() -> Self {
        Self {
            space_id: DEFAULT_SPACE_ID.to_string(),
            locales: vec![DEFAULT_LOCALE.to_string()],
            default_locale: DEFAULT_LOCALE.to_string(),
            nullify_unresolved: false,
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let space_id = lookup("CDA_SPACE_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SPACE_ID.to_string());

        let locales = match lookup("CDA_LOCALES") {
            Some(raw) => parse_locale_list(&raw)?,
            None => vec![DEFAULT_LOCALE.to_string()],
        };

        let default_locale = match lookup("CDA_DEFAULT_LOCALE") {
            Some(code) => {
                let code = code.trim().to_string();
                if !locales.contains(&code) {
                    return Err(Error::Config(format!(
                        "CDA_DEFAULT_LOCALE `{code}` is not one of CDA_LOCALES"
                    )));
                }
                code
            }
            None => locales[0].clone(),
        };

        let nullify_unresolved = match lookup("CDA_NULLIFY_UNRESOLVED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "CDA_NULLIFY_UNRESOLVED must be true|false|1|0|yes|no, got `{raw}`"
                ))
            })?,
            None => false,
        };

        Ok(Self {
            space_id,
            locales,
            default_locale,
            nullify_unresolved,
        })
    }

    /// Builder: Replace the locale list. The default locale becomes the first
    /// code unless it is still listed.
    pub fn with_locales(mut self, locales: Vec<String>) -> Result<Self> {
        if locales.is_empty() {
            return Err(Error::Config("locale list is empty".to_string()));
        }
        if !locales.contains(&self.default_locale) {
            self.default_locale = locales[0].clone();
        }
        self.locales = locales;
        Ok(self)
    }

    /// Builder: Set the default locale, which must be listed.
    pub fn with_default_locale(mut self, code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if !self.locales.contains(&code) {
            return Err(Error::Config(format!("default locale `{code}` is not configured")));
        }
        self.default_locale = code;
        Ok(self)
    }

    /// Builder: Set the nullify-unresolved policy.
    pub fn with_nullify_unresolved(mut self, nullify: bool) -> Self {
        self.nullify_unresolved = nullify;
        self
    }

    /// Space snapshot described by this config.
    pub fn space(&self) -> SpaceContext {
        let locales = self
            .locales
            .iter()
            .map(|code| {
                let locale = Locale::new(code.clone());
                if *code == self.default_locale {
                    locale.as_default()
                } else {
                    locale
                }
            })
            .collect();
        SpaceContext::new(self.space_id.clone(), locales)
    }

    /// Resolution context for passes run with this config.
    pub fn context(&self) -> ResolveContext {
        ResolveContext::new(Arc::new(self.space()))
            .with_nullify_unresolved(self.nullify_unresolved)
    }
}

/// Parse a comma-separated locale list, dropping blanks and duplicates.
pub fn parse_locale_list(raw: &str) -> Result<Vec<String>> {
    let mut codes: Vec<String> = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|code| !code.is_empty()) {
        if !codes.iter().any(|known| known == code) {
            codes.push(code.to_string());
        }
    }
    if codes.is_empty() {
        return Err(Error::Config(format!("no locale codes in `{raw}`")));
    }
    Ok(codes)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
