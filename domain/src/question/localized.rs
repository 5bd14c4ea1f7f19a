//! Locale-keyed text for question wording and help text.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The locale used when none is given.
pub const DEFAULT_LOCALE: &str = "en";

/// Translations of one piece of user-facing text, keyed by BCP 47 tag
/// (Value Object)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText {
    translations: BTreeMap<String, String>,
}

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a text with a single translation for [`DEFAULT_LOCALE`].
    pub fn of(text: impl Into<String>) -> Self {
        let mut translations = BTreeMap::new();
        translations.insert(DEFAULT_LOCALE.to_string(), text.into());
        Self { translations }
    }

    /// Builder-style insert.
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), text.into());
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.translations.insert(locale.into(), text.into());
    }

    /// The translation for `locale`, or [`DomainError::TranslationNotFound`].
    pub fn get(&self, locale: &str) -> Result<&str, DomainError> {
        self.translations
            .get(locale)
            .map(String::as_str)
            .ok_or_else(|| DomainError::TranslationNotFound(locale.to_string()))
    }

    /// The translation for `locale`, falling back to [`DEFAULT_LOCALE`], then
    /// to any translation at all, then to the empty string.
    pub fn get_or_default(&self, locale: &str) -> &str {
        self.translations
            .get(locale)
            .or_else(|| self.translations.get(DEFAULT_LOCALE))
            .or_else(|| self.translations.values().next())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }
}
