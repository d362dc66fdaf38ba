//! Field values for CAM sections.

use std::fmt;

use indexmap::IndexMap;

/// Language code used for diagnostic display names.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language code → text, in file order.
pub type Localized = IndexMap<String, String>;

/// A CAM field value.
///
/// Fields are written either as a single `Key=value` / `Key="value"` line,
/// or as one or more `Key[lang]="value"` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A plain or quoted value.
    Scalar(String),
    /// One value per language code.
    Localized(Localized),
}

impl FieldValue {
    /// Returns `true` if the value carries no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::Localized(map) => map.is_empty(),
        }
    }

    /// Returns the text of this value.
    ///
    /// Localized values prefer the English entry and fall back to the first
    /// entry in file order.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Scalar(s) => s,
            Self::Localized(map) => map
                .get(DEFAULT_LANGUAGE)
                .or_else(|| map.values().next())
                .map_or("", String::as_str),
        }
    }

    /// Returns the entry for `lang` of a localized value.
    #[must_use]
    pub fn localized(&self, lang: &str) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Localized(map) => map.get(lang).map(String::as_str),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}
