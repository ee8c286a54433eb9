//! Supported locales.

use crate::error::{I18nError, I18nResult};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Locales with embedded translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (United States)
    #[default]
    EnUs,
    /// Slovenian
    SlSi,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Self; 2] = [Self::EnUs, Self::SlSi];

    /// BCP 47 code of the locale.
    pub const fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::SlSi => "sl-SI",
        }
    }

    /// Embedded Fluent source for the locale.
    pub(crate) const fn source(self) -> &'static str {
        match self {
            Self::EnUs => include_str!("../locales/en-US/bot.ftl"),
            Self::SlSi => include_str!("../locales/sl-SI/bot.ftl"),
        }
    }

    /// Converts to a unic-langid identifier.
    pub fn to_language_identifier(self) -> I18nResult<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.code().to_string()))
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested: LanguageIdentifier = s
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(s.to_string()))?;

        Self::ALL
            .into_iter()
            .find(|locale| {
                locale
                    .to_language_identifier()
                    .is_ok_and(|id| id.language == requested.language)
            })
            .ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
