//! Well-known library types and their fixed placeholder values.

use std::borrow::Cow;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Milliseconds after the Unix epoch of the placeholder timestamp.
pub const PLACEHOLDER_TIMESTAMP_MILLIS: u64 = 1;

/// A locale identifier made of a language and a country code.
///
/// # Example
///
/// ```
/// use fixture_factory::Locale;
///
/// let locale = Locale::new("fr", "CA");
/// assert_eq!(locale.to_string(), "fr_CA");
/// assert_eq!(Locale::US.language(), "en");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: Cow<'static, str>,
    country: Cow<'static, str>,
}

impl Locale {
    /// English as used in the United States.
    pub const US: Self = Self {
        language: Cow::Borrowed("en"),
        country: Cow::Borrowed("US"),
    };

    /// Creates a locale from a language and a country code.
    #[must_use]
    pub fn new(
        language: impl Into<Cow<'static, str>>,
        country: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
        }
    }

    /// Returns the language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the country code.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.language, self.country)
    }
}

/// The fixed timestamp used by deterministic configurations.
#[must_use]
pub fn placeholder_timestamp() -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(PLACEHOLDER_TIMESTAMP_MILLIS)
}

/// A calendar value whose time is [`placeholder_timestamp`].
#[must_use]
pub fn placeholder_calendar() -> DateTime<Utc> {
    DateTime::<Utc>::from(placeholder_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_calendar_matches_placeholder_timestamp() {
        assert_eq!(SystemTime::from(placeholder_calendar()), placeholder_timestamp());
        assert_eq!(placeholder_calendar().timestamp_millis(), 1);
    }

    #[test]
    fn us_locale_matches_constructed_locale() {
        assert_eq!(Locale::US, Locale::new("en", "US"));
        assert_eq!(Locale::US.country(), "US");
    }
}
