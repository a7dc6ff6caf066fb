use std::fmt;

/// Languages the interface is translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    German,
    French,
    Italian,
    Dutch,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Spanish,
            Language::German,
            Language::French,
            Language::Italian,
            Language::Dutch,
        ]
    }

    /// Name as stored in the settings document
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::French => "French",
            Language::Italian => "Italian",
            Language::Dutch => "Dutch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Map a system locale code onto a supported language.
    ///
    /// Accepts `en-US`, `en_US.UTF-8`, `fr` and friends. A code missing from the
    /// table is retried with its primary subtag; anything left over is English.
    pub fn from_locale_code(code: &str) -> Self {
        let code = code
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-")
            .to_ascii_lowercase();

        Self::lookup(&code)
            .or_else(|| code.split('-').next().and_then(Self::lookup))
            .unwrap_or(Language::English)
    }

    fn lookup(code: &str) -> Option<Self> {
        match code {
            "en-us" | "en-gb" => Some(Language::English),
            "fr" | "fr-ca" => Some(Language::French),
            "de" => Some(Language::German),
            "it" => Some(Language::Italian),
            "es" | "es-419" => Some(Language::Spanish),
            "nl" => Some(Language::Dutch),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the system locale code
pub trait LocaleSource {
    fn locale_code(&self) -> Option<String>;

    fn language(&self) -> Language {
        self.locale_code()
            .map(|code| Language::from_locale_code(&code))
            .unwrap_or_default()
    }
}

/// Reads the locale from `LC_ALL`, `LC_MESSAGES` or `LANG`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocale;

impl LocaleSource for EnvLocale {
    fn locale_code(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
    }
}

/// A locale fixed at construction
#[derive(Debug, Clone, Default)]
pub struct FixedLocale(pub Option<String>);

impl FixedLocale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(Some(code.into()))
    }
}

impl LocaleSource for FixedLocale {
    fn locale_code(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_table() {
        let cases = [
            ("en-US", Language::English),
            ("en-GB", Language::English),
            ("fr", Language::French),
            ("fr-CA", Language::French),
            ("de", Language::German),
            ("it", Language::Italian),
            ("es", Language::Spanish),
            ("es-419", Language::Spanish),
            ("nl", Language::Dutch),
        ];
        for (code, expected) in cases {
            assert_eq!(Language::from_locale_code(code), expected, "{code}");
        }
    }

    #[test]
    fn test_posix_style_codes() {
        assert_eq!(Language::from_locale_code("de_DE.UTF-8"), Language::German);
        assert_eq!(Language::from_locale_code("nl_BE@euro"), Language::Dutch);
    }

    #[test]
    fn test_unmapped_defaults_to_english() {
        assert_eq!(Language::from_locale_code("ja"), Language::English);
        assert_eq!(Language::from_locale_code(""), Language::English);
        assert_eq!(FixedLocale(None).language(), Language::English);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Language::from_name("French"), Some(Language::French));
        assert_eq!(Language::from_name("dutch"), Some(Language::Dutch));
        assert_eq!(Language::from_name("Klingon"), None);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(Language::English.next(), Language::Spanish);
        assert_eq!(Language::Dutch.next(), Language::English);
        assert_eq!(Language::English.prev(), Language::Dutch);
    }
}
