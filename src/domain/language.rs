//! Language value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::LanguageParseError;

/// All supported assessment languages
pub const ALL_LANGUAGES: &[Language] = &[
    Language::En,
    Language::Hi,
    Language::Ta,
    Language::Te,
    Language::Ml,
];

/// Supported assessment languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Hi,
    Ta,
    Te,
    Ml,
}

impl Language {
    /// Get the human-readable label for this language
    pub const fn label(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Ta => "Tamil",
            Self::Te => "Telugu",
            Self::Ml => "Malayalam",
        }
    }

    /// Get the neural voice used for speech synthesis
    pub const fn voice(&self) -> &'static str {
        match self {
            Self::En => "en-US-JennyNeural",
            Self::Hi => "hi-IN-SwaraNeural",
            Self::Ta => "ta-IN-PallaviNeural",
            Self::Te => "te-IN-ShrutiNeural",
            Self::Ml => "ml-IN-SobhanaNeural",
        }
    }

    /// Get the locale used for speech recognition
    pub const fn locale(&self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Hi => "hi-IN",
            Self::Ta => "ta-IN",
            Self::Te => "te-IN",
            Self::Ml => "ml-IN",
        }
    }

    /// Word spoken before each option number in the question prompt
    pub const fn option_word(&self) -> &'static str {
        match self {
            Self::En => "Option",
            Self::Hi => "विकल्प",
            // No localized UI strings for these yet; prompts fall back to English
            Self::Ta | Self::Te | Self::Ml => "Option",
        }
    }

    /// Spoken lead-in for the final result summary
    pub const fn result_summary_prefix(&self) -> &'static str {
        match self {
            Self::En => "Based on your assessment, you are fit for",
            Self::Hi => "आपके मूल्यांकन के आधार पर, आप इसके लिए उपयुक्त हैं",
            Self::Ta | Self::Te | Self::Ml => "Based on your assessment, you are fit for",
        }
    }

    /// Get the string identifier for this language
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Ta => "ta",
            Self::Te => "te",
            Self::Ml => "ml",
        }
    }
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "hi" => Ok(Self::Hi),
            "ta" => Ok(Self::Ta),
            "te" => Ok(Self::Te),
            "ml" => Ok(Self::Ml),
            _ => Err(LanguageParseError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_languages() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!("ta".parse::<Language>().unwrap(), Language::Ta);
        assert_eq!("te".parse::<Language>().unwrap(), Language::Te);
        assert_eq!("ml".parse::<Language>().unwrap(), Language::Ml);
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("Hi".parse::<Language>().unwrap(), Language::Hi);
    }

    #[test]
    fn parse_with_whitespace() {
        assert_eq!("  ta  ".parse::<Language>().unwrap(), Language::Ta);
    }

    #[test]
    fn parse_invalid() {
        assert!("fr".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::Ml.to_string(), "ml");
    }

    #[test]
    fn voices_match_locales() {
        for lang in ALL_LANGUAGES {
            // Every voice name starts with its recognition locale
            assert!(lang.voice().starts_with(lang.locale()));
        }
    }

    #[test]
    fn all_languages_constant() {
        assert_eq!(ALL_LANGUAGES.len(), 5);
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }
}
