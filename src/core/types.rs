use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// One side of the bilingual vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    pub fn other(self) -> Language {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }
}

/// Conversion setting selected on the command line.
///
/// The setting decides which raw files are read and which direction of every
/// bilingual table is consulted; the canonical target vocabulary is always
/// the English side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Zh,
    En,
    /// Code-switched: Chinese utterances with embedded vocabulary tokens
    /// rewritten into the canonical English schema.
    EnZh,
}

impl Setting {
    /// The language the raw dialogue and entity files are annotated in.
    pub fn source_language(self) -> Language {
        match self {
            Setting::Zh | Setting::EnZh => Language::Zh,
            Setting::En => Language::En,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Setting::Zh => "zh",
            Setting::En => "en",
            Setting::EnZh => "en_zh",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Setting {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Setting::Zh),
            "en" => Ok(Setting::En),
            "en_zh" => Ok(Setting::EnZh),
            other => Err(ConvertError::UnknownSetting(other.to_string())),
        }
    }
}

/// Comparison operator of a slot-value constraint, in canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    EqualTo,
    Not,
    LessThan,
    AtLeast,
    OneOf,
}

impl Relation {
    /// Parses the canonical (English) operator name.
    pub fn from_canonical(name: &str) -> Option<Relation> {
        match name {
            "equal_to" => Some(Relation::EqualTo),
            "not" => Some(Relation::Not),
            "less_than" => Some(Relation::LessThan),
            "at_least" => Some(Relation::AtLeast),
            "one_of" => Some(Relation::OneOf),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::EqualTo => "equal_to",
            Relation::Not => "not",
            Relation::LessThan => "less_than",
            Relation::AtLeast => "at_least",
            Relation::OneOf => "one_of",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_round_trips_through_from_str() {
        for s in [Setting::Zh, Setting::En, Setting::EnZh] {
            assert_eq!(s.as_str().parse::<Setting>().unwrap(), s);
        }
        assert!("zh_en".parse::<Setting>().is_err());
    }

    #[test]
    fn relation_names_are_closed() {
        for name in ["equal_to", "not", "less_than", "at_least", "one_of"] {
            assert_eq!(Relation::from_canonical(name).unwrap().as_str(), name);
        }
        assert!(Relation::from_canonical("greater_than").is_none());
    }
}
