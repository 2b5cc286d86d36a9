use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::text::fuzzy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Hi,
    Fr,
    Es,
    De,
}

impl Lang {
    pub const ALL: [Lang; 5] = [Lang::En, Lang::Hi, Lang::De, Lang::Fr, Lang::Es];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Hi => "hi",
            Lang::Fr => "fr",
            Lang::Es => "es",
            Lang::De => "de",
        }
    }

    /// Spoken/typed names a user might use for the language, in any UI language.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Lang::En => &["english", "inglish", "anglais", "inglés", "englisch", "angrezi"],
            Lang::Hi => &["hindi", "hindee", "हिंदी", "हिन्दी", "hindustani", "hindhi"],
            Lang::De => &["german", "deutsch", "doych", "jermaan", "aleman", "alemán", "allemand"],
            Lang::Fr => &["french", "francais", "français", "fransay", "francés", "französisch"],
            Lang::Es => &["spanish", "espanol", "español", "espanyol", "espagnol", "spanisch"],
        }
    }

    /// Name of `self` rendered in the `ui` language.
    pub fn display_name(self, ui: Lang) -> &'static str {
        use Lang::*;
        match (ui, self) {
            (Hi, En) => "अंग्रेज़ी",
            (Hi, Hi) => "हिन्दी",
            (Hi, De) => "जर्मन",
            (Hi, Fr) => "फ़्रेंच",
            (Hi, Es) => "स्पैनिश",
            (De, En) => "Englisch",
            (De, Hi) => "Hindi",
            (De, De) => "Deutsch",
            (De, Fr) => "Französisch",
            (De, Es) => "Spanisch",
            (Fr, En) => "anglais",
            (Fr, Hi) => "hindi",
            (Fr, De) => "allemand",
            (Fr, Fr) => "français",
            (Fr, Es) => "espagnol",
            (Es, En) => "inglés",
            (Es, Hi) => "hindi",
            (Es, De) => "alemán",
            (Es, Fr) => "francés",
            (Es, Es) => "español",
            (En, En) => "English",
            (En, Hi) => "Hindi",
            (En, De) => "German",
            (En, Fr) => "French",
            (En, Es) => "Spanish",
        }
    }

    /// Best language named in `utterance`.
    ///
    /// Direct containment of an alias wins outright; otherwise the closest alias
    /// by similarity is accepted when it reaches `threshold` (0.72 in practice).
    pub fn guess(utterance: &str, threshold: f64) -> Option<Lang> {
        let text = utterance.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        for lang in Lang::ALL {
            for alias in lang.aliases() {
                if fuzzy::strict_in(&text, &[*alias]) {
                    return Some(lang);
                }
            }
        }

        let mut best: Option<(Lang, f64)> = None;
        for lang in Lang::ALL {
            for alias in lang.aliases() {
                for token in text.split_whitespace() {
                    let score = fuzzy::ratio(token, alias);
                    if best.map_or(true, |(_, s)| score > s) {
                        best = Some((lang, score));
                    }
                }
            }
        }
        best.filter(|(_, s)| *s >= threshold).map(|(lang, _)| lang)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "hi" => Ok(Lang::Hi),
            "fr" => Ok(Lang::Fr),
            "es" => Ok(Lang::Es),
            "de" => Ok(Lang::De),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

/// One user-facing line in every supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized {
    pub en: String,
    pub hi: String,
    pub fr: String,
    pub es: String,
    pub de: String,
}

impl Localized {
    pub fn new(
        en: impl Into<String>,
        hi: impl Into<String>,
        fr: impl Into<String>,
        es: impl Into<String>,
        de: impl Into<String>,
    ) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
            fr: fr.into(),
            es: es.into(),
            de: de.into(),
        }
    }

    pub fn pick(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::Hi => &self.hi,
            Lang::Fr => &self.fr,
            Lang::Es => &self.es,
            Lang::De => &self.de,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_prefers_direct_alias() {
        assert_eq!(Lang::guess("switch to hindi please", 0.72), Some(Lang::Hi));
        assert_eq!(Lang::guess("Deutsch", 0.72), Some(Lang::De));
    }

    #[test]
    fn guess_tolerates_typos() {
        assert_eq!(Lang::guess("spanis", 0.72), Some(Lang::Es));
        assert_eq!(Lang::guess("potato", 0.72), None);
        assert_eq!(Lang::guess("", 0.72), None);
    }

    #[test]
    fn codes_round_trip() {
        for lang in Lang::ALL {
            assert_eq!(lang.code().parse::<Lang>().ok(), Some(lang));
        }
        assert!("xx".parse::<Lang>().is_err());
    }
}
