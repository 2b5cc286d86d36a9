//! Romanized Hindi (Hinglish) to Devanagari.
//!
//! The table only carries romanized Hindi. English loanwords ("volume",
//! "news", "day") stay Latin so an English lexicon phrase still sees them, and
//! words that are also common in French, Spanish or German ("do", "das", "par",
//! "mein") are left out entirely.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static HINGLISH: Lazy<Normalizer> = Lazy::new(|| Normalizer::from_pairs(HINGLISH_TABLE));

/// Word-boundary substitution over a fixed table, longest key first.
#[derive(Debug, Clone)]
pub struct Normalizer {
    pattern: Option<Regex>,
    table: HashMap<String, String>,
}

impl Normalizer {
    /// The built-in Hinglish table, compiled once per process.
    pub fn hinglish() -> &'static Normalizer {
        &HINGLISH
    }

    /// A repeated key keeps its first replacement.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = HashMap::with_capacity(pairs.len());
        let mut keys: Vec<String> = Vec::with_capacity(pairs.len());
        for (from, to) in pairs {
            let key = collapse(&from.to_lowercase());
            if key.is_empty() || table.contains_key(&key) {
                continue;
            }
            table.insert(key.clone(), (*to).to_string());
            keys.push(key);
        }

        // Alternation is leftmost-first, so longer keys must come first.
        // Stable: equal lengths stay in table order.
        keys.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));

        let alternation = keys
            .iter()
            .map(|k| {
                k.split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let pattern = if alternation.is_empty() {
            None
        } else {
            match Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)) {
                Ok(re) => Some(re),
                Err(err) => {
                    tracing::error!(error = %err, "normalizer table failed to compile; normalization disabled");
                    None
                }
            }
        };

        Self { pattern, table }
    }

    /// Replace every known romanized word or phrase; everything else is kept verbatim.
    pub fn normalize(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                let key = collapse(&matched.to_lowercase());
                self.table.get(&key).cloned().unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

const HINGLISH_TABLE: &[(&str, &str)] = &[
    // weather, time
    ("mausam", "मौसम"),
    ("mausam kaisa hai", "मौसम कैसा है"),
    ("taapmaan", "तापमान"),
    ("taapman", "तापमान"),
    ("baarish", "बारिश"),
    ("barish", "बारिश"),
    ("garmi", "गर्मी"),
    ("thand", "ठंड"),
    ("aaj", "आज"),
    ("kal", "कल"),
    ("samay", "समय"),
    ("ghanta", "घंटा"),
    ("baje", "बजे"),
    ("kitne baje", "कितने बजे"),
    ("abhi", "अभी"),
    ("subah", "सुबह"),
    ("shaam", "शाम"),
    ("raat", "रात"),
    ("mahina", "महीना"),
    ("mahine", "महीने"),
    ("saal", "साल"),
    ("varsh", "वर्ष"),
    ("hafta", "हफ्ता"),
    ("hafte", "हफ्ते"),
    ("tareekh", "तारीख"),
    ("tarikh", "तारीख"),
    ("kaun sa din", "कौन सा दिन"),
    ("kaun sa", "कौन सा"),
    ("tyohar", "त्यौहार"),
    ("tyohaar", "त्यौहार"),
    ("diwali", "दिवाली"),
    ("holi", "होली"),
    // days
    ("somvar", "सोमवार"),
    ("mangalvar", "मंगलवार"),
    ("budhvar", "बुधवार"),
    ("guruvar", "गुरुवार"),
    ("shukravar", "शुक्रवार"),
    ("shanivar", "शनिवार"),
    ("ravivar", "रविवार"),
    // number words; digits stay ASCII
    ("ek", "एक"),
    ("teen", "तीन"),
    ("chaar", "चार"),
    ("paanch", "पाँच"),
    ("chhah", "छह"),
    ("saat", "सात"),
    ("aath", "आठ"),
    ("nau", "नौ"),
    ("gyaarah", "ग्यारह"),
    ("baarah", "बारह"),
    ("pachaas", "पचास"),
    ("sau", "सौ"),
    ("hajaar", "हज़ार"),
    ("hazaar", "हज़ार"),
    // question words, grammar
    ("kya", "क्या"),
    ("hai", "है"),
    ("hain", "हैं"),
    ("kaisa", "कैसा"),
    ("kaisi", "कैसी"),
    ("kaun", "कौन"),
    ("kab", "कब"),
    ("kahan", "कहाँ"),
    ("kaise", "कैसे"),
    ("kyun", "क्यों"),
    ("kitna", "कितना"),
    ("ka", "का"),
    ("ki", "की"),
    ("ke", "के"),
    ("liye", "लिए"),
    ("ke liye", "के लिए"),
    ("keliye", "के लिए"),
    ("ke baare mein", "के बारे में"),
    ("ke bare mein", "के बारे में"),
    ("mujhe", "मुझे"),
    ("mera", "मेरा"),
    ("meri", "मेरी"),
    ("mere", "मेरे"),
    ("naam", "नाम"),
    ("mera naam", "मेरा नाम"),
    // requests, verbs
    ("batao", "बताओ"),
    ("bataiye", "बताइए"),
    ("kuch batao", "कुछ बताओ"),
    ("kuch", "कुछ"),
    ("khojo", "खोजो"),
    ("dikhao", "दिखाओ"),
    ("dikhaiye", "दिखाइए"),
    ("likho", "लिखो"),
    ("padho", "पढ़ो"),
    ("yaad", "याद"),
    ("yaad rakho", "याद रखो"),
    ("yaad dilao", "याद दिलाओ"),
    ("yaad dilana", "याद दिलाना"),
    ("bhool jao", "भूल जाओ"),
    ("hatao", "हटाओ"),
    ("hata do", "हटा दो"),
    ("badlo", "बदलो"),
    ("badlein", "बदलें"),
    ("badal do", "बदल दो"),
    ("bhasha", "भाषा"),
    ("karo", "करो"),
    ("karein", "करें"),
    ("kholo", "खोलो"),
    ("chalao", "चलाओ"),
    ("bajao", "बजाओ"),
    ("gaana", "गाना"),
    ("gana", "गाना"),
    ("geet", "गीत"),
    ("khabar", "खबर"),
    ("khabrein", "खबरें"),
    ("samachar", "समाचार"),
    ("taaza", "ताज़ा"),
    // system controls; "volume"/"brightness" stay English
    ("awaaz", "आवाज़"),
    ("awaz", "आवाज़"),
    ("roshni", "रोशनी"),
    ("badhao", "बढ़ाओ"),
    ("ghatao", "घटाओ"),
    ("kam", "कम"),
    ("kam karo", "कम करो"),
    ("zyada", "ज़्यादा"),
    ("band karo", "बंद करो"),
    ("chalu", "चालू"),
    ("suno", "सुनो"),
    ("sunna", "सुनना"),
    ("so jao", "सो जाओ"),
    ("phir se shuru karo", "फिर से शुरू करो"),
    // graph follow-up, yes/no
    ("haan", "हाँ"),
    ("haa", "हाँ"),
    ("ji haan", "जी हाँ"),
    ("theek hai", "ठीक है"),
    ("thik hai", "ठीक है"),
    ("nahi", "नहीं"),
    ("nahin", "नहीं"),
    ("mat karo", "मत करो"),
    ("graph banao", "ग्राफ बनाओ"),
    ("graph dikhao", "ग्राफ दिखाओ"),
    // science vocabulary
    ("ganit", "गणित"),
    ("ganna karo", "गणना करो"),
    ("jodo", "जोड़ो"),
    ("guna", "गुणा"),
    ("bhaag", "भाग"),
    ("vargmool", "वर्गमूल"),
    ("pratishat", "प्रतिशत"),
    ("bhautiki", "भौतिकी"),
    ("rasayan", "रसायन"),
    ("tatva", "तत्व"),
    ("ghanatva", "घनत्व"),
];
