//! Approximate phrase matching across scripts.
//!
//! Every comparison happens on a folded form (lowercase, Latin diacritics
//! stripped, non-word runs collapsed to one space) and on a compact form (the
//! folded form without spaces). Non-Latin scripts pass through untouched, so a
//! Devanagari trigger phrase is compared the same way an English one is.

use strsim::normalized_levenshtein;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::MatchConfig;
use crate::lexicon::{IntentKey, Lexicon};

/// Thresholds for one `fuzzy_in` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoffs {
    pub normal: f64,
    pub compact: f64,
    /// Comparisons whose longer side is at most this many chars get relaxed cutoffs.
    pub short_len: usize,
    pub short_relax: f64,
    /// Also score token windows, not just the whole utterance.
    pub windows: bool,
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self {
            normal: 0.82,
            compact: 0.90,
            short_len: 10,
            short_relax: 0.06,
            windows: true,
        }
    }
}

impl Cutoffs {
    pub fn with_normal(self, normal: f64) -> Self {
        Self { normal, ..self }
    }

    pub fn whole_text_only(self) -> Self {
        Self { windows: false, ..self }
    }

    fn effective(&self, base: f64, a: &str, b: &str) -> f64 {
        let longest = a.chars().count().max(b.chars().count());
        if longest <= self.short_len {
            base - self.short_relax
        } else {
            base
        }
    }
}

impl From<&MatchConfig> for Cutoffs {
    fn from(cfg: &MatchConfig) -> Self {
        Self {
            normal: cfg.cutoff,
            compact: cfg.compact_cutoff,
            short_len: cfg.short_len,
            short_relax: cfg.short_relax,
            windows: true,
        }
    }
}

/// Outcome of matching one utterance against a phrase set.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matched: bool,
    pub phrase: Option<String>,
    pub score: Option<f64>,
}

impl MatchResult {
    fn miss() -> Self {
        Self {
            matched: false,
            phrase: None,
            score: None,
        }
    }

    fn hit(phrase: &str, score: f64) -> Self {
        Self {
            matched: true,
            phrase: Some(phrase.to_string()),
            score: Some(score),
        }
    }
}

/// Best lexicon entry for an utterance, used for "did you mean" prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub key: IntentKey,
    pub phrase: String,
    pub score: f64,
}

/// Folded + compact views of one string, computed once per match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub folded: String,
    pub compact: String,
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let folded = fold(raw);
        let compact = folded.chars().filter(|c| *c != ' ').collect();
        let tokens = folded.split(' ').filter(|t| !t.is_empty()).map(str::to_string).collect();
        Self {
            folded,
            compact,
            tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    /// The whole text first, then token windows whose width is within one word of `width`.
    fn windows(&self, width: usize) -> Vec<String> {
        let mut out = vec![self.folded.clone()];
        let lo = width.saturating_sub(1).max(1);
        let hi = width + 1;
        for w in lo..=hi {
            if w >= self.tokens.len() {
                break;
            }
            for chunk in self.tokens.windows(w) {
                out.push(chunk.join(" "));
            }
        }
        out
    }
}

/// Diacritical-mark blocks used by Latin, Greek and Cyrillic. Marks outside these
/// ranges (Devanagari matras, nukta, virama, ...) are part of the word.
fn is_latin_diacritic(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// Case-fold, strip Latin diacritics, collapse non-word runs to single spaces, trim.
///
/// Idempotent: `fold(&fold(s)) == fold(s)`.
pub fn fold(s: &str) -> String {
    let lowered = s.to_lowercase();
    let stripped: String = lowered
        .nfd()
        .filter(|c| !is_latin_diacritic(*c))
        .nfc()
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if is_word_char(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Letters and digits only; tolerates missing or extra word boundaries.
pub fn compact(s: &str) -> String {
    fold(s).chars().filter(|c| *c != ' ').collect()
}

/// Edit-distance similarity in [0, 1]. Empty input never scores.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b)
}

/// Exact containment with word-boundary anchoring.
///
/// Phrases that fold to nothing (pure symbols such as `+` or `/`) fall back to
/// plain case-insensitive containment on the raw strings.
pub fn strict_in<S: AsRef<str>>(text: &str, phrases: &[S]) -> bool {
    let folded = fold(text);
    let padded = format!(" {} ", folded);
    let raw_lower = text.to_lowercase();

    phrases.iter().any(|p| {
        let p = p.as_ref();
        let pf = fold(p);
        if pf.is_empty() {
            let symbol = p.trim().to_lowercase();
            !symbol.is_empty() && raw_lower.contains(&symbol)
        } else {
            !folded.is_empty() && padded.contains(&format!(" {} ", pf))
        }
    })
}

/// Boolean view of [`match_phrases`].
pub fn fuzzy_in<S: AsRef<str>>(text: &str, phrases: &[S], cutoffs: &Cutoffs) -> bool {
    match_phrases(text, phrases, cutoffs).matched
}

/// Decide whether `text` means any of `phrases`.
///
/// Containment in folded or compact form returns immediately with score 1.0.
/// Otherwise the best similarity across token windows is reported if it clears
/// the (possibly relaxed) cutoff for its form.
pub fn match_phrases<S: AsRef<str>>(text: &str, phrases: &[S], cutoffs: &Cutoffs) -> MatchResult {
    let t = NormalizedText::new(text);
    if t.is_empty() || phrases.is_empty() {
        return MatchResult::miss();
    }

    let mut best: Option<(&str, f64)> = None;
    for phrase in phrases {
        let phrase = phrase.as_ref();
        let p = NormalizedText::new(phrase);
        if p.is_empty() {
            continue;
        }

        if t.folded.contains(&p.folded) || t.compact.contains(&p.compact) {
            return MatchResult::hit(phrase, 1.0);
        }

        let candidates = if cutoffs.windows {
            t.windows(p.word_count())
        } else {
            vec![t.folded.clone()]
        };
        for (i, window) in candidates.iter().enumerate() {
            let s_norm = ratio(window, &p.folded);
            let window_compact: String = window.chars().filter(|c| *c != ' ').collect();
            let s_comp = ratio(&window_compact, &p.compact);

            // Relaxed cutoffs only for the whole utterance; a short phrase must
            // not loosely match every similar token of a longer sentence.
            let (norm_cut, comp_cut) = if i == 0 {
                (
                    cutoffs.effective(cutoffs.normal, window, &p.folded),
                    cutoffs.effective(cutoffs.compact, &window_compact, &p.compact),
                )
            } else {
                (cutoffs.normal, cutoffs.compact)
            };
            let norm_ok = s_norm >= norm_cut;
            let comp_ok = s_comp >= comp_cut;
            if !(norm_ok || comp_ok) {
                continue;
            }

            let score = match (norm_ok, comp_ok) {
                (true, true) => s_norm.max(s_comp),
                (true, false) => s_norm,
                _ => s_comp,
            };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((phrase, score));
            }
        }
    }

    match best {
        Some((phrase, score)) => MatchResult::hit(phrase, score),
        None => MatchResult::miss(),
    }
}

/// Similarity of `phrase` to the best window of `text` (max of folded and compact scores).
fn phrase_score(t: &NormalizedText, phrase: &str) -> f64 {
    let p = NormalizedText::new(phrase);
    if p.is_empty() {
        return 0.0;
    }
    t.windows(p.word_count())
        .iter()
        .map(|window| {
            let window_compact: String = window.chars().filter(|c| *c != ' ').collect();
            ratio(window, &p.folded).max(ratio(&window_compact, &p.compact))
        })
        .fold(0.0, f64::max)
}

/// Highest-scoring (intent, phrase) across the whole lexicon.
///
/// Ties keep the first entry in lexicon order, so results are deterministic.
pub fn best_command_key(text: &str, lexicon: &Lexicon) -> Option<Suggestion> {
    let t = NormalizedText::new(text);
    if t.is_empty() {
        return None;
    }

    let mut best: Option<Suggestion> = None;
    for (key, phrases) in lexicon.iter() {
        for phrase in phrases.iter() {
            let score = phrase_score(&t, phrase.as_str());
            if score > best.as_ref().map_or(0.0, |b| b.score) {
                best = Some(Suggestion {
                    key: key.clone(),
                    phrase: phrase.as_str().to_string(),
                    score,
                });
            }
        }
    }
    best
}
