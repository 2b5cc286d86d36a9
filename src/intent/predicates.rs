//! Matchers for intents that phrase lists alone can't pin down.
//!
//! Each heuristic sees the intent's own phrases and cutoffs plus one form of
//! the utterance (lowercased raw, or normalizer output).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::PhraseSet;
use crate::text::fuzzy::{fold, fuzzy_in, strict_in, Cutoffs};
use crate::text::yesno;

static CALENDAR_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4}|\d{2})\b|\b(\d{4})-(\d{1,2})-(\d{1,2})\b")
        .expect("valid calendar date regex")
});

static ARITHMETIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d\s*(?:\*\*|[-+*/^%×÷x])\s*[\d(]|√|\bsqrt\b|\d\s*!|\(\s*\d[^)]*[-+*/^]\s*\d")
        .expect("valid arithmetic regex")
});

static EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d\s*[a-z]\b|[a-z]\s*[\^=]|[=^]\s*[a-z\d]|[\d)]\s*[-+*/^]\s*[\d(a-z]|[a-z]\s*[-+*/]\s*\d")
        .expect("valid expression regex")
});

static PHYSICS_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:v|u|a|s|t|f|m|r|theta|omega|alpha|tau|lambda|rho|phi)\b|[ωατλρφθ]")
        .expect("valid physics variable regex")
});

static NUMBER_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d\s*(?:m/s²|m/s\^2|m/s2|m/s|km/h|kg|newtons?|joules?|watts?|ohms?|Ω|kpa|mpa|pa|atm|hz|khz|°c|rad|n|j|w)(?:[^\p{L}\p{N}]|$)",
    )
    .expect("valid unit regex")
});

static LANGUAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:change|switch|set)\b.*\b(?:language|lang)\b",
        r"भाषा.*बदल",
        r"\b(?:change[rz]?|passe[rz]?)\b.*\blangue\b",
        r"\bcambi(?:a|ar|e)\b.*\bidioma\b",
        r"\bsprache\b.*\b(?:ändern|wechseln|umstellen)\b",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).expect("valid language-change regex"))
    .collect()
});

/// Words that only ask for an expression manipulation when one is present.
const WEAK_SYMBOLIC_CUES: &[&str] = &[
    "solve", "simplify", "expand", "factor", "factorise", "factorize", "inverse", "rank", "minor", "limit", "approaches",
];

const CHEMISTRY_TRIGGERS: &[&str] = &[
    "molar mass of",
    "molecular weight of",
    "ph of",
    "poh of",
    "pv=nrt",
    "stoichiometry",
];

const HOLIDAY_TERMS: &[&str] = &[
    "christmas",
    "diwali",
    "holi",
    "eid",
    "holiday",
    "holidays",
    "new year",
    "easter",
    "navratri",
    "dussehra",
    "noël",
    "férié",
    "navidad",
    "feriado",
    "feiertag",
    "weihnachten",
    "दिवाली",
    "होली",
    "क्रिसमस",
    "ईद",
    "त्यौहार",
];

const LANGUAGE_VERBS: &[&str] = &[
    "change", "switch", "set", "use", "speak", "talk", "reply", "respond", "बदलो", "बदलें", "बदल", "बोलो",
    "changer", "passe", "parle", "parlez", "cambiar", "cambia", "habla", "ändern", "wechseln", "sprich",
];

const TYPO_REPAIRS: &[(&str, &str)] = &[
    ("chnage", "change"),
    ("chane", "change"),
    ("chang", "change"),
    ("chenge", "change"),
    ("cahnge", "change"),
    ("swich", "switch"),
    ("swtich", "switch"),
    ("swith", "switch"),
    ("langauge", "language"),
    ("languge", "language"),
    ("langugae", "language"),
    ("laguage", "language"),
    ("lanuage", "language"),
];

/// A digit run glued to a decimal point or another digit, as in `2.5` or `3,14`.
fn continues_number(mut chars: impl Iterator<Item = char>) -> bool {
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.' | ',') => chars.next().map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Date-shaped spans that are not the tail or head of a decimal number.
/// `14-1.59` inside `3.14-1.59` is a subtraction.
fn calendar_dates(text: &str) -> impl Iterator<Item = regex::Captures<'_>> {
    CALENDAR_DATE.captures_iter(text).filter(move |c| {
        let Some(span) = c.get(0) else { return false };
        !continues_number(text[..span.start()].chars().rev()) && !continues_number(text[span.end()..].chars())
    })
}

fn without_dates(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for c in calendar_dates(text) {
        if let Some(span) = c.get(0) {
            out.push_str(&text[last..span.start()]);
            out.push(' ');
            last = span.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

fn has_plausible_date(text: &str) -> bool {
    calendar_dates(text).any(|c| {
        let num = |i: usize| c.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        match (num(1), num(2), num(4), num(5), num(6)) {
            (Some(a), Some(b), ..) => (1..=31).contains(&a) && (1..=31).contains(&b) && (a <= 12 || b <= 12),
            (_, _, Some(_), Some(month), Some(day)) => (1..=12).contains(&month) && (1..=31).contains(&day),
            _ => false,
        }
    })
}

/// Contains something shaped like `12/09/2025`, `12-09-25` or `2025-09-12`.
pub fn contains_calendar_date(text: &str) -> bool {
    has_plausible_date(text)
}

/// The whole utterance is a date and nothing else.
pub fn is_bare_date(text: &str) -> bool {
    let trimmed = text.trim();
    calendar_dates(trimmed)
        .next()
        .and_then(|c| c.get(0))
        .map_or(false, |m| m.start() == 0 && m.end() == trimmed.len())
        && has_plausible_date(trimmed)
}

/// Plain arithmetic shape: `2+3`, `7 x 8`, `5!`, `sqrt 16`.
pub fn has_arithmetic(text: &str) -> bool {
    ARITHMETIC.is_match(&without_dates(text))
}

/// Strict match of a phrase set against one utterance form.
///
/// Bare affirmations ("yes", "ok", "हाँ") only count when they are the whole
/// utterance, so "ok play some music" doesn't look like a confirmation.
pub fn strict_phrases(phrases: &PhraseSet, text: &str) -> bool {
    let folded = fold(text);
    if folded.is_empty() {
        return false;
    }
    phrases.iter().any(|p| {
        if yesno::is_affirmation(p.as_str()) {
            fold(p.as_str()) == folded
        } else {
            strict_in(text, &[p])
        }
    })
}

pub fn date_query(phrases: &PhraseSet, cutoffs: &Cutoffs, text: &str) -> bool {
    fuzzy_in(text, phrases.as_slice(), cutoffs) || contains_calendar_date(text)
}

pub fn holiday_query(phrases: &PhraseSet, cutoffs: &Cutoffs, text: &str) -> bool {
    fuzzy_in(text, phrases.as_slice(), cutoffs) || strict_in(text, HOLIDAY_TERMS)
}

/// Calculus, algebra on expressions, matrices. Never a bare date.
pub fn symbolic_math(phrases: &PhraseSet, _cutoffs: &Cutoffs, text: &str) -> bool {
    if is_bare_date(text) {
        return false;
    }
    if strict_in(text, phrases.as_slice()) {
        return true;
    }
    let stripped = without_dates(text);
    strict_in(&stripped, WEAK_SYMBOLIC_CUES) && EXPRESSION.is_match(&stripped)
}

/// Numeric arithmetic. A calendar date alone is not a subtraction.
pub fn math_query(phrases: &PhraseSet, _cutoffs: &Cutoffs, text: &str) -> bool {
    if is_bare_date(text) {
        return false;
    }
    has_arithmetic(text) || strict_in(&without_dates(text), phrases.as_slice())
}

/// Named physics topics, equations over physics variables, or quantities with SI units.
pub fn physics_query(phrases: &PhraseSet, _cutoffs: &Cutoffs, text: &str) -> bool {
    strict_in(text, phrases.as_slice())
        || (text.contains('=') && PHYSICS_VARIABLE.is_match(text))
        || NUMBER_WITH_UNIT.is_match(text)
}

/// Named chemistry topics; a few triggers hold even with a replaced lexicon.
pub fn chemistry_query(phrases: &PhraseSet, _cutoffs: &Cutoffs, text: &str) -> bool {
    strict_in(text, phrases.as_slice()) || strict_in(text, CHEMISTRY_TRIGGERS)
}

fn repair_typos(text: &str) -> String {
    fold(text)
        .split(' ')
        .map(|token| {
            TYPO_REPAIRS
                .iter()
                .find(|(typo, _)| *typo == token)
                .map_or(token, |(_, fixed)| *fixed)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn names_a_language(text: &str) -> bool {
    crate::lang::Lang::ALL
        .iter()
        .any(|lang| strict_in(text, lang.aliases()))
}

/// Requests to switch the UI language, typos and all.
///
/// Fuzzy comparison here is whole-utterance only at a looser cutoff; the
/// phrases are short enough that token windows would catch "switch on".
pub fn change_language(phrases: &PhraseSet, cutoffs: &Cutoffs, text: &str) -> bool {
    let repaired = repair_typos(text);
    if strict_in(&repaired, phrases.as_slice()) {
        return true;
    }
    let loose = cutoffs.with_normal(0.72).whole_text_only();
    if fuzzy_in(&repaired, phrases.as_slice(), &loose) {
        return true;
    }
    if LANGUAGE_PATTERNS
        .iter()
        .any(|re| re.is_match(&repaired) || re.is_match(text))
    {
        return true;
    }
    strict_in(&repaired, LANGUAGE_VERBS) && names_a_language(text)
}
