//! Opus and catalogue numbers
//!
//! Recognizes tokens such as `Op. 67`, `BWV 1007`, `K. 550`, `Hob. XVI:52`,
//! `D 944`, `RV 269`, `Wq. 182`, `S. 178`.

use super::names::fold;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Catalogue token: prefix, optional Roman group, number
///
/// The single-letter prefixes (K, D, S) are matched upper-case only so that
/// ordinary words and keys ("in d 5") are not mistaken for catalogue numbers.
static CATALOGUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?i:opus|op|bwv|kv|hob|rv|wq)|K|D|S)\.?\s*(?:([IVXLC]+)\s*[:.]\s*)?(\d+)",
    )
    .expect("catalogue regex is valid")
});

/// Work number within a set ("No. 5", "Nr.3", "n° 2")
static WORK_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b(?:no|nr)\.?|\bn°)\s*(\d+)").expect("work number regex is valid")
});

/// Composers whose works are conventionally cited by catalogue number
/// (folded base surnames)
pub const KNOWN_CATALOGUE_COMPOSERS: [&str; 15] = [
    "beethoven",
    "mozart",
    "bach",
    "schubert",
    "haydn",
    "vivaldi",
    "handel",
    "telemann",
    "brahms",
    "chopin",
    "liszt",
    "schumann",
    "mendelssohn",
    "dvorak",
    "haendel",
];

/// Whether a base surname belongs to a composer with a standard catalogue
pub fn has_known_catalogue(surname: &str) -> bool {
    let folded = fold(surname.trim());
    KNOWN_CATALOGUE_COMPOSERS.contains(&folded.as_str())
}

pub fn has_catalogue_number(title: &str) -> bool {
    CATALOGUE_RE.is_match(title)
}

/// Canonical catalogue tokens in order of appearance ("op 67", "hob XVI:52")
pub fn catalogue_tokens(title: &str) -> Vec<String> {
    CATALOGUE_RE
        .captures_iter(title)
        .map(|caps| {
            let prefix = match caps[1].to_lowercase().as_str() {
                "opus" => "op".to_string(),
                "kv" => "k".to_string(),
                other => other.to_string(),
            };
            match caps.get(2) {
                Some(roman) => format!("{} {}:{}", prefix, roman.as_str(), &caps[3]),
                None => format!("{} {}", prefix, &caps[3]),
            }
        })
        .collect()
}

/// Numbers identifying the work, keyed by slot ("no", "op", "bwv", ...)
///
/// Repeated slots keep every value in order of appearance.
pub fn work_numbers(title: &str) -> BTreeMap<String, Vec<String>> {
    let mut slots: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for caps in WORK_NUMBER_RE.captures_iter(title) {
        let number = caps[1].trim_start_matches('0');
        slots.entry("no".to_string()).or_default().push(number.to_string());
    }
    for token in catalogue_tokens(title) {
        if let Some((prefix, value)) = token.split_once(' ') {
            slots.entry(prefix.to_string()).or_default().push(value.to_string());
        }
    }
    slots
}

/// Whether two titles give the same work slot different numbers
///
/// A slot present on one side only, or a shorter run of values that is a
/// prefix of the other side's, is not a conflict.
pub fn work_numbers_conflict(a: &str, b: &str) -> bool {
    let left = work_numbers(a);
    let right = work_numbers(b);
    left.iter().any(|(slot, values)| {
        right
            .get(slot)
            .is_some_and(|other| values.iter().zip(other).any(|(x, y)| x != y))
    })
}
