//! Formatting rules: encoding, capitalization, combined tags, disc numbers

use super::distinct_artists;
use crate::rule::{AlbumRule, CheckContext, RuleMetadata};
use crate::text::{encoding_problem, letter_case, normalize_title, LetterCase};
use cmv_common::{Album, Issue, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

/// 2.3.18.1
pub struct CharacterEncoding;

impl CharacterEncoding {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.18.1", "Character encoding", Severity::Error, 1.0);
}

impl AlbumRule for CharacterEncoding {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut flag = |track: u32, what: &str, value: &str| {
            if let Some(problem) = encoding_problem(value) {
                issues.push(Self::META.default_issue(track, format!("{} {}", what, problem)));
            }
        };

        flag(0, "album title", &actual.title);
        if let Some(folder) = actual.folder_name.as_deref() {
            flag(0, "folder name", folder);
        }
        for track in &actual.tracks {
            flag(track.number, "track title", &track.title);
            if let Some(path) = track.path.as_deref() {
                flag(track.number, "file path", path);
            }
        }
        for (track, artist) in distinct_artists(actual) {
            flag(track, "artist", &artist.name);
        }
        issues
    }
}

/// 2.3.18.2: tags are neither all upper nor all lower case
pub struct Capitalization;

impl Capitalization {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.18.2", "Tag capitalization", Severity::Error, 0.75);
}

fn case_problem(value: &str) -> Option<&'static str> {
    match letter_case(value)? {
        LetterCase::Upper => Some("is all upper case"),
        LetterCase::Lower => Some("is all lower case"),
    }
}

impl AlbumRule for Capitalization {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut flag = |track: u32, what: &str, value: &str| {
            if let Some(problem) = case_problem(value) {
                issues.push(Self::META.default_issue(track, format!("{} '{}' {}", what, value, problem)));
            }
        };

        flag(0, "album title", &actual.title);
        for track in &actual.tracks {
            flag(track.number, "track title", &track.title);
        }
        for (track, artist) in distinct_artists(actual) {
            flag(track, "artist", &artist.name);
        }
        issues
    }
}

/// 2.3.18.2.ref: capitalization and punctuation follow the reference
pub struct CapitalizationVsReference;

impl CapitalizationVsReference {
    pub const META: RuleMetadata = RuleMetadata::new(
        "2.3.18.2.ref",
        "Capitalization vs reference",
        Severity::Warning,
        0.25,
    );
}

fn differs_only_in_style(actual: &str, reference: &str) -> bool {
    actual != reference && normalize_title(actual) == normalize_title(reference)
}

impl AlbumRule for CapitalizationVsReference {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue> {
        let Some(reference) = reference else {
            return Vec::new();
        };
        let mut issues = Vec::new();

        if differs_only_in_style(&actual.title, &reference.title) {
            issues.push(Self::META.default_issue(
                0,
                format!(
                    "album title '{}' should be written '{}'",
                    actual.title, reference.title
                ),
            ));
        }

        let index = reference.track_index();
        for track in &actual.tracks {
            let Some(reference_track) = index.get(&track.key()) else {
                continue;
            };
            if differs_only_in_style(&track.title, &reference_track.title) {
                issues.push(Self::META.default_issue(
                    track.number,
                    format!(
                        "title '{}' should be written '{}'",
                        track.title, reference_track.title
                    ),
                ));
            }
        }
        issues
    }
}

/// Separators that join several people in one tag
const ARTIST_SEPARATORS: [&str; 5] = [";", " / ", " & ", ", ", " and "];

/// Words marking a single ensemble name ("Orchestra and Chorus of ...")
const ENSEMBLE_WORDS: [&str; 16] = [
    "orchestra",
    "choir",
    "chorus",
    "ensemble",
    "quartet",
    "quintet",
    "trio",
    "consort",
    "singers",
    "philharmonic",
    "philharmonia",
    "sinfonia",
    "of",
    "the",
    "de",
    "la",
];

/// Separators that join several works in one title
const TITLE_SEPARATORS: [&str; 3] = ["; ", " / ", " & "];

/// Each side of a joined title must exceed this to count as a work
const MIN_WORK_TITLE_LEN: usize = 10;

/// "1. Allegro", "03 - Aria", "01 Prelude", "Track 5"
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:\d{1,3}\s*[\-._:]|0\d+\s|track\s*\d+)")
        .expect("leading number regex is valid")
});

/// Album title ending in a disc marker; group 1 is what precedes it
static DISC_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)[\s\-_:,(\[]*\b(?:disc|cd)\s*\d+\s*[)\]]?\s*$")
        .expect("disc suffix regex is valid")
});

fn split_all<'a>(value: &'a str, separators: &[&str]) -> Vec<&'a str> {
    let mut parts = vec![value];
    for &sep in separators {
        parts = parts.into_iter().flat_map(|p| p.split(sep)).collect();
    }
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect()
}

fn is_initials(part: &str) -> bool {
    part.chars().filter(|c| c.is_alphabetic()).count() <= 3
        && part.chars().all(|c| c.is_alphabetic() || c == '.' || c == ' ' || c == '-')
}

fn looks_like_ensemble(name: &str) -> bool {
    name.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .any(|w| ENSEMBLE_WORDS.contains(&w.as_str()))
}

fn is_capitalized_pair(part: &str) -> bool {
    let words: Vec<&str> = part.split_whitespace().collect();
    words.len() == 2
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}

/// Whether an artist tag names several people
pub fn is_combined_artist(name: &str) -> bool {
    let separators: Vec<&str> = ARTIST_SEPARATORS
        .iter()
        .copied()
        .filter(|s| name.contains(s))
        .collect();
    if separators.is_empty() || looks_like_ensemble(name) {
        return false;
    }

    let parts = split_all(name, &ARTIST_SEPARATORS);
    if parts.len() < 2 || parts.iter().any(|p| is_initials(p)) {
        return false;
    }

    if separators == [", "] {
        // "Bach, Johann Sebastian"
        if name.matches(',').count() == 1 && parts[0].split_whitespace().count() == 1 {
            return false;
        }
        // "Martha Argerich, Nelson Freire"
        if parts.iter().all(|p| is_capitalized_pair(p)) {
            return false;
        }
    }
    true
}

/// Title that seems to hold several works
fn multiple_works(title: &str) -> bool {
    TITLE_SEPARATORS.iter().any(|sep| {
        title.split_once(sep).is_some_and(|(left, right)| {
            left.trim().chars().count() > MIN_WORK_TITLE_LEN
                && right.trim().chars().count() > MIN_WORK_TITLE_LEN
        })
    })
}

/// Disc marker with too little before it ("CD 1", "Vol - Disc 2")
fn bare_disc_title(title: &str) -> bool {
    DISC_SUFFIX_RE
        .captures(title)
        .is_some_and(|caps| caps[1].chars().filter(|c| c.is_alphabetic()).count() < 4)
}

/// 2.3.18.3: one value per tag
pub struct CombinedTags;

impl CombinedTags {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.18.3", "No combined tags", Severity::Warning, 0.5);
}

impl AlbumRule for CombinedTags {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();

        if bare_disc_title(&actual.title) {
            issues.push(Self::META.issue(
                Severity::Warning,
                0,
                format!(
                    "album title '{}' is only a disc marker; use the album name",
                    actual.title
                ),
            ));
        }

        for (track, artist) in distinct_artists(actual) {
            if is_combined_artist(&artist.name) {
                issues.push(Self::META.issue(
                    Severity::Warning,
                    track,
                    format!(
                        "artist '{}' combines several names; use one artist entry each",
                        artist.name.trim()
                    ),
                ));
            }
        }

        for track in &actual.tracks {
            if LEADING_NUMBER_RE.is_match(&track.title) {
                issues.push(Self::META.issue(
                    Severity::Warning,
                    track.number,
                    format!("title '{}' starts with a track number", track.title),
                ));
            }
            if multiple_works(&track.title) {
                issues.push(Self::META.issue(
                    Severity::Info,
                    track.number,
                    format!("title '{}' may be multiple works", track.title),
                ));
            }
        }
        issues
    }
}

static DISC_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:disc|cd|disk|volume|vol\.?)\s*\d+").expect("disc number regex is valid")
});

static VOLUME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bvol(?:ume|\.)?\s*\d+").expect("volume regex is valid"));

static SERIES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)complete works|collected|recordings|anthology|collection|edition|series")
        .expect("series regex is valid")
});

static VOLUME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bvol(?:ume|\.)?\s*\d+\s*-\s*\d+").expect("volume range regex is valid")
});

/// Volume numbering that belongs to a published series
fn is_volume_series(title: &str) -> bool {
    VOLUME_RANGE_RE.is_match(title) || (VOLUME_RE.is_match(title) && SERIES_RE.is_match(title))
}

/// 2.3.18.3.3
pub struct DiscNumberInAlbumTitle;

impl DiscNumberInAlbumTitle {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.18.3.3", "No disc numbers in album tag", Severity::Warning, 0.5);
}

impl AlbumRule for DiscNumberInAlbumTitle {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        match DISC_NUMBER_RE.find(&actual.title) {
            Some(m) if !is_volume_series(&actual.title) => vec![Self::META.default_issue(
                0,
                format!(
                    "album title '{}' contains disc number '{}'; disc numbers belong in the disc tag",
                    actual.title,
                    m.as_str()
                ),
            )],
            _ => Vec::new(),
        }
    }
}
