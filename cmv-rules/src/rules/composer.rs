//! Composer naming rules
//!
//! The composer belongs in the composer tag and in the release name, never
//! in the track title (except in homage-style titles that cite another
//! composer's theme).

use crate::rule::{AlbumRule, CheckContext, RuleMetadata, TrackRule};
use crate::text::names::{abbreviations, base_surname, fold, mentions_surname};
use crate::text::{contains_word, has_acceptable_abbreviation, mentions_full_name};
use cmv_common::{Album, Issue, Severity, Track};
use once_cell::sync::Lazy;
use regex::Regex;

/// Title phrases that legitimately cite a composer; the name follows the phrase
static CITATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:variations?\s+on\s+an?\s+(?:\w+\s+)?theme\s+(?:by|of)|after|hom+age\s+(?:to|à|a)|in\s+memory\s+of|in\s+memoriam|tombeau\s+de)\s+(.+)",
    )
    .expect("citation regex is valid")
});

/// Whether `title` cites `surname` through a homage-style phrase
fn is_cited(title: &str, surname: &str) -> bool {
    let surname = fold(surname);
    CITATION_RE
        .captures_iter(title)
        .any(|caps| contains_word(&fold(&caps[1]), &surname))
}

/// classical.track_title
pub struct ComposerNotInTitle;

impl ComposerNotInTitle {
    pub const META: RuleMetadata =
        RuleMetadata::new("classical.track_title", "Composer not in title", Severity::Error, 0.75);
}

impl TrackRule for ComposerNotInTitle {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(
        &self,
        _ctx: &CheckContext,
        track: &Track,
        _reference_track: Option<&Track>,
        _album: &Album,
        _reference: Option<&Album>,
    ) -> Vec<Issue> {
        let mut seen = Vec::new();
        let mut issues = Vec::new();
        for composer in track.composers() {
            let surname = base_surname(&composer.name);
            if surname.is_empty() || seen.contains(&surname) {
                continue;
            }
            if mentions_surname(&track.title, &composer.name) && !is_cited(&track.title, &surname) {
                issues.push(Self::META.default_issue(
                    track.number,
                    format!(
                        "title '{}' names the composer '{}'; keep the composer in the composer tag",
                        track.title, surname
                    ),
                ));
            }
            seen.push(surname);
        }
        issues
    }
}

/// Release name as seen by users: album title plus folder name
fn release_text(album: &Album) -> String {
    match album.folder_name.as_deref() {
        Some(folder) => format!("{} {}", album.title, folder),
        None => album.title.clone(),
    }
}

fn names_fully(text: &str, composer: &str) -> bool {
    mentions_full_name(text, composer) || has_acceptable_abbreviation(text, composer)
}

/// classical.folder_name
pub struct ComposerInFolderName;

impl ComposerInFolderName {
    pub const META: RuleMetadata =
        RuleMetadata::new("classical.folder_name", "Composer in folder name", Severity::Warning, 0.5);
}

impl AlbumRule for ComposerInFolderName {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        if actual.is_various_artists() {
            return Vec::new();
        }

        let text = release_text(actual);
        let mut issues = Vec::new();
        for composer in actual.dominant_composers() {
            if names_fully(&text, composer) {
                continue;
            }
            if mentions_surname(&text, composer) {
                issues.push(Self::META.issue(
                    Severity::Info,
                    0,
                    format!(
                        "release name gives only the surname of '{}'; consider the full name",
                        composer
                    ),
                ));
            } else {
                issues.push(Self::META.issue(
                    Severity::Warning,
                    0,
                    format!("primary composer '{}' is not named in the release name", composer),
                ));
            }
        }
        issues
    }
}

/// Composers recognizable by surname alone (folded)
pub const SURNAME_SUFFICIENT: [&str; 24] = [
    "vivaldi",
    "beethoven",
    "mozart",
    "chopin",
    "handel",
    "haendel",
    "haydn",
    "brahms",
    "tchaikovsky",
    "rachmaninoff",
    "mahler",
    "bruckner",
    "debussy",
    "ravel",
    "schubert",
    "mendelssohn",
    "stravinsky",
    "shostakovich",
    "prokofiev",
    "sibelius",
    "dvorak",
    "monteverdi",
    "palestrina",
    "rachmaninov",
];

pub fn surname_sufficient(name: &str) -> bool {
    SURNAME_SUFFICIENT.contains(&fold(&base_surname(name)).as_str())
}

/// 2.3.17
pub struct FullComposerName;

impl FullComposerName {
    pub const META: RuleMetadata = RuleMetadata::new(
        "2.3.17",
        "Torrent artist uses full composer name",
        Severity::Warning,
        0.5,
    );
}

impl AlbumRule for FullComposerName {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let text = release_text(actual);
        let mut issues = Vec::new();
        for composer in actual.dominant_composers() {
            if !mentions_surname(&text, composer) {
                issues.push(Self::META.issue(
                    Severity::Info,
                    0,
                    format!("release name does not mention composer '{}'", composer),
                ));
            } else if !names_fully(&text, composer) && !surname_sufficient(composer) {
                issues.push(Self::META.issue(
                    Severity::Warning,
                    0,
                    format!(
                        "release name should use the full name '{}' or an abbreviation such as '{}'",
                        composer,
                        abbreviations(composer)
                            .into_iter()
                            .next()
                            .unwrap_or_else(|| composer.to_string())
                    ),
                ));
            }
        }
        issues
    }
}
