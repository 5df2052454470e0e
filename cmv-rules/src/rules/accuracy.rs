//! Accuracy against a trusted reference
//!
//! Comparison checks run only when a reference is supplied. Filename
//! consistency compares the actual album with itself and always runs.

use crate::rule::{AlbumRule, CheckContext, RuleMetadata, TrackRule};
use crate::text::names::base_surname;
use crate::text::{
    compare_titles, fold, normalize_title, title_from_filename, work_numbers_conflict, TitleMatch,
};
use cmv_common::{Album, Issue, Severity, Track};
use std::collections::BTreeSet;

/// Edits tolerated as a typo
pub const MINOR_DISTANCE: usize = 3;
/// Edits beyond which titles are considered different
pub const MAJOR_DISTANCE: usize = 10;

/// Severity for a title comparison; `None` when the titles agree
fn grade(m: TitleMatch) -> Option<(Severity, usize)> {
    match m {
        TitleMatch::Exact | TitleMatch::Contained => None,
        TitleMatch::Distance(d) if d <= MINOR_DISTANCE => Some((Severity::Info, d)),
        TitleMatch::Distance(d) if d <= MAJOR_DISTANCE => Some((Severity::Warning, d)),
        TitleMatch::Distance(d) => Some((Severity::Error, d)),
    }
}

/// 2.3.6
pub struct AlbumTitleAccuracy;

impl AlbumTitleAccuracy {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.6", "Album-title accuracy", Severity::Error, 1.0);
}

impl AlbumRule for AlbumTitleAccuracy {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue> {
        let Some(reference) = reference else {
            return Vec::new();
        };
        match grade(compare_titles(&actual.title, &reference.title)) {
            Some((severity, distance)) => vec![Self::META.issue(
                severity,
                0,
                format!(
                    "album title '{}' differs from reference '{}' ({} edits)",
                    actual.title, reference.title, distance
                ),
            )],
            None => Vec::new(),
        }
    }
}

/// 2.3.11
pub struct FilenameMatchesTitle;

impl FilenameMatchesTitle {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.11", "Filenames match titles", Severity::Error, 0.75);
}

impl TrackRule for FilenameMatchesTitle {
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
        if track.title.trim().is_empty() {
            return Vec::new();
        }
        let Some(file_name) = track.file_name() else {
            return Vec::new();
        };
        let Some(file_title) = title_from_filename(file_name) else {
            return Vec::new();
        };

        if compare_titles(&file_title, &track.title).within(MINOR_DISTANCE) {
            Vec::new()
        } else {
            vec![Self::META.default_issue(
                track.number,
                format!(
                    "file name '{}' does not match title '{}'",
                    file_name, track.title
                ),
            )]
        }
    }
}

fn composer_surnames(track: &Track) -> BTreeSet<String> {
    track
        .composers()
        .map(|c| fold(&base_surname(&c.name)))
        .filter(|s| !s.is_empty())
        .collect()
}

/// 2.3.18.4: tags agree with the reference, track by track
pub struct TagAccuracy;

impl TagAccuracy {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.18.4", "Tag accuracy vs reference", Severity::Error, 1.0);

    fn check_title(track: &Track, reference: &Track) -> Option<Issue> {
        if work_numbers_conflict(&track.title, &reference.title) {
            return Some(Self::META.issue(
                Severity::Error,
                track.number,
                format!(
                    "work numbers in '{}' differ from reference '{}'",
                    track.title, reference.title
                ),
            ));
        }

        grade(compare_titles(&track.title, &reference.title)).map(|(severity, distance)| {
            Self::META.issue(
                severity,
                track.number,
                format!(
                    "title '{}' differs from reference '{}' ({} edits)",
                    track.title, reference.title, distance
                ),
            )
        })
    }
}

impl AlbumRule for TagAccuracy {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue> {
        let Some(reference) = reference else {
            return Vec::new();
        };
        let mut issues = Vec::new();

        if let (Some(year), Some(reference_year)) = (actual.year(), reference.year()) {
            if year != reference_year {
                issues.push(Self::META.issue(
                    Severity::Warning,
                    0,
                    format!("album year {} differs from reference {}", year, reference_year),
                ));
            }
        }

        let index = reference.track_index();
        for track in &actual.tracks {
            let Some(reference_track) = index.get(&track.key()) else {
                continue;
            };
            issues.extend(Self::check_title(track, reference_track));

            let expected = composer_surnames(reference_track);
            let found = composer_surnames(track);
            if !expected.is_empty() && expected != found {
                issues.push(Self::META.issue(
                    Severity::Error,
                    track.number,
                    format!(
                        "composers [{}] differ from reference [{}]",
                        found.into_iter().collect::<Vec<_>>().join(", "),
                        expected.into_iter().collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
        }
        issues
    }
}

fn normalized_catalog(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// classical.record_label.accuracy
pub struct RecordLabelAccuracy;

impl RecordLabelAccuracy {
    pub const META: RuleMetadata = RuleMetadata::new(
        "classical.record_label.accuracy",
        "Record label accuracy",
        Severity::Error,
        0.75,
    );
}

impl AlbumRule for RecordLabelAccuracy {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue> {
        let Some(expected) = reference.and_then(|r| r.edition.as_ref()) else {
            return Vec::new();
        };
        let edition = actual.edition.as_ref();
        let mut issues = Vec::new();

        if let Some(reference_label) = expected.label() {
            let label = edition.and_then(|e| e.label());
            let matches = label
                .is_some_and(|l| normalize_title(&fold(l)) == normalize_title(&fold(reference_label)));
            if !matches {
                issues.push(Self::META.default_issue(
                    0,
                    format!(
                        "label '{}' does not match reference '{}'",
                        label.unwrap_or(""),
                        reference_label
                    ),
                ));
            }
        }

        if let Some(reference_catalog) = expected.catalog_number() {
            let catalog = edition.and_then(|e| e.catalog_number());
            let matches =
                catalog.is_some_and(|c| normalized_catalog(c) == normalized_catalog(reference_catalog));
            if !matches {
                issues.push(Self::META.default_issue(
                    0,
                    format!(
                        "catalog number '{}' does not match reference '{}'",
                        catalog.unwrap_or(""),
                        reference_catalog
                    ),
                ));
            }
        }
        issues
    }
}

/// classical.record_label
pub struct RecordLabelPresent;

impl RecordLabelPresent {
    pub const META: RuleMetadata =
        RuleMetadata::new("classical.record_label", "Record label present", Severity::Warning, 0.25);
}

impl AlbumRule for RecordLabelPresent {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let Some(edition) = actual.edition.as_ref() else {
            return vec![Self::META.issue(
                Severity::Info,
                0,
                "no edition information (label, catalog number)",
            )];
        };

        let mut issues = Vec::new();
        if edition.label().is_none() {
            issues.push(Self::META.issue(Severity::Warning, 0, "edition has no record label"));
        }
        if edition.catalog_number().is_none() {
            issues.push(Self::META.issue(Severity::Warning, 0, "edition has no catalog number"));
        }
        issues
    }
}
