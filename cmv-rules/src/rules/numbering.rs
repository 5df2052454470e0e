//! Track numbering and required tags

use crate::rule::{AlbumRule, CheckContext, RuleMetadata};
use cmv_common::{Album, Issue, Severity};
use std::collections::BTreeSet;

/// Inclusive ranges missing from `1..=max(present)`, in ascending order
///
/// Walks the present numbers only, so the work is bounded by the input size
/// however large the numbers are.
fn gaps(present: &BTreeSet<u32>) -> Vec<(u32, u32)> {
    let mut gaps = Vec::new();
    let mut expected = 1u32;
    for &n in present {
        if n > expected {
            gaps.push((expected, n - 1));
        }
        expected = expected.max(n.saturating_add(1));
    }
    gaps
}

fn format_range(&(from, to): &(u32, u32)) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{}-{}", from, to)
    }
}

fn format_gaps(gaps: &[(u32, u32)]) -> String {
    gaps.iter().map(format_range).collect::<Vec<_>>().join(", ")
}

/// 2.3.10: each disc numbers its tracks 1..N without gaps or repeats
pub struct TrackNumbering;

impl TrackNumbering {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.10", "Track-number format", Severity::Info, 0.25);
}

impl AlbumRule for TrackNumbering {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (disc, numbers) in actual.tracks_by_disc() {
            let mut unique = BTreeSet::new();
            let mut duplicates = BTreeSet::new();
            for n in &numbers {
                if !unique.insert(*n) {
                    duplicates.insert(*n);
                }
            }
            for n in duplicates {
                issues.push(Self::META.default_issue(
                    n,
                    format!("disc {}: track number {} is used more than once", disc, n),
                ));
            }

            let first = unique.iter().next().copied().unwrap_or(1);
            let missing = gaps(&unique);
            if first != 1 {
                issues.push(Self::META.default_issue(
                    0,
                    format!("disc {}: track numbering starts at {} instead of 1", disc, first),
                ));
            } else if !missing.is_empty() {
                issues.push(Self::META.default_issue(
                    0,
                    format!(
                        "disc {}: track numbers are not contiguous (missing {})",
                        disc,
                        format_gaps(&missing)
                    ),
                ));
            }
        }
        issues
    }
}

/// 2.3.15: every disc starts at track 1 and no disc is missing
pub struct MultiDiscNumbering;

impl MultiDiscNumbering {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.15", "Multi-disc numbering", Severity::Error, 1.0);
}

impl AlbumRule for MultiDiscNumbering {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        if !actual.is_multi_disc() {
            return Vec::new();
        }

        let mut issues = Vec::new();
        for (disc, numbers) in actual.tracks_by_disc() {
            let first = numbers.iter().min().copied().unwrap_or(1);
            if first != 1 {
                issues.push(Self::META.issue(
                    Severity::Error,
                    first,
                    format!("disc {} starts at track {}; each disc must restart at 1", disc, first),
                ));
            }
        }

        let total = actual.disc_count();
        for range in gaps(&actual.disc_numbers()) {
            let message = if range.0 == range.1 {
                format!("disc {} of {} is missing", range.0, total)
            } else {
                format!("discs {} of {} are missing", format_range(&range), total)
            };
            issues.push(Self::META.issue(Severity::Warning, 0, message));
        }
        issues
    }
}

/// 2.3.16.4: tags every release must carry
pub struct RequiredTags;

impl RequiredTags {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.16.4", "Required tags", Severity::Error, 1.0);
}

impl AlbumRule for RequiredTags {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();

        if actual.title.trim().is_empty() {
            issues.push(Self::META.default_issue(0, "album title is empty"));
        }
        if actual.tracks.is_empty() {
            issues.push(Self::META.default_issue(0, "album has no tracks"));
        }
        if actual.year().is_none() {
            issues.push(Self::META.issue(Severity::Warning, 0, "album year is not set"));
        }

        for track in &actual.tracks {
            if track.title.trim().is_empty() {
                issues.push(Self::META.default_issue(track.number, "track title is empty"));
            }
            if track.artists.iter().all(|a| a.name.trim().is_empty()) {
                issues.push(Self::META.default_issue(track.number, "track has no artist"));
            } else if !track.has_performer() {
                issues.push(Self::META.default_issue(
                    track.number,
                    "track lists no performer (only composers or arrangers)",
                ));
            }
        }
        issues
    }
}
