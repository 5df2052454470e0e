//! Year and date rules

use crate::rule::{AlbumRule, CheckContext, RuleMetadata};
use cmv_common::{Album, Issue, Severity};

/// Years before this are almost certainly data-entry mistakes
pub const EARLIEST_YEAR: u32 = 1900;

/// 2.3.4: recording year and edition year tell a plausible story
pub struct RecordingDate;

impl RecordingDate {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.4", "Recording date vs edition year", Severity::Info, 0.25);
}

impl AlbumRule for RecordingDate {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let (Some(year), Some(edition_year)) = (actual.year(), actual.edition_year()) {
            let gap = i64::from(edition_year) - i64::from(year);
            let message = if gap < 0 {
                Some(format!(
                    "edition year {} precedes recording year {}",
                    edition_year, year
                ))
            } else if gap > 10 {
                Some(format!(
                    "edition year {} is {} years after recording year {}; likely a reissue",
                    edition_year, gap, year
                ))
            } else if gap >= 3 {
                Some(format!(
                    "edition year {} is {} years after recording year {}; check the recording date",
                    edition_year, gap, year
                ))
            } else {
                None
            };
            issues.extend(message.map(|m| Self::META.default_issue(0, m)));
        }

        if let Some(reference_year) = reference.and_then(Album::year) {
            if let Some(year) = actual.year().filter(|y| *y != reference_year) {
                issues.push(Self::META.default_issue(
                    0,
                    format!("recording year {} differs from reference {}", year, reference_year),
                ));
            }
        }
        issues
    }
}

/// 2.3.8
pub struct YearUsage;

impl YearUsage {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.8", "Year field usage", Severity::Error, 0.75);

    fn check_range(ctx: &CheckContext, what: &str, year: u32, issues: &mut Vec<Issue>) {
        if year < EARLIEST_YEAR {
            issues.push(Self::META.issue(
                Severity::Warning,
                0,
                format!("{} {} is before {}", what, year, EARLIEST_YEAR),
            ));
        } else if i64::from(year) > i64::from(ctx.current_year) + 1 {
            issues.push(Self::META.issue(
                Severity::Error,
                0,
                format!("{} {} is in the future (current year {})", what, year, ctx.current_year),
            ));
        }
    }
}

impl AlbumRule for YearUsage {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let Some(year) = actual.year() {
            Self::check_range(ctx, "album year", year, &mut issues);
        }
        if let Some(year) = actual.edition_year() {
            Self::check_range(ctx, "edition year", year, &mut issues);
        }

        if let (Some(year), Some(edition_year)) = (actual.year(), actual.edition_year()) {
            if edition_year < year {
                issues.push(Self::META.issue(
                    Severity::Warning,
                    0,
                    format!("edition year {} is earlier than album year {}", edition_year, year),
                ));
            }
        }

        if let (Some(year), Some(reference_year)) = (actual.year(), reference.and_then(Album::year)) {
            if year != reference_year {
                issues.push(Self::META.issue(
                    Severity::Error,
                    0,
                    format!("album year {} differs from reference {}", year, reference_year),
                ));
            }
        }
        issues
    }
}
