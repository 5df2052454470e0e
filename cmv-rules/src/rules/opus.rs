//! classical.opus: catalogue numbers in track titles

use crate::rule::{CheckContext, RuleMetadata, TrackRule};
use crate::text::{base_surname, catalogue_tokens, has_catalogue_number, has_known_catalogue};
use cmv_common::{Album, Issue, Severity, Track};
use std::collections::BTreeSet;

pub struct CatalogueNumbers;

impl CatalogueNumbers {
    pub const META: RuleMetadata =
        RuleMetadata::new("classical.opus", "Opus/catalogue numbers", Severity::Info, 0.25);
}

impl TrackRule for CatalogueNumbers {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(
        &self,
        _ctx: &CheckContext,
        track: &Track,
        reference_track: Option<&Track>,
        _album: &Album,
        _reference: Option<&Album>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        if !has_catalogue_number(&track.title) {
            let catalogued = track
                .composers()
                .map(|c| base_surname(&c.name))
                .find(|surname| has_known_catalogue(surname));
            if let Some(surname) = catalogued {
                issues.push(Self::META.default_issue(
                    track.number,
                    format!(
                        "title '{}' has no catalogue number; {} works are usually cited by one",
                        track.title, surname
                    ),
                ));
            }
        }

        if let Some(reference_track) = reference_track {
            let found: BTreeSet<String> = catalogue_tokens(&track.title).into_iter().collect();
            let expected: BTreeSet<String> =
                catalogue_tokens(&reference_track.title).into_iter().collect();
            if !found.is_empty() && !expected.is_empty() && found != expected {
                issues.push(Self::META.default_issue(
                    track.number,
                    format!(
                        "catalogue numbers [{}] differ from reference [{}]",
                        found.into_iter().collect::<Vec<_>>().join(", "),
                        expected.into_iter().collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
        }
        issues
    }
}
