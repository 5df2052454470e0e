//! Structural and filesystem rules

use crate::rule::{AlbumRule, CheckContext, RuleMetadata};
use crate::text::{disc_folder, is_archive, is_disc_folder};
use cmv_common::{Album, Issue, Severity};
use std::collections::HashSet;

/// 2.3.1: archives are never part of a release
pub struct NoArchives;

impl NoArchives {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.1", "No archive files", Severity::Error, 1.0);
}

impl AlbumRule for NoArchives {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        actual
            .tracks
            .iter()
            .filter_map(|t| t.path.as_deref().filter(|p| is_archive(p)).map(|p| (t.number, p)))
            .map(|(number, path)| {
                Self::META.default_issue(number, format!("archive file '{}' is not allowed", path))
            })
            .collect()
    }
}

/// 2.3.3: files sit at the album root, or one disc folder deep on multi-disc albums
pub struct NestedFolders;

impl NestedFolders {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.3", "No unnecessary nested folders", Severity::Error, 1.0);
}

impl AlbumRule for NestedFolders {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let multi_disc = actual.is_multi_disc();
        let mut reported = HashSet::new();
        let mut issues = Vec::new();

        for track in &actual.tracks {
            let dirs = track.directories();
            if dirs.is_empty() {
                continue;
            }
            let folder = dirs.join("/");
            let allowed = multi_disc && dirs.len() == 1 && is_disc_folder(dirs[0]);
            if allowed || !reported.insert(folder.clone()) {
                continue;
            }

            let message = if multi_disc {
                format!(
                    "folder '{}' is not a single disc folder (CD1, Disc 2, ...)",
                    folder
                )
            } else {
                format!("unnecessary nested folder '{}' on a single-disc album", folder)
            };
            issues.push(Self::META.default_issue(track.number, message));
        }
        issues
    }
}

/// Discs counted from which disc folders must be zero-padded
pub const PADDED_DISC_THRESHOLD: u32 = 10;

/// 2.3.19: disc folders sort correctly on albums with ten or more discs
pub struct DiscFolderPadding;

impl DiscFolderPadding {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.19", "Multi-disc folder sorting", Severity::Info, 0.25);
}

impl AlbumRule for DiscFolderPadding {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        if actual.disc_count() < PADDED_DISC_THRESHOLD {
            return Vec::new();
        }

        let mut reported = HashSet::new();
        let mut issues = Vec::new();
        for track in &actual.tracks {
            for dir in track.directories() {
                let Some(folder) = disc_folder(dir) else {
                    continue;
                };
                if folder.digits.len() == 1 && reported.insert(dir) {
                    issues.push(Self::META.default_issue(
                        track.number,
                        format!(
                            "disc folder '{}' should be zero-padded (e.g. '{}')",
                            dir,
                            dir.replace(&folder.digits, &format!("0{}", folder.digits))
                        ),
                    ));
                }
            }
        }
        issues
    }
}

/// 2.3.20: no field starts with whitespace
pub struct LeadingSpaces;

impl LeadingSpaces {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.20", "No leading spaces", Severity::Error, 0.75);
}

fn leading_space(s: &str) -> bool {
    s.starts_with(char::is_whitespace)
}

impl AlbumRule for LeadingSpaces {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut flag = |track: u32, what: &str, value: &str| {
            if leading_space(value) {
                issues.push(
                    Self::META.default_issue(track, format!("{} '{}' starts with whitespace", what, value)),
                );
            }
        };

        flag(0, "album title", &actual.title);
        if let Some(folder) = actual.folder_name.as_deref() {
            flag(0, "folder name", folder);
        }
        for artist in &actual.album_artists {
            flag(0, "album artist", &artist.name);
        }

        let mut seen_segments = HashSet::new();
        for track in &actual.tracks {
            flag(track.number, "track title", &track.title);
            for artist in &track.artists {
                flag(track.number, "artist", &artist.name);
            }
            if let Some(path) = track.path.as_deref() {
                for segment in path.split('/').filter(|s| !s.is_empty()) {
                    if seen_segments.insert(segment) {
                        flag(track.number, "path segment", segment);
                    }
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{beethoven, ctx};
    use cmv_common::Track;

    #[test]
    fn test_archive_flagged_per_track() {
        let album = beethoven()
            .with_track(Track::new(1, 2, "Booklet").with_path("booklet.zip"))
            .with_track(Track::new(1, 3, "Scans").with_path("Scans.RAR"));
        let issues = NoArchives.check(&ctx(), &album, None);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].track, 2);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[1].message.contains("Scans.RAR"));

        assert!(NoArchives.check(&ctx(), &beethoven(), None).is_empty());
    }

    #[test]
    fn test_single_disc_folder_is_unnecessary() {
        let album = Album::new("A")
            .with_track(Track::new(1, 1, "a").with_path("Music/01 a.flac"))
            .with_track(Track::new(1, 2, "b").with_path("Music/02 b.flac"));
        let issues = NestedFolders.check(&ctx(), &album, None);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'Music'"));
    }

    #[test]
    fn test_multi_disc_folders() {
        let ok = Album::new("A")
            .with_track(Track::new(1, 1, "a").with_path("CD1/01 a.flac"))
            .with_track(Track::new(2, 1, "b").with_path("Disc 2/01 b.flac"));
        assert!(NestedFolders.check(&ctx(), &ok, None).is_empty());

        let bad = Album::new("A")
            .with_track(Track::new(1, 1, "a").with_path("CD1/Extra/01 a.flac"))
            .with_track(Track::new(2, 1, "b").with_path("Symphonies/01 b.flac"))
            .with_track(Track::new(2, 2, "c").with_path("Symphonies/02 c.flac"));
        let issues = NestedFolders.check(&ctx(), &bad, None);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_disc_folder_padding() {
        let mut album = Album::new("Complete Edition");
        for disc in 1..=10 {
            album = album.with_track(
                Track::new(disc, 1, "x").with_path(format!("CD{}/01 x.flac", disc)),
            );
        }
        let issues = DiscFolderPadding.check(&ctx(), &album, None);
        assert_eq!(issues.len(), 9);
        assert!(issues[0].message.contains("'CD01'"));
        assert!(issues.iter().all(|i| i.severity == Severity::Info));

        let mut small = Album::new("Small");
        for disc in 1..=3 {
            small = small.with_track(Track::new(disc, 1, "x").with_path(format!("CD{}/01 x.flac", disc)));
        }
        assert!(DiscFolderPadding.check(&ctx(), &small, None).is_empty());
    }

    #[test]
    fn test_leading_spaces() {
        let album = Album::new(" Requiem")
            .with_track(Track::new(1, 1, " Introitus").with_path(" CD1/01 Introitus.flac"));
        let issues = LeadingSpaces.check(&ctx(), &album, None);
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].track, 0);
        assert_eq!(issues[1].track, 1);

        assert!(LeadingSpaces.check(&ctx(), &beethoven(), None).is_empty());
    }
}
