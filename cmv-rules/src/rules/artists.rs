//! Artist tag rules

use crate::rule::{AlbumRule, CheckContext, RuleMetadata, TrackRule};
use crate::text::names::{base_surname, mentions_surname};
use crate::text::{contains_word, names_match_lax};
use cmv_common::{Album, Artist, Issue, Role, Severity, Track, VARIOUS_ARTISTS};

/// 2.3.7-present: the album artist tag names someone who performs here
pub struct AlbumArtistTag;

impl AlbumArtistTag {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.7-present", "Album artist tag", Severity::Error, 0.5);

    fn check_unset(actual: &Album, issues: &mut Vec<Issue>) {
        let has_soloist = actual
            .tracks
            .iter()
            .any(|t| t.artists_with_role(Role::Soloist).next().is_some());
        if !has_soloist {
            let tracks = actual.tracks.len();
            let mut frequent = actual.performer_frequency();
            // Stable: ties keep first appearance
            frequent.sort_by(|a, b| b.1.cmp(&a.1));
            if let Some((name, count)) = frequent.first().filter(|(_, c)| c * 2 > tracks) {
                issues.push(Self::META.issue(
                    Severity::Info,
                    0,
                    format!(
                        "album artist is not set; '{}' performs on {} of {} tracks and could be used",
                        name, count, tracks
                    ),
                ));
            }
        }

        let composers = actual.composer_frequency().len();
        if composers >= 2 {
            issues.push(Self::META.issue(
                Severity::Info,
                0,
                format!(
                    "album artist is not set; with {} composers use '{}' or the main performer",
                    composers, VARIOUS_ARTISTS
                ),
            ));
        }
    }
}

impl AlbumRule for AlbumArtistTag {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let mut issues = Vec::new();
        if !actual.album_artist_is_set() {
            Self::check_unset(actual, &mut issues);
            return issues;
        }
        if actual.is_various_artists() {
            return issues;
        }

        for album_artist in actual.album_artists.iter().filter(|a| !a.name.trim().is_empty()) {
            let credited = actual
                .tracks
                .iter()
                .flat_map(|t| t.artists.iter())
                .any(|a| names_match_lax(&a.name, &album_artist.name));
            if !credited {
                issues.push(Self::META.issue(
                    Severity::Error,
                    0,
                    format!(
                        "album artist '{}' does not appear on any track",
                        album_artist.name.trim()
                    ),
                ));
            }
        }
        issues
    }
}

/// 2.3.7-format
pub struct ArtistFieldFormat;

impl ArtistFieldFormat {
    pub const META: RuleMetadata =
        RuleMetadata::new("2.3.7-format", "Artist field format", Severity::Warning, 0.5);
}

impl TrackRule for ArtistFieldFormat {
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
        let performers = track.performers().count();
        if performers == 0 {
            issues.push(Self::META.issue(
                Severity::Warning,
                track.number,
                "artist field lists no performer",
            ));
        }
        if let Some(reference_track) = reference_track {
            let expected = reference_track.performers().count();
            if expected != performers {
                issues.push(Self::META.issue(
                    Severity::Info,
                    track.number,
                    format!("{} performers listed, reference has {}", performers, expected),
                ));
            }
        }
        issues
    }
}

/// Position in the canonical credit order; `None` for roles that are not ordered
fn credit_rank(role: Role) -> Option<u8> {
    match role {
        Role::Soloist => Some(0),
        Role::Ensemble => Some(1),
        Role::Conductor => Some(2),
        Role::Composer | Role::Arranger | Role::Unknown => None,
    }
}

/// classical.artist_name: performers credited soloist(s), ensemble(s), conductor
pub struct PerformerOrder;

impl PerformerOrder {
    pub const META: RuleMetadata =
        RuleMetadata::new("classical.artist_name", "Performer order", Severity::Error, 0.25);
}

impl TrackRule for PerformerOrder {
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
        if !track.has_performer() {
            return vec![Self::META.issue(Severity::Error, track.number, "track has no performers")];
        }

        let ranks: Vec<u8> = track.artists.iter().filter_map(|a| credit_rank(a.role)).collect();
        if ranks.windows(2).all(|w| w[0] <= w[1]) {
            return Vec::new();
        }
        let order: Vec<String> = track
            .artists
            .iter()
            .filter(|a| credit_rank(a.role).is_some())
            .map(|a| format!("{} ({})", a.name.trim(), a.role))
            .collect();
        vec![Self::META.issue(
            Severity::Info,
            track.number,
            format!(
                "performers [{}] should be ordered soloist(s), ensemble(s), conductor",
                order.join(", ")
            ),
        )]
    }
}

/// Title words that credit an arrangement
const ARRANGEMENT_MARKERS: [&str; 5] = ["arr.", "arr ", "arranged", "transcription", "transcribed"];

/// classical.arrangement
pub struct ArrangerCredit;

impl ArrangerCredit {
    pub const META: RuleMetadata =
        RuleMetadata::new("classical.arrangement", "Arranger credit", Severity::Info, 0.25);
}

impl TrackRule for ArrangerCredit {
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
        let title = track.title.to_lowercase();
        let marked = ARRANGEMENT_MARKERS.iter().any(|m| title.contains(m));

        let mut issues = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for arranger in track.artists_with_role(Role::Arranger) {
            let surname = base_surname(&arranger.name);
            if surname.is_empty() || seen.contains(&surname) {
                continue;
            }
            if !(marked && mentions_surname(&track.title, &arranger.name)) {
                issues.push(Self::META.default_issue(
                    track.number,
                    format!(
                        "title should credit the arrangement, e.g. '{} (arr. {})'",
                        track.title.trim(),
                        surname
                    ),
                ));
            }
            seen.push(surname);
        }
        issues
    }
}

/// Title words marking a guest appearance
const GUEST_MARKERS: [&str; 4] = ["feat", "featuring", "with", "guest"];

fn marks_guest(title: &str) -> bool {
    GUEST_MARKERS.iter().any(|m| contains_word(title, m))
}

/// Albums up to this many tracks have no guests to speak of
pub const MIN_TRACKS_FOR_GUESTS: usize = 3;

/// classical.guest: occasional soloists and conductors are marked as guests
pub struct GuestArtists;

impl GuestArtists {
    pub const META: RuleMetadata = RuleMetadata::new(
        "classical.guest",
        "Guest artist identification",
        Severity::Info,
        0.25,
    );
}

fn is_featured(artist: &Artist) -> bool {
    matches!(artist.role, Role::Soloist | Role::Conductor)
}

impl AlbumRule for GuestArtists {
    fn metadata(&self) -> &RuleMetadata {
        &Self::META
    }

    fn check(&self, _ctx: &CheckContext, actual: &Album, _reference: Option<&Album>) -> Vec<Issue> {
        let total = actual.tracks.len();
        if total <= MIN_TRACKS_FOR_GUESTS {
            return Vec::new();
        }
        let threshold = (total + 2) / 3;

        let mut names: Vec<&str> = Vec::new();
        for artist in actual.tracks.iter().flat_map(|t| t.artists.iter()) {
            let name = artist.name.trim();
            if is_featured(artist) && !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        let mut issues = Vec::new();
        for name in names {
            let appearances: Vec<&Track> = actual
                .tracks
                .iter()
                .filter(|t| t.artists.iter().any(|a| is_featured(a) && a.name.trim() == name))
                .collect();
            if appearances.len() >= threshold {
                continue;
            }
            if let Some(first_unmarked) = appearances.iter().find(|t| !marks_guest(&t.title)) {
                issues.push(Self::META.default_issue(
                    first_unmarked.number,
                    format!(
                        "'{}' appears on {} of {} tracks; mark the guest appearance (e.g. 'with {}')",
                        name,
                        appearances.len(),
                        total,
                        name
                    ),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{beethoven, ctx};

    #[test]
    fn test_album_artist_must_perform() {
        let album = beethoven().with_album_artist(Artist::conductor("Herbert von Karajan"));
        let issues = AlbumArtistTag.check(&ctx(), &album, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);

        let album = beethoven().with_album_artist(Artist::ensemble("berlin philharmonic"));
        assert!(AlbumArtistTag.check(&ctx(), &album, None).is_empty());

        let various = beethoven().with_album_artist(Artist::new(VARIOUS_ARTISTS, Role::Unknown));
        assert!(AlbumArtistTag.check(&ctx(), &various, None).is_empty());
    }

    #[test]
    fn test_album_artist_suggestion_depends_on_soloist() {
        let issues = AlbumArtistTag.check(&ctx(), &beethoven(), None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        assert!(issues[0].message.contains("Berlin Philharmonic"));

        let mut with_soloist = beethoven();
        with_soloist.tracks[0].artists.push(Artist::soloist("Emil Gilels"));
        assert!(AlbumArtistTag.check(&ctx(), &with_soloist, None).is_empty());
    }

    #[test]
    fn test_album_artist_suggests_various_for_many_composers() {
        let album = Album::new("Encores")
            .with_track(
                Track::new(1, 1, "a")
                    .with_artist(Artist::composer("Fritz Kreisler"))
                    .with_artist(Artist::soloist("Hilary Hahn")),
            )
            .with_track(
                Track::new(1, 2, "b")
                    .with_artist(Artist::composer("Jules Massenet"))
                    .with_artist(Artist::soloist("Hilary Hahn")),
            );
        let issues = AlbumArtistTag.check(&ctx(), &album, None);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains(VARIOUS_ARTISTS));
    }

    #[test]
    fn test_artist_field_format() {
        let album = beethoven();
        let track = &album.tracks[0];
        assert!(ArtistFieldFormat.check(&ctx(), track, Some(track), &album, Some(&album)).is_empty());

        let bare = Track::new(1, 1, "x").with_artist(Artist::composer("Bach"));
        let issues = ArtistFieldFormat.check(&ctx(), &bare, Some(track), &album, Some(&album));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].severity, Severity::Info);
    }

    #[test]
    fn test_performer_order() {
        let album = Album::new("A");
        let check = |t: &Track| PerformerOrder.check(&ctx(), t, None, &album, None);

        let good = Track::new(1, 1, "x")
            .with_artist(Artist::composer("Brahms"))
            .with_artist(Artist::soloist("Krystian Zimerman"))
            .with_artist(Artist::ensemble("Berliner Philharmoniker"))
            .with_artist(Artist::new("Someone", Role::Unknown))
            .with_artist(Artist::conductor("Simon Rattle"));
        assert!(check(&good).is_empty());

        let reversed = Track::new(1, 2, "x")
            .with_artist(Artist::conductor("Simon Rattle"))
            .with_artist(Artist::soloist("Krystian Zimerman"));
        let issues = check(&reversed);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);

        let none = Track::new(1, 3, "x").with_artist(Artist::composer("Brahms"));
        assert_eq!(check(&none)[0].severity, Severity::Error);
    }

    #[test]
    fn test_arranger_credit() {
        let album = Album::new("A");
        let check = |title: &str| {
            let track = Track::new(1, 1, title)
                .with_artist(Artist::composer("J.S. Bach"))
                .with_artist(Artist::arranger("Ferruccio Busoni"));
            ArrangerCredit.check(&ctx(), &track, None, &album, None)
        };

        assert!(check("Chaconne in D minor (arr. Busoni)").is_empty());
        assert!(check("Chaconne, transcribed by Busoni").is_empty());
        assert_eq!(check("Chaconne in D minor").len(), 1);
        assert_eq!(check("Chaconne (arr. for piano)").len(), 1);
    }

    fn recital(guest_titles: &[&str]) -> Album {
        let mut album = Album::new("Lieder");
        for n in 1..=6u32 {
            let mut track = Track::new(1, n, format!("Song {}", n))
                .with_artist(Artist::soloist("Dietrich Fischer-Dieskau"));
            if let Some(title) = guest_titles.get(n as usize - 1) {
                track.title = title.to_string();
                track = track.with_artist(Artist::soloist("Gerald Moore"));
            }
            album = album.with_track(track);
        }
        album
    }

    #[test]
    fn test_guest_artists() {
        // One of six tracks, threshold two
        let issues = GuestArtists.check(&ctx(), &recital(&["Song 1"]), None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].track, 1);
        assert!(issues[0].message.contains("Gerald Moore"));

        let marked = GuestArtists.check(&ctx(), &recital(&["Song 1 (with Gerald Moore)"]), None);
        assert!(marked.is_empty());

        let regular = GuestArtists.check(&ctx(), &recital(&["Song 1", "Song 2"]), None);
        assert!(regular.is_empty());
    }

    #[test]
    fn test_guest_skips_short_albums() {
        assert!(GuestArtists.check(&ctx(), &beethoven(), None).is_empty());
    }
}
