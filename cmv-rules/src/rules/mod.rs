//! Rule library
//!
//! One module per rule family. [`install`] registers every rule in the
//! canonical order; the registry, not the module layout, decides what runs.

pub mod accuracy;
pub mod artists;
pub mod composer;
pub mod dates;
pub mod formatting;
pub mod numbering;
pub mod opus;
pub mod structure;

use crate::registry::RuleRegistry;
use cmv_common::{Album, Artist};

/// Register the full library
pub fn install(registry: &mut RuleRegistry) {
    registry
        // Structure and filesystem
        .register_album(structure::NoArchives)
        .register_album(structure::NestedFolders)
        .register_album(structure::DiscFolderPadding)
        .register_album(structure::LeadingSpaces)
        // Numbering and required tags
        .register_album(numbering::TrackNumbering)
        .register_album(numbering::MultiDiscNumbering)
        .register_album(numbering::RequiredTags)
        // Composer naming
        .register_album(composer::ComposerInFolderName)
        .register_album(composer::FullComposerName)
        // Accuracy against the reference
        .register_album(accuracy::AlbumTitleAccuracy)
        .register_album(accuracy::TagAccuracy)
        .register_album(accuracy::RecordLabelAccuracy)
        .register_album(accuracy::RecordLabelPresent)
        // Formatting
        .register_album(formatting::CharacterEncoding)
        .register_album(formatting::Capitalization)
        .register_album(formatting::CapitalizationVsReference)
        .register_album(formatting::CombinedTags)
        .register_album(formatting::DiscNumberInAlbumTitle)
        // Years
        .register_album(dates::RecordingDate)
        .register_album(dates::YearUsage)
        // Artists
        .register_album(artists::AlbumArtistTag)
        .register_album(artists::GuestArtists);

    registry
        .register_track(composer::ComposerNotInTitle)
        .register_track(accuracy::FilenameMatchesTitle)
        .register_track(artists::ArtistFieldFormat)
        .register_track(artists::PerformerOrder)
        .register_track(artists::ArrangerCredit)
        .register_track(opus::CatalogueNumbers);
}

/// Each distinct artist name with the track it first appears on
///
/// Album artists come first with track 0, then track artists in album
/// order. Names are compared trimmed and case-sensitively.
pub(crate) fn distinct_artists(album: &Album) -> Vec<(u32, &Artist)> {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    let tagged = album
        .album_artists
        .iter()
        .map(|a| (0, a))
        .chain(album.tracks.iter().flat_map(|t| t.artists.iter().map(move |a| (t.number, a))));
    for (track, artist) in tagged {
        let name = artist.name.trim();
        if name.is_empty() || seen.contains(&name) {
            continue;
        }
        seen.push(name);
        out.push((track, artist));
    }
    out
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for rule tests

    use crate::rule::CheckContext;
    use cmv_common::{Album, Artist, Track};

    pub fn ctx() -> CheckContext {
        CheckContext::new(2024)
    }

    /// One-track Beethoven album with clean metadata
    pub fn beethoven() -> Album {
        Album::new("Beethoven - Symphony No. 5 [1963]")
            .with_year(1963)
            .with_track(
                Track::new(1, 1, "Symphony No. 5, Op. 67")
                    .with_artist(Artist::composer("Ludwig van Beethoven"))
                    .with_artist(Artist::ensemble("Berlin Philharmonic"))
                    .with_path("01 - Symphony No. 5.flac"),
            )
    }
}
