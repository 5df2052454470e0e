//! Album model

use super::artist::{Artist, Role};
use super::track::Track;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Conventional album artist for compilations
pub const VARIOUS_ARTISTS: &str = "Various Artists";

/// Release-specific metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub catalog_number: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
}

impl Edition {
    /// Non-blank label
    pub fn label(&self) -> Option<&str> {
        non_blank(self.label.as_deref())
    }

    /// Non-blank catalog number
    pub fn catalog_number(&self) -> Option<&str> {
        non_blank(self.catalog_number.as_deref())
    }

    /// Edition year, treating 0 as unset
    pub fn year(&self) -> Option<u32> {
        self.year.filter(|y| *y > 0)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// A release: titled collection of tracks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    /// Original (recording) year
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub edition: Option<Edition>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Empty means the album artist tag is unset
    #[serde(default)]
    pub album_artists: Vec<Artist>,
}

impl Album {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn with_edition(mut self, edition: Edition) -> Self {
        self.edition = Some(edition);
        self
    }

    pub fn with_folder_name(mut self, folder_name: impl Into<String>) -> Self {
        self.folder_name = Some(folder_name.into());
        self
    }

    pub fn with_album_artist(mut self, artist: Artist) -> Self {
        self.album_artists.push(artist);
        self
    }

    /// Album year, treating 0 as unset
    pub fn year(&self) -> Option<u32> {
        self.year.filter(|y| *y > 0)
    }

    pub fn edition_year(&self) -> Option<u32> {
        self.edition.as_ref().and_then(Edition::year)
    }

    /// Distinct disc numbers, ascending
    pub fn disc_numbers(&self) -> BTreeSet<u32> {
        self.tracks.iter().map(|t| t.disc).collect()
    }

    pub fn disc_count(&self) -> u32 {
        self.disc_numbers().iter().next_back().copied().unwrap_or(0)
    }

    pub fn is_multi_disc(&self) -> bool {
        self.disc_numbers().len() > 1 || self.disc_count() > 1
    }

    /// Track numbers grouped by disc, in album order
    pub fn tracks_by_disc(&self) -> Vec<(u32, Vec<u32>)> {
        let mut discs: Vec<(u32, Vec<u32>)> = Vec::new();
        for disc in self.disc_numbers() {
            let numbers = self
                .tracks
                .iter()
                .filter(|t| t.disc == disc)
                .map(|t| t.number)
                .collect();
            discs.push((disc, numbers));
        }
        discs
    }

    /// Map from `(disc, number)` to track; the first track wins on duplicates
    pub fn track_index(&self) -> HashMap<(u32, u32), &Track> {
        let mut index = HashMap::with_capacity(self.tracks.len());
        for track in &self.tracks {
            index.entry(track.key()).or_insert(track);
        }
        index
    }

    pub fn track_at(&self, disc: u32, number: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.disc == disc && t.number == number)
    }

    pub fn album_artist_is_set(&self) -> bool {
        self.album_artists.iter().any(|a| !a.name.trim().is_empty())
    }

    pub fn is_various_artists(&self) -> bool {
        let various = VARIOUS_ARTISTS.to_lowercase();
        self.album_artists
            .iter()
            .any(|a| a.name.trim().to_lowercase() == various)
            || self.title.to_lowercase().contains(&various)
    }

    /// Composer names in order of first appearance with their track counts
    pub fn composer_frequency(&self) -> Vec<(&str, usize)> {
        self.role_frequency(|a| a.role == Role::Composer)
    }

    /// Performer names in order of first appearance with their track counts
    pub fn performer_frequency(&self) -> Vec<(&str, usize)> {
        self.role_frequency(Artist::is_performer)
    }

    fn role_frequency(&self, pred: impl Fn(&Artist) -> bool) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for track in &self.tracks {
            let mut seen_on_track: Vec<&str> = Vec::new();
            for artist in track.artists.iter().filter(|a| pred(a)) {
                let name = artist.name.trim();
                if name.is_empty() || seen_on_track.contains(&name) {
                    continue;
                }
                seen_on_track.push(name);
                match counts.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((name, 1)),
                }
            }
        }
        counts
    }

    /// Most frequent composers; ties are all returned, in order of first appearance
    pub fn dominant_composers(&self) -> Vec<&str> {
        let counts = self.composer_frequency();
        let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
        counts
            .into_iter()
            .filter(|(_, c)| max > 0 && *c == max)
            .map(|(name, _)| name)
            .collect()
    }

    /// Parse a JSON album descriptor
    ///
    /// Disc and track numbers start at 1; anything else is rejected here
    /// rather than reported by rules.
    pub fn from_json(json: &str) -> Result<Self> {
        let album: Album = serde_json::from_str(json)?;
        if let Some(track) = album.tracks.iter().find(|t| t.disc == 0 || t.number == 0) {
            return Err(Error::InvalidInput(format!(
                "track '{}' has disc {} number {}; both must be at least 1",
                track.title, track.disc, track.number
            )));
        }
        Ok(album)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
